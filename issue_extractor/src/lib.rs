//! Extraction stage of the issues pipeline.
//!
//! Pulls issue records from the upstream API through an [`IssueProvider`]
//! implementation and lands them in the raw object store through a
//! [`RawStore`] implementation.
//!
//! [`IssueProvider`]: providers::IssueProvider
//! [`RawStore`]: io::sink::RawStore

pub mod io;
pub mod models;
pub mod providers;
