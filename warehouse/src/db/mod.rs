//! Database utilities for connections and schema setup.
//!
//! This module provides:
//! - [`connection::connect`], which opens a small pool from the configured
//!   connection parameters.
//! - [`schema::ensure_landing_schema`] and
//!   [`schema::ensure_analytics_schema`], the create-if-absent DDL each
//!   stage runs at the start of every invocation.

pub mod connection;
pub mod schema;
