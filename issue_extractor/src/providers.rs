//! Provider abstraction for issue sources.
//!
//! This module defines the [`IssueProvider`] trait, which serves as a unified
//! interface for fetching issue records from any code-hosting vendor.
//!
//! Each concrete provider implementation (currently the GitHub REST API in
//! [`github_rest`]) handles vendor-specific pagination and rate-limit logic
//! and returns the records verbatim as JSON values, so that no upstream
//! schema has to be assumed before the transform stage.
//!
//! The trait is designed for async usage and supports dynamic dispatch
//! (`dyn IssueProvider`).

pub mod errors;
pub mod github_rest;

use async_trait::async_trait;
use serde_json::Value;

use crate::models::request_params::IssueRequestParams;
use crate::providers::errors::ProviderError;

#[async_trait]
pub trait IssueProvider {
    /// Fetches the complete, order-preserving list of records matching
    /// `params`, oldest-created first, with no duplicates across pages.
    async fn fetch_issues(&self, params: IssueRequestParams) -> Result<Vec<Value>, ProviderError>;
}
