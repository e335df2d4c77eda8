use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Parameters for one extraction run against an issue provider.
///
/// This struct is vendor-agnostic and is the standard input for all
/// [`IssueProvider`](crate::providers::IssueProvider) implementations.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct IssueRequestParams {
    /// Lower bound (inclusive, UTC) on the upstream update timestamp.
    ///
    /// Providers should return every record updated at or after this
    /// instant, oldest-created first.
    pub since: DateTime<Utc>,

    /// Optional cap on the number of returned records.
    ///
    /// When set, the provider stops fetching once this many records have
    /// accumulated and truncates the result to exactly this count. Intended
    /// as a testing aid.
    pub limit: Option<usize>,
}
