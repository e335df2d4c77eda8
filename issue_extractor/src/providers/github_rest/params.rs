use chrono::SecondsFormat;

use crate::models::request_params::IssueRequestParams;

/// Fixed page size requested from the issues endpoint. A response shorter
/// than this signals the final page.
pub const PAGE_SIZE: usize = 100;

/// Builds the query string for one page of the issues listing.
///
/// `state=all` so closed issues are captured, sorted ascending by creation
/// time so pagination is stable across the run.
pub fn construct_params(params: &IssueRequestParams, page: u32) -> Vec<(String, String)> {
    vec![
        ("state".to_string(), "all".to_string()),
        (
            "since".to_string(),
            params.since.to_rfc3339_opts(SecondsFormat::Secs, true),
        ),
        ("per_page".to_string(), PAGE_SIZE.to_string()),
        ("page".to_string(), page.to_string()),
        ("sort".to_string(), "created".to_string()),
        ("direction".to_string(), "asc".to_string()),
    ]
}
