use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode, header};
use secrecy::ExposeSecret;
use serde_json::Value;
use shared_utils::config::GithubConfig;
use tracing::{debug, info, warn};

use crate::models::request_params::IssueRequestParams;
use crate::providers::IssueProvider;
use crate::providers::errors::{ProviderError, ProviderInitError};
use crate::providers::github_rest::params::{PAGE_SIZE, construct_params};

const RATE_LIMIT_RESET_HEADER: &str = "x-ratelimit-reset";

pub struct GithubProvider {
    client: Client,
    issues_url: String,
}

impl GithubProvider {
    /// Creates a new GitHub REST provider from the configured API base,
    /// repository, and optional token.
    pub fn new(config: &GithubConfig) -> Result<Self, ProviderInitError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/vnd.github.v3+json"),
        );
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_static("issue-extractor"),
        );

        match &config.token {
            Some(token) => {
                let mut value =
                    header::HeaderValue::from_str(&format!("token {}", token.expose_secret()))?;
                value.set_sensitive(true);
                headers.insert(header::AUTHORIZATION, value);
            }
            None => {
                warn!("no GITHUB_TOKEN found; unauthenticated rate limits apply (60/hr)");
            }
        }

        let client = Client::builder().default_headers(headers).build()?;

        Ok(Self {
            client,
            issues_url: format!("{}/repos/{}/issues", config.api_base, config.repo),
        })
    }
}

/// How long to sleep before retrying a rate-limited page.
///
/// The upstream declares when its limit window resets as an epoch timestamp;
/// the wait is clamped to non-negative and padded by one second so the retry
/// lands strictly after the reset.
fn backoff_duration(reset_epoch: Option<i64>, now: DateTime<Utc>) -> Duration {
    let reset = reset_epoch.unwrap_or(0);
    Duration::from_secs(((reset - now.timestamp()).max(0) + 1) as u64)
}

#[async_trait]
impl IssueProvider for GithubProvider {
    async fn fetch_issues(&self, params: IssueRequestParams) -> Result<Vec<Value>, ProviderError> {
        let mut all_issues: Vec<Value> = Vec::new();
        let mut page: u32 = 1;

        loop {
            debug!(page, "fetching page");
            let response = self
                .client
                .get(&self.issues_url)
                .query(&construct_params(&params, page))
                .send()
                .await?;

            let status = response.status();

            if status == StatusCode::FORBIDDEN {
                let reset_epoch = response
                    .headers()
                    .get(RATE_LIMIT_RESET_HEADER)
                    .and_then(|v| v.to_str().ok())
                    .and_then(|s| s.parse::<i64>().ok());
                let body = response.text().await?;

                if body.to_lowercase().contains("rate limit") {
                    let wait = backoff_duration(reset_epoch, Utc::now());
                    warn!(seconds = wait.as_secs(), page, "rate limit hit, sleeping");
                    tokio::time::sleep(wait).await;
                    // Retry the same page; nothing was consumed from it.
                    continue;
                }

                return Err(ProviderError::Api {
                    status,
                    message: body,
                });
            }

            if !status.is_success() {
                let message = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unknown API error".to_string());
                return Err(ProviderError::Api { status, message });
            }

            let records: Vec<Value> = response.json().await?;
            if records.is_empty() {
                break;
            }

            let page_len = records.len();
            all_issues.extend(records);
            info!(page, fetched = page_len, total = all_issues.len(), "page complete");

            if let Some(limit) = params.limit {
                if all_issues.len() >= limit {
                    all_issues.truncate(limit);
                    break;
                }
            }

            if page_len < PAGE_SIZE {
                break;
            }

            page += 1;
        }

        Ok(all_issues)
    }
}
