use chrono::{TimeZone, Utc};
use issue_extractor::models::request_params::IssueRequestParams;
use issue_extractor::providers::IssueProvider;
use issue_extractor::providers::errors::ProviderError;
use issue_extractor::providers::github_rest::provider::GithubProvider;
use serde_json::{Value, json};
use shared_utils::config::GithubConfig;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ISSUES_PATH: &str = "/repos/apache/airflow/issues";

fn test_config(server: &MockServer) -> GithubConfig {
    GithubConfig {
        api_base: server.uri(),
        repo: "apache/airflow".to_string(),
        token: None,
    }
}

fn params() -> IssueRequestParams {
    IssueRequestParams {
        since: Utc.with_ymd_and_hms(2023, 1, 15, 0, 0, 0).unwrap(),
        limit: None,
    }
}

fn issue(id: i64) -> Value {
    json!({
        "id": id,
        "state": "open",
        "title": format!("issue {id}"),
        "comments": 2,
        "created_at": "2023-01-15T08:30:00Z",
        "user": {
            "id": id % 7,
            "login": format!("user{}", id % 7),
            "type": "User",
            "url": format!("https://api.github.com/users/user{}", id % 7)
        }
    })
}

fn issues(ids: std::ops::RangeInclusive<i64>) -> Vec<Value> {
    ids.map(issue).collect()
}

fn ids(records: &[Value]) -> Vec<i64> {
    records.iter().map(|r| r["id"].as_i64().unwrap()).collect()
}

#[tokio::test]
async fn full_pages_are_followed_until_a_short_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(ISSUES_PATH))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(issues(1..=100)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(ISSUES_PATH))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(issues(101..=140)))
        .expect(1)
        .mount(&server)
        .await;

    let provider = GithubProvider::new(&test_config(&server)).unwrap();
    let result = provider.fetch_issues(params()).await.unwrap();

    // Order preserved across pages, no duplicates, nothing requested past
    // the short page (an unexpected page 3 request would 404 and fail).
    assert_eq!(ids(&result), (1..=140).collect::<Vec<_>>());
}

#[tokio::test]
async fn request_carries_the_listing_query_contract() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(ISSUES_PATH))
        .and(query_param("state", "all"))
        .and(query_param("since", "2023-01-15T00:00:00Z"))
        .and(query_param("per_page", "100"))
        .and(query_param("page", "1"))
        .and(query_param("sort", "created"))
        .and(query_param("direction", "asc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(issues(1..=5)))
        .expect(1)
        .mount(&server)
        .await;

    let provider = GithubProvider::new(&test_config(&server)).unwrap();
    let result = provider.fetch_issues(params()).await.unwrap();

    assert_eq!(result.len(), 5);
}

#[tokio::test]
async fn empty_first_page_yields_no_records() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(ISSUES_PATH))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(Vec::<Value>::new()))
        .expect(1)
        .mount(&server)
        .await;

    let provider = GithubProvider::new(&test_config(&server)).unwrap();
    let result = provider.fetch_issues(params()).await.unwrap();

    assert!(result.is_empty());
}

#[tokio::test]
async fn limit_truncates_mid_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(ISSUES_PATH))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(issues(1..=5)))
        .expect(1)
        .mount(&server)
        .await;

    let provider = GithubProvider::new(&test_config(&server)).unwrap();
    let result = provider
        .fetch_issues(IssueRequestParams {
            limit: Some(3),
            ..params()
        })
        .await
        .unwrap();

    assert_eq!(ids(&result), vec![1, 2, 3]);
}

#[tokio::test]
async fn rate_limited_page_is_retried_and_delivered_exactly_once() {
    let server = MockServer::start().await;

    // First request for page 1 is rejected with the rate-limit marker and a
    // reset time already in the past; the retry must hit the same page.
    Mock::given(method("GET"))
        .and(path(ISSUES_PATH))
        .and(query_param("page", "1"))
        .respond_with(
            ResponseTemplate::new(403)
                .insert_header("x-ratelimit-reset", "0")
                .set_body_string("API rate limit exceeded for 127.0.0.1"),
        )
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(ISSUES_PATH))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(issues(1..=4)))
        .expect(1)
        .mount(&server)
        .await;

    let provider = GithubProvider::new(&test_config(&server)).unwrap();
    let result = provider.fetch_issues(params()).await.unwrap();

    assert_eq!(ids(&result), vec![1, 2, 3, 4]);
}

#[tokio::test]
async fn forbidden_without_rate_limit_marker_is_fatal() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(ISSUES_PATH))
        .respond_with(ResponseTemplate::new(403).set_body_string("Resource not accessible"))
        .expect(1)
        .mount(&server)
        .await;

    let provider = GithubProvider::new(&test_config(&server)).unwrap();
    let err = provider.fetch_issues(params()).await.unwrap_err();

    assert!(matches!(err, ProviderError::Api { status, .. } if status.as_u16() == 403));
}

#[tokio::test]
async fn server_error_aborts_without_partial_result() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(ISSUES_PATH))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(issues(1..=100)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(ISSUES_PATH))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .expect(1)
        .mount(&server)
        .await;

    let provider = GithubProvider::new(&test_config(&server)).unwrap();
    let err = provider.fetch_issues(params()).await.unwrap_err();

    assert!(matches!(err, ProviderError::Api { status, .. } if status.as_u16() == 500));
}
