use anyhow::Result;
use clap::Parser;
use issue_extractor::io::s3::S3RawStore;
use issue_extractor::io::sink::RawStore;
use issue_extractor::models::batch::BatchDate;
use issue_extractor::models::request_params::IssueRequestParams;
use issue_extractor::providers::IssueProvider;
use issue_extractor::providers::github_rest::provider::GithubProvider;
use shared_utils::config::AppConfig;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Extracts issues updated on or after the batch date and lands them as one
/// JSON document in the raw object store.
#[derive(Parser)]
#[command(version, about = "GitHub issues extractor")]
struct Cli {
    /// Batch date to extract (YYYY-MM-DD)
    #[arg(long)]
    date: BatchDate,

    /// Cap the number of fetched issues (testing aid)
    #[arg(long)]
    limit: Option<usize>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = AppConfig::from_env()?;

    info!(date = %cli.date, repo = %config.github.repo, "starting extraction");

    let provider = GithubProvider::new(&config.github)?;
    let params = IssueRequestParams {
        since: cli.date.since_timestamp(),
        limit: cli.limit,
    };
    let issues = provider.fetch_issues(params).await?;

    if issues.is_empty() {
        info!(date = %cli.date, "no issues fetched, skipping upload");
        return Ok(());
    }

    let store = S3RawStore::new(&config.object_store);
    store.write(cli.date, &issues).await?;

    Ok(())
}
