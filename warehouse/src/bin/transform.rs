use anyhow::Result;
use clap::Parser;
use issue_extractor::models::batch::BatchDate;
use shared_utils::config::AppConfig;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Projects the batch date's landing rows into the analytics dimension and
/// fact tables.
#[derive(Parser)]
#[command(version, about = "Issues analytics transformer")]
struct Cli {
    /// Batch date to transform (YYYY-MM-DD)
    #[arg(long)]
    date: BatchDate,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = AppConfig::from_env()?;

    let pool = warehouse::db::connection::connect(&config.database).await?;
    warehouse::db::schema::ensure_analytics_schema(&pool).await?;

    let summary = warehouse::transform::run_transform(&pool, cli.date).await?;

    info!(
        date = %cli.date,
        users = summary.users_upserted,
        facts = summary.facts_inserted,
        "transform finished"
    );
    Ok(())
}
