use anyhow::Result;
use clap::Parser;
use issue_extractor::io::s3::S3RawStore;
use issue_extractor::models::batch::BatchDate;
use shared_utils::config::AppConfig;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Loads the batch date's raw document into the landing table, replacing any
/// rows from a previous run for the same date.
#[derive(Parser)]
#[command(version, about = "Raw issues loader")]
struct Cli {
    /// Batch date to load (YYYY-MM-DD)
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
    warehouse::db::schema::ensure_landing_schema(&pool).await?;

    let store = S3RawStore::new(&config.object_store);
    let inserted = warehouse::landing::load_raw(&pool, &store, cli.date).await?;

    info!(date = %cli.date, inserted, "load finished");
    Ok(())
}
