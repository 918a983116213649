mod config;
mod runner;

use anyhow::Result;
use chrono::Utc;
use tracing_subscriber::EnvFilter;

use nudge_notify::email::EmailTransport;
use nudge_storage::CrmStore;

use crate::runner::{RunOutcome, RunParams};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config/job.toml".to_string());

    let config = config::JobConfig::load(&config_path)?;
    let tz = config.reporting_timezone()?;
    let today = Utc::now().with_timezone(&tz).date_naive();
    tracing::info!(today = %today, timezone = %config.timezone, "nudge-job starting");

    let store = CrmStore::new(&config.db_url).await?;
    let transport = EmailTransport::new(&config.smtp)?;

    let params = RunParams {
        today,
        window_days: config.window_days,
        anchor: config.anchor_weekday()?,
    };

    match runner::run(&store, &transport, &params).await? {
        RunOutcome::Skipped { frequency } => {
            tracing::info!(frequency = %frequency, "Nothing sent: run gated off");
        }
        RunOutcome::NothingToDo => {
            tracing::info!("Nothing sent: due-set empty");
        }
        RunOutcome::Completed { sent, failed } => {
            tracing::info!(sent, failed, "Digest dispatch finished");
        }
    }

    Ok(())
}
