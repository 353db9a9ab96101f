use anyhow::Result;
use tracing::info;
use transifex_dl::{config::Config, sync, transifex::TransifexClient};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored when absent)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("transifex_dl=info".parse()?),
        )
        .init();

    info!("Starting Transifex translation download");

    let config = Config::from_env()?;
    let client = TransifexClient::new(&config);

    let report = sync::run(&config, &client).await?;

    info!(
        "Done: {} accepted, {} updated, {} skipped, {} removed",
        report.accepted.len(),
        report.updated.len(),
        report.skipped.len(),
        report.removed.len()
    );
    Ok(())
}
