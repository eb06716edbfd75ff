use anyhow::Result;
use batch_translate::{config, report::RunReport, runner, service};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored when not present)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("batch_translate=info".parse()?),
        )
        .init();

    info!("Starting batch translation");

    // Load configuration from environment
    let config = config::Config::from_env()?;
    let translator = service::build_service(&config.backend, config.http_timeout)?;

    // Input read failures abort here with a non-zero exit; per-language
    // failures are already recorded in the outcomes.
    let outcomes = runner::run(&config.run, translator.as_ref()).await?;

    if let Some(report_path) = &config.run.report_path {
        let report = RunReport::new(&config.run.source_language, translator.name(), &outcomes);
        match report.write_to(report_path).await {
            Ok(()) => info!("Run report written to {}", report_path.display()),
            Err(e) => warn!("{:#}", e),
        }
    }

    Ok(())
}
