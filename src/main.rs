use clap::Parser;
use doc_ingest::utils::error::ErrorSeverity;
use doc_ingest::utils::{logger, validation::Validate};
use doc_ingest::CliConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // Logging first, so validation failures are reported through tracing too
    logger::init_logger(config.verbose, config.json_logs);

    tracing::info!("Starting doc-ingest service");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // Refuse to start on a bad limit, window or storage path
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    // Serves until Ctrl+C; startup errors map to an exit code by severity
    if let Err(e) = doc_ingest::app::run(&config, config.stats).await {
        tracing::error!(
            "❌ Service failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }

    Ok(())
}
