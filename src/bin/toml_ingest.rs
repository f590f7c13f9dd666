use clap::Parser;
use doc_ingest::config::{ConfigProvider, TomlConfig};
use doc_ingest::utils::error::ErrorSeverity;
use doc_ingest::utils::{logger, validation::Validate};

#[derive(Parser)]
#[command(name = "toml-ingest")]
#[command(about = "Document ingestion service configured from a TOML file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "ingest-config.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override the listening port from config
    #[arg(long)]
    port: Option<u16>,

    /// Override the per-window request limit from config
    #[arg(long)]
    request_limit: Option<usize>,

    /// Print the effective settings and exit without serving
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Load configuration before logging, since it decides the log format
    let mut config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    logger::init_logger(args.verbose || config.verbose(), config.json_logs());
    tracing::info!("📁 Loaded configuration from: {}", args.config);

    // Command line overrides take precedence over the file
    if let Some(port) = args.port {
        config.server.port = Some(port);
        tracing::info!("🔧 Port overridden to: {}", port);
    }
    if let Some(limit) = args.request_limit {
        config.admission.request_limit = Some(limit);
        tracing::info!("🔧 Request limit overridden to: {}", limit);
    }

    // Validate after overrides so they are checked too
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    display_config_summary(&config);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - not binding {}", config.bind_address());
        return Ok(());
    }

    if let Err(e) = doc_ingest::app::run(&config, config.stats_enabled()).await {
        tracing::error!(
            "❌ Service failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

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

/// Logs the effective settings after overrides.
fn display_config_summary(config: &TomlConfig) {
    tracing::info!("📋 Configuration Summary:");
    tracing::info!("   Bind address: {}", config.bind_address());
    tracing::info!("   Storage file: {}", config.storage_path());
    tracing::info!(
        "   Admission: {} documents per {} x {:?}",
        config.request_limit(),
        config.window_length(),
        config.window_unit()
    );
    tracing::info!(
        "   Logging: {}",
        if config.json_logs() { "json" } else { "compact" }
    );
}
