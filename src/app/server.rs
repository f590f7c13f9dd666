use crate::adapters::JsonFileStore;
use crate::app::routes::{build_router, AppState, CREATE_DOCUMENT_PATH};
use crate::core::admission::AdmissionController;
use crate::core::ingest::IngestService;
use crate::core::ticker::WindowTicker;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::monitor::IngestMonitor;
use std::sync::Arc;
use tokio::net::TcpListener;

/// A wired service: state for the router plus the running window ticker.
pub struct IngestApp {
    pub state: AppState,
    pub ticker: WindowTicker,
}

impl IngestApp {
    /// Opens the store, starts the ticker and assembles the service.
    pub async fn build<C: ConfigProvider>(config: &C) -> Result<Self> {
        let store = JsonFileStore::open(config.storage_path()).await?;
        let monitor = Arc::new(IngestMonitor::new());
        let admission = AdmissionController::new(config.request_limit());
        let ticker = WindowTicker::start(admission.clone(), Arc::clone(&monitor), config.window());
        let service = IngestService::new(admission, Arc::new(store), monitor);

        Ok(Self {
            state: AppState::new(service),
            ticker,
        })
    }

    pub fn monitor(&self) -> &Arc<IngestMonitor> {
        self.state.service().monitor()
    }
}

pub async fn serve(listener: TcpListener, state: AppState) -> Result<()> {
    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

/// Binds the configured address and serves until Ctrl-C.
pub async fn run<C: ConfigProvider>(config: &C, log_stats: bool) -> Result<()> {
    let app = IngestApp::build(config).await?;
    let monitor = Arc::clone(app.monitor());

    let bind_addr = config.bind_address();
    let listener = TcpListener::bind(&bind_addr).await?;
    tracing::info!(
        "🚀 Listening on {} (POST {}), limit {} documents per {:?}",
        bind_addr,
        CREATE_DOCUMENT_PATH,
        config.request_limit(),
        app.ticker.period()
    );

    serve(listener, app.state).await?;

    tracing::info!("Server stopped");
    if log_stats {
        monitor.log_final_stats();
    }
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
