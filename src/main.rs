//! BPMN Review Client
//!
//! Uploads a BPMN file (optional first argument), loads the review
//! suggestions of all three experts and keeps checking the backend's health
//! until Ctrl+C or SIGTERM.

use bpmn_review_client::{
    ApiClient, BpmnStore, Config, ConnectionMonitor, ExpertId, UploadPayload,
};
use std::sync::Arc;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Anything that escapes is logged once here
    if let Err(e) = run().await {
        error!("Global error: {:#}", e);
        return Err(e);
    }
    Ok(())
}

async fn run() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::from_env();
    config.validate()?;
    info!("Configuration loaded: {:?}", config);

    let client = ApiClient::new(&config)?;
    let store = Arc::new(BpmnStore::new(client.clone()));

    // Check once now, then on every interval
    let monitor = ConnectionMonitor::spawn(Arc::new(client), config.health_check_interval());

    if let Some(path) = std::env::args().nth(1) {
        let payload = UploadPayload::from_path(&path).await?;
        match store.upload(payload).await {
            Ok(model) => info!(path = %path, model = %model.as_value(), "BPMN uploaded"),
            Err(e) => warn!(path = %path, error = %e, "BPMN upload failed"),
        }
    }

    for expert in ExpertId::ALL {
        match store.fetch_suggestions(expert).await {
            Ok(suggestions) => info!(
                expert = expert.label(),
                count = suggestions.len(),
                "Suggestions loaded"
            ),
            Err(e) => warn!(expert = expert.label(), error = %e, "Suggestions unavailable"),
        }
    }

    let state = store.snapshot().await;
    for expert in ExpertId::ALL {
        for suggestion in state.suggestions(expert) {
            info!(expert = expert.label(), "{}", suggestion);
        }
    }
    if let Some(message) = &state.error {
        warn!(error = %message, "Last operation failed");
    }

    info!("Monitoring backend connection, press Ctrl+C to exit");
    shutdown_signal().await;

    monitor.stop().await;
    info!("Shutdown complete");
    Ok(())
}

/// Wait for a shutdown signal (Ctrl+C, SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down...");
        },
        _ = terminate => {
            info!("Received SIGTERM, shutting down...");
        },
    }
}
