//! Prompt Mock Server - Main Entry Point
//! HTTP prompt API + single sequential worker

mod config;

use anyhow::Result;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::{DaemonConfig, LogFormat};
use promptmock_api_http::HttpServer;
use promptmock_core::application::worker::constants::WORKER_SHUTDOWN_TIMEOUT;
use promptmock_core::application::{shutdown_channel, JobQueueManager, Worker};
use promptmock_core::port::{SystemTimeProvider, UuidProvider};
use promptmock_infra_system::{FileOutputProducer, UniformDelay};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Load configuration (before logging, it picks the log format)
    let config = DaemonConfig::from_env()?;

    // 2. Initialize logging
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("promptmock=info,tower_http=info"))?;

    match config.log_format {
        LogFormat::Json => {
            // Production: JSON structured logging
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json())
                .init();
        }
        LogFormat::Pretty => {
            // Development: Pretty formatting with colors
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().pretty())
                .init();
        }
    }

    info!("Prompt mock server v{} starting...", VERSION);
    info!(
        source_image = %config.source_image.display(),
        output_dir = %config.output_dir.display(),
        min_delay_secs = config.min_delay_secs,
        max_delay_secs = config.max_delay_secs,
        "Configuration loaded"
    );
    if !config.source_image.exists() {
        tracing::warn!(
            source_image = %config.source_image.display(),
            "Source image missing; jobs will complete without output artifacts"
        );
    }

    // 3. Setup dependencies (DI wiring)
    let manager = Arc::new(JobQueueManager::new(
        Arc::new(UuidProvider),
        Arc::new(SystemTimeProvider),
    ));
    let output_producer = Arc::new(FileOutputProducer::new(
        config.source_image.clone(),
        config.output_dir.clone(),
    ));
    let delay = Arc::new(UniformDelay::new(
        config.min_delay_secs,
        config.max_delay_secs,
    )?);

    let (shutdown_tx, shutdown_rx) = shutdown_channel();

    // 4. Start Worker (job processing loop)
    info!("Starting worker...");
    let worker = Worker::new(manager.clone(), output_producer, delay);
    let worker_handle = tokio::spawn(async move {
        if let Err(e) = worker.run(shutdown_rx).await {
            tracing::error!(error = ?e, "Worker failed");
        }
    });

    // 5. Start HTTP server
    let server = HttpServer::new(config.http.clone(), manager);
    let server_handle = server
        .start(shutdown_tx.token())
        .await
        .map_err(|e| anyhow::anyhow!("HTTP server start failed: {}", e))?;

    info!(addr = %server_handle.local_addr, "System ready. Waiting for prompts...");
    info!("Press Ctrl+C to shutdown");

    // 6. Wait for shutdown signal
    tokio::signal::ctrl_c().await?;

    info!("Shutdown signal received. Exiting gracefully...");

    // 7. Graceful shutdown
    shutdown_tx.shutdown();
    let _ = server_handle.join.await;
    if tokio::time::timeout(WORKER_SHUTDOWN_TIMEOUT, worker_handle)
        .await
        .is_err()
    {
        tracing::warn!("Worker did not stop in time; abandoning in-flight job");
    }

    info!("Shutdown complete.");

    Ok(())
}
