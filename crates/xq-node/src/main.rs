//! # Cross-Ledger Query Node
//!
//! Runs the query gateway with both light-client backends in one process.
//!
//! ## Startup Sequence
//!
//! 1. Load configuration (file, then environment)
//! 2. Install the log subscriber
//! 3. Build and wire services
//! 4. Spawn the event logger
//! 5. Wait for Ctrl-C, then shut down

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use shared_bus::EventFilter;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use xq_node::{EventLogger, NodeConfig, ServiceContainer};

/// The node runtime.
struct NodeRuntime {
    container: Arc<ServiceContainer>,
    shutdown_tx: tokio::sync::watch::Sender<bool>,
    shutdown_rx: tokio::sync::watch::Receiver<bool>,
}

impl NodeRuntime {
    fn new(config: NodeConfig) -> Result<Self> {
        let container =
            Arc::new(ServiceContainer::new(config).context("Failed to wire services")?);
        let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
        Ok(Self {
            container,
            shutdown_tx,
            shutdown_rx,
        })
    }

    fn start(&self) {
        info!("===========================================");
        info!("  Cross-Ledger Query Node v{}", env!("CARGO_PKG_VERSION"));
        info!("===========================================");

        let logger = EventLogger::new(self.container.bus.subscribe(EventFilter::all()));
        let mut shutdown = self.shutdown_rx.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = logger.run() => {}
                _ = shutdown.changed() => {
                    info!("[event] Shutdown signal received");
                }
            }
        });

        let config = &self.container.config;
        info!("Gateway: {:?}", config.gateway.gateway_address);
        info!("Push-compute light client: {:?}", config.principals.push_compute);
        info!("Node-operator light client: {:?}", config.principals.node_operator);
        info!("Relayers: {}", config.relayers.len());
    }

    async fn shutdown(&self) {
        info!("Initiating graceful shutdown...");
        if let Err(e) = self.shutdown_tx.send(true) {
            error!("Failed to send shutdown signal: {}", e);
        }
        tokio::time::sleep(Duration::from_millis(200)).await;

        let ledger = self.container.ledger.read();
        info!(
            queries = ledger.nonce(),
            fees = %ledger.collected_fees(),
            "Shutdown complete"
        );
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = NodeConfig::load().context("Failed to load configuration")?;

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::new(&config.runtime.log_level))
        .with_target(true)
        .with_thread_ids(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let runtime = NodeRuntime::new(config)?;
    runtime.start();

    info!("Node is running. Press Ctrl+C to stop.");
    tokio::signal::ctrl_c().await?;

    runtime.shutdown().await;
    Ok(())
}
