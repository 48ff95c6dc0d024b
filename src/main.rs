//! Car Registry Service
//!
//! CRUD over users and cars backed by a document store.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ──────────────▶ http::server (request id, trace, metrics, timeout)
//!                          │
//!                          ▼
//!                     api router (method + literal path)
//!                          │
//!                          ▼
//!                     handlers ──▶ api::payload (validation)
//!                          │
//!                          ▼
//!                     store (memory | mongodb)  "users" / "cars"
//!                          │
//!                          ▼
//!                     models::projection (expand car references)
//!     Client Response      │
//!     ◀────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use car_registry::config::{load_config, validated, ConfigError, ServiceConfig, StoreBackend};
use car_registry::http::HttpServer;
use car_registry::lifecycle::{signals, startup, Shutdown};
use car_registry::observability::logging;

#[derive(Debug, Parser)]
#[command(name = "car-registry")]
#[command(about = "HTTP API for users and the cars they reference", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long, env = "CAR_REGISTRY_CONFIG")]
    config: Option<PathBuf>,

    /// Port to listen on.
    #[arg(short, long, env = "PORT")]
    port: Option<u16>,

    /// MongoDB connection string. Selects the MongoDB store.
    #[arg(long, env = "MONGO_URL")]
    mongo_url: Option<String>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long)]
    log_level: Option<String>,
}

impl Cli {
    /// Load the file config (or defaults), layer flags and environment on top,
    /// then validate the merged result.
    fn resolve_config(&self) -> Result<ServiceConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => ServiceConfig::default(),
        };

        if let Some(port) = self.port {
            config.listener.port = port;
        }
        if let Some(url) = &self.mongo_url {
            config.store.backend = StoreBackend::Mongo;
            config.store.url = Some(url.clone());
        }
        if let Some(level) = &self.log_level {
            config.observability.log_level = level.clone();
        }

        validated(config)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = cli.resolve_config()?;

    logging::init(&config.observability)?;

    tracing::info!("car-registry v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address(),
        store = ?config.store.backend,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        let addr = config.observability.metrics_address.parse()?;
        car_registry::observability::metrics::init_metrics(addr)?;
    }

    let store = match startup::connect_store(&config.store).await {
        Ok(store) => store,
        Err(e) => {
            tracing::error!(error = %e, "Store unavailable");
            return Err(e.into());
        }
    };

    let listener = TcpListener::bind(config.listener.bind_address()).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    signals::spawn_signal_handler(shutdown.clone());

    let server = HttpServer::new(&config, store);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
