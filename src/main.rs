//! Awards Submission Intake Gateway (service binary)
//!
//! # Architecture Overview
//!
//! ```text
//!                        ┌──────────────────────────────────────────────┐
//!                        │               INTAKE GATEWAY                  │
//!                        │                                               │
//!   Browser form         │  ┌──────────┐   ┌───────────┐   ┌─────────┐  │
//!   ────────────────────►│  │   cors   │──►│ handlers  │──►│  store  │  │
//!                        │  │allow-list│   │ 3 gates   │   │ traits  │  │
//!                        │  └──────────┘   └─────┬─────┘   └────┬────┘  │
//!                        │                       │              │        │
//!                        │                 ┌─────▼─────┐  ┌─────▼─────┐ │
//!                        │                 │ security  │  │ memory /  │ │
//!                        │                 │ id + rate │  │ redis     │ │
//!                        │                 └───────────┘  └───────────┘ │
//!                        │                                               │
//!   Reviewer             │  ┌──────────┐   ┌───────────┐                │
//!   ────────────────────►│  │ admin    │──►│ review    │                │
//!                        │  │ auth     │   │ handlers  │                │
//!                        │  └──────────┘   └───────────┘                │
//!                        └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use awards_intake::config::loader::load_config;
use awards_intake::http::server::AppState;
use awards_intake::lifecycle::shutdown::wait_for_signal;
use awards_intake::observability::metrics;
use awards_intake::{HttpServer, IntakeConfig, Shutdown};

#[derive(Parser, Debug)]
#[command(name = "awards-intake", about = "Submission intake gateway")]
struct Args {
    /// Path to a TOML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "awards_intake=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("awards-intake v{} starting", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => {
            tracing::warn!("No --config given, using built-in defaults");
            IntakeConfig::default()
        }
    };

    tracing::info!(
        bind_address = %config.listener.bind_address,
        shared_counters = config.storage.redis_url.is_some(),
        admin_enabled = config.admin.enabled,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;

    let state = AppState::new(config).await?;
    let server = HttpServer::new(state);

    let shutdown = Shutdown::new();
    let receiver = shutdown.subscribe();
    tokio::spawn(async move {
        wait_for_signal().await;
        shutdown.trigger();
    });

    server.run(listener, receiver).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
