//! epimap API Server
//!
//! Run with: cargo run --bin epimap
//!
//! # Configuration
//!
//! Loaded from config.toml with environment overrides:
//! - `EPIMAP_DATA_DIR`: Snapshot CSV directory (default: ./data)
//! - `EPIMAP_API_HOST`: Host to bind to (default: 0.0.0.0)
//! - `EPIMAP_API_PORT`: Port to listen on (default: 8082)
//! - `EPIMAP_LOG_LEVEL` / `EPIMAP_LOG_FORMAT`: Logging overrides
//! - `RUST_LOG`: Full tracing filter (takes precedence)

use epimap::api::{serve, ApiConfig, AppState};
use epimap::config::Config;
use epimap::snapshot::SnapshotStore;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_default();
    init_tracing(&config);

    tracing::info!("Starting epimap API server v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Data directory: {}", config.data.dir);

    let store = Arc::new(SnapshotStore::new(&config.data.dir));

    match store.labels() {
        Ok(labels) if labels.is_empty() => {
            tracing::warn!(
                "No snapshot files found in {} (expected <MM-YYYY>.csv files)",
                config.data.dir
            );
        }
        Ok(labels) => {
            tracing::info!("Found {} snapshots: {:?}", labels.len(), labels);
        }
        Err(e) => {
            tracing::warn!("Data directory not readable yet: {}", e);
        }
    }

    let api_config = ApiConfig::new(config.api.host.clone(), config.api.port);
    let state = AppState::new(Arc::clone(&store), api_config.clone());

    serve(state, &api_config).await?;

    tracing::info!("epimap API server stopped");
    Ok(())
}

/// Initialize tracing from the logging config
fn init_tracing(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("epimap={},tower_http=info", config.logging.level).into()
    });

    let registry = tracing_subscriber::registry().with(filter);

    if config.logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
