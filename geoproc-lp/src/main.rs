//! Location Processor (geoproc-lp) - Main entry point
//!
//! Batch ingestion service for geolocation samples. Runs without a store
//! when none is configured or reachable.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use geoproc_lp::config::{Config, ConfigOverrides};
use geoproc_lp::store::{redis::redact_url, LocationStore, Persister, RedisLocationStore};
use geoproc_lp::{build_router, AppState};

/// Command-line arguments for geoproc-lp
#[derive(Parser, Debug)]
#[command(name = "geoproc-lp")]
#[command(about = "Location batch processing microservice")]
#[command(version)]
struct Args {
    /// Path to the TOML configuration file
    #[arg(short, long, env = "GEOPROC_CONFIG")]
    config: Option<PathBuf>,

    /// Address to listen on
    #[arg(short, long, env = "GEOPROC_BIND_ADDR")]
    bind_addr: Option<String>,

    /// Redis URL for sample persistence (empty disables persistence)
    #[arg(long, env = "REDIS_URL")]
    redis_url: Option<String>,

    /// Worker pool capacity
    #[arg(long, env = "GEOPROC_MAX_WORKERS")]
    max_workers: Option<usize>,

    /// Largest accepted batch
    #[arg(long, env = "GEOPROC_MAX_BATCH_SIZE")]
    max_batch_size: Option<usize>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "GEOPROC_LOG_LEVEL")]
    log_level: Option<String>,
}

impl From<&Args> for ConfigOverrides {
    fn from(args: &Args) -> Self {
        Self {
            bind_addr: args.bind_addr.clone(),
            redis_url: args.redis_url.clone(),
            max_workers: args.max_workers,
            max_batch_size: args.max_batch_size,
            log_level: args.log_level.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = Config::load(args.config.as_deref(), ConfigOverrides::from(&args))
        .await
        .context("Failed to load configuration")?;

    // RUST_LOG wins over the configured level
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("geoproc_lp={0},tower_http={0}", config.log_level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting Location Processor (geoproc-lp) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );
    match &config.source {
        Some(path) => info!("Configuration file: {}", path.display()),
        None => info!("No configuration file, using defaults and overrides"),
    }

    let persister = Persister::new(
        connect_store(&config).await,
        config.persist_timeout,
        config.key_ttl,
    );
    info!(
        "Persistence: {} (ttl {}s, timeout {}ms)",
        persister.provider_name(),
        config.key_ttl.as_secs(),
        config.persist_timeout.as_millis()
    );

    let bind_addr = config.bind_addr.clone();
    info!(
        "Worker pool capacity {}, max batch size {}",
        config.max_workers, config.max_batch_size
    );

    let state = AppState::new(config, persister);
    let app = build_router(state.clone());

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", bind_addr))?;
    info!("geoproc-lp listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(state))
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Connect to the configured store, degrading to no persistence on failure
async fn connect_store(config: &Config) -> Option<Arc<dyn LocationStore>> {
    let Some(url) = config.redis_url.as_deref() else {
        info!("No Redis URL configured, running without persistence");
        return None;
    };

    let store = match RedisLocationStore::connect(url, config.store_connect_timeout).await {
        Ok(store) => store,
        Err(e) => {
            warn!(
                "Redis connection to {} failed (continuing without persistence): {}",
                redact_url(url),
                e
            );
            return None;
        }
    };

    match tokio::time::timeout(config.store_connect_timeout, store.ping()).await {
        Ok(Ok(())) => {
            info!("✓ Connected to Redis at {}", redact_url(url));
            Some(Arc::new(store))
        }
        Ok(Err(e)) => {
            warn!("Redis PING failed (continuing without persistence): {}", e);
            None
        }
        Err(_) => {
            warn!("Redis PING timed out (continuing without persistence)");
            None
        }
    }
}

/// Graceful shutdown signal handler
///
/// Closes the worker pool once a signal arrives so that batches still
/// arriving during the drain get 503 instead of starting new work.
async fn shutdown_signal(state: AppState) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }

    state.worker_pool().close();
}
