//! Service entry point.
//!
//! Startup order: CLI args → config → logging → metrics → clients → listener.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use searoute_api::cache::{NullCache, RedisSegmentCache, SegmentCache};
use searoute_api::config::{load_config, ServiceConfig};
use searoute_api::http::{AppState, HttpServer};
use searoute_api::lifecycle::{signals, Shutdown};
use searoute_api::lookup::SegmentLookupService;
use searoute_api::observability::{logging, metrics};
use searoute_api::provider::{HttpRouteProvider, RouteProvider};
use searoute_api::store::{ClickHouseStore, DisabledStore, SegmentStore};

#[derive(Parser)]
#[command(name = "searoute-api")]
#[command(about = "Sea-route segment lookup service", long_about = None)]
struct Args {
    /// Path to the TOML configuration file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => ServiceConfig::default(),
    };

    logging::init(&config.observability.log_level);

    tracing::info!(
        bind_address = %config.listener.bind_address,
        redis_enabled = config.redis.enabled,
        clickhouse_enabled = config.clickhouse.enabled,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    // Cache stage: disabled or unreachable degrades to the null cache.
    // Cache trouble must never block the read path, startup included.
    let cache: Arc<dyn SegmentCache> = if config.redis.enabled {
        match RedisSegmentCache::connect(&config.redis).await {
            Ok(cache) => Arc::new(cache),
            Err(e) => {
                tracing::warn!(error = %e, "Redis unreachable, continuing without distributed cache");
                Arc::new(NullCache)
            }
        }
    } else {
        tracing::info!("Distributed cache disabled by configuration");
        Arc::new(NullCache)
    };

    let store: Arc<dyn SegmentStore> = if config.clickhouse.enabled {
        Arc::new(ClickHouseStore::new(&config.clickhouse)?)
    } else {
        tracing::info!("Durable store disabled by configuration");
        Arc::new(DisabledStore)
    };

    let provider: Arc<dyn RouteProvider> = Arc::new(HttpRouteProvider::new(&config.provider)?);

    let lookup = Arc::new(SegmentLookupService::new(
        cache,
        store,
        std::time::Duration::from_secs(config.cache.positive_ttl_secs),
        std::time::Duration::from_secs(config.cache.negative_ttl_secs),
    ));

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        signals::wait_for_signal().await;
        shutdown.trigger();
    });

    let server = HttpServer::new(config, AppState::new(lookup, provider));
    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
