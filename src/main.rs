//! API caching demo
//!
//! Polls a JSON endpoint on an interval and serves repeat lookups from an
//! in-process cache until the cached response expires.

use std::env;
use std::time::Duration;

use anyhow::{Context, Result};
use serde_json::Value;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use object_cache::{ObjectCache, ObjectStoreDriver, SharedCache, TimeUnit, Ttl};

const DEFAULT_URL: &str = "http://jsonplaceholder.typicode.com/posts/1";

/// Demo settings, read from the environment.
#[derive(Debug, Clone)]
struct DemoConfig {
    /// Endpoint to fetch
    url: String,
    /// How long a fetched response stays cached
    ttl: Ttl,
    /// Seconds between lookups
    interval: u64,
    /// Stop after this many lookups; run until interrupted when None
    requests: Option<u64>,
}

impl DemoConfig {
    /// # Environment Variables
    /// - `DEMO_URL` - Endpoint (default: jsonplaceholder post #1)
    /// - `DEMO_TTL` - Cache TTL, e.g. `10 seconds` (default: 10 seconds)
    /// - `DEMO_INTERVAL` - Lookup interval in seconds (default: 1)
    /// - `DEMO_REQUESTS` - Number of lookups (default: unlimited)
    fn from_env() -> Self {
        Self {
            url: env::var("DEMO_URL").unwrap_or_else(|_| DEFAULT_URL.to_string()),
            ttl: env::var("DEMO_TTL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(Ttl::Duration(10.0, TimeUnit::Seconds)),
            interval: env::var("DEMO_INTERVAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1),
            requests: env::var("DEMO_REQUESTS")
                .ok()
                .and_then(|v| v.parse().ok()),
        }
    }
}

#[derive(Debug, Default)]
struct Counters {
    api_hits: u64,
    cache_hits: u64,
}

/// Returns the cached response for `url`, fetching and caching it on a miss.
async fn get_data(
    cache: &SharedCache<Value>,
    client: &reqwest::Client,
    counters: &mut Counters,
    url: &str,
    ttl: Ttl,
) -> Result<Value> {
    if let Some(cached) = cache.get(url).await {
        counters.cache_hits += 1;
        return Ok(cached);
    }

    let body: Value = client
        .get(url)
        .send()
        .await
        .with_context(|| format!("request to {} failed", url))?
        .error_for_status()?
        .json()
        .await
        .context("response was not valid JSON")?;

    counters.api_hits += 1;
    cache.set_with_ttl(url, body.clone(), ttl).await?;
    Ok(body)
}

async fn run(config: DemoConfig) -> Result<()> {
    let cache: SharedCache<Value> = SharedCache::new(ObjectCache::new(ObjectStoreDriver::new));
    let client = reqwest::Client::new();
    let mut counters = Counters::default();

    let mut ticker = tokio::time::interval(Duration::from_secs(config.interval.max(1)));
    let mut count: u64 = 0;

    loop {
        ticker.tick().await;
        count += 1;

        match get_data(&cache, &client, &mut counters, &config.url, config.ttl).await {
            Ok(body) => {
                info!(
                    "Request #{} | API hits: {} | Cache hits: {}",
                    count, counters.api_hits, counters.cache_hits
                );
                info!("{}", body);
            }
            Err(e) => warn!("Request #{} failed: {:#}", count, e),
        }

        if config.requests.is_some_and(|limit| count >= limit) {
            break;
        }
    }

    let stats = cache.read().await.driver().stats();
    info!(
        "Cache stats: hits={}, misses={}, expirations={}, hit_rate={:.2}",
        stats.hits,
        stats.misses,
        stats.expirations,
        stats.hit_rate()
    );
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "object_cache=info,apicache_demo=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = DemoConfig::from_env();
    info!(
        "This demo fetches {} and caches the response for {}. Lookups before expiry are served from memory.",
        config.url, config.ttl
    );

    tokio::select! {
        result = run(config) => {
            result?;
        }
        _ = shutdown_signal() => {}
    }

    info!("Demo finished");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down...");
        }
        _ = terminate => {
            info!("Received SIGTERM, shutting down...");
        }
    }
}
