//! Guess Tracker HTTP Server Binary
//!
//! This is the main entry point for the guess-tracker REST API server.
//! It builds the feed client and snapshot cache, sets up the HTTP router,
//! and starts serving requests.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin guess-tracker-server
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `GUESS_FEED_URL`: Remote JSON store holding the raw guesses
//! - `GUESS_FEED_TIMEOUT_SECS`: Per-request feed timeout (default: 10)
//! - `GUESS_FEED_RETRIES`: Retries after a failed fetch (default: 1)
//! - `GUESS_CACHE_TTL_SECS`: Snapshot time-to-live (default: 300)
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use guess_tracker::feed::{DatasetCache, FeedConfig, GuessFeed, HttpGuessFeed};
use guess_tracker::http::{create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting Guess Tracker HTTP Server");

    let config = FeedConfig::from_env()?;
    info!(url = %config.url, ttl_secs = config.ttl.as_secs(), "Feed configured");

    let feed = Arc::new(HttpGuessFeed::new(&config)?) as Arc<dyn GuessFeed>;
    let cache = Arc::new(DatasetCache::new(feed, config.ttl));

    // Warm the cache so the first request doesn't pay for the fetch. The
    // server still starts if the feed is down; requests retry on demand.
    match cache.snapshot().await {
        Ok(snapshot) => {
            info!(records = snapshot.dataset.len(), "Initial snapshot loaded")
        }
        Err(e) => warn!(error = %e, "Initial fetch failed, starting with a cold cache"),
    }

    // Create application state and router
    let state = AppState::new(cache);
    let app = create_router(state);

    // Determine bind address
    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8080);
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

    info!("Server listening on http://{}", addr);

    // Start the server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
