//! Upstream snapshot feed client and poll loop.
//!
//! The poll loop is the engine's only snapshot writer. A failed fetch is
//! logged and the tick skipped; the next interval retries unconditionally.
//! Overlap is prevented by awaiting each fetch before the next tick fires.

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tracing::{debug, warn};

use atc_core::types::AircraftSnapshot;

use crate::web::AppState;

/// HTTP client for the inbound snapshot feed.
#[derive(Clone)]
pub struct FeedClient {
    client: reqwest::Client,
    base_url: String,
}

impl FeedClient {
    pub fn new(base_url: &str) -> Self {
        FeedClient {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Fetch the latest snapshot batch. Non-2xx is an error; malformed
    /// array entries are dropped individually, never failing the batch.
    pub async fn fetch_states(&self) -> reqwest::Result<Vec<AircraftSnapshot>> {
        let url = format!("{}/api/states", self.base_url);
        let raw: Vec<Value> = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(decode_batch(raw))
    }
}

/// Tolerant batch decode: bad entries are skipped with a log line.
pub fn decode_batch(raw: Vec<Value>) -> Vec<AircraftSnapshot> {
    raw.into_iter()
        .filter_map(|value| match serde_json::from_value(value) {
            Ok(snap) => Some(snap),
            Err(e) => {
                warn!("skipping malformed snapshot entry: {e}");
                None
            }
        })
        .collect()
}

pub fn now_epoch() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

/// Poll the feed forever at a fixed cadence, folding each batch into the
/// engine. No backoff, no circuit breaker.
pub async fn poll_loop(state: Arc<AppState>, client: FeedClient, interval: Duration) {
    let mut ticker = tokio::time::interval(interval);
    loop {
        ticker.tick().await;
        match client.fetch_states().await {
            Ok(batch) => {
                let now = now_epoch();
                let count = batch.len();
                let mut engine = state.engine.lock().unwrap();
                engine.apply_snapshot(batch, now);
                debug!(aircraft = count, "snapshot applied");
            }
            Err(e) => {
                warn!("snapshot fetch failed, skipping tick: {e}");
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
