//! Background sweeper that deletes expired refresh tokens.

use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::{Duration, Utc};
use tokio::sync::watch;
use tokio::time::{self, MissedTickBehavior};
use tracing::{error, info};

use postbox_core::result::AppResult;
use postbox_entity::refresh_token::RefreshTokenStore;

/// Periodically deletes refresh tokens past their lifetime.
///
/// The sweeper is a hygiene mechanism only; expiry is always re-checked at
/// exchange time, so a late or skipped sweep never admits a stale token.
pub struct RefreshTokenSweeper {
    store: Arc<dyn RefreshTokenStore>,
    lifetime: Duration,
    interval: StdDuration,
}

impl RefreshTokenSweeper {
    /// Create a new sweeper.
    pub fn new(
        store: Arc<dyn RefreshTokenStore>,
        refresh_lifetime_seconds: u64,
        interval_seconds: u64,
    ) -> Self {
        Self {
            store,
            lifetime: Duration::seconds(refresh_lifetime_seconds as i64),
            interval: StdDuration::from_secs(interval_seconds),
        }
    }

    /// Delete every token older than the configured lifetime.
    ///
    /// Returns the number of rows removed.
    pub async fn sweep_once(&self) -> AppResult<u64> {
        let cutoff = Utc::now() - self.lifetime;
        let deleted = self.store.delete_older_than(cutoff).await?;
        if deleted > 0 {
            info!(deleted, "Deleted expired refresh tokens");
        }
        Ok(deleted)
    }

    /// Run the sweep loop until the shutdown signal flips to `true`.
    ///
    /// A sweep already in flight always completes; shutdown is only
    /// observed between ticks. A failed sweep is logged and the loop keeps
    /// going, the next tick retries.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        info!(
            interval_seconds = self.interval.as_secs(),
            "Refresh token sweeper started"
        );

        let mut ticker = time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first interval tick fires immediately.
        ticker.tick().await;

        loop {
            tokio::select! {
                changed = shutdown.changed() => {
                    // A dropped sender means no shutdown signal can ever
                    // arrive; treat it the same as one.
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
                _ = ticker.tick() => {
                    if let Err(e) = self.sweep_once().await {
                        error!("Refresh token sweep failed: {e}");
                    }
                }
            }
        }

        info!("Refresh token sweeper stopped");
    }
}
