//! Refresh token sweeper configuration.

use serde::{Deserialize, Serialize};

/// Background sweeper configuration.
///
/// The sweep interval is independent from the refresh token lifetime; the
/// sweep is a backstop against token bloat, not the source of expiry truth.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweeperConfig {
    /// Whether the sweeper is enabled.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Interval in seconds between expiry sweeps.
    #[serde(default = "default_sweep_interval")]
    pub interval_seconds: u64,
}

impl Default for SweeperConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_seconds: default_sweep_interval(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_sweep_interval() -> u64 {
    60 * 60
}
