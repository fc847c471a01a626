use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RefreshConfig {
    /// Seconds between background refresh attempts. `0` defers to the
    /// interval suggested by the current snapshot.
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,

    /// Floor applied to snapshot-suggested intervals.
    #[serde(default = "default_min_interval_secs")]
    pub min_interval_secs: u64,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
            min_interval_secs: default_min_interval_secs(),
        }
    }
}

fn default_interval_secs() -> u64 {
    3600
}

fn default_min_interval_secs() -> u64 {
    60
}
