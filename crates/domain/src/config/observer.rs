use serde::{Deserialize, Serialize};

/// Query-name observer queue and the statistics consumer draining it.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ObserverConfig {
    /// Names beyond this many in flight are dropped instead of stalling
    /// a listener.
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,

    #[serde(default = "default_stats_interval")]
    pub stats_interval_secs: u64,
}

impl Default for ObserverConfig {
    fn default() -> Self {
        Self {
            queue_capacity: default_queue_capacity(),
            stats_interval_secs: default_stats_interval(),
        }
    }
}

fn default_queue_capacity() -> usize {
    1024
}

fn default_stats_interval() -> u64 {
    60
}
