use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RecordsConfig {
    /// TOML file with `[[host]]` entries. Without it the table starts and
    /// stays empty.
    #[serde(default)]
    pub path: Option<String>,

    /// 0 disables reloading.
    #[serde(default = "default_reload_interval")]
    pub reload_interval_secs: u64,
}

impl Default for RecordsConfig {
    fn default() -> Self {
        Self {
            path: None,
            reload_interval_secs: default_reload_interval(),
        }
    }
}

fn default_reload_interval() -> u64 {
    30
}
