use serde::{Deserialize, Serialize};

pub const DEFAULT_DNS_PORT: u16 = 53;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Bind every non-link-local address of this interface. Unset binds the
    /// IPv4 wildcard only.
    #[serde(default)]
    pub interface: Option<String>,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Zone answered for, without the trailing dot.
    #[serde(default)]
    pub suffix: String,

    #[serde(default = "default_ttl")]
    pub ttl: u32,
}

impl ServerConfig {
    /// Port 0 means "use the default".
    pub fn effective_port(&self) -> u16 {
        if self.port == 0 {
            DEFAULT_DNS_PORT
        } else {
            self.port
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            interface: None,
            port: default_port(),
            suffix: String::new(),
            ttl: default_ttl(),
        }
    }
}

fn default_port() -> u16 {
    DEFAULT_DNS_PORT
}

fn default_ttl() -> u32 {
    3600
}
