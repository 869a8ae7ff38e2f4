pub mod errors;
pub mod logging;
pub mod observer;
pub mod records;
pub mod root;
pub mod server;

pub use errors::ConfigError;
pub use logging::LoggingConfig;
pub use observer::ObserverConfig;
pub use records::RecordsConfig;
pub use root::{CliOverrides, Config};
pub use server::{ServerConfig, DEFAULT_DNS_PORT};
