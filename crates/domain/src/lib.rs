//! rrdns domain layer
pub mod config;
pub mod errors;
pub mod fqdn;
pub mod record_set;

pub use config::{CliOverrides, Config, ConfigError};
pub use errors::DomainError;
pub use fqdn::{normalize_fqdn, suffix_zone};
pub use record_set::{RecordSet, RecordTable};
