use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum DomainError {
    #[error("Invalid IP address: {0}")]
    InvalidIpAddress(String),

    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Records source error: {0}")]
    RecordSourceError(String),
}
