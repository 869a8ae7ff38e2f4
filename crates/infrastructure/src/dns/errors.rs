use std::io;
use std::net::SocketAddr;
use thiserror::Error;

/// Listener bring-up and serving failures. All of them are fatal to the
/// process.
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Could not get interface: {0}")]
    InterfaceNotFound(String),

    #[error("Could not get addresses for interface {interface}: {reason}")]
    InterfaceAddresses { interface: String, reason: String },

    #[error("Interface {0} has no usable (non link-local) addresses")]
    NoUsableAddresses(String),

    #[error("Invalid zone suffix {suffix:?}: {reason}")]
    InvalidSuffix { suffix: String, reason: String },

    #[error("Failed to start DNS server on {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },

    #[error("DNS server on {addr} failed: {source}")]
    Serve {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },

    #[error("DNS server task aborted: {0}")]
    Join(String),
}
