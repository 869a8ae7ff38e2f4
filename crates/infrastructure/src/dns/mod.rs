//! Authoritative round-robin responder.
//!
//! `manager` discovers addresses and starts one UDP `listener` per address;
//! each datagram goes through the `handler`, which asks the `resolver` for
//! the answers to every question.

pub mod errors;
pub mod handler;
pub mod listener;
pub mod manager;
pub mod resolver;

pub use errors::ServerError;
pub use handler::RoundRobinHandler;
pub use listener::{bind_udp_socket, serve_udp};
pub use manager::{ListenerManager, ListenerSet};
pub use resolver::QueryResolver;
