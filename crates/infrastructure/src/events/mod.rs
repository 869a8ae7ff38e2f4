pub mod emitter;
pub mod metrics;

pub use emitter::QueryNameEmitter;
pub use metrics::QueryNameMetrics;
