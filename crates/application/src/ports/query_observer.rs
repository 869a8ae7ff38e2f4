/// Receives every query name the resolver sees, in the case it arrived in.
///
/// Called on the answering path, so implementations must not block.
pub trait QueryObserver: Send + Sync {
    fn observe(&self, name: &str);
}
