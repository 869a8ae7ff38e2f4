use rrdns_application::ports::QueryObserver;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

/// Bounded, non-blocking fan-in of query names.
///
/// `observe` never waits: when the queue is full or the consumer has gone
/// away the name is dropped and counted.
#[derive(Clone)]
pub struct QueryNameEmitter {
    sender: Option<mpsc::Sender<Arc<str>>>,
    emitted: Arc<AtomicU64>,
    dropped: Arc<AtomicU64>,
}

impl QueryNameEmitter {
    pub fn new_disabled() -> Self {
        Self {
            sender: None,
            emitted: Arc::new(AtomicU64::new(0)),
            dropped: Arc::new(AtomicU64::new(0)),
        }
    }

    /// `capacity` is clamped to at least 1.
    pub fn new_enabled(capacity: usize) -> (Self, mpsc::Receiver<Arc<str>>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        let emitter = Self {
            sender: Some(tx),
            emitted: Arc::new(AtomicU64::new(0)),
            dropped: Arc::new(AtomicU64::new(0)),
        };
        (emitter, rx)
    }

    pub fn emit(&self, name: &str) {
        let Some(ref tx) = self.sender else {
            return;
        };

        match tx.try_send(Arc::from(name)) {
            Ok(()) => {
                self.emitted.fetch_add(1, Ordering::Relaxed);
            }
            Err(TrySendError::Full(_)) | Err(TrySendError::Closed(_)) => {
                self.dropped.fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.sender.is_some()
    }

    pub fn emitted(&self) -> u64 {
        self.emitted.load(Ordering::Relaxed)
    }

    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }
}

impl QueryObserver for QueryNameEmitter {
    fn observe(&self, name: &str) {
        self.emit(name);
    }
}

impl Default for QueryNameEmitter {
    fn default() -> Self {
        Self::new_disabled()
    }
}

impl std::fmt::Debug for QueryNameEmitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryNameEmitter")
            .field("enabled", &self.is_enabled())
            .field("emitted", &self.emitted())
            .field("dropped", &self.dropped())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_names_arrive_in_order() {
        let (emitter, mut rx) = QueryNameEmitter::new_enabled(8);
        emitter.observe("a.example.");
        emitter.observe("B.example.");

        assert_eq!(rx.recv().await.as_deref(), Some("a.example."));
        assert_eq!(rx.recv().await.as_deref(), Some("B.example."));
        assert_eq!(emitter.emitted(), 2);
    }

    #[test]
    fn test_full_queue_drops_without_blocking() {
        let (emitter, _rx) = QueryNameEmitter::new_enabled(2);
        for _ in 0..5 {
            emitter.observe("svc.example.");
        }

        assert_eq!(emitter.emitted(), 2);
        assert_eq!(emitter.dropped(), 3);
    }

    #[test]
    fn test_closed_consumer_counts_as_dropped() {
        let (emitter, rx) = QueryNameEmitter::new_enabled(4);
        drop(rx);
        emitter.observe("svc.example.");

        assert_eq!(emitter.emitted(), 0);
        assert_eq!(emitter.dropped(), 1);
    }

    #[test]
    fn test_disabled_emitter_is_a_no_op() {
        let emitter = QueryNameEmitter::default();
        emitter.observe("svc.example.");

        assert!(!emitter.is_enabled());
        assert_eq!(emitter.emitted(), 0);
        assert_eq!(emitter.dropped(), 0);
    }
}
