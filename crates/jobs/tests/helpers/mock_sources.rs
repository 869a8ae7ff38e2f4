#![allow(dead_code)]

use async_trait::async_trait;
use rrdns_application::ports::RecordSource;
use rrdns_domain::{DomainError, RecordSet, RecordTable};
use std::net::Ipv4Addr;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime};

pub struct MockRecordSource {
    table: Mutex<RecordTable>,
    fingerprint: Mutex<Option<SystemTime>>,
    load_count: Arc<AtomicU64>,
    should_fail: AtomicBool,
}

impl MockRecordSource {
    pub fn new() -> Self {
        Self {
            table: Mutex::new(RecordTable::new()),
            fingerprint: Mutex::new(Some(SystemTime::UNIX_EPOCH)),
            load_count: Arc::new(AtomicU64::new(0)),
            should_fail: AtomicBool::new(false),
        }
    }

    pub fn with_host(self, name: &str, addrs: &[&str]) -> Self {
        self.set_host(name, addrs);
        self
    }

    pub fn set_host(&self, name: &str, addrs: &[&str]) {
        let a: Vec<Ipv4Addr> = addrs.iter().map(|s| s.parse().unwrap()).collect();
        self.table
            .lock()
            .unwrap()
            .insert(name.to_string(), RecordSet::with_a(a));
    }

    /// Simulates the file being rewritten.
    pub fn touch(&self) {
        let mut fp = self.fingerprint.lock().unwrap();
        let next = fp.unwrap_or(SystemTime::UNIX_EPOCH) + Duration::from_secs(1);
        *fp = Some(next);
    }

    pub fn set_fingerprint(&self, fingerprint: Option<SystemTime>) {
        *self.fingerprint.lock().unwrap() = fingerprint;
    }

    pub fn set_should_fail(&self, fail: bool) {
        self.should_fail.store(fail, Ordering::Relaxed);
    }

    pub fn load_count(&self) -> u64 {
        self.load_count.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl RecordSource for MockRecordSource {
    fn describe(&self) -> String {
        "mock".to_string()
    }

    async fn fingerprint(&self) -> Result<Option<SystemTime>, DomainError> {
        Ok(*self.fingerprint.lock().unwrap())
    }

    async fn load(&self) -> Result<RecordTable, DomainError> {
        self.load_count.fetch_add(1, Ordering::Relaxed);
        if self.should_fail.load(Ordering::Relaxed) {
            return Err(DomainError::RecordSourceError("mock load failed".to_string()));
        }
        Ok(self.table.lock().unwrap().clone())
    }
}
