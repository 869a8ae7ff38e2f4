use hickory_proto::op::{Message, MessageType, OpCode, Query};
use hickory_proto::rr::{Name, RecordType};
use rrdns_application::ports::{QueryObserver, RecordStore};
use rrdns_domain::RecordSet;
use rrdns_infrastructure::store::SnapshotRecordStore;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::str::FromStr;
use std::sync::{Arc, Mutex};

/// Observer that remembers every name it was given.
#[derive(Default)]
pub struct RecordingObserver {
    names: Mutex<Vec<String>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn names(&self) -> Vec<String> {
        self.names.lock().unwrap().clone()
    }

    pub fn count(&self) -> usize {
        self.names.lock().unwrap().len()
    }
}

impl QueryObserver for RecordingObserver {
    fn observe(&self, name: &str) {
        self.names.lock().unwrap().push(name.to_string());
    }
}

/// `svc.example.` with two A records, `dual.example.` with one of each and
/// `v6.example.` with two AAAA records.
pub fn make_store() -> Arc<SnapshotRecordStore> {
    let store = SnapshotRecordStore::new();
    store.upsert(
        "svc.example.",
        RecordSet::with_a(vec![Ipv4Addr::new(10, 0, 0, 1), Ipv4Addr::new(10, 0, 0, 2)]),
    );
    store.upsert(
        "dual.example.",
        RecordSet::new(
            vec![Ipv4Addr::new(10, 0, 1, 1)],
            vec![Ipv6Addr::from_str("fd00::11").unwrap()],
        ),
    );
    store.upsert(
        "v6.example.",
        RecordSet::with_aaaa(vec![
            Ipv6Addr::from_str("fd00::1").unwrap(),
            Ipv6Addr::from_str("fd00::2").unwrap(),
        ]),
    );
    Arc::new(store)
}

pub fn a_query(name: &str, record_type: RecordType) -> Query {
    Query::query(Name::from_ascii(name).unwrap(), record_type)
}

pub fn query_message(id: u16, op_code: OpCode, queries: Vec<Query>) -> Message {
    let mut message = Message::new(id, MessageType::Query, op_code);
    message.set_recursion_desired(true);
    for query in queries {
        message.add_query(query);
    }
    message
}
