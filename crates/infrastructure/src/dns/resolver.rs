use hickory_proto::op::Query;
use hickory_proto::rr::rdata::{A, AAAA};
use hickory_proto::rr::{Name, RData, Record, RecordType};
use rrdns_application::ports::{QueryObserver, RecordStore};
use rrdns_application::services::shuffle;
use rrdns_domain::DomainError;
use std::net::IpAddr;
use std::sync::Arc;
use tracing::debug;

pub const DEFAULT_ANSWER_TTL: u32 = 3600;

/// Turns one question into answer records from the record store.
pub struct QueryResolver {
    store: Arc<dyn RecordStore>,
    observer: Arc<dyn QueryObserver>,
    ttl: u32,
}

impl QueryResolver {
    pub fn new(store: Arc<dyn RecordStore>, observer: Arc<dyn QueryObserver>) -> Self {
        Self {
            store,
            observer,
            ttl: DEFAULT_ANSWER_TTL,
        }
    }

    pub fn with_ttl(mut self, ttl: u32) -> Self {
        self.ttl = ttl;
        self
    }

    /// Every call reports the name to the observer first, whatever the
    /// outcome. Missing names and types other than A/AAAA give no answers.
    pub fn resolve(&self, query: &Query) -> Vec<Record> {
        let name = query.name();
        let name_str = name.to_string();
        self.observer.observe(&name_str);

        let Some(records) = self.store.lookup(&name_str) else {
            debug!(name = %name_str, "No entry for name");
            return Vec::new();
        };

        let addresses: Vec<IpAddr> = match query.query_type() {
            RecordType::A => shuffle(&records.a).into_iter().map(IpAddr::V4).collect(),
            RecordType::AAAA => shuffle(&records.aaaa).into_iter().map(IpAddr::V6).collect(),
            other => {
                debug!(name = %name_str, record_type = ?other, "Ignoring unsupported record type");
                return Vec::new();
            }
        };

        addresses
            .into_iter()
            .filter_map(|ip| match build_record(name, ip, self.ttl) {
                Ok(record) => Some(record),
                Err(e) => {
                    debug!(name = %name_str, error = %e, "Omitting answer record");
                    None
                }
            })
            .collect()
    }
}

/// An address record for `name`. Addresses that cannot identify a host
/// (unspecified, multicast, broadcast) are rejected.
pub fn build_record(name: &Name, ip: IpAddr, ttl: u32) -> Result<Record, DomainError> {
    let rdata = match ip {
        IpAddr::V4(v4) => {
            if v4.is_unspecified() || v4.is_multicast() || v4.is_broadcast() {
                return Err(DomainError::InvalidIpAddress(v4.to_string()));
            }
            RData::A(A(v4))
        }
        IpAddr::V6(v6) => {
            if v6.is_unspecified() || v6.is_multicast() {
                return Err(DomainError::InvalidIpAddress(v6.to_string()));
            }
            RData::AAAA(AAAA(v6))
        }
    };

    Ok(Record::from_rdata(name.clone(), ttl, rdata))
}
