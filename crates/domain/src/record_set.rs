use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// Addresses published for one hostname.
///
/// Order inside each list carries no meaning; answers are shuffled before
/// they go on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordSet {
    pub a: Vec<Ipv4Addr>,
    pub aaaa: Vec<Ipv6Addr>,
}

impl RecordSet {
    pub fn new(a: Vec<Ipv4Addr>, aaaa: Vec<Ipv6Addr>) -> Self {
        Self { a, aaaa }
    }

    pub fn with_a(a: Vec<Ipv4Addr>) -> Self {
        Self { a, aaaa: vec![] }
    }

    pub fn with_aaaa(aaaa: Vec<Ipv6Addr>) -> Self {
        Self { a: vec![], aaaa }
    }

    /// Push an address into the list matching its family.
    pub fn push(&mut self, ip: IpAddr) {
        match ip {
            IpAddr::V4(v4) => self.a.push(v4),
            IpAddr::V6(v6) => self.aaaa.push(v6),
        }
    }

    /// Merge `other` into `self`, skipping addresses already present.
    pub fn merge(&mut self, other: RecordSet) {
        for v4 in other.a {
            if !self.a.contains(&v4) {
                self.a.push(v4);
            }
        }
        for v6 in other.aaaa {
            if !self.aaaa.contains(&v6) {
                self.aaaa.push(v6);
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.a.is_empty() && self.aaaa.is_empty()
    }

    pub fn len(&self) -> usize {
        self.a.len() + self.aaaa.len()
    }
}

/// Hostname (lowercase FQDN) to addresses.
pub type RecordTable = HashMap<String, RecordSet>;
