//! Records file format.
//!
//! ```toml
//! [[host]]
//! name = "svc.example"
//! a = ["10.0.0.1", "10.0.0.2"]
//! aaaa = ["fd00::1"]
//! ```
//!
//! A bad address only costs that address; the rest of the entry and file
//! still load.

use rrdns_domain::{normalize_fqdn, DomainError, RecordSet, RecordTable};
use serde::Deserialize;
use std::net::IpAddr;
use tracing::warn;

#[derive(Debug, Deserialize)]
struct RecordsFile {
    #[serde(default, rename = "host")]
    hosts: Vec<HostEntry>,
}

#[derive(Debug, Deserialize)]
struct HostEntry {
    name: String,
    #[serde(default)]
    a: Vec<String>,
    #[serde(default)]
    aaaa: Vec<String>,
}

#[derive(Debug, Default)]
pub struct ParsedRecords {
    pub table: RecordTable,
    /// Addresses and entries left out because they did not parse.
    pub skipped: usize,
}

pub fn parse_records(contents: &str) -> Result<ParsedRecords, DomainError> {
    let file: RecordsFile =
        toml::from_str(contents).map_err(|e| DomainError::RecordSourceError(e.to_string()))?;

    let mut parsed = ParsedRecords::default();

    for entry in file.hosts {
        if entry.name.trim().trim_end_matches('.').is_empty() {
            warn!("Skipping host entry with empty name");
            parsed.skipped += 1;
            continue;
        }

        let name = normalize_fqdn(&entry.name);
        let mut records = RecordSet::default();

        for raw in &entry.a {
            match parse_address(&name, raw) {
                Some(IpAddr::V4(v4)) => records.a.push(v4),
                Some(IpAddr::V6(_)) => {
                    warn!(host = %name, address = %raw, "IPv6 address listed under `a`, skipping");
                    parsed.skipped += 1;
                }
                None => parsed.skipped += 1,
            }
        }

        for raw in &entry.aaaa {
            match parse_address(&name, raw) {
                Some(IpAddr::V6(v6)) => records.aaaa.push(v6),
                Some(IpAddr::V4(_)) => {
                    warn!(host = %name, address = %raw, "IPv4 address listed under `aaaa`, skipping");
                    parsed.skipped += 1;
                }
                None => parsed.skipped += 1,
            }
        }

        parsed.table.entry(name).or_default().merge(records);
    }

    Ok(parsed)
}

fn parse_address(host: &str, raw: &str) -> Option<IpAddr> {
    match raw.trim().parse::<IpAddr>() {
        Ok(ip) => Some(ip),
        Err(e) => {
            warn!(host = %host, address = %raw, error = %e, "Invalid address, skipping");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{Ipv4Addr, Ipv6Addr};

    #[test]
    fn test_parse_basic_entry() {
        let parsed = parse_records(
            r#"
            [[host]]
            name = "Svc.Example"
            a = ["10.0.0.1", "10.0.0.2"]
            aaaa = ["fd00::1"]
            "#,
        )
        .unwrap();

        let set = &parsed.table["svc.example."];
        assert_eq!(
            set.a,
            vec![Ipv4Addr::new(10, 0, 0, 1), Ipv4Addr::new(10, 0, 0, 2)]
        );
        assert_eq!(set.aaaa, vec!["fd00::1".parse::<Ipv6Addr>().unwrap()]);
        assert_eq!(parsed.skipped, 0);
    }

    #[test]
    fn test_bad_addresses_are_skipped_individually() {
        let parsed = parse_records(
            r#"
            [[host]]
            name = "svc.example"
            a = ["10.0.0.1", "not-an-ip", "fd00::1"]
            aaaa = ["10.0.0.9", "fd00::2"]
            "#,
        )
        .unwrap();

        let set = &parsed.table["svc.example."];
        assert_eq!(set.a, vec![Ipv4Addr::new(10, 0, 0, 1)]);
        assert_eq!(set.aaaa, vec!["fd00::2".parse::<Ipv6Addr>().unwrap()]);
        assert_eq!(parsed.skipped, 3);
    }

    #[test]
    fn test_duplicate_names_merge() {
        let parsed = parse_records(
            r#"
            [[host]]
            name = "svc.example"
            a = ["10.0.0.1"]

            [[host]]
            name = "SVC.example."
            a = ["10.0.0.2", "10.0.0.1"]
            "#,
        )
        .unwrap();

        assert_eq!(parsed.table.len(), 1);
        assert_eq!(parsed.table["svc.example."].a.len(), 2);
    }

    #[test]
    fn test_empty_name_is_skipped() {
        let parsed = parse_records(
            r#"
            [[host]]
            name = "."
            a = ["10.0.0.1"]
            "#,
        )
        .unwrap();

        assert!(parsed.table.is_empty());
        assert_eq!(parsed.skipped, 1);
    }

    #[test]
    fn test_empty_file_is_empty_table() {
        let parsed = parse_records("").unwrap();
        assert!(parsed.table.is_empty());
    }

    #[test]
    fn test_malformed_toml_is_error() {
        assert!(parse_records("[[host]\nname = ").is_err());
    }
}
