//! Which local addresses the responder binds.

use crate::dns::ServerError;
use std::net::{IpAddr, Ipv4Addr};
use tracing::debug;

/// No interface: the IPv4 wildcard only. Named interface: each of its
/// addresses except link-local unicast ones.
///
/// Every error is fatal to startup: an unknown interface, a failed address
/// listing, or an interface whose only addresses are link-local
/// ([`ServerError::NoUsableAddresses`]).
pub fn discover_bind_addresses(interface: Option<&str>) -> Result<Vec<IpAddr>, ServerError> {
    let Some(interface) = interface else {
        return Ok(vec![IpAddr::V4(Ipv4Addr::UNSPECIFIED)]);
    };

    let all = local_ip_address::list_afinet_netifas().map_err(|e| {
        ServerError::InterfaceAddresses {
            interface: interface.to_string(),
            reason: e.to_string(),
        }
    })?;

    select_interface_addresses(interface, all)
}

/// Filter an `(interface, address)` listing down to what `interface` should
/// bind. An interface that never appears in the listing is an error.
pub fn select_interface_addresses<I>(interface: &str, listing: I) -> Result<Vec<IpAddr>, ServerError>
where
    I: IntoIterator<Item = (String, IpAddr)>,
{
    let mut found = false;
    let mut addrs = Vec::new();

    for (name, ip) in listing {
        if name != interface {
            continue;
        }
        found = true;

        let ip = ip.to_canonical();
        if is_link_local_unicast(&ip) {
            debug!(interface, address = %ip, "Skipping link-local address");
            continue;
        }
        if !addrs.contains(&ip) {
            debug!(interface, address = %ip, "Found address");
            addrs.push(ip);
        }
    }

    if !found {
        return Err(ServerError::InterfaceNotFound(interface.to_string()));
    }
    if addrs.is_empty() {
        return Err(ServerError::NoUsableAddresses(interface.to_string()));
    }
    Ok(addrs)
}

/// 169.254.0.0/16 and fe80::/10.
pub fn is_link_local_unicast(ip: &IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => v4.is_link_local(),
        IpAddr::V6(v6) => (v6.segments()[0] & 0xffc0) == 0xfe80,
    }
}
