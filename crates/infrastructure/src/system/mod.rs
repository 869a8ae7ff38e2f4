pub mod interface_addrs;

pub use interface_addrs::{discover_bind_addresses, is_link_local_unicast, select_interface_addresses};
