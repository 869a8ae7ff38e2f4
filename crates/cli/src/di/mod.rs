mod services;

pub use services::DnsServices;
