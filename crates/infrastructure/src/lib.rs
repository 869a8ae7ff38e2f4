pub mod dns;
pub mod events;
pub mod records;
pub mod store;
pub mod system;
