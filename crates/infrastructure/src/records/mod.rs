pub mod parser;
pub mod toml_source;

pub use parser::{parse_records, ParsedRecords};
pub use toml_source::TomlRecordSource;
