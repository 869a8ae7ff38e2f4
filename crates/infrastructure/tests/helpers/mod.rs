#![allow(dead_code)]

pub mod builders;

pub use builders::{a_query, make_store, query_message, RecordingObserver};
