//! Output formats for converted graphs.

pub mod ndjson;
