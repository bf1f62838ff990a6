pub mod json_schema;

pub use json_schema::{ScanItem, ScanResult};
