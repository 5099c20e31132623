pub mod csv;
pub mod json;

pub use csv::{leads_to_csv, CSV_FILE_NAME, CSV_HEADERS};
pub use json::{export_json, import_json, ImportError, JSON_FILE_NAME};
