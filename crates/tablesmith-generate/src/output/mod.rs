pub mod csv;
pub mod json;

pub use self::csv::{write_rows_csv, write_rows_csv_to};
pub use self::json::rows_to_json;
