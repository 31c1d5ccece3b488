//! Schema construction from external inputs.
//!
//! Three independent strategies build a [`TableSchema`]: a `CREATE TABLE`
//! statement, a comma separated word list resolved against a dictionary, and
//! a tabular sample whose first row is the header.

pub mod ddl;
pub mod tabular;
pub mod words;

pub use ddl::{from_ddl, from_ddl_with_dialect};
pub use tabular::{from_tabular_sample, infer_field_type};
pub use words::{MAX_WORDS, from_word_list};

pub use tablesmith_core::TableSchema;

/// Table name given to schemas built from word lists and tabular samples.
pub const DEFAULT_TABLE_NAME: &str = "my_table";
