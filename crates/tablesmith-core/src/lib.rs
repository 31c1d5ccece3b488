//! Core contracts for tablesmith.
//!
//! This crate defines the table schema model, the field type catalog, SQL
//! dialects, the dictionary collaborator contract, and schema validation
//! shared by the parser, generator, and CLI crates.

pub mod dialect;
pub mod dictionary;
pub mod error;
pub mod schema;
pub mod types;
pub mod validation;

pub use dialect::{DialectKind, DialectRegistry, MySqlDialect, PostgresDialect, SqlDialect};
pub use dictionary::{DictEntry, Dictionary, FieldDefinition, InMemoryDictionary};
pub use error::{Error, Result};
pub use schema::{Field, MockType, Row, TableSchema};
pub use types::{FieldType, TargetLanguage, ValueClass};
pub use validation::{DEFAULT_ROW_COUNT, MAX_ROW_COUNT, MIN_ROW_COUNT, validate_schema};
