use serde::{Deserialize, Serialize};
use tablesmith_codegen::{CodeArtifact, TargetShape};
use tablesmith_core::{DialectKind, Row, TableSchema};

/// Options for the generation engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateOptions {
    /// Dialect used for CREATE and INSERT statements.
    pub dialect: DialectKind,
    /// Code artifacts emitted by `generate_all`, in order.
    pub targets: Vec<TargetShape>,
    /// Seed for reproducible output; each run draws a fresh seed when unset.
    pub seed: Option<u64>,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            dialect: DialectKind::MySql,
            targets: TargetShape::ALL.to_vec(),
            seed: None,
        }
    }
}

/// Everything produced for one validated schema.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedArtifact {
    pub table_schema: TableSchema,
    pub create_sql: String,
    pub rows: Vec<Row>,
    pub insert_sql: String,
    pub data_json: String,
    pub code: Vec<CodeArtifact>,
}
