use std::sync::Arc;
use std::time::Instant;

use chrono::Local;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tablesmith_codegen::{CodeEmitter, HandlebarsRenderer, TemplateRenderer};
use tablesmith_core::{
    DEFAULT_ROW_COUNT, Dictionary, InMemoryDictionary, Row, TableSchema, validate_schema,
};
use tracing::info;

use crate::errors::GenerationError;
use crate::generators::{GeneratorContext, GeneratorRegistry};
use crate::model::{GenerateOptions, GeneratedArtifact};
use crate::output::rows_to_json;
use crate::sql::SqlBuilder;
use crate::synth;

/// Runs the full pipeline for one schema: validation, DDL, rows, INSERTs,
/// JSON, and code artifacts.
///
/// The engine holds no per-request state; concurrent calls with distinct
/// schemas are independent.
pub struct GenerationEngine {
    options: GenerateOptions,
    dictionary: Arc<dyn Dictionary>,
    sql: SqlBuilder,
    emitter: CodeEmitter,
}

impl GenerationEngine {
    pub fn new(
        options: GenerateOptions,
        dictionary: Arc<dyn Dictionary>,
        renderer: Arc<dyn TemplateRenderer>,
    ) -> Self {
        let sql = SqlBuilder::for_kind(options.dialect);
        Self {
            options,
            dictionary,
            sql,
            emitter: CodeEmitter::new(renderer),
        }
    }

    /// Engine with an empty dictionary and the built-in templates.
    pub fn with_defaults(options: GenerateOptions) -> Result<Self, GenerationError> {
        let renderer = HandlebarsRenderer::new()?;
        Ok(Self::new(
            options,
            Arc::new(InMemoryDictionary::new()),
            Arc::new(renderer),
        ))
    }

    pub fn options(&self) -> &GenerateOptions {
        &self.options
    }

    /// Validate `schema` and produce every artifact.
    ///
    /// Any failure aborts the whole run; nothing is returned partially.
    pub fn generate_all(&self, schema: TableSchema) -> Result<GeneratedArtifact, GenerationError> {
        let start = Instant::now();
        let schema = validate_schema(schema)?;
        let row_count = schema.mock_row_count.unwrap_or(DEFAULT_ROW_COUNT) as usize;
        info!(
            table = %schema.table_name,
            fields = schema.fields.len(),
            rows = row_count,
            dialect = %self.options.dialect,
            "generation started"
        );

        let create_sql = self.sql.build_create_table_ddl(&schema);
        let rows = self.generate_rows(&schema, row_count)?;
        let insert_sql = self.sql.build_insert_ddl(&schema, &rows);
        let data_json = rows_to_json(&rows)?;
        let code = self
            .options
            .targets
            .iter()
            .map(|shape| self.emitter.emit(&schema, rows.first(), *shape))
            .collect::<Result<Vec<_>, _>>()?;

        info!(
            table = %schema.table_name,
            rows = rows.len(),
            code_artifacts = code.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "generation completed"
        );
        Ok(GeneratedArtifact {
            table_schema: schema,
            create_sql,
            rows,
            insert_sql,
            data_json,
            code,
        })
    }

    /// Synthesize rows without validating the schema.
    pub fn generate_rows(
        &self,
        schema: &TableSchema,
        row_count: usize,
    ) -> Result<Vec<Row>, GenerationError> {
        let ctx = GeneratorContext {
            dictionary: self.dictionary.as_ref(),
            now: Local::now().naive_local(),
        };
        let mut rng = self.rng();
        synth::generate_rows(GeneratorRegistry::global(), schema, row_count, &ctx, &mut rng)
    }

    pub fn generate_insert_sql(
        &self,
        schema: &TableSchema,
        row_count: usize,
    ) -> Result<String, GenerationError> {
        let rows = self.generate_rows(schema, row_count)?;
        Ok(self.sql.build_insert_ddl(schema, &rows))
    }

    fn rng(&self) -> ChaCha8Rng {
        match self.options.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_rng(&mut rand::rng()),
        }
    }
}
