use tablesmith_core::{Row, TableSchema};
use tracing::debug;

use crate::errors::GenerationError;
use crate::generators::{GeneratorContext, GeneratorRegistry};

/// Produce `row_count` rows for `schema`.
///
/// Each field's generator fills a whole column first; the columns are then
/// zipped into rows keyed by field name in schema order.
pub fn generate_rows(
    registry: &GeneratorRegistry,
    schema: &TableSchema,
    row_count: usize,
    ctx: &GeneratorContext<'_>,
    rng: &mut dyn rand::RngCore,
) -> Result<Vec<Row>, GenerationError> {
    let mut columns = Vec::with_capacity(schema.fields.len());
    for field in &schema.fields {
        let values = registry.generate(field, row_count, ctx, rng)?;
        debug!(
            table = %schema.table_name,
            field = %field.field_name,
            mock_type = field.mock_type.map(|t| t.as_str()).unwrap_or("default"),
            "column generated"
        );
        columns.push(values.into_iter());
    }

    let mut rows = Vec::with_capacity(row_count);
    for _ in 0..row_count {
        let mut row = Row::with_capacity(schema.fields.len());
        for (field, column) in schema.fields.iter().zip(columns.iter_mut()) {
            let value = column.next().ok_or_else(|| {
                GenerationError::GenerationData(format!(
                    "column {} ran out of values",
                    field.field_name
                ))
            })?;
            row.push(field.field_name.clone(), value);
        }
        rows.push(row);
    }
    Ok(rows)
}
