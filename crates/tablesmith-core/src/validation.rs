use std::collections::BTreeSet;

use crate::error::{Error, Result};
use crate::schema::TableSchema;

pub const DEFAULT_ROW_COUNT: u32 = 20;
pub const MIN_ROW_COUNT: u32 = 10;
pub const MAX_ROW_COUNT: u32 = 100;

/// Validate a table schema before generation.
///
/// Checks, in order:
/// - table name is present
/// - row count is absent (filled with the default) or within bounds
/// - at least one field exists
/// - every field has a name and a type
/// - field names are unique
///
/// The returned schema differs from the input only in `mock_row_count`.
pub fn validate_schema(mut schema: TableSchema) -> Result<TableSchema> {
    if schema.table_name.trim().is_empty() {
        return Err(Error::Validation("table name is required".to_string()));
    }

    match schema.mock_row_count {
        None => schema.mock_row_count = Some(DEFAULT_ROW_COUNT),
        Some(count) if !(MIN_ROW_COUNT..=MAX_ROW_COUNT).contains(&count) => {
            return Err(Error::Validation(format!(
                "mock row count {count} out of range {MIN_ROW_COUNT}..={MAX_ROW_COUNT}"
            )));
        }
        Some(_) => {}
    }

    if schema.fields.is_empty() {
        return Err(Error::Validation(format!(
            "table {} has no fields",
            schema.table_name
        )));
    }

    for (index, field) in schema.fields.iter().enumerate() {
        if field.field_name.trim().is_empty() {
            return Err(Error::Validation(format!("field #{index} has no name")));
        }
        if field.field_type.trim().is_empty() {
            return Err(Error::Validation(format!(
                "field {} has no type",
                field.field_name
            )));
        }
    }

    let mut seen = BTreeSet::new();
    for field in &schema.fields {
        if !seen.insert(field.field_name.as_str()) {
            return Err(Error::Validation(format!(
                "duplicate field name: {}",
                field.field_name
            )));
        }
    }

    Ok(schema)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Field;

    fn schema(rows: Option<u32>) -> TableSchema {
        let mut schema = TableSchema::new("user", vec![Field::new("id", "int")]);
        schema.mock_row_count = rows;
        schema
    }

    #[test]
    fn absent_row_count_defaults_to_twenty() {
        let validated = validate_schema(schema(None)).expect("valid schema");
        assert_eq!(validated.mock_row_count, Some(20));
    }

    #[test]
    fn row_count_within_bounds_is_kept() {
        let validated = validate_schema(schema(Some(20))).expect("valid schema");
        assert_eq!(validated.mock_row_count, Some(20));
        assert!(validate_schema(schema(Some(10))).is_ok());
        assert!(validate_schema(schema(Some(100))).is_ok());
    }

    #[test]
    fn row_count_out_of_bounds_is_rejected() {
        for rows in [5, 9, 101, 150] {
            let err = validate_schema(schema(Some(rows))).expect_err("out of range");
            assert!(matches!(err, Error::Validation(_)), "rows {rows}");
        }
    }

    #[test]
    fn blank_table_name_is_rejected_first() {
        let mut bad = schema(Some(5));
        bad.table_name = "  ".to_string();
        let err = validate_schema(bad).expect_err("blank name");
        assert!(err.to_string().contains("table name"));
    }

    #[test]
    fn empty_fields_are_rejected() {
        let bad = TableSchema::new("user", Vec::new());
        assert!(matches!(validate_schema(bad), Err(Error::Validation(_))));
    }

    #[test]
    fn blank_field_name_or_type_is_rejected() {
        let bad = TableSchema::new("user", vec![Field::new("", "int")]);
        assert!(validate_schema(bad).is_err());
        let bad = TableSchema::new("user", vec![Field::new("id", " ")]);
        assert!(validate_schema(bad).is_err());
    }

    #[test]
    fn duplicate_field_names_are_rejected() {
        let bad = TableSchema::new(
            "user",
            vec![Field::new("id", "int"), Field::new("id", "bigint")],
        );
        let err = validate_schema(bad).expect_err("duplicate");
        assert!(err.to_string().contains("duplicate field name: id"));
    }
}
