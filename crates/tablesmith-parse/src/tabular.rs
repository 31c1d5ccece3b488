use std::sync::OnceLock;

use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;
use tablesmith_core::{Error, Field, FieldType, Result, TableSchema};
use tracing::info;

use crate::DEFAULT_TABLE_NAME;

/// Largest integer that survives a round trip through an IEEE double.
const MAX_SAFE_INTEGER: u64 = (1 << 53) - 1;

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y年%m月%d日", "%Y/%m/%d", "%Y%m%d"];
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
];

/// Build a schema from a grid whose first row holds the column names.
///
/// When a second row is present its cells drive type inference; otherwise
/// every column is `text`. Blank header cells are named `column_<n>`.
pub fn from_tabular_sample(rows: &[Vec<String>]) -> Result<TableSchema> {
    let header = rows
        .first()
        .filter(|header| !header.is_empty())
        .ok_or_else(|| Error::Parse("tabular sample has no header row".to_string()))?;
    let sample = rows.get(1);

    let fields = header
        .iter()
        .enumerate()
        .map(|(index, name)| {
            let name = name.trim();
            let name = if name.is_empty() {
                format!("column_{}", index + 1)
            } else {
                name.to_string()
            };
            let field_type = sample
                .map(|row| row.get(index).map(String::as_str).unwrap_or_default())
                .map(infer_field_type)
                .unwrap_or(FieldType::Text);
            let mut field = Field::new(name.clone(), field_type.token());
            field.comment = Some(name);
            field
        })
        .collect::<Vec<_>>();

    info!(
        fields = fields.len(),
        inferred = sample.is_some(),
        "schema built from tabular sample"
    );
    Ok(TableSchema::new(DEFAULT_TABLE_NAME, fields))
}

/// Infer a catalog type from one sample cell.
///
/// Predicates run in order: blank, boolean, integer, decimal, date/time; the
/// first match wins and anything else is `text`.
pub fn infer_field_type(value: &str) -> FieldType {
    let value = value.trim();
    if value.is_empty() {
        return FieldType::Text;
    }
    if value.eq_ignore_ascii_case("true") || value.eq_ignore_ascii_case("false") {
        return FieldType::TinyInt;
    }
    if value.bytes().all(|b| b.is_ascii_digit()) {
        return match value.parse::<u64>() {
            Ok(number) if number <= MAX_SAFE_INTEGER => FieldType::Int,
            _ => FieldType::BigInt,
        };
    }
    if decimal_pattern().is_some_and(|pattern| pattern.is_match(value)) {
        return FieldType::Double;
    }
    if is_date_like(value) {
        return FieldType::DateTime;
    }
    FieldType::Text
}

fn decimal_pattern() -> Option<&'static Regex> {
    static DECIMAL: OnceLock<Option<Regex>> = OnceLock::new();
    DECIMAL
        .get_or_init(|| Regex::new(r"^[0-9]+(\.[0-9]*)?[dD]?$").ok())
        .as_ref()
}

fn is_date_like(value: &str) -> bool {
    DATE_FORMATS
        .iter()
        .any(|format| NaiveDate::parse_from_str(value, format).is_ok())
        || DATETIME_FORMATS
            .iter()
            .any(|format| NaiveDateTime::parse_from_str(value, format).is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[&[&str]]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|row| row.iter().map(|cell| cell.to_string()).collect())
            .collect()
    }

    #[test]
    fn header_and_sample_infer_types() {
        let schema =
            from_tabular_sample(&grid(&[&["id", "name"], &["1", "Alice"]])).expect("schema");
        assert_eq!(schema.table_name, "my_table");
        let fields: Vec<_> = schema
            .fields
            .iter()
            .map(|f| (f.field_name.as_str(), f.field_type.as_str()))
            .collect();
        assert_eq!(fields, vec![("id", "int"), ("name", "text")]);
    }

    #[test]
    fn header_names_become_comments() {
        let schema = from_tabular_sample(&grid(&[&["id", " "], &["1", "x"]])).expect("schema");
        let comments: Vec<_> = schema
            .fields
            .iter()
            .map(|f| f.comment.as_deref())
            .collect();
        assert_eq!(comments, vec![Some("id"), Some("column_2")]);
    }

    #[test]
    fn header_only_defaults_to_text() {
        let schema = from_tabular_sample(&grid(&[&["a", "", "c"]])).expect("schema");
        let fields: Vec<_> = schema
            .fields
            .iter()
            .map(|f| (f.field_name.as_str(), f.field_type.as_str()))
            .collect();
        assert_eq!(fields, vec![("a", "text"), ("column_2", "text"), ("c", "text")]);
    }

    #[test]
    fn empty_grid_is_a_parse_error() {
        assert!(matches!(from_tabular_sample(&[]), Err(Error::Parse(_))));
        assert!(matches!(from_tabular_sample(&[Vec::new()]), Err(Error::Parse(_))));
    }

    #[test]
    fn inference_order() {
        assert_eq!(infer_field_type("  "), FieldType::Text);
        assert_eq!(infer_field_type("TRUE"), FieldType::TinyInt);
        assert_eq!(infer_field_type("false"), FieldType::TinyInt);
        assert_eq!(infer_field_type("42"), FieldType::Int);
        assert_eq!(infer_field_type("9007199254740991"), FieldType::Int);
        assert_eq!(infer_field_type("9007199254740992"), FieldType::BigInt);
        assert_eq!(infer_field_type("123456789012345678901234567890"), FieldType::BigInt);
        assert_eq!(infer_field_type("3.14"), FieldType::Double);
        assert_eq!(infer_field_type("2.5d"), FieldType::Double);
        assert_eq!(infer_field_type("2024-01-31"), FieldType::DateTime);
        assert_eq!(infer_field_type("2024年1月31日"), FieldType::DateTime);
        assert_eq!(infer_field_type("2024/01/31 08:30"), FieldType::DateTime);
        assert_eq!(infer_field_type("2024-01-31 08:30:15"), FieldType::DateTime);
        assert_eq!(infer_field_type("Alice"), FieldType::Text);
        assert_eq!(infer_field_type("-5"), FieldType::Text);
    }
}
