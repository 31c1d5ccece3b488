use std::sync::Arc;

use tablesmith_core::{
    DialectKind, DialectRegistry, Field, FieldType, MockType, Row, SqlDialect, TableSchema,
    ValueClass,
};

/// Builds CREATE TABLE and INSERT statements for one dialect.
#[derive(Clone)]
pub struct SqlBuilder {
    dialect: Arc<dyn SqlDialect>,
}

impl SqlBuilder {
    pub fn new(dialect: Arc<dyn SqlDialect>) -> Self {
        Self { dialect }
    }

    pub fn for_kind(kind: DialectKind) -> Self {
        Self::new(DialectRegistry::global().get(kind))
    }

    /// Column definition; tokens always appear in the order
    /// `name type [DEFAULT v] NULL|NOT NULL [ON UPDATE e] [AUTO_INCREMENT] [COMMENT 'c'] [PRIMARY KEY]`.
    pub fn build_field_ddl(&self, field: &Field) -> String {
        let mut parts = vec![
            self.dialect.wrap_identifier(&field.field_name),
            field.field_type.clone(),
        ];
        if let Some(default) = non_blank(field.default_value.as_deref()) {
            parts.push(format!("DEFAULT {}", format_value(field, default)));
        }
        parts.push(if field.nullable { "NULL" } else { "NOT NULL" }.to_string());
        if let Some(on_update) = non_blank(field.on_update.as_deref()) {
            parts.push(format!("ON UPDATE {on_update}"));
        }
        if field.auto_increment {
            parts.push("AUTO_INCREMENT".to_string());
        }
        if let Some(comment) = non_blank(field.comment.as_deref()) {
            parts.push(format!("COMMENT {}", quote(comment)));
        }
        if field.primary_key {
            parts.push("PRIMARY KEY".to_string());
        }
        parts.join(" ")
    }

    pub fn build_create_table_ddl(&self, schema: &TableSchema) -> String {
        let table = self
            .dialect
            .qualify(schema.db_name.as_deref(), &schema.table_name);
        let comment =
            non_blank(schema.table_comment.as_deref()).unwrap_or(schema.table_name.as_str());
        let fields = schema
            .fields
            .iter()
            .map(|field| self.build_field_ddl(field))
            .collect::<Vec<_>>()
            .join(",\n");
        format!(
            "-- {}\nCREATE TABLE IF NOT EXISTS {table} (\n{fields}\n) COMMENT {};",
            comment.replace('\n', " "),
            quote(comment)
        )
    }

    /// One INSERT per row, newline separated.
    ///
    /// Only fields with an explicit mock type other than `none` are listed;
    /// the remaining columns are left to their database defaults.
    pub fn build_insert_ddl(&self, schema: &TableSchema, rows: &[Row]) -> String {
        let table = self
            .dialect
            .qualify(schema.db_name.as_deref(), &schema.table_name);
        let fields = insert_fields(schema);
        let columns = fields
            .iter()
            .map(|field| self.dialect.wrap_identifier(&field.field_name))
            .collect::<Vec<_>>()
            .join(", ");

        rows.iter()
            .map(|row| {
                let values = fields
                    .iter()
                    .map(|field| {
                        format_value(field, row.get(&field.field_name).unwrap_or_default())
                    })
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("INSERT INTO {table} ({columns}) VALUES ({values});")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Fields that take part in INSERT statements.
pub fn insert_fields(schema: &TableSchema) -> Vec<&Field> {
    schema
        .fields
        .iter()
        .filter(|field| matches!(field.mock_type, Some(mock_type) if mock_type != MockType::None))
        .collect()
}

/// SQL literal for `value` in the column described by `field`.
///
/// Numeric and boolean types are emitted bare, `CURRENT_TIMESTAMP` stays bare
/// for date-like types, everything else is single-quoted with `'` doubled.
/// An empty value is always `''`.
pub fn format_value(field: &Field, value: &str) -> String {
    if value.is_empty() {
        return "''".to_string();
    }
    match FieldType::parse_or_text(&field.field_type).value_class() {
        ValueClass::Numeric | ValueClass::Boolean => value.to_string(),
        ValueClass::DateLike if value.eq_ignore_ascii_case("current_timestamp") => {
            value.to_string()
        }
        ValueClass::DateLike | ValueClass::QuotedText => quote(value),
    }
}

fn quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.trim().is_empty())
}
