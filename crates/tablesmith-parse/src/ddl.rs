use std::sync::OnceLock;

use regex::Regex;
use sqlparser::ast::{ColumnDef, ColumnOption, Expr, Statement, TableConstraint};
use sqlparser::dialect::{Dialect, MySqlDialect, PostgreSqlDialect};
use sqlparser::parser::Parser;
use tablesmith_core::{
    DialectKind, DialectRegistry, Error, Field, MockType, Result, SqlDialect, TableSchema,
};
use tracing::{debug, info};

/// Build a schema from a MySQL `CREATE TABLE` statement.
pub fn from_ddl(sql: &str) -> Result<TableSchema> {
    from_ddl_with_dialect(sql, DialectKind::MySql)
}

/// Build a schema from a `CREATE TABLE` statement written for `kind`.
///
/// Only the first `CREATE TABLE` statement is read. Table-level
/// `PRIMARY KEY (...)` clauses are applied to the columns after all columns
/// are parsed. Parsed fields carry the `none` mock type.
pub fn from_ddl_with_dialect(sql: &str, kind: DialectKind) -> Result<TableSchema> {
    if sql.trim().is_empty() {
        return Err(Error::Parse("empty DDL input".to_string()));
    }

    let parser_dialect: Box<dyn Dialect> = match kind {
        DialectKind::MySql => Box::new(MySqlDialect {}),
        DialectKind::Postgres => Box::new(PostgreSqlDialect {}),
    };
    let statements = Parser::parse_sql(parser_dialect.as_ref(), sql)
        .map_err(|err| Error::Parse(format!("invalid CREATE TABLE statement: {err}")))?;

    let create_table = statements
        .into_iter()
        .find_map(|statement| match statement {
            Statement::CreateTable(create_table) => Some(create_table),
            _ => None,
        })
        .ok_or_else(|| Error::Parse("no CREATE TABLE statement found".to_string()))?;

    let dialect = DialectRegistry::global().get(kind);
    let mut name_parts = split_qualified_name(&create_table.name.to_string())
        .into_iter()
        .map(|part| dialect.parse_identifier(&part))
        .collect::<Vec<_>>();
    let table_name = name_parts
        .pop()
        .filter(|name| !name.is_empty())
        .ok_or_else(|| Error::Parse("CREATE TABLE without a table name".to_string()))?;
    let db_name = name_parts.pop();

    let mut fields = create_table
        .columns
        .iter()
        .map(map_column)
        .collect::<Vec<_>>();

    for constraint in &create_table.constraints {
        if let TableConstraint::PrimaryKey { columns, .. } = constraint {
            for column in columns {
                let name = column_ref_name(&column.to_string(), dialect.as_ref());
                match fields.iter_mut().find(|field| field.field_name == name) {
                    Some(field) => {
                        field.primary_key = true;
                        field.nullable = false;
                    }
                    None => debug!(column = %name, "primary key names unknown column"),
                }
            }
        }
    }

    let schema = TableSchema {
        db_name,
        table_name,
        table_comment: table_comment(sql),
        mock_row_count: None,
        fields,
    };
    info!(
        table = %schema.table_name,
        fields = schema.fields.len(),
        dialect = %kind,
        "schema parsed from DDL"
    );
    Ok(schema)
}

fn map_column(column: &ColumnDef) -> Field {
    let mut field = Field::new(
        column.name.value.clone(),
        column.data_type.to_string().to_lowercase(),
    );
    field.mock_type = Some(MockType::None);

    for option in &column.options {
        match &option.option {
            ColumnOption::NotNull => field.nullable = false,
            ColumnOption::Null => field.nullable = true,
            ColumnOption::Default(expr) => field.default_value = literal_text(expr),
            ColumnOption::Comment(comment) => field.comment = Some(comment.clone()),
            ColumnOption::OnUpdate(expr) => field.on_update = Some(expr.to_string()),
            ColumnOption::Unique { is_primary, .. } if *is_primary => {
                field.primary_key = true;
                field.nullable = false;
            }
            ColumnOption::DialectSpecific(tokens) => {
                let text = tokens
                    .iter()
                    .map(|token| token.to_string())
                    .collect::<Vec<_>>()
                    .join(" ")
                    .to_uppercase();
                if text.contains("AUTO_INCREMENT") {
                    field.auto_increment = true;
                }
            }
            _ => {}
        }
    }
    field
}

/// Literal value of a DEFAULT expression; `NULL` means no default.
fn literal_text(expr: &Expr) -> Option<String> {
    let raw = expr.to_string();
    if raw.eq_ignore_ascii_case("null") {
        return None;
    }
    let unquoted = raw
        .strip_prefix('\'')
        .and_then(|rest| rest.strip_suffix('\''))
        .map(|inner| inner.replace("''", "'"));
    Some(unquoted.unwrap_or(raw))
}

/// Column name inside a key clause, without quoting or sort order.
fn column_ref_name(raw: &str, dialect: &dyn SqlDialect) -> String {
    let trimmed = raw.trim();
    if trimmed.starts_with(['`', '"']) {
        let closing = trimmed[1..]
            .rfind(['`', '"'])
            .map(|idx| idx + 2)
            .unwrap_or(trimmed.len());
        return dialect.parse_identifier(&trimmed[..closing]);
    }
    trimmed
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .to_string()
}

/// Split `db.table` on dots that are not inside identifier quotes.
fn split_qualified_name(name: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    for ch in name.chars() {
        match (quote, ch) {
            (None, '`' | '"') => {
                quote = Some(ch);
                current.push(ch);
            }
            (Some(open), _) if ch == open => {
                quote = None;
                current.push(ch);
            }
            (None, '.') => parts.push(std::mem::take(&mut current)),
            _ => current.push(ch),
        }
    }
    parts.push(current);
    parts
}

/// Table comment from the options that follow the column list.
fn table_comment(sql: &str) -> Option<String> {
    static COMMENT: OnceLock<Option<Regex>> = OnceLock::new();
    let pattern = COMMENT
        .get_or_init(|| Regex::new(r"(?i)\bCOMMENT\s*=?\s*'((?:[^']|'')*)'").ok())
        .as_ref()?;
    let tail = &sql[column_list_end(sql)?..];
    pattern
        .captures(tail)
        .and_then(|captures| captures.get(1))
        .map(|value| value.as_str().replace("''", "'"))
}

/// Byte offset just past the parenthesis closing the column list.
fn column_list_end(sql: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut chars = sql.char_indices().peekable();
    while let Some((idx, ch)) = chars.next() {
        if let Some(open) = quote {
            if ch == open {
                quote = None;
            }
            continue;
        }
        match ch {
            '\'' | '"' | '`' => quote = Some(ch),
            '-' if matches!(chars.peek(), Some((_, '-'))) => {
                for (_, skipped) in chars.by_ref() {
                    if skipped == '\n' {
                        break;
                    }
                }
            }
            '(' => depth += 1,
            ')' if depth > 0 => {
                depth -= 1;
                if depth == 0 {
                    return Some(idx + 1);
                }
            }
            _ => {}
        }
    }
    None
}
