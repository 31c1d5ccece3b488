use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Identifier quoting rules for one SQL engine.
pub trait SqlDialect: Send + Sync {
    fn kind(&self) -> DialectKind;

    /// Quote a bare identifier, escaping embedded quote characters.
    fn wrap_identifier(&self, name: &str) -> String;

    /// Strip the quoting applied by [`SqlDialect::wrap_identifier`].
    fn parse_identifier(&self, quoted: &str) -> String;

    /// Table reference optionally qualified by database name.
    fn qualify(&self, db_name: Option<&str>, table_name: &str) -> String {
        match db_name.map(str::trim).filter(|db| !db.is_empty()) {
            Some(db) => format!(
                "{}.{}",
                self.wrap_identifier(db),
                self.wrap_identifier(table_name)
            ),
            None => self.wrap_identifier(table_name),
        }
    }
}

/// Registered dialect names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DialectKind {
    #[default]
    MySql,
    Postgres,
}

impl DialectKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DialectKind::MySql => "mysql",
            DialectKind::Postgres => "postgres",
        }
    }
}

impl fmt::Display for DialectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DialectKind {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "mysql" => Ok(DialectKind::MySql),
            "postgres" | "postgresql" => Ok(DialectKind::Postgres),
            other => Err(Error::Unsupported(format!("unknown SQL dialect '{other}'"))),
        }
    }
}

/// Backtick quoting (MySQL, MariaDB).
#[derive(Debug, Default)]
pub struct MySqlDialect;

impl SqlDialect for MySqlDialect {
    fn kind(&self) -> DialectKind {
        DialectKind::MySql
    }

    fn wrap_identifier(&self, name: &str) -> String {
        format!("`{}`", name.replace('`', "``"))
    }

    fn parse_identifier(&self, quoted: &str) -> String {
        unquote(quoted, '`')
    }
}

/// Double-quote quoting (Postgres, ANSI).
#[derive(Debug, Default)]
pub struct PostgresDialect;

impl SqlDialect for PostgresDialect {
    fn kind(&self) -> DialectKind {
        DialectKind::Postgres
    }

    fn wrap_identifier(&self, name: &str) -> String {
        format!("\"{}\"", name.replace('"', "\"\""))
    }

    fn parse_identifier(&self, quoted: &str) -> String {
        unquote(quoted, '"')
    }
}

fn unquote(quoted: &str, quote: char) -> String {
    let trimmed = quoted.trim();
    let inner = trimmed
        .strip_prefix(quote)
        .and_then(|rest| rest.strip_suffix(quote));
    match inner {
        Some(inner) => {
            let doubled: String = [quote, quote].iter().collect();
            inner.replace(&doubled, &quote.to_string())
        }
        None => trimmed.to_string(),
    }
}

/// Process-wide memo of one dialect instance per [`DialectKind`].
///
/// Lookups take the read lock; the first lookup for a kind takes the write
/// lock and constructs at most one instance.
pub struct DialectRegistry {
    dialects: RwLock<HashMap<DialectKind, Arc<dyn SqlDialect>>>,
}

impl DialectRegistry {
    fn new() -> Self {
        Self {
            dialects: RwLock::new(HashMap::new()),
        }
    }

    pub fn global() -> &'static DialectRegistry {
        static REGISTRY: OnceLock<DialectRegistry> = OnceLock::new();
        REGISTRY.get_or_init(DialectRegistry::new)
    }

    pub fn get(&self, kind: DialectKind) -> Arc<dyn SqlDialect> {
        // Entries are immutable once inserted, so a poisoned map is still usable.
        if let Some(dialect) = self
            .dialects
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&kind)
        {
            return Arc::clone(dialect);
        }

        let mut dialects = self
            .dialects
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let dialect = dialects.entry(kind).or_insert_with(|| {
            tracing::debug!(dialect = %kind, "dialect constructed");
            build_dialect(kind)
        });
        Arc::clone(dialect)
    }

    pub fn get_by_name(&self, name: &str) -> Result<Arc<dyn SqlDialect>> {
        let kind = name.parse::<DialectKind>()?;
        Ok(self.get(kind))
    }
}

fn build_dialect(kind: DialectKind) -> Arc<dyn SqlDialect> {
    match kind {
        DialectKind::MySql => Arc::new(MySqlDialect),
        DialectKind::Postgres => Arc::new(PostgresDialect),
    }
}
