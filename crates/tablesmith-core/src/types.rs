use std::fmt;

use serde::{Deserialize, Serialize};

/// Closed catalog of column type tokens understood by the generator.
///
/// Tokens are stored on [`crate::Field`] as free text; [`FieldType::parse`]
/// maps them back onto the catalog, ignoring length/precision suffixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    TinyInt,
    SmallInt,
    MediumInt,
    Int,
    BigInt,
    Float,
    Double,
    Decimal,
    Date,
    Time,
    Year,
    DateTime,
    Timestamp,
    Char,
    VarChar,
    TinyText,
    Text,
    MediumText,
    LongText,
    TinyBlob,
    Blob,
    MediumBlob,
    LongBlob,
    Binary,
    VarBinary,
    Boolean,
    Json,
}

/// Coarse formatting class of a catalog type, used when emitting literals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueClass {
    Numeric,
    Boolean,
    QuotedText,
    DateLike,
}

/// Destination language for emitted code artifacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetLanguage {
    Java,
    TypeScript,
}

impl FieldType {
    pub const ALL: &'static [FieldType] = &[
        FieldType::TinyInt,
        FieldType::SmallInt,
        FieldType::MediumInt,
        FieldType::Int,
        FieldType::BigInt,
        FieldType::Float,
        FieldType::Double,
        FieldType::Decimal,
        FieldType::Date,
        FieldType::Time,
        FieldType::Year,
        FieldType::DateTime,
        FieldType::Timestamp,
        FieldType::Char,
        FieldType::VarChar,
        FieldType::TinyText,
        FieldType::Text,
        FieldType::MediumText,
        FieldType::LongText,
        FieldType::TinyBlob,
        FieldType::Blob,
        FieldType::MediumBlob,
        FieldType::LongBlob,
        FieldType::Binary,
        FieldType::VarBinary,
        FieldType::Boolean,
        FieldType::Json,
    ];

    /// Lowercase SQL token for this type.
    pub fn token(self) -> &'static str {
        match self {
            FieldType::TinyInt => "tinyint",
            FieldType::SmallInt => "smallint",
            FieldType::MediumInt => "mediumint",
            FieldType::Int => "int",
            FieldType::BigInt => "bigint",
            FieldType::Float => "float",
            FieldType::Double => "double",
            FieldType::Decimal => "decimal",
            FieldType::Date => "date",
            FieldType::Time => "time",
            FieldType::Year => "year",
            FieldType::DateTime => "datetime",
            FieldType::Timestamp => "timestamp",
            FieldType::Char => "char",
            FieldType::VarChar => "varchar",
            FieldType::TinyText => "tinytext",
            FieldType::Text => "text",
            FieldType::MediumText => "mediumtext",
            FieldType::LongText => "longtext",
            FieldType::TinyBlob => "tinyblob",
            FieldType::Blob => "blob",
            FieldType::MediumBlob => "mediumblob",
            FieldType::LongBlob => "longblob",
            FieldType::Binary => "binary",
            FieldType::VarBinary => "varbinary",
            FieldType::Boolean => "boolean",
            FieldType::Json => "json",
        }
    }

    /// Map a column type string (`VARCHAR(64)`, `int unsigned`, ...) onto the catalog.
    pub fn parse(raw: &str) -> Option<Self> {
        let lowered = raw.trim().to_lowercase();
        let base = lowered
            .split(|c: char| c == '(' || c.is_whitespace())
            .next()
            .unwrap_or_default();
        match base {
            "integer" => return Some(FieldType::Int),
            "bool" => return Some(FieldType::Boolean),
            _ => {}
        }
        FieldType::ALL
            .iter()
            .copied()
            .find(|candidate| candidate.token() == base)
    }

    /// Like [`FieldType::parse`] but unknown tokens resolve to `TEXT`.
    pub fn parse_or_text(raw: &str) -> Self {
        Self::parse(raw).unwrap_or(FieldType::Text)
    }

    pub fn value_class(self) -> ValueClass {
        match self {
            FieldType::TinyInt
            | FieldType::SmallInt
            | FieldType::MediumInt
            | FieldType::Int
            | FieldType::BigInt
            | FieldType::Float
            | FieldType::Double
            | FieldType::Decimal
            | FieldType::Year => ValueClass::Numeric,
            FieldType::Boolean => ValueClass::Boolean,
            FieldType::Date | FieldType::Time | FieldType::DateTime | FieldType::Timestamp => {
                ValueClass::DateLike
            }
            _ => ValueClass::QuotedText,
        }
    }

    /// Type name used for this column in the given language.
    pub fn type_name(self, language: TargetLanguage) -> &'static str {
        match language {
            TargetLanguage::Java => java_type(self),
            TargetLanguage::TypeScript => typescript_type(self),
        }
    }
}

fn java_type(field_type: FieldType) -> &'static str {
    match field_type {
        FieldType::TinyInt
        | FieldType::SmallInt
        | FieldType::MediumInt
        | FieldType::Int
        | FieldType::Year => "Integer",
        FieldType::BigInt | FieldType::Timestamp => "Long",
        FieldType::Float | FieldType::Double => "Double",
        FieldType::Decimal => "BigDecimal",
        FieldType::Date | FieldType::DateTime => "Date",
        FieldType::Time => "Time",
        FieldType::Boolean => "Boolean",
        FieldType::TinyBlob
        | FieldType::Blob
        | FieldType::MediumBlob
        | FieldType::LongBlob
        | FieldType::Binary
        | FieldType::VarBinary => "byte[]",
        _ => "String",
    }
}

fn typescript_type(field_type: FieldType) -> &'static str {
    match field_type {
        // Timestamps travel as epoch milliseconds.
        FieldType::Timestamp => "number",
        _ => match field_type.value_class() {
            ValueClass::Numeric => "number",
            ValueClass::Boolean => "boolean",
            ValueClass::DateLike => "Date",
            ValueClass::QuotedText => "string",
        },
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_ignores_case_and_length_suffix() {
        assert_eq!(FieldType::parse("VARCHAR(64)"), Some(FieldType::VarChar));
        assert_eq!(FieldType::parse("int unsigned"), Some(FieldType::Int));
        assert_eq!(FieldType::parse("decimal(10,2)"), Some(FieldType::Decimal));
        assert_eq!(FieldType::parse("geometry"), None);
        assert_eq!(FieldType::parse_or_text("geometry"), FieldType::Text);
    }

    #[test]
    fn every_token_parses_back() {
        for field_type in FieldType::ALL {
            assert_eq!(FieldType::parse(field_type.token()), Some(*field_type));
        }
    }

    #[test]
    fn language_lookup() {
        assert_eq!(FieldType::BigInt.type_name(TargetLanguage::Java), "Long");
        assert_eq!(FieldType::Decimal.type_name(TargetLanguage::Java), "BigDecimal");
        assert_eq!(FieldType::Blob.type_name(TargetLanguage::Java), "byte[]");
        assert_eq!(FieldType::Int.type_name(TargetLanguage::TypeScript), "number");
        assert_eq!(FieldType::DateTime.type_name(TargetLanguage::TypeScript), "Date");
        assert_eq!(FieldType::Year.type_name(TargetLanguage::TypeScript), "number");
        assert_eq!(FieldType::Timestamp.type_name(TargetLanguage::Java), "Long");
        assert_eq!(FieldType::Time.type_name(TargetLanguage::TypeScript), "Date");
        assert_eq!(FieldType::VarChar.type_name(TargetLanguage::TypeScript), "string");
    }
}
