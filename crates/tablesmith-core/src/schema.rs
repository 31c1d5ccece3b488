use std::fmt;

use schemars::JsonSchema;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Structural description of one table: name, comment and ordered fields.
///
/// A schema is built once (by hand or by a parser), validated once, and then
/// read by every generation step. Validation may only fill `mock_row_count`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TableSchema {
    /// Database the table lives in; qualifies the table name in emitted SQL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub db_name: Option<String>,
    #[serde(default)]
    pub table_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_comment: Option<String>,
    /// Rows to synthesize; absent means the default of 20.
    #[serde(default, alias = "mockNum")]
    pub mock_row_count: Option<u32>,
    /// Ordered column definitions; names must be unique.
    #[serde(default, alias = "fieldList")]
    pub fields: Vec<Field>,
}

impl TableSchema {
    pub fn new(table_name: impl Into<String>, fields: Vec<Field>) -> Self {
        Self {
            db_name: None,
            table_name: table_name.into(),
            table_comment: None,
            mock_row_count: None,
            fields,
        }
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.field_name == name)
    }
}

/// Column definition inside a [`TableSchema`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    #[serde(default)]
    pub field_name: String,
    /// Catalog token such as `int` or `varchar(64)`; see [`crate::FieldType`].
    #[serde(default)]
    pub field_type: String,
    #[serde(default = "default_nullable")]
    pub nullable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default)]
    pub primary_key: bool,
    #[serde(default)]
    pub auto_increment: bool,
    /// Mock strategy; unknown or empty labels decode as unset.
    #[serde(
        default,
        deserialize_with = "deserialize_mock_type",
        skip_serializing_if = "Option::is_none"
    )]
    #[schemars(with = "Option<MockType>")]
    pub mock_type: Option<MockType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mock_params: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_update: Option<String>,
}

impl Field {
    pub fn new(field_name: impl Into<String>, field_type: impl Into<String>) -> Self {
        Self {
            field_name: field_name.into(),
            field_type: field_type.into(),
            nullable: true,
            default_value: None,
            comment: None,
            primary_key: false,
            auto_increment: false,
            mock_type: None,
            mock_params: None,
            on_update: None,
        }
    }

    pub fn with_mock(mut self, mock_type: MockType, params: Option<&str>) -> Self {
        self.mock_type = Some(mock_type);
        self.mock_params = params.map(str::to_string);
        self
    }

    /// Mock params with surrounding whitespace removed; blank counts as absent.
    pub fn mock_params_trimmed(&self) -> Option<&str> {
        self.mock_params
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }
}

fn default_nullable() -> bool {
    true
}

/// Strategy tag selecting how synthetic values are produced for one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum MockType {
    None,
    Fixed,
    Random,
    Rule,
    Dict,
    Increase,
}

impl MockType {
    pub const ALL: &'static [MockType] = &[
        MockType::None,
        MockType::Fixed,
        MockType::Random,
        MockType::Rule,
        MockType::Dict,
        MockType::Increase,
    ];

    /// Parse a mock-type label. Accepts the canonical lowercase names and the
    /// Chinese labels shown in the web UI.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "none" | "不模拟" => Some(MockType::None),
            "fixed" | "固定" => Some(MockType::Fixed),
            "random" | "随机" => Some(MockType::Random),
            "rule" | "规则" => Some(MockType::Rule),
            "dict" | "词库" => Some(MockType::Dict),
            "increase" | "递增" => Some(MockType::Increase),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MockType::None => "none",
            MockType::Fixed => "fixed",
            MockType::Random => "random",
            MockType::Rule => "rule",
            MockType::Dict => "dict",
            MockType::Increase => "increase",
        }
    }
}

impl fmt::Display for MockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn deserialize_mock_type<'de, D>(deserializer: D) -> Result<Option<MockType>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(MockType::parse))
}

/// One synthesized row: field name to value, in schema field order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    cells: Vec<(String, String)>,
}

impl Row {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            cells: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.cells.push((name.into(), value.into()));
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(key, _)| key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.cells
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl Serialize for Row {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.cells.len()))?;
        for (key, value) in &self.cells {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
