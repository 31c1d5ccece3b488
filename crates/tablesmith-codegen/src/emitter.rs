use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tablesmith_core::{FieldType, Row, TableSchema, TargetLanguage, ValueClass};
use tracing::debug;

use crate::error::RenderError;
use crate::naming::to_camel_case;
use crate::render::{JAVA_ENTITY, JAVA_OBJECT, TYPESCRIPT_TYPE, TemplateRenderer};

/// Kind of code artifact to emit for a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetShape {
    /// Java entity class with one private member per field.
    Entity,
    /// Java statements building one instance from a sample row.
    ObjectSnippet,
    /// TypeScript interface declaration.
    TypeDeclaration,
}

impl TargetShape {
    pub const ALL: &'static [TargetShape] = &[
        TargetShape::Entity,
        TargetShape::ObjectSnippet,
        TargetShape::TypeDeclaration,
    ];

    pub fn template_name(self) -> &'static str {
        match self {
            TargetShape::Entity => JAVA_ENTITY,
            TargetShape::ObjectSnippet => JAVA_OBJECT,
            TargetShape::TypeDeclaration => TYPESCRIPT_TYPE,
        }
    }

    pub fn language(self) -> TargetLanguage {
        match self {
            TargetShape::Entity | TargetShape::ObjectSnippet => TargetLanguage::Java,
            TargetShape::TypeDeclaration => TargetLanguage::TypeScript,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TargetShape::Entity => "entity",
            TargetShape::ObjectSnippet => "object_snippet",
            TargetShape::TypeDeclaration => "type_declaration",
        }
    }

    fn file_name(self, class_name: &str) -> String {
        match self {
            TargetShape::Entity => format!("{class_name}.java"),
            TargetShape::ObjectSnippet => format!("{class_name}Object.java"),
            TargetShape::TypeDeclaration => format!("{class_name}.ts"),
        }
    }
}

impl std::str::FromStr for TargetShape {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().replace('-', "_").as_str() {
            "entity" => Ok(TargetShape::Entity),
            "object_snippet" | "object" => Ok(TargetShape::ObjectSnippet),
            "type_declaration" | "typescript" => Ok(TargetShape::TypeDeclaration),
            other => Err(format!("unknown target shape '{other}'")),
        }
    }
}

/// One rendered code file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeArtifact {
    pub shape: TargetShape,
    pub language: TargetLanguage,
    pub file_name: String,
    pub content: String,
}

/// Renders a table schema into source code through a [`TemplateRenderer`].
#[derive(Clone)]
pub struct CodeEmitter {
    renderer: Arc<dyn TemplateRenderer>,
}

impl CodeEmitter {
    pub fn new(renderer: Arc<dyn TemplateRenderer>) -> Self {
        Self { renderer }
    }

    /// Emit one artifact. `sample` supplies literal values for the object
    /// snippet; other shapes ignore it.
    pub fn emit(
        &self,
        schema: &TableSchema,
        sample: Option<&Row>,
        shape: TargetShape,
    ) -> Result<CodeArtifact, RenderError> {
        let data = template_data(schema, sample, shape);
        let content = self.renderer.render(shape.template_name(), &data)?;
        let class_name = to_camel_case(&schema.table_name, true);
        debug!(table = %schema.table_name, shape = shape.as_str(), "code emitted");
        Ok(CodeArtifact {
            shape,
            language: shape.language(),
            file_name: shape.file_name(&class_name),
            content,
        })
    }
}

/// Data handed to the templates; keys are camelCase.
pub fn template_data(schema: &TableSchema, sample: Option<&Row>, shape: TargetShape) -> Value {
    let class_name = to_camel_case(&schema.table_name, true);
    let class_comment = schema
        .table_comment
        .as_deref()
        .map(str::trim)
        .filter(|comment| !comment.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| class_name.clone());

    let fields = schema
        .fields
        .iter()
        .map(|field| {
            let field_type = FieldType::parse_or_text(&field.field_type);
            let comment = field
                .comment
                .as_deref()
                .map(str::trim)
                .filter(|comment| !comment.is_empty())
                .unwrap_or(field.field_name.as_str());
            let value = match shape {
                TargetShape::ObjectSnippet => {
                    object_literal(field_type, sample.and_then(|row| row.get(&field.field_name)))
                }
                _ => "null".to_string(),
            };
            json!({
                "fieldName": to_camel_case(&field.field_name, false),
                "javaType": field_type.type_name(TargetLanguage::Java),
                "typescriptType": field_type.type_name(TargetLanguage::TypeScript),
                "comment": comment,
                "setMethod": format!("set{}", to_camel_case(&field.field_name, true)),
                "value": value,
            })
        })
        .collect::<Vec<_>>();

    json!({
        "className": class_name,
        "objectName": to_camel_case(&schema.table_name, false),
        "classComment": class_comment,
        "fields": fields,
    })
}

/// Java literal for one sample cell.
fn object_literal(field_type: FieldType, value: Option<&str>) -> String {
    let Some(value) = value.filter(|value| !value.is_empty()) else {
        return "null".to_string();
    };
    match field_type.type_name(TargetLanguage::Java) {
        "Long" if value.parse::<i64>().is_ok() => format!("{value}L"),
        "Integer" if value.parse::<i32>().is_ok() => value.to_string(),
        "Double" if value.parse::<f64>().is_ok() => value.to_string(),
        "BigDecimal" => format!("new BigDecimal(\"{}\")", escape_java(value)),
        "Boolean" => match value {
            "1" | "true" | "TRUE" => "true".to_string(),
            _ => "false".to_string(),
        },
        _ if field_type.value_class() == ValueClass::Numeric && value.parse::<f64>().is_ok() => {
            value.to_string()
        }
        _ => format!("\"{}\"", escape_java(value)),
    }
}

fn escape_java(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
