use std::sync::{Arc, Mutex};

use serde_json::Value;
use tablesmith_codegen::{
    CodeEmitter, HandlebarsRenderer, RenderError, TargetShape, TemplateRenderer,
};
use tablesmith_core::{Field, TableSchema};

/// Renderer that records the data it was handed.
#[derive(Default)]
struct Recording {
    seen: Mutex<Vec<(String, Value)>>,
}

impl TemplateRenderer for Recording {
    fn render(&self, template: &str, data: &Value) -> Result<String, RenderError> {
        self.seen
            .lock()
            .expect("lock")
            .push((template.to_string(), data.clone()));
        Ok(format!("rendered {template}"))
    }
}

fn schema() -> TableSchema {
    TableSchema::new("order_line", vec![Field::new("unit_price", "decimal(10,2)")])
}

#[test]
fn emitter_passes_template_name_and_data() {
    let recorder = Arc::new(Recording::default());
    let emitter = CodeEmitter::new(recorder.clone());
    let artifact = emitter
        .emit(&schema(), None, TargetShape::TypeDeclaration)
        .expect("emit");

    assert_eq!(artifact.content, "rendered typescript_type");
    let seen = recorder.seen.lock().expect("lock");
    assert_eq!(seen.len(), 1);
    let (template, data) = &seen[0];
    assert_eq!(template, "typescript_type");
    assert_eq!(data["className"], "OrderLine");
    assert_eq!(data["fields"][0]["fieldName"], "unitPrice");
    assert_eq!(data["fields"][0]["javaType"], "BigDecimal");
    assert_eq!(data["fields"][0]["typescriptType"], "number");
}

#[test]
fn overridden_template_replaces_builtin() {
    let renderer = HandlebarsRenderer::new()
        .expect("renderer")
        .with_template(
            "java_entity",
            "class {{className}} ({{#each fields}}{{fieldName}}{{/each}})",
        )
        .expect("register");
    let emitter = CodeEmitter::new(Arc::new(renderer));
    let artifact = emitter.emit(&schema(), None, TargetShape::Entity).expect("emit");
    assert_eq!(artifact.content, "class OrderLine (unitPrice)");
}

#[test]
fn template_referencing_unknown_field_fails() {
    let renderer = HandlebarsRenderer::new()
        .expect("renderer")
        .with_template("java_entity", "{{#each fields}}{{kotlinType}}{{/each}}")
        .expect("register");
    let emitter = CodeEmitter::new(Arc::new(renderer));
    let err = emitter
        .emit(&schema(), None, TargetShape::Entity)
        .expect_err("unknown field");
    assert!(matches!(err, RenderError::Render { .. }));
}
