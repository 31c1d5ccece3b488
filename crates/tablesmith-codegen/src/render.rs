use handlebars::Handlebars;
use serde_json::Value;

use crate::error::RenderError;

pub const JAVA_ENTITY: &str = "java_entity";
pub const JAVA_OBJECT: &str = "java_object";
pub const TYPESCRIPT_TYPE: &str = "typescript_type";

const JAVA_ENTITY_TEMPLATE: &str = r#"/**
 * {{classComment}}
 */
public class {{className}} implements Serializable {
{{#each fields}}

    /**
     * {{comment}}
     */
    private {{javaType}} {{fieldName}};
{{/each}}
}
"#;

const JAVA_OBJECT_TEMPLATE: &str = r#"{{className}} {{objectName}} = new {{className}}();
{{#each fields}}
{{../objectName}}.{{setMethod}}({{value}});
{{/each}}
"#;

const TYPESCRIPT_TYPE_TEMPLATE: &str = r#"/**
 * {{classComment}}
 */
export interface {{className}} {
{{#each fields}}
  /** {{comment}} */
  {{fieldName}}: {{typescriptType}};
{{/each}}
}
"#;

/// Template collaborator used by the code emitter.
pub trait TemplateRenderer: Send + Sync {
    fn render(&self, template: &str, data: &Value) -> Result<String, RenderError>;
}

/// Handlebars renderer preloaded with the built-in code templates.
///
/// Strict mode is on, so a template referencing a missing field fails
/// instead of rendering an empty string. Output is not HTML-escaped.
pub struct HandlebarsRenderer {
    registry: Handlebars<'static>,
}

impl HandlebarsRenderer {
    pub fn new() -> Result<Self, RenderError> {
        let mut registry = Handlebars::new();
        registry.register_escape_fn(handlebars::no_escape);
        registry.set_strict_mode(true);
        let mut renderer = Self { registry };
        renderer = renderer.with_template(JAVA_ENTITY, JAVA_ENTITY_TEMPLATE)?;
        renderer = renderer.with_template(JAVA_OBJECT, JAVA_OBJECT_TEMPLATE)?;
        renderer.with_template(TYPESCRIPT_TYPE, TYPESCRIPT_TYPE_TEMPLATE)
    }

    /// Register or replace a template.
    pub fn with_template(mut self, name: &str, source: &str) -> Result<Self, RenderError> {
        self.registry
            .register_template_string(name, source)
            .map_err(|err| RenderError::Template {
                name: name.to_string(),
                message: err.to_string(),
            })?;
        Ok(self)
    }

    pub fn has_template(&self, name: &str) -> bool {
        self.registry.has_template(name)
    }
}

impl TemplateRenderer for HandlebarsRenderer {
    fn render(&self, template: &str, data: &Value) -> Result<String, RenderError> {
        if !self.registry.has_template(template) {
            return Err(RenderError::MissingTemplate(template.to_string()));
        }
        self.registry
            .render(template, data)
            .map_err(|err| RenderError::Render {
                template: template.to_string(),
                message: err.to_string(),
            })
    }
}
