use thiserror::Error;

/// Errors raised while rendering code artifacts.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("template not found: {0}")]
    MissingTemplate(String),
    #[error("invalid template {name}: {message}")]
    Template { name: String, message: String },
    /// Data does not match the fields the template references.
    #[error("failed to render {template}: {message}")]
    Render { template: String, message: String },
}
