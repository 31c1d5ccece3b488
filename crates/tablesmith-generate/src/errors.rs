use tablesmith_codegen::RenderError;
use thiserror::Error;

/// Errors emitted by the generation engine.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// Validation, parse, or dictionary failure from the core crate.
    #[error(transparent)]
    Schema(#[from] tablesmith_core::Error),
    /// Mock parameters or dictionary data unusable for generation.
    #[error("invalid generation data: {0}")]
    GenerationData(String),
    #[error("render error: {0}")]
    Render(#[from] RenderError),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}
