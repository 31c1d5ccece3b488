//! Code generation from table schemas.
//!
//! [`CodeEmitter`] maps field types onto destination-language type names,
//! converts names to camelCase, and renders through a [`TemplateRenderer`].

pub mod emitter;
pub mod error;
pub mod naming;
pub mod render;

pub use emitter::{CodeArtifact, CodeEmitter, TargetShape, template_data};
pub use error::RenderError;
pub use naming::to_camel_case;
pub use render::{HandlebarsRenderer, TemplateRenderer};
