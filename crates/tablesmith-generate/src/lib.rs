//! Mock data generation for tablesmith.
//!
//! This crate turns a validated [`tablesmith_core::TableSchema`] into CREATE
//! and INSERT statements, synthetic rows (JSON and CSV), and code artifacts.

pub mod engine;
pub mod errors;
pub mod generators;
pub mod model;
pub mod output;
pub mod sql;
pub mod synth;

pub use engine::GenerationEngine;
pub use errors::GenerationError;
pub use generators::{GeneratorContext, GeneratorRegistry, MockGenerator, RandomKind};
pub use model::{GenerateOptions, GeneratedArtifact};
pub use sql::{SqlBuilder, format_value};
