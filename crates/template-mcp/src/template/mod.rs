//! Template definitions: schema validation, filename-derived naming, and
//! directory discovery.
//!
//! # Modules
//!
//! - [`definition`] — The definition schema and its validator
//! - [`loader`] — Directory scanning with per-file error collection
//! - [`naming`] — Filename → tool identifier derivation

pub mod definition;
pub mod loader;
pub mod naming;

pub use definition::{FieldIssue, SchemaError, TemplateDefinition, TemplateResponse};
pub use loader::{LoadReport, LoadedTemplate, TemplateLoader};
pub use naming::OperationName;
