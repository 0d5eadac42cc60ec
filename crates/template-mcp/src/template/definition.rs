//! Template definition schema and validation.
//!
//! A definition file is a YAML mapping with two required string fields
//! (`description`, `instructions`) and one optional string field (`template`).
//! Unknown keys are ignored. Values are kept exactly as parsed; placeholder
//! markers such as `{summary}` are opaque to this crate.

use std::fmt;

use serde::Serialize;
use serde_yaml::{Mapping, Value};

const DESCRIPTION: &str = "description";
const INSTRUCTIONS: &str = "instructions";
const TEMPLATE: &str = "template";

/// One validated template definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateDefinition {
    description: String,
    instructions: String,
    template: Option<String>,
}

/// Payload returned to the host when a template tool is invoked.
///
/// `template` is omitted from the serialized object when the definition has none.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateResponse {
    pub instructions: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
}

/// A single problem with one field of a definition.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldIssue {
    #[error("missing required field '{field}'")]
    Missing { field: &'static str },

    #[error("field '{field}' must not be empty")]
    Empty { field: &'static str },

    #[error("field '{field}' must be a {expected}, found {found}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
        found: &'static str,
    },
}

/// Validation failure for one definition document.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    #[error("document must be a YAML mapping, found {found}")]
    NotAMapping { found: &'static str },

    #[error("{}", FieldIssues(.0))]
    Fields(Vec<FieldIssue>),
}

struct FieldIssues<'a>(&'a [FieldIssue]);

impl fmt::Display for FieldIssues<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, issue) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{issue}")?;
        }
        Ok(())
    }
}

impl SchemaError {
    /// Field issues, empty for a non-mapping document.
    pub fn issues(&self) -> &[FieldIssue] {
        match self {
            Self::NotAMapping { .. } => &[],
            Self::Fields(issues) => issues,
        }
    }
}

impl TemplateDefinition {
    /// Validate raw parsed YAML and build a definition.
    ///
    /// Every field is checked before returning so a single error reports all
    /// of a file's problems at once.
    pub fn from_value(value: &Value) -> Result<Self, SchemaError> {
        let Value::Mapping(mapping) = value else {
            return Err(SchemaError::NotAMapping {
                found: type_name(value),
            });
        };

        let mut issues = Vec::new();
        let description = required_string(mapping, DESCRIPTION, &mut issues);
        let instructions = required_string(mapping, INSTRUCTIONS, &mut issues);
        let template = optional_string(mapping, TEMPLATE, &mut issues);

        match (description, instructions) {
            (Some(description), Some(instructions)) if issues.is_empty() => Ok(Self {
                description,
                instructions,
                template,
            }),
            _ => Err(SchemaError::Fields(issues)),
        }
    }

    /// Parse and validate a YAML document in one step.
    pub fn from_yaml_str(contents: &str) -> Result<Self, DefinitionParseError> {
        let value: Value = serde_yaml::from_str(contents)?;
        Ok(Self::from_value(&value)?)
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn instructions(&self) -> &str {
        &self.instructions
    }

    /// The markdown body, or `None` for instruction-only definitions.
    pub fn template(&self) -> Option<&str> {
        self.template.as_deref()
    }

    /// Build the invocation payload. Strings are cloned verbatim.
    pub fn to_response(&self) -> TemplateResponse {
        TemplateResponse {
            instructions: self.instructions.clone(),
            template: self.template.clone(),
        }
    }
}

/// Error from [`TemplateDefinition::from_yaml_str`].
#[derive(Debug, thiserror::Error)]
pub enum DefinitionParseError {
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Schema(#[from] SchemaError),
}

fn lookup<'a>(mapping: &'a Mapping, field: &str) -> Option<&'a Value> {
    // `key:` with no value parses as null and is treated as absent
    mapping.get(field).filter(|v| !v.is_null())
}

fn required_string(
    mapping: &Mapping,
    field: &'static str,
    issues: &mut Vec<FieldIssue>,
) -> Option<String> {
    match lookup(mapping, field) {
        None => {
            issues.push(FieldIssue::Missing { field });
            None
        }
        Some(Value::String(s)) if s.trim().is_empty() => {
            issues.push(FieldIssue::Empty { field });
            None
        }
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => {
            issues.push(FieldIssue::WrongType {
                field,
                expected: "string",
                found: type_name(other),
            });
            None
        }
    }
}

/// `None` when absent. A wrong type is recorded as an issue and also yields `None`.
fn optional_string(
    mapping: &Mapping,
    field: &'static str,
    issues: &mut Vec<FieldIssue>,
) -> Option<String> {
    match lookup(mapping, field) {
        None => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => {
            issues.push(FieldIssue::WrongType {
                field,
                expected: "string",
                found: type_name(other),
            });
            None
        }
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "list",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}
