//! Immutable registry of template tools.
//!
//! Built once from a [`LoadReport`] and never mutated. Each entry owns its own
//! copy of the definition and a pre-built MCP [`Tool`] descriptor.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use rmcp::model::{JsonObject, Tool};
use schemars::JsonSchema;
use serde::Serialize;

use crate::error::{StartupError, StartupResult, TemplateFileError};
use crate::template::{LoadReport, OperationName, TemplateDefinition, TemplateResponse};

/// Template tools take no arguments.
#[derive(Debug, JsonSchema)]
pub struct NoParams {}

/// One registered template tool.
#[derive(Debug, Clone)]
pub struct RegisteredTemplate {
    pub name: OperationName,
    pub definition: TemplateDefinition,
    pub source: PathBuf,
    pub tool: Tool,
}

/// All tools registered at startup, in scan order.
#[derive(Debug)]
pub struct TemplateRegistry {
    directory: PathBuf,
    entries: Vec<RegisteredTemplate>,
    by_tool_name: HashMap<String, usize>,
    skipped: Vec<TemplateFileError>,
}

impl TemplateRegistry {
    /// Register one tool per accepted template.
    ///
    /// Fails with [`StartupError::NoValidTemplates`] when the report holds no
    /// accepted templates.
    pub fn from_report(report: LoadReport) -> StartupResult<Self> {
        let LoadReport {
            directory,
            templates,
            errors,
        } = report;

        if templates.is_empty() {
            return Err(StartupError::NoValidTemplates {
                path: directory,
                skipped: errors.len(),
            });
        }

        let input_schema = empty_input_schema();
        let mut entries = Vec::with_capacity(templates.len());
        let mut by_tool_name = HashMap::with_capacity(templates.len());

        for loaded in templates {
            let tool_name = loaded.name.tool_name();
            let mut tool = Tool::new(
                tool_name.clone(),
                loaded.definition.description().to_string(),
                Arc::clone(&input_schema),
            );
            tool.title = Some(loaded.name.title());

            by_tool_name.insert(tool_name, entries.len());
            entries.push(RegisteredTemplate {
                name: loaded.name,
                definition: loaded.definition,
                source: loaded.source,
                tool,
            });
        }

        Ok(Self {
            directory,
            entries,
            by_tool_name,
            skipped: errors,
        })
    }

    pub fn directory(&self) -> &PathBuf {
        &self.directory
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[RegisteredTemplate] {
        &self.entries
    }

    /// Files skipped during discovery.
    pub fn skipped(&self) -> &[TemplateFileError] {
        &self.skipped
    }

    /// Tool descriptors for `tools/list`.
    pub fn tools(&self) -> Vec<Tool> {
        self.entries.iter().map(|e| e.tool.clone()).collect()
    }

    pub fn get(&self, tool_name: &str) -> Option<&RegisteredTemplate> {
        self.by_tool_name
            .get(tool_name)
            .and_then(|&idx| self.entries.get(idx))
    }

    /// Invocation result for a tool, or `None` if no such tool is registered.
    pub fn invoke(&self, tool_name: &str) -> Option<TemplateResponse> {
        self.get(tool_name).map(|e| e.definition.to_response())
    }

    /// Startup diagnostic listing of registered tools and skipped files.
    pub fn diagnostics(&self) -> RegistryDiagnostics {
        RegistryDiagnostics {
            directory: self.directory.display().to_string(),
            tools: self
                .entries
                .iter()
                .map(|e| ToolSummary {
                    name: e.tool.name.to_string(),
                    title: e.name.title(),
                    description: e.definition.description().to_string(),
                    has_template: e.definition.template().is_some(),
                    source: e.source.display().to_string(),
                })
                .collect(),
            skipped: self
                .skipped
                .iter()
                .map(|e| SkippedFile {
                    path: e.path().display().to_string(),
                    reason: e.kind().to_string(),
                    message: e.to_string(),
                })
                .collect(),
        }
    }
}

/// Serializable summary of the registry state at startup.
#[derive(Debug, Clone, Serialize)]
pub struct RegistryDiagnostics {
    pub directory: String,
    pub tools: Vec<ToolSummary>,
    pub skipped: Vec<SkippedFile>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ToolSummary {
    pub name: String,
    pub title: String,
    pub description: String,
    pub has_template: bool,
    pub source: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SkippedFile {
    pub path: String,
    pub reason: String,
    pub message: String,
}

fn empty_input_schema() -> Arc<JsonObject> {
    let mut schema = schemars::schema_for!(NoParams);
    let object = schema.ensure_object();
    object.remove("$schema");
    Arc::new(object.clone())
}
