//! Template discovery and loading.
//!
//! Scans one directory (non-recursive) for `*.yml` / `*.yaml` files in sorted
//! filename order. Each file is parsed, validated, and named independently; a
//! bad file is recorded in [`LoadReport::errors`] and skipped. Only problems
//! with the directory itself are fatal.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::definition::{DefinitionParseError, TemplateDefinition};
use super::naming::{has_template_extension, OperationName};
use crate::config::expand_path;
use crate::error::{StartupError, StartupResult, TemplateFileError};

/// A definition accepted during discovery, with its derived name and source.
#[derive(Debug, Clone)]
pub struct LoadedTemplate {
    pub name: OperationName,
    pub definition: TemplateDefinition,
    pub source: PathBuf,
}

/// Outcome of one discovery pass.
#[derive(Debug)]
pub struct LoadReport {
    /// Resolved directory that was scanned.
    pub directory: PathBuf,
    /// Accepted templates in scan order.
    pub templates: Vec<LoadedTemplate>,
    /// Skipped files, in scan order.
    pub errors: Vec<TemplateFileError>,
}

impl LoadReport {
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

/// Loads template definitions from a configured directory.
#[derive(Debug, Clone)]
pub struct TemplateLoader {
    templates_path: PathBuf,
}

impl TemplateLoader {
    /// Create a loader for `path`. `~` is expanded; relative paths are resolved
    /// against the current directory when [`load`](Self::load) runs.
    pub fn new(path: impl AsRef<str>) -> Self {
        Self {
            templates_path: expand_path(path.as_ref()),
        }
    }

    /// The configured path after `~` expansion.
    pub fn templates_path(&self) -> &Path {
        &self.templates_path
    }

    /// Run one discovery pass.
    ///
    /// Fails only when the directory is missing, not a directory, or cannot be
    /// listed. An empty result is returned as an empty report; deciding whether
    /// that is fatal is left to the registry.
    pub fn load(&self) -> StartupResult<LoadReport> {
        let directory = self.resolve_directory()?;
        let files = list_template_files(&directory)?;

        let mut templates: Vec<LoadedTemplate> = Vec::new();
        let mut errors = Vec::new();
        let mut seen: HashMap<OperationName, PathBuf> = HashMap::new();

        for candidate in files {
            let loaded = candidate.and_then(|path| load_file(&path, &seen));
            match loaded {
                Ok(loaded) => {
                    tracing::debug!(
                        tool = %loaded.name.tool_name(),
                        path = %loaded.source.display(),
                        has_template = loaded.definition.template().is_some(),
                        "Loaded template"
                    );
                    seen.insert(loaded.name.clone(), loaded.source.clone());
                    templates.push(loaded);
                }
                Err(e) => {
                    tracing::warn!(path = %e.path().display(), error = %e, "Skipping template file");
                    errors.push(e);
                }
            }
        }

        tracing::info!(
            directory = %directory.display(),
            loaded = templates.len(),
            skipped = errors.len(),
            "Template discovery complete"
        );

        Ok(LoadReport {
            directory,
            templates,
            errors,
        })
    }

    fn resolve_directory(&self) -> StartupResult<PathBuf> {
        let path = if self.templates_path.is_absolute() {
            self.templates_path.clone()
        } else {
            std::env::current_dir()
                .map(|cwd| cwd.join(&self.templates_path))
                .unwrap_or_else(|_| self.templates_path.clone())
        };

        if !path.exists() {
            return Err(StartupError::DirectoryNotFound { path });
        }
        if !path.is_dir() {
            return Err(StartupError::NotADirectory { path });
        }
        Ok(path)
    }
}

/// List template files directly under `dir`, sorted by file name.
///
/// Every entry with a template extension yields either its path or an
/// [`TemplateFileError::Io`] (dangling symlink, unreadable metadata), so no
/// matching entry disappears unreported. Directories with a template extension
/// are not files and are ignored. Entries that cannot be read at all are
/// reported against `dir` after the named entries.
fn list_template_files(
    dir: &Path,
) -> StartupResult<Vec<Result<PathBuf, TemplateFileError>>> {
    let entries = std::fs::read_dir(dir).map_err(|source| StartupError::DirectoryUnreadable {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut files: Vec<Result<PathBuf, TemplateFileError>> = Vec::new();
    let mut unreadable = Vec::new();
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(source) => {
                unreadable.push(Err(TemplateFileError::Io {
                    path: dir.to_path_buf(),
                    source,
                }));
                continue;
            }
        };
        let path = entry.path();
        if !has_template_extension(&path) {
            continue;
        }
        // follows symlinks
        match std::fs::metadata(&path) {
            Ok(meta) if meta.is_file() => files.push(Ok(path)),
            Ok(_) => {}
            Err(source) => files.push(Err(TemplateFileError::Io { path, source })),
        }
    }

    files.sort_by(|a, b| candidate_name(a).cmp(&candidate_name(b)));
    files.extend(unreadable);
    Ok(files)
}

fn candidate_name(candidate: &Result<PathBuf, TemplateFileError>) -> Option<&std::ffi::OsStr> {
    match candidate {
        Ok(path) => path.file_name(),
        Err(e) => e.path().file_name(),
    }
}

fn load_file(
    path: &Path,
    seen: &HashMap<OperationName, PathBuf>,
) -> Result<LoadedTemplate, TemplateFileError> {
    let contents = std::fs::read_to_string(path).map_err(|source| TemplateFileError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let definition = TemplateDefinition::from_yaml_str(&contents).map_err(|e| match e {
        DefinitionParseError::Yaml(source) => TemplateFileError::Parse {
            path: path.to_path_buf(),
            source,
        },
        DefinitionParseError::Schema(source) => TemplateFileError::Validation {
            path: path.to_path_buf(),
            source,
        },
    })?;

    let name = OperationName::from_path(path).ok_or_else(|| TemplateFileError::InvalidName {
        path: path.to_path_buf(),
    })?;

    if let Some(first) = seen.get(&name) {
        return Err(TemplateFileError::DuplicateName {
            name: name.to_string(),
            path: path.to_path_buf(),
            first: first.clone(),
        });
    }

    Ok(LoadedTemplate {
        name,
        definition,
        source: path.to_path_buf(),
    })
}
