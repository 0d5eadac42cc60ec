//! # Error Types
//!
//! Two tiers of failure:
//!
//! - [`StartupError`] is fatal. It stops the process before any tool is exposed.
//! - [`TemplateFileError`] is recoverable. It is recorded against a single file,
//!   the file is skipped, and discovery continues.

use std::path::PathBuf;

use thiserror::Error;

use crate::template::definition::SchemaError;

/// Startup result type
pub type StartupResult<T> = Result<T, StartupError>;

/// Fatal conditions that prevent the server from reaching the ready state.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("templates directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    #[error("templates path is not a directory: {path}")]
    NotADirectory { path: PathBuf },

    #[error("templates directory is not readable: {path}: {source}")]
    DirectoryUnreadable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(
        "no valid template definitions found in {path} ({skipped} file(s) skipped)"
    )]
    NoValidTemplates { path: PathBuf, skipped: usize },
}

/// A per-file problem found during discovery. The file is skipped.
#[derive(Debug, Error)]
pub enum TemplateFileError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("invalid template {path}: {source}")]
    Validation { path: PathBuf, source: SchemaError },

    #[error("cannot derive a tool name from {path}: file name has no ASCII letters or digits")]
    InvalidName { path: PathBuf },

    #[error("duplicate template name '{name}': {path} collides with {first}")]
    DuplicateName {
        name: String,
        path: PathBuf,
        first: PathBuf,
    },
}

impl TemplateFileError {
    /// Path of the file this error was recorded against.
    pub fn path(&self) -> &PathBuf {
        match self {
            Self::Io { path, .. }
            | Self::Parse { path, .. }
            | Self::Validation { path, .. }
            | Self::InvalidName { path }
            | Self::DuplicateName { path, .. } => path,
        }
    }

    /// Short machine-readable reason, used in diagnostic listings.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Io { .. } => "io_error",
            Self::Parse { .. } => "yaml_parse_error",
            Self::Validation { .. } => "validation_error",
            Self::InvalidName { .. } => "invalid_name",
            Self::DuplicateName { .. } => "duplicate_name",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directory_not_found_names_path() {
        let err = StartupError::DirectoryNotFound {
            path: PathBuf::from("/nope/templates"),
        };
        let msg = err.to_string();
        assert!(msg.contains("not found"));
        assert!(msg.contains("/nope/templates"));
    }

    #[test]
    fn test_no_valid_templates_message() {
        let err = StartupError::NoValidTemplates {
            path: PathBuf::from("/tmp/templates"),
            skipped: 2,
        };
        let msg = err.to_string();
        assert!(msg.contains("no valid template definitions found"));
        assert!(msg.contains("2 file(s) skipped"));
    }

    #[test]
    fn test_file_error_path_and_kind() {
        let err = TemplateFileError::DuplicateName {
            name: "weekly_update".to_string(),
            path: PathBuf::from("b/weekly_update.yml"),
            first: PathBuf::from("b/weekly-update.yml"),
        };
        assert_eq!(err.path(), &PathBuf::from("b/weekly_update.yml"));
        assert_eq!(err.kind(), "duplicate_name");
        assert!(err.to_string().contains("collides with b/weekly-update.yml"));

        let err = TemplateFileError::InvalidName {
            path: PathBuf::from("日本.yml"),
        };
        assert_eq!(err.kind(), "invalid_name");
        assert!(err.to_string().contains("no ASCII letters or digits"));
    }
}
