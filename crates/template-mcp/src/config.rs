//! Process configuration.
//!
//! One setting matters: the templates directory. It comes from `--templates-path`,
//! then the `TEMPLATES_PATH` environment variable, then [`DEFAULT_TEMPLATES_PATH`].

use std::path::PathBuf;

use clap::Parser;

/// Environment variable selecting the templates directory.
pub const TEMPLATES_PATH_ENV: &str = "TEMPLATES_PATH";

/// Used when neither the flag nor the environment variable is set.
pub const DEFAULT_TEMPLATES_PATH: &str = "~/.template-mcp/templates";

/// Command-line and environment settings for the `template-mcp` binary.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "template-mcp",
    version,
    about = "MCP server exposing YAML document templates as tools"
)]
pub struct ServerConfig {
    /// Directory containing *.yml / *.yaml template definitions (supports ~)
    #[arg(long, env = TEMPLATES_PATH_ENV, default_value = DEFAULT_TEMPLATES_PATH)]
    pub templates_path: String,

    /// Load and validate templates, print the registered tools, and exit
    #[arg(long)]
    pub check: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            templates_path: DEFAULT_TEMPLATES_PATH.to_string(),
            check: false,
        }
    }
}

impl ServerConfig {
    pub fn with_templates_path(path: impl Into<String>) -> Self {
        Self {
            templates_path: path.into(),
            ..Default::default()
        }
    }
}

/// Expand a leading `~` to the home directory. Other paths are returned as-is.
pub fn expand_path(path: &str) -> PathBuf {
    if path == "~" {
        if let Some(home) = home_dir() {
            return home;
        }
    }
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .filter(|h| !h.is_empty())
        .map(PathBuf::from)
}
