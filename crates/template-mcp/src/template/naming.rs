//! Tool name derivation from template filenames.
//!
//! `Weekly Update (v2).yml` → key `weekly_update_v2` → tool
//! `get_weekly_update_v2_template`, title `Get weekly update v2 template`.

use std::fmt;
use std::path::Path;

/// File extensions recognized as template definitions. Treated as equivalent.
pub const TEMPLATE_EXTENSIONS: &[&str] = &["yml", "yaml"];

const SEPARATOR: char = '_';
const TOOL_PREFIX: &str = "get_";
const TOOL_SUFFIX: &str = "_template";

/// Normalized identifier derived from a template filename.
///
/// Lowercase ASCII letters and digits separated by single underscores. Never
/// empty, never starts or ends with an underscore.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OperationName(String);

impl OperationName {
    /// Derive a name from a filename, stripping a recognized template extension.
    ///
    /// Returns `None` when the stem contains no ASCII letters or digits.
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        Self::from_stem(strip_template_extension(file_name))
    }

    /// Derive a name from a path's final component.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.file_name()
            .and_then(|n| n.to_str())
            .and_then(Self::from_file_name)
    }

    /// Normalize an arbitrary stem. Idempotent.
    pub fn from_stem(stem: &str) -> Option<Self> {
        let normalized = normalize(stem);
        (!normalized.is_empty()).then_some(Self(normalized))
    }

    /// Registry key, e.g. `weekly_update`.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Identifier exposed to the MCP host, e.g. `get_weekly_update_template`.
    pub fn tool_name(&self) -> String {
        format!("{TOOL_PREFIX}{}{TOOL_SUFFIX}", self.0)
    }

    /// Human-facing label, e.g. `Get weekly update template`.
    pub fn title(&self) -> String {
        format!("Get {} template", self.0.replace(SEPARATOR, " "))
    }
}

impl fmt::Display for OperationName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Whether a path carries one of the [`TEMPLATE_EXTENSIONS`].
pub fn has_template_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| TEMPLATE_EXTENSIONS.contains(&ext))
}

fn strip_template_extension(file_name: &str) -> &str {
    TEMPLATE_EXTENSIONS
        .iter()
        .find_map(|ext| {
            file_name
                .strip_suffix(ext)
                .and_then(|rest| rest.strip_suffix('.'))
        })
        .unwrap_or(file_name)
}

fn normalize(stem: &str) -> String {
    let mut out = String::with_capacity(stem.len());
    let mut pending_separator = false;

    for ch in stem.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_separator && !out.is_empty() {
                out.push(SEPARATOR);
            }
            pending_separator = false;
            out.push(ch.to_ascii_lowercase());
        } else {
            pending_separator = true;
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn key(file_name: &str) -> Option<String> {
        OperationName::from_file_name(file_name).map(|n| n.as_str().to_string())
    }

    #[test]
    fn test_strips_both_extensions() {
        assert_eq!(key("weekly_update.yml").as_deref(), Some("weekly_update"));
        assert_eq!(key("weekly_update.yaml").as_deref(), Some("weekly_update"));
    }

    #[test]
    fn test_normalizes_case_and_separators() {
        assert_eq!(key("Weekly-Update.yml").as_deref(), Some("weekly_update"));
        assert_eq!(
            key("  Weekly Update (v2)!!.yaml").as_deref(),
            Some("weekly_update_v2")
        );
        assert_eq!(key("a..b__c--d.yml").as_deref(), Some("a_b_c_d"));
        assert_eq!(key("_leading_and_trailing_.yml").as_deref(), Some("leading_and_trailing"));
    }

    #[test]
    fn test_inner_dots_are_separators() {
        assert_eq!(key("release.notes.v1.yml").as_deref(), Some("release_notes_v1"));
    }

    #[test]
    fn test_non_ascii_collapses() {
        assert_eq!(key("café-menu.yml").as_deref(), Some("caf_menu"));
    }

    #[test]
    fn test_no_alphanumerics_is_none() {
        assert_eq!(key("---.yml"), None);
        assert_eq!(key(".yml"), None);
        assert_eq!(key("日本.yaml"), None);
    }

    #[test]
    fn test_idempotent() {
        for input in ["Weekly Update", "a--b", "ALLCAPS_name", "x"] {
            let once = OperationName::from_stem(input).unwrap();
            let twice = OperationName::from_stem(once.as_str()).unwrap();
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_tool_name_and_title() {
        let name = OperationName::from_file_name("weekly_update.yml").unwrap();
        assert_eq!(name.tool_name(), "get_weekly_update_template");
        assert_eq!(name.title(), "Get weekly update template");
        assert_eq!(name.to_string(), "weekly_update");
    }

    #[test]
    fn test_from_path() {
        let name = OperationName::from_path(&PathBuf::from("/tmp/templates/Status Report.yaml"));
        assert_eq!(name.unwrap().as_str(), "status_report");
    }

    #[test]
    fn test_has_template_extension() {
        assert!(has_template_extension(&PathBuf::from("a.yml")));
        assert!(has_template_extension(&PathBuf::from("dir/a.yaml")));
        assert!(!has_template_extension(&PathBuf::from("a.json")));
        assert!(!has_template_extension(&PathBuf::from("a.yml.bak")));
        assert!(!has_template_extension(&PathBuf::from("yml")));
    }
}
