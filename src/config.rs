//! Application settings.
//!
//! [`Settings`] is an explicit value handed to the [`crate::convert::Converter`];
//! the parsers never consult it. It is stored as YAML:
//!
//! ```yaml
//! output_dir: /home/me/notes
//! has_header: true
//! column_policy: positional
//! parallel: false
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::common::{Error, Result};
use crate::markdown::MarkdownOptions;
use crate::sheet::ColumnPolicy;

/// Persistent conversion settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Output directory; defaults to the directory of the first input
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,
    /// Whether the first row of a sheet is its header
    pub has_header: bool,
    /// How cells are placed within a row
    pub column_policy: ColumnPolicy,
    /// Convert independent sheets concurrently
    pub parallel: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            output_dir: None,
            has_header: true,
            column_policy: ColumnPolicy::DocumentOrder,
            parallel: false,
        }
    }
}

impl Settings {
    /// Load settings from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("cannot read '{}': {}", path.display(), e)))?;
        let settings = Self::from_yaml_str(&text)?;
        tracing::debug!(path = %path.display(), "loaded settings");
        Ok(settings)
    }

    /// Save settings to a YAML file, creating parent directories.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                Error::Config(format!("cannot create '{}': {}", parent.display(), e))
            })?;
        }
        fs::write(path, self.to_yaml_string()?)
            .map_err(|e| Error::Config(format!("cannot write '{}': {}", path.display(), e)))
    }

    /// Parse settings from YAML text. Missing keys keep their defaults.
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_saphyr::from_str(text)
            .map_err(|e| Error::Config(format!("invalid settings: {}", e)))
    }

    /// Serialize settings to YAML text.
    pub fn to_yaml_string(&self) -> Result<String> {
        serde_saphyr::to_string(self)
            .map_err(|e| Error::Config(format!("Failed to serialize settings to YAML: {}", e)))
    }

    /// Markdown options implied by these settings.
    pub fn markdown_options(&self) -> MarkdownOptions {
        MarkdownOptions::new()
            .with_header(self.has_header)
            .with_column_policy(self.column_policy)
    }

    /// Output directory for a batch whose first input is `first_input`.
    ///
    /// Falls back to the input's parent directory, then to the current
    /// directory.
    pub fn output_dir_for(&self, first_input: Option<&Path>) -> PathBuf {
        if let Some(dir) = &self.output_dir {
            return dir.clone();
        }
        first_input
            .and_then(Path::parent)
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_partial_yaml() {
        let settings = Settings::from_yaml_str("has_header: false\n").unwrap();
        assert!(!settings.has_header);
        assert_eq!(settings.column_policy, ColumnPolicy::DocumentOrder);
        assert_eq!(settings.output_dir, None);
        assert!(!settings.parallel);

        assert_eq!(Settings::from_yaml_str("").unwrap(), Settings::default());
    }

    #[test]
    fn test_column_policy_names() {
        let settings = Settings::from_yaml_str("column_policy: positional\n").unwrap();
        assert_eq!(settings.column_policy, ColumnPolicy::Positional);

        let err = Settings::from_yaml_str("column_policy: sideways\n").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.yaml");
        let settings = Settings {
            output_dir: Some(dir.path().join("out")),
            has_header: false,
            column_policy: ColumnPolicy::Positional,
            parallel: true,
        };

        settings.save(&path).unwrap();
        assert_eq!(Settings::load(&path).unwrap(), settings);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Settings::load(dir.path().join("absent.yaml")).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_output_dir_for() {
        let settings = Settings::default();
        assert_eq!(
            settings.output_dir_for(Some(Path::new("/data/book.xlsx"))),
            PathBuf::from("/data")
        );
        assert_eq!(settings.output_dir_for(Some(Path::new("book.xlsx"))), PathBuf::from("."));
        assert_eq!(settings.output_dir_for(None), PathBuf::from("."));

        let settings = Settings {
            output_dir: Some(PathBuf::from("/out")),
            ..Settings::default()
        };
        assert_eq!(
            settings.output_dir_for(Some(Path::new("/data/book.xlsx"))),
            PathBuf::from("/out")
        );
    }

    #[test]
    fn test_markdown_options() {
        let settings = Settings {
            has_header: false,
            ..Settings::default()
        };
        let options = settings.markdown_options();
        assert!(!options.has_header);
        assert_eq!(options.column_policy, ColumnPolicy::DocumentOrder);
    }
}
