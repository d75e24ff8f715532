//! Run configuration.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Folder scanned for monthly reports when none is given
pub const DEFAULT_DATA_FOLDER: &str = "gh_data";

/// Where the combined table is written when no path is given
pub const DEFAULT_OUTPUT_PATH: &str = "transformed_cv_data.csv";

/// Number of rows shown by the CLI preview
pub const DEFAULT_PREVIEW_ROWS: usize = 5;

/// Options for a transformation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformerConfig {
    /// Folder containing the wide monthly report files
    pub data_folder: PathBuf,

    /// Destination of the combined long-format table
    pub output_path: PathBuf,

    /// File extension (without the dot) of candidate source files
    pub extension: String,

    /// Field delimiter for both input and output
    pub delimiter: char,

    /// Rows shown in the preview after a run
    pub preview_rows: usize,
}

impl Default for TransformerConfig {
    fn default() -> Self {
        Self {
            data_folder: PathBuf::from(DEFAULT_DATA_FOLDER),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            extension: "csv".to_string(),
            delimiter: ',',
            preview_rows: DEFAULT_PREVIEW_ROWS,
        }
    }
}

impl TransformerConfig {
    /// Default configuration reading from `data_folder`
    pub fn with_data_folder(data_folder: impl Into<PathBuf>) -> Self {
        Self {
            data_folder: data_folder.into(),
            ..Self::default()
        }
    }

    /// Load a configuration from a JSON file; missing keys take their defaults
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        Ok(serde_json::from_str(&content)?)
    }

    /// The name suffix a file must end with to be picked up, e.g. `.csv`
    pub fn file_suffix(&self) -> String {
        format!(".{}", self.extension.trim_start_matches('.'))
    }

    /// Delimiter as the single byte the csv reader/writer expects
    pub fn delimiter_byte(&self) -> u8 {
        if self.delimiter.is_ascii() {
            self.delimiter as u8
        } else {
            b','
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TransformerConfig::default();
        assert_eq!(config.data_folder, PathBuf::from("gh_data"));
        assert_eq!(config.output_path, PathBuf::from("transformed_cv_data.csv"));
        assert_eq!(config.file_suffix(), ".csv");
        assert_eq!(config.delimiter_byte(), b',');
        assert_eq!(config.preview_rows, 5);
    }

    #[test]
    fn test_suffix_tolerates_leading_dot() {
        let config = TransformerConfig {
            extension: ".tsv".into(),
            ..TransformerConfig::default()
        };
        assert_eq!(config.file_suffix(), ".tsv");
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: TransformerConfig =
            serde_json::from_str(r#"{"data_folder": "ke_data", "delimiter": ";"}"#).unwrap();
        assert_eq!(config.data_folder, PathBuf::from("ke_data"));
        assert_eq!(config.delimiter_byte(), b';');
        assert_eq!(config.extension, "csv");
    }

    #[test]
    fn test_from_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("growth360.json");
        fs::write(&path, r#"{"output_path": "out/combined.csv", "preview_rows": 2}"#).unwrap();

        let config = TransformerConfig::from_json_file(&path).unwrap();
        assert_eq!(config.output_path, PathBuf::from("out/combined.csv"));
        assert_eq!(config.preview_rows, 2);
        assert_eq!(config.data_folder, PathBuf::from("gh_data"));

        assert!(TransformerConfig::from_json_file(dir.path().join("missing.json")).is_err());
    }
}
