//! Error types for the report transformation pipeline.
//!
//! - [`CsvError`] - loading and saving delimited tables
//! - [`DateError`] - filename dates and day labels that cannot be parsed
//! - [`ReshapeError`] - anything that aborts a single file
//! - [`PipelineError`] - run-level failures that abort the whole run
//! - [`ConfigError`] - unreadable configuration files
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.

use std::path::PathBuf;
use thiserror::Error;

// =============================================================================
// CSV Errors
// =============================================================================

/// Errors while reading or writing a delimited table.
#[derive(Debug, Error)]
pub enum CsvError {
    /// Failed to read or write the file.
    #[error("Failed to access file: {0}")]
    IoError(#[from] std::io::Error),

    /// Malformed CSV content.
    #[error("Invalid CSV format: {0}")]
    ParseError(#[from] csv::Error),

    /// Content could not be decoded to text.
    #[error("Failed to decode content: {0}")]
    EncodingError(String),

    /// Empty file.
    #[error("CSV file is empty")]
    EmptyFile,

    /// A data row carries more fields than the header.
    #[error("Line {line}: expected at most {expected} fields, found {found}")]
    RaggedRow {
        line: u64,
        expected: usize,
        found: usize,
    },
}

// =============================================================================
// Date Errors
// =============================================================================

/// Errors while turning filename segments or day labels into dates.
#[derive(Debug, Error)]
pub enum DateError {
    /// The year token of a report filename is not an integer.
    #[error("Invalid year '{value}' in filename '{filename}'")]
    InvalidYear { filename: String, value: String },

    /// A day label does not match the "<Month> <day>" format.
    #[error("Invalid report day '{value}' for year {year}")]
    InvalidDay { value: String, year: i32 },
}

// =============================================================================
// Reshape Errors (file-scoped)
// =============================================================================

/// Failures that abort the reshape of one file.
///
/// The driver catches these per file, reports them and moves on.
#[derive(Debug, Error)]
pub enum ReshapeError {
    /// The file could not be loaded.
    #[error("CSV error: {0}")]
    Csv(#[from] CsvError),

    /// A date could not be parsed.
    #[error("Date error: {0}")]
    Date(#[from] DateError),

    /// The table does not have the expected wide shape.
    #[error("Unexpected table structure: {0}")]
    Structure(String),
}

// =============================================================================
// Pipeline Errors (run-level)
// =============================================================================

/// Errors that abort a whole run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Discovery found no candidate files.
    #[error("No {extension} files found in {}", directory.display())]
    NoInput {
        directory: PathBuf,
        extension: String,
    },

    /// Every discovered file failed to reshape.
    #[error("No files were successfully transformed ({attempted} attempted)")]
    AllFailed { attempted: usize },

    /// The source directory exists but could not be listed.
    #[error("Cannot list {}: {source}", directory.display())]
    Discovery {
        directory: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing the combined table failed.
    #[error("Failed to save combined table: {0}")]
    Save(#[from] CsvError),

    /// Writing the run report failed.
    #[error("Failed to write run report: {0}")]
    Report(String),
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors while loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error.
    #[error("Config IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON error.
    #[error("Config JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for CSV operations.
pub type CsvResult<T> = Result<T, CsvError>;

/// Result type for date inference.
pub type DateResult<T> = Result<T, DateError>;

/// Result type for single-file reshapes.
pub type ReshapeResult<T> = Result<T, ReshapeError>;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion_chain() {
        // CsvError -> ReshapeError
        let csv_err = CsvError::EmptyFile;
        let reshape_err: ReshapeError = csv_err.into();
        assert!(reshape_err.to_string().contains("empty"));

        // DateError -> ReshapeError
        let date_err = DateError::InvalidDay {
            value: "Juneteenth".into(),
            year: 2025,
        };
        let reshape_err: ReshapeError = date_err.into();
        assert!(reshape_err.to_string().contains("Juneteenth"));
    }

    #[test]
    fn test_run_level_messages() {
        let err = PipelineError::NoInput {
            directory: PathBuf::from("gh_data"),
            extension: "csv".into(),
        };
        assert_eq!(err.to_string(), "No csv files found in gh_data");

        let err = PipelineError::AllFailed { attempted: 3 };
        assert!(err.to_string().contains("3 attempted"));
    }

    #[test]
    fn test_year_error_format() {
        let err = DateError::InvalidYear {
            filename: "a - b - c - twenty June".into(),
            value: "twenty".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("'twenty'"));
        assert!(msg.contains("a - b - c"));
    }
}
