//! Multi-file aggregation: discover, reshape each file, stack the results.
//!
//! Every file is attempted independently. A file that fails to load or
//! reshape is reported and skipped; only run-level conditions (no input,
//! every file failed) abort the run.
//!
//! # Example
//!
//! ```rust,ignore
//! use growth360::{Transformer, TransformerConfig};
//!
//! let transformer = Transformer::with_config(TransformerConfig::with_data_folder("gh_data"));
//! let outcome = transformer.save_transformed("transformed_cv_data.csv")?;
//! println!("{} rows, {} failed files", outcome.table.row_count(), outcome.failures.len());
//! ```

use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::TransformerConfig;
use crate::date::infer_date;
use crate::discovery::list_source_files;
use crate::error::{PipelineError, PipelineResult, ReshapeResult};
use crate::logs::{log_error_indent, log_info, log_success, log_warning};
use crate::table::{load_wide_table, save_table, CombinedTable, LongTable};
use crate::transform::reshape::reshape;

/// A file that was skipped, with the reason
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileFailure {
    pub path: PathBuf,
    pub reason: String,
}

/// Result of a run over a directory
#[derive(Debug, Clone)]
pub struct TransformOutcome {
    /// Combined long-format table, in discovery order
    pub table: CombinedTable,

    /// Files that contributed rows
    pub processed: Vec<PathBuf>,

    /// Files that were skipped
    pub failures: Vec<FileFailure>,
}

impl TransformOutcome {
    /// Summary suitable for writing next to the output
    pub fn report(&self, output_path: Option<&Path>) -> RunReport {
        RunReport {
            output_path: output_path.map(Path::to_path_buf),
            rows: self.table.row_count(),
            columns: self.table.columns.clone(),
            processed: self.processed.clone(),
            failures: self.failures.clone(),
        }
    }
}

/// Machine-readable summary of a run
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub output_path: Option<PathBuf>,
    pub rows: usize,
    pub columns: Vec<String>,
    pub processed: Vec<PathBuf>,
    pub failures: Vec<FileFailure>,
}

impl RunReport {
    /// Write the report as pretty JSON
    pub fn write_json(&self, path: impl AsRef<Path>) -> PipelineResult<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| PipelineError::Report(e.to_string()))?;
        fs::write(path.as_ref(), json).map_err(|e| PipelineError::Report(e.to_string()))
    }
}

/// Transforms every report in a folder into one long table
#[derive(Debug, Clone, Default)]
pub struct Transformer {
    config: TransformerConfig,
}

impl Transformer {
    /// Transformer over the default data folder
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: TransformerConfig) -> Self {
        Self { config }
    }

    /// Transformer over `dir` with otherwise default settings
    pub fn with_data_folder(dir: impl Into<PathBuf>) -> Self {
        Self::with_config(TransformerConfig::with_data_folder(dir))
    }

    pub fn config(&self) -> &TransformerConfig {
        &self.config
    }

    /// Candidate source files in the data folder
    pub fn list_source_files(&self) -> PipelineResult<Vec<PathBuf>> {
        list_source_files(&self.config.data_folder, &self.config.file_suffix())
    }

    /// Load and reshape a single report
    pub fn transform_file(&self, path: &Path) -> ReshapeResult<LongTable> {
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let date = infer_date(&filename)?;
        let wide = load_wide_table(path, self.config.delimiter_byte())?;
        let long = reshape(wide, date)?;

        if let Some(days) = date.days_in_month() {
            if long.rows.len() > days as usize {
                log_warning(format!(
                    "{} has {} day rows, more than the {} days of {}-{:02}",
                    filename,
                    long.rows.len(),
                    days,
                    date.year,
                    date.month
                ));
            }
        }
        Ok(long)
    }

    /// Transform every discovered file and stack the results
    pub fn transform_all(&self) -> PipelineResult<TransformOutcome> {
        let files = self.list_source_files()?;
        if files.is_empty() {
            return Err(PipelineError::NoInput {
                directory: self.config.data_folder.clone(),
                extension: self.config.extension.trim_start_matches('.').to_string(),
            });
        }

        let attempted = files.len();
        let attempts: Vec<(PathBuf, ReshapeResult<LongTable>)> = files
            .into_iter()
            .map(|path| {
                log_info(format!("Processing: {}", path.display()));
                let result = self.transform_file(&path);
                if let Err(e) = &result {
                    log_error_indent(format!("Error processing {}: {}", path.display(), e), 1);
                }
                (path, result)
            })
            .collect();

        let mut tables = Vec::new();
        let mut processed = Vec::new();
        let mut failures = Vec::new();
        for (path, result) in attempts {
            match result {
                Ok(table) => {
                    tables.push(table);
                    processed.push(path);
                }
                Err(e) => {
                    failures.push(FileFailure {
                        path,
                        reason: e.to_string(),
                    });
                }
            }
        }

        if tables.is_empty() {
            return Err(PipelineError::AllFailed { attempted });
        }
        if !failures.is_empty() {
            log_warning(format!("{} of {} files skipped", failures.len(), attempted));
        }

        Ok(TransformOutcome {
            table: CombinedTable::concat(tables),
            processed,
            failures,
        })
    }

    /// Transform every discovered file and write the combined table to `output_path`
    pub fn save_transformed(&self, output_path: impl AsRef<Path>) -> PipelineResult<TransformOutcome> {
        let outcome = self.transform_all()?;
        save_table(&outcome.table, output_path.as_ref(), self.config.delimiter_byte())?;
        log_success(format!(
            "Transformed data saved to: {}",
            output_path.as_ref().display()
        ));
        Ok(outcome)
    }
}

/// Transform every report in `directory` with default settings
pub fn transform_all(directory: impl Into<PathBuf>) -> PipelineResult<TransformOutcome> {
    Transformer::with_data_folder(directory).transform_all()
}

/// Transform every report in `directory` and write the result to `output_path`
pub fn save_transformed(
    directory: impl Into<PathBuf>,
    output_path: impl AsRef<Path>,
) -> PipelineResult<TransformOutcome> {
    Transformer::with_data_folder(directory).save_transformed(output_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const JUNE: &str = "Ghana - Marketing_Growth 360 Report - 2025 - June 2025 Overview.csv";

    #[test]
    fn test_default_transformer() {
        let transformer = Transformer::new();
        assert_eq!(transformer.config().data_folder, PathBuf::from("gh_data"));
    }

    #[test]
    fn test_transform_file_uses_filename_year() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("Ghana - Marketing_Growth 360 Report - 2024 - May 2024 Overview.csv");
        fs::write(&path, "Metric,May 1\nInstalls,3\n").unwrap();

        let long = Transformer::with_data_folder(dir.path()).transform_file(&path).unwrap();
        assert_eq!(long.column("report_day").unwrap(), vec![Some("2024-05-01")]);
    }

    #[test]
    fn test_bad_year_fails_only_that_file() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(JUNE), "Metric,June 1\nInstalls,3\n").unwrap();
        fs::write(
            dir.path().join("Ghana - Report - 2025 - Overview June.csv"),
            "Metric,June 1\nInstalls,4\n",
        )
        .unwrap();

        let outcome = transform_all(dir.path()).unwrap();
        assert_eq!(outcome.table.row_count(), 1);
        assert_eq!(outcome.failures.len(), 1);
        assert!(outcome.failures[0].reason.contains("Invalid year"));
    }

    #[test]
    fn test_no_input() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("readme.txt"), "hi").unwrap();
        let err = transform_all(dir.path()).unwrap_err();
        assert!(matches!(err, PipelineError::NoInput { .. }));
    }

    #[test]
    fn test_report_json() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(JUNE), "Metric,June 1\nInstalls,3\n").unwrap();
        let outcome = transform_all(dir.path()).unwrap();

        let report_path = dir.path().join("report.json");
        outcome.report(None).write_json(&report_path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&report_path).unwrap()).unwrap();
        assert_eq!(value["rows"], 1);
        assert_eq!(value["columns"][0], "report_day");
        assert_eq!(value["failures"].as_array().unwrap().len(), 0);
    }
}
