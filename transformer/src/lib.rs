//! # Growth360 - monthly report reshaping
//!
//! Growth360 turns a folder of wide-format monthly report spreadsheets (one
//! row per metric, one column per day) into a single long-format table (one
//! row per day, one column per metric).
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Data dir   │────▶│  Discovery  │────▶│   Reshape   │────▶│  Combined   │
//! │  (*.csv)    │     │  + filename │     │  per file   │     │  CSV table  │
//! │             │     │    dates    │     │  (isolated) │     │             │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use growth360::save_transformed;
//!
//! fn main() {
//!     let outcome = save_transformed("gh_data", "transformed_cv_data.csv").unwrap();
//!     println!("Transformed {} rows", outcome.table.row_count());
//! }
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Hierarchical error types
//! - [`config`] - Run configuration
//! - [`logs`] - Leveled progress output
//! - [`discovery`] - Source file listing
//! - [`date`] - Report month/year inference
//! - [`table`] - Tables and CSV load/save
//! - [`transform`] - Normalization, reshape and pipeline

// Core modules
pub mod config;
pub mod error;
pub mod logs;

// Input
pub mod date;
pub mod discovery;
pub mod table;

// Transformation
pub mod transform;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{
    ConfigError, CsvError, DateError, PipelineError, PipelineResult, ReshapeError, ReshapeResult,
};

// =============================================================================
// Re-exports - Config
// =============================================================================

pub use config::TransformerConfig;

// =============================================================================
// Re-exports - Dates and tables
// =============================================================================

pub use date::{infer_date, match_filename, parse_report_day, FilenameDate, ReportDate};
pub use discovery::list_source_files;
pub use table::{load_wide_table, parse_wide_table, save_table, Cell, CombinedTable, LongTable, WideTable};

// =============================================================================
// Re-exports - Pipeline
// =============================================================================

pub use transform::{
    normalize_column, reshape, save_transformed, transform_all, FileFailure, RunReport,
    TransformOutcome, Transformer, PLACEHOLDER_COLUMNS, REPORT_DAY,
};
