//! Transformation module.
//!
//! This module handles wide report to long table transformation:
//! - Normalize: Column-name rewrite rules
//! - Reshape: Single-file wide-to-long reshape
//! - Pipeline: Multi-file discovery, isolation and concatenation

pub mod normalize;
pub mod pipeline;
pub mod reshape;

pub use normalize::{apply_rules, normalize_column, RewriteRule, COLUMN_RULES};
pub use pipeline::*;
pub use reshape::{reshape, reshape_with_rules, PLACEHOLDER_COLUMNS, REPORT_DAY};
