//! Wide-to-long reshape of a single monthly report.
//!
//! # Architecture
//!
//! ```text
//! Wide (as loaded)                     Long (output)
//! ┌─────────────┬────────┬────────┐    ┌────────────┬──────────┬──────────────┬─────┐
//! │ Metric      │ June 1 │ June 2 │    │ report_day │ installs │ cost_digital │ ... │
//! │ Installs    │ 10     │ 12     │ →  │ 2025-06-01 │ 10       │ 5            │     │
//! │ Cost Growth │ 5      │ 7      │    │ 2025-06-02 │ 12       │ 7            │     │
//! └─────────────┴────────┴────────┘    └────────────┴──────────┴──────────────┴─────┘
//! ```
//!
//! Rows are sorted by metric name, transposed, the metric names become
//! headers and are normalized, the day labels become ISO dates, and the
//! placeholder columns are appended.

use crate::date::{parse_report_day, ReportDate};
use crate::error::{ReshapeError, ReshapeResult};
use crate::table::{Cell, LongTable, WideTable};
use crate::transform::normalize::{apply_rules, RewriteRule, COLUMN_RULES};

/// Name of the date column every long table starts with
pub const REPORT_DAY: &str = "report_day";

/// Columns present in every output row with a null value
pub const PLACEHOLDER_COLUMNS: [&str; 6] = [
    "new_install_first_dis",
    "signupfirst_dis",
    "cac_incl_branding",
    "first_disbursement_all",
    "fsfirst_disb",
    "first_disbursement_fidobiz",
];

/// Reshape a wide report into long form using the default column rules
pub fn reshape(wide: WideTable, date: ReportDate) -> ReshapeResult<LongTable> {
    reshape_with_rules(wide, date, &COLUMN_RULES)
}

/// Reshape a wide report into long form.
///
/// Fails with [`ReshapeError::Structure`] when the table has no header or
/// no metric rows, and with a date error when a day label does not parse.
pub fn reshape_with_rules(
    wide: WideTable,
    date: ReportDate,
    rules: &[RewriteRule],
) -> ReshapeResult<LongTable> {
    if wide.header.is_empty() {
        return Err(ReshapeError::Structure("missing header row".into()));
    }
    if wide.rows.is_empty() {
        return Err(ReshapeError::Structure("no metric rows to transpose".into()));
    }

    let transposed = transpose(sort_by_metric(wide));
    let mut transposed = transposed.into_iter();
    let header_row = transposed
        .next()
        .ok_or_else(|| ReshapeError::Structure("nothing left after transpose".into()))?;

    // The promoted first row holds the header label followed by the metric names
    let mut columns: Vec<String> = header_row
        .into_iter()
        .map(|cell| apply_rules(cell.as_deref().unwrap_or(""), rules))
        .collect();
    columns[0] = REPORT_DAY.to_string();

    let mut rows = Vec::new();
    for mut row in transposed {
        let label = row[0].take().unwrap_or_default();
        row[0] = Some(parse_report_day(&label, date.year)?);
        rows.push(row);
    }

    let mut table = LongTable { columns, rows };
    add_placeholders(&mut table);
    Ok(table)
}

/// Stable sort of the metric rows by their name; unnamed rows go first
fn sort_by_metric(mut wide: WideTable) -> WideTable {
    wide.rows
        .sort_by(|a, b| WideTable::row_label(a).cmp(&WideTable::row_label(b)));
    wide
}

/// Turn header + metric rows into one row per original column.
///
/// Row 0 of the result is `[header label, metric names...]`, each following
/// row is `[day label, values...]`.
fn transpose(wide: WideTable) -> Vec<Vec<Cell>> {
    let WideTable { header, rows } = wide;
    header
        .into_iter()
        .enumerate()
        .map(|(col, label)| {
            let mut out = Vec::with_capacity(rows.len() + 1);
            out.push(Some(label));
            out.extend(rows.iter().map(|row| row.get(col).cloned().flatten()));
            out
        })
        .collect()
}

/// Null out or append every placeholder column
fn add_placeholders(table: &mut LongTable) {
    for name in PLACEHOLDER_COLUMNS {
        let existing: Vec<usize> = table
            .columns
            .iter()
            .enumerate()
            .filter(|(_, c)| c.as_str() == name)
            .map(|(i, _)| i)
            .collect();

        if existing.is_empty() {
            table.columns.push(name.to_string());
            for row in &mut table.rows {
                row.push(None);
            }
        } else {
            for row in &mut table.rows {
                for &i in &existing {
                    row[i] = None;
                }
            }
        }
    }
}
