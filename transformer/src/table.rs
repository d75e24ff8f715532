//! In-memory tables and their delimited-file representation.
//!
//! A report file is loaded as a [`WideTable`] (one row per metric, one
//! column per day), reshaped into a [`LongTable`] and finally stacked with
//! the other files into a [`CombinedTable`] that is written back out.
//!
//! Cells are `Option<String>`: empty fields load as `None` and `None` is
//! written as an empty field. Values are never trimmed, header text such as
//! `"Cost Marketing "` keeps its trailing space.

use std::collections::HashMap;
use std::path::Path;

use crate::error::{CsvError, CsvResult};

/// A single table cell; `None` is the null marker
pub type Cell = Option<String>;

/// A report as loaded: metrics down the side, days across the top
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WideTable {
    /// Header row. The first entry labels the metric-name column, the rest are day labels.
    pub header: Vec<String>,
    /// One row per metric, first cell is the metric name; padded to the header width
    pub rows: Vec<Vec<Cell>>,
}

impl WideTable {
    pub fn new(header: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        let width = header.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                if row.len() < width {
                    row.resize(width, None);
                }
                row
            })
            .collect();
        Self { header, rows }
    }

    /// Metric name of a row (its first cell)
    pub fn row_label(row: &[Cell]) -> Option<&str> {
        row.first().and_then(|cell| cell.as_deref())
    }
}

/// One row per day, one column per metric
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LongTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl LongTable {
    /// Index of the first column named `name`
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// All values of the first column named `name`
    pub fn column(&self, name: &str) -> Option<Vec<Option<&str>>> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(|row| row[idx].as_deref()).collect())
    }
}

/// Row-wise concatenation of every successfully reshaped file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CombinedTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl CombinedTable {
    /// Stack long tables in order.
    ///
    /// The column set is the ordered union of the inputs' columns. A name
    /// that appears k times in one table takes k slots, matched by
    /// occurrence. Cells for columns a table lacks are null.
    pub fn concat(tables: Vec<LongTable>) -> Self {
        let mut columns: Vec<String> = Vec::new();
        let mut slots_by_name: HashMap<String, Vec<usize>> = HashMap::new();

        // Pass 1: map every table column to a union slot
        let mappings: Vec<Vec<usize>> = tables
            .iter()
            .map(|table| {
                let mut seen: HashMap<&str, usize> = HashMap::new();
                table
                    .columns
                    .iter()
                    .map(|name| {
                        let occurrence = seen.entry(name.as_str()).or_insert(0);
                        let slots = slots_by_name.entry(name.clone()).or_default();
                        if *occurrence == slots.len() {
                            slots.push(columns.len());
                            columns.push(name.clone());
                        }
                        let slot = slots[*occurrence];
                        *occurrence += 1;
                        slot
                    })
                    .collect()
            })
            .collect();

        // Pass 2: scatter rows into the union layout
        let width = columns.len();
        let mut rows = Vec::with_capacity(tables.iter().map(|t| t.rows.len()).sum());
        for (table, mapping) in tables.into_iter().zip(mappings) {
            for row in table.rows {
                let mut combined = vec![None; width];
                for (cell, &slot) in row.into_iter().zip(&mapping) {
                    combined[slot] = cell;
                }
                rows.push(combined);
            }
        }

        Self { columns, rows }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Render the first `n` rows as an aligned text table
    pub fn preview(&self, n: usize) -> String {
        const NULL: &str = "null";
        let shown = &self.rows[..n.min(self.rows.len())];

        let mut widths: Vec<usize> = self.columns.iter().map(|c| c.chars().count()).collect();
        for row in shown {
            for (i, cell) in row.iter().enumerate() {
                let len = cell.as_deref().unwrap_or(NULL).chars().count();
                widths[i] = widths[i].max(len);
            }
        }
        let index_width = shown.len().saturating_sub(1).to_string().len();

        let mut header = " ".repeat(index_width);
        for (name, &width) in self.columns.iter().zip(&widths) {
            header.push_str(&format!("  {:>width$}", name));
        }
        let mut lines = vec![header];
        for (i, row) in shown.iter().enumerate() {
            let mut line = format!("{:<index_width$}", i);
            for (cell, &width) in row.iter().zip(&widths) {
                line.push_str(&format!("  {:>width$}", cell.as_deref().unwrap_or(NULL)));
            }
            lines.push(line);
        }
        lines.join("\n")
    }
}

// =============================================================================
// Loading
// =============================================================================

/// Detect the encoding of raw bytes: valid UTF-8 as is, otherwise chardet
pub fn detect_encoding(bytes: &[u8]) -> String {
    if std::str::from_utf8(bytes).is_ok() {
        return "utf-8".to_string();
    }
    let result = chardet::detect(bytes);
    let charset = result.0;

    // Normalize charset names
    match charset.to_lowercase().as_str() {
        "" | "ascii" | "utf-8" | "utf8" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        _ => charset,
    }
}

/// Decode bytes to text using the specified encoding
pub fn decode_content(bytes: &[u8], encoding: &str) -> CsvResult<String> {
    let text = match encoding.to_lowercase().as_str() {
        "utf-8" | "utf8" | "ascii" => match std::str::from_utf8(bytes) {
            Ok(s) => s.to_string(),
            Err(_) => String::from_utf8_lossy(bytes).to_string(),
        },
        // encoding_rs decodes latin-1 labels as windows-1252, a superset
        "iso-8859-1" | "latin-1" | "latin1" | "windows-1252" | "cp1252" => {
            encoding_rs::WINDOWS_1252.decode(bytes).0.to_string()
        }
        other => match encoding_rs::Encoding::for_label(other.as_bytes()) {
            Some(enc) => enc.decode(bytes).0.to_string(),
            None => {
                return std::str::from_utf8(bytes)
                    .map(str::to_string)
                    .map_err(|e| CsvError::EncodingError(format!("{} ({})", other, e)));
            }
        },
    };
    Ok(text.strip_prefix('\u{feff}').map(str::to_string).unwrap_or(text))
}

/// Parse delimited text into a wide table; the first record is the header
pub fn parse_wide_table(content: &str, delimiter: u8) -> CsvResult<WideTable> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut records = reader.records();
    let header: Vec<String> = records
        .next()
        .ok_or(CsvError::EmptyFile)??
        .iter()
        .map(str::to_string)
        .collect();

    let width = header.len();
    let mut rows = Vec::new();
    for record in records {
        let record = record?;
        if record.len() > width {
            return Err(CsvError::RaggedRow {
                line: record.position().map(|p| p.line()).unwrap_or(0),
                expected: width,
                found: record.len(),
            });
        }
        rows.push(
            record
                .iter()
                .map(|field| (!field.is_empty()).then(|| field.to_string()))
                .collect(),
        );
    }

    Ok(WideTable::new(header, rows))
}

/// Load a wide table from disk, auto-detecting the text encoding
pub fn load_wide_table(path: impl AsRef<Path>, delimiter: u8) -> CsvResult<WideTable> {
    let bytes = std::fs::read(path.as_ref())?;
    if bytes.is_empty() {
        return Err(CsvError::EmptyFile);
    }
    let encoding = detect_encoding(&bytes);
    let content = decode_content(&bytes, &encoding)?;
    parse_wide_table(&content, delimiter)
}

// =============================================================================
// Saving
// =============================================================================

/// Write a combined table: header row, then one record per row, no index column
pub fn save_table(table: &CombinedTable, path: impl AsRef<Path>, delimiter: u8) -> CsvResult<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_path(path.as_ref())?;

    writer.write_record(&table.columns)?;
    for row in &table.rows {
        writer.write_record(row.iter().map(|cell| cell.as_deref().unwrap_or("")))?;
    }
    writer.flush()?;
    Ok(())
}
