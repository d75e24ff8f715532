//! Report month/year inference from file names, and day-label parsing.
//!
//! Report files follow the naming convention
//!
//! ```text
//! <Country> - Marketing_Growth 360 Report - <Year> - <Month> <Year> Overview.csv
//! ```
//!
//! Only the fourth `" - "` segment is read. Its first two whitespace tokens
//! are the year and the month name, in either order: `2025 June` and
//! `June 2025 Overview.csv` both resolve to June 2025. Names that do not
//! have four segments fall back to [`ReportDate::default`] instead of failing.

use chrono::{Datelike, Months, NaiveDate};

use crate::error::{DateError, DateResult};

/// Separator between the segments of a report file name
pub const SEGMENT_SEPARATOR: &str = " - ";

/// Case-sensitive month lookup: full English names and three-letter abbreviations
const MONTHS: [(&str, u32); 24] = [
    ("Jan", 1), ("Feb", 2), ("Mar", 3), ("Apr", 4), ("May", 5), ("Jun", 6),
    ("Jul", 7), ("Aug", 8), ("Sep", 9), ("Oct", 10), ("Nov", 11), ("Dec", 12),
    ("January", 1), ("February", 2), ("March", 3), ("April", 4), ("May", 5), ("June", 6),
    ("July", 7), ("August", 8), ("September", 9), ("October", 10), ("November", 11), ("December", 12),
];

/// Month a report refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportDate {
    /// 1..=12
    pub month: u32,
    pub year: i32,
}

impl Default for ReportDate {
    fn default() -> Self {
        Self { month: 1, year: 2025 }
    }
}

impl ReportDate {
    pub fn new(month: u32, year: i32) -> Self {
        Self { month, year }
    }

    /// Number of days in the report month, `None` if the month is out of range
    pub fn days_in_month(&self) -> Option<u32> {
        let first = NaiveDate::from_ymd_opt(self.year, self.month, 1)?;
        first
            .checked_add_months(Months::new(1))?
            .pred_opt()
            .map(|last| last.day())
    }
}

/// Outcome of matching a file name against the naming convention
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilenameDate {
    /// The name has a date segment; month defaults to 1 if its name is unknown
    Parsed { month: u32, year: i32 },
    /// The name does not follow the convention
    Fallback,
}

impl FilenameDate {
    /// Resolve to a concrete date, applying the default on fallback
    pub fn report_date(self) -> ReportDate {
        match self {
            FilenameDate::Parsed { month, year } => ReportDate::new(month, year),
            FilenameDate::Fallback => ReportDate::default(),
        }
    }
}

/// Look up a month name or abbreviation
pub fn month_number(name: &str) -> Option<u32> {
    MONTHS
        .iter()
        .find(|(candidate, _)| *candidate == name)
        .map(|(_, number)| *number)
}

/// Match a file name against the report naming convention.
///
/// A non-numeric year token is an error; everything else that deviates
/// from the convention yields [`FilenameDate::Fallback`] or month 1.
pub fn match_filename(filename: &str) -> DateResult<FilenameDate> {
    let segments: Vec<&str> = filename.split(SEGMENT_SEPARATOR).collect();
    let Some(date_segment) = segments.get(3) else {
        return Ok(FilenameDate::Fallback);
    };

    let mut tokens = date_segment.split_whitespace();
    let first = tokens.next().unwrap_or("");
    let second = tokens.next();

    // "<Month> <Year>" when the segment leads with a month name, else "<Year> <Month>"
    let (year_token, month) = match month_number(first) {
        Some(month) => (second.unwrap_or(""), month),
        None => (first, second.and_then(month_number).unwrap_or(1)),
    };

    let year = year_token
        .parse::<i32>()
        .map_err(|_| DateError::InvalidYear {
            filename: filename.to_string(),
            value: year_token.to_string(),
        })?;

    Ok(FilenameDate::Parsed { month, year })
}

/// Infer the report month and year from a file name
pub fn infer_date(filename: &str) -> DateResult<ReportDate> {
    match_filename(filename).map(FilenameDate::report_date)
}

/// Turn a day label such as `"June 1"` into an ISO date (`2025-06-01`).
///
/// The month comes from the label itself; only the year is supplied.
/// Both full and abbreviated month names are accepted, case-insensitively.
pub fn parse_report_day(label: &str, year: i32) -> DateResult<String> {
    let invalid = || DateError::InvalidDay {
        value: label.to_string(),
        year,
    };

    let trimmed = label.trim();
    if trimmed.is_empty() {
        return Err(invalid());
    }

    NaiveDate::parse_from_str(&format!("{} {}", trimmed, year), "%B %d %Y")
        .map(|date| date.format("%Y-%m-%d").to_string())
        .map_err(|_| invalid())
}

#[cfg(test)]
mod tests {
    use super::*;

    const GHANA_JUNE: &str = "Ghana - Marketing_Growth 360 Report - 2025 - June 2025 Overview.csv";

    #[test]
    fn test_infer_conventional_name() {
        assert_eq!(infer_date(GHANA_JUNE).unwrap(), ReportDate::new(6, 2025));
    }

    #[test]
    fn test_match_returns_tagged_result() {
        assert_eq!(
            match_filename(GHANA_JUNE).unwrap(),
            FilenameDate::Parsed { month: 6, year: 2025 }
        );
        assert_eq!(
            match_filename("Ghana - Report - 2025.csv").unwrap(),
            FilenameDate::Fallback
        );
    }

    #[test]
    fn test_short_name_falls_back() {
        assert_eq!(infer_date("report.csv").unwrap(), ReportDate::new(1, 2025));
        assert_eq!(
            infer_date("Kenya - Growth - 2024.csv").unwrap(),
            ReportDate::default()
        );
    }

    #[test]
    fn test_abbreviated_month() {
        let name = "Kenya - Marketing_Growth 360 Report - 2024 - Sep 2024 Overview.csv";
        assert_eq!(infer_date(name).unwrap(), ReportDate::new(9, 2024));
    }

    #[test]
    fn test_year_first_segment() {
        let name = "Ghana - Marketing_Growth 360 Report - 2025 - 2025 March Overview.csv";
        assert_eq!(infer_date(name).unwrap(), ReportDate::new(3, 2025));
    }

    #[test]
    fn test_unknown_month_defaults_to_january() {
        let lowercase = "Ghana - Marketing_Growth 360 Report - 2025 - 2025 june Overview.csv";
        assert_eq!(infer_date(lowercase).unwrap(), ReportDate::new(1, 2025));

        let missing = "Ghana - Marketing_Growth 360 Report - 2025 - 2023";
        assert_eq!(infer_date(missing).unwrap(), ReportDate::new(1, 2023));
    }

    #[test]
    fn test_non_numeric_year_is_an_error() {
        let name = "Ghana - Marketing_Growth 360 Report - 2025 - Overview June 2025.csv";
        let err = infer_date(name).unwrap_err();
        assert!(matches!(err, DateError::InvalidYear { ref value, .. } if value == "Overview"));

        let name = "Ghana - Marketing_Growth 360 Report - 2025 - June Overview.csv";
        let err = infer_date(name).unwrap_err();
        assert!(matches!(err, DateError::InvalidYear { ref value, .. } if value == "Overview.csv"));
    }

    #[test]
    fn test_every_month_name_resolves() {
        assert_eq!(month_number("May"), Some(5));
        assert_eq!(month_number("December"), Some(12));
        assert_eq!(month_number("Dec"), Some(12));
        assert_eq!(month_number("dec"), None);
        for (name, number) in MONTHS {
            assert_eq!(month_number(name), Some(number));
        }
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(ReportDate::new(6, 2025).days_in_month(), Some(30));
        assert_eq!(ReportDate::new(12, 2025).days_in_month(), Some(31));
        assert_eq!(ReportDate::new(2, 2024).days_in_month(), Some(29));
        assert_eq!(ReportDate::new(2, 2025).days_in_month(), Some(28));
        assert_eq!(ReportDate::new(13, 2025).days_in_month(), None);
        assert_eq!(ReportDate::new(12, i32::MAX).days_in_month(), None);
        assert_eq!(ReportDate::new(12, i32::MIN).days_in_month(), None);
    }

    #[test]
    fn test_parse_report_day() {
        assert_eq!(parse_report_day("June 1", 2025).unwrap(), "2025-06-01");
        assert_eq!(parse_report_day(" June 30 ", 2025).unwrap(), "2025-06-30");
        assert_eq!(parse_report_day("Feb 29", 2024).unwrap(), "2024-02-29");
    }

    #[test]
    fn test_parse_report_day_rejects_garbage() {
        assert!(parse_report_day("Total", 2025).is_err());
        assert!(parse_report_day("", 2025).is_err());
        assert!(parse_report_day("June 31", 2025).is_err());
        assert!(parse_report_day("Feb 29", 2025).is_err());
    }

    #[test]
    fn test_parse_report_day_month_name_is_lenient() {
        assert_eq!(parse_report_day("jun 1", 2025).unwrap(), "2025-06-01");
        assert_eq!(parse_report_day("JUNE 2", 2025).unwrap(), "2025-06-02");
    }
}
