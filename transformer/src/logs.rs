//! Leveled progress output for the transformation run.
//!
//! All pipeline messages go through one process-wide [`Logger`] so the CLI
//! can raise the minimum level (`--quiet`) in a single place.

use once_cell::sync::Lazy;
use std::sync::atomic::{AtomicU8, Ordering};

/// Log level, ordered from least to most severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum LogLevel {
    Info = 0,
    Success = 1,
    Warning = 2,
    Error = 3,
}

impl LogLevel {
    fn from_u8(value: u8) -> Self {
        match value {
            0 => LogLevel::Info,
            1 => LogLevel::Success,
            2 => LogLevel::Warning,
            _ => LogLevel::Error,
        }
    }

    fn prefix(self) -> &'static str {
        match self {
            LogLevel::Info => "   ",
            LogLevel::Success => "   ✓",
            LogLevel::Warning => "   ⚠️",
            LogLevel::Error => "   ❌",
        }
    }
}

/// A single log entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// Log level
    pub level: LogLevel,
    /// Log message
    pub message: String,
    /// Indentation level (for nested logs)
    pub indent: u8,
}

impl LogEntry {
    pub fn info(message: impl Into<String>) -> Self {
        Self { level: LogLevel::Info, message: message.into(), indent: 0 }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self { level: LogLevel::Success, message: message.into(), indent: 0 }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self { level: LogLevel::Warning, message: message.into(), indent: 0 }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { level: LogLevel::Error, message: message.into(), indent: 0 }
    }

    pub fn with_indent(mut self, indent: u8) -> Self {
        self.indent = indent;
        self
    }

    /// Render the entry as a single output line
    pub fn render(&self) -> String {
        let indent = "   ".repeat(self.indent as usize);
        format!("{}{} {}", indent, self.level.prefix(), self.message)
    }
}

/// Global logger
pub static LOGGER: Lazy<Logger> = Lazy::new(Logger::new);

/// Prints log entries at or above a minimum level
pub struct Logger {
    min_level: AtomicU8,
}

impl Logger {
    pub fn new() -> Self {
        Self {
            min_level: AtomicU8::new(LogLevel::Info as u8),
        }
    }

    /// Drop entries below `level`
    pub fn set_min_level(&self, level: LogLevel) {
        self.min_level.store(level as u8, Ordering::Relaxed);
    }

    pub fn min_level(&self) -> LogLevel {
        LogLevel::from_u8(self.min_level.load(Ordering::Relaxed))
    }

    pub fn enabled(&self, level: LogLevel) -> bool {
        level >= self.min_level()
    }

    /// Print an entry; warnings and errors go to stderr
    pub fn log(&self, entry: LogEntry) {
        if !self.enabled(entry.level) {
            return;
        }
        match entry.level {
            LogLevel::Info | LogLevel::Success => println!("{}", entry.render()),
            LogLevel::Warning | LogLevel::Error => eprintln!("{}", entry.render()),
        }
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenient logging functions
pub fn log_info(msg: impl Into<String>) {
    LOGGER.log(LogEntry::info(msg));
}

pub fn log_success(msg: impl Into<String>) {
    LOGGER.log(LogEntry::success(msg));
}

pub fn log_warning(msg: impl Into<String>) {
    LOGGER.log(LogEntry::warning(msg));
}

pub fn log_error(msg: impl Into<String>) {
    LOGGER.log(LogEntry::error(msg));
}

pub fn log_error_indent(msg: impl Into<String>, indent: u8) {
    LOGGER.log(LogEntry::error(msg).with_indent(indent));
}
