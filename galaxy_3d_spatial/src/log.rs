//! Log entries, severities and the console logger behind the engine_* macros
//!
//! Tree builders report statistics at DEBUG, the picker reports cache
//! activity at TRACE, and every `engine_err!` / `engine_bail!` error is
//! logged at ERROR with its file and line.

use colored::*;
use std::time::SystemTime;
use chrono::{DateTime, Local};

/// Receives every entry at or above the [`Engine`](crate::galaxy3d::Engine) log level
///
/// # Example
///
/// ```
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use galaxy_3d_spatial::galaxy3d::log::{Logger, LogEntry, LogSeverity};
///
/// /// Counts failed builds and picks
/// struct ErrorCounter(AtomicUsize);
///
/// impl Logger for ErrorCounter {
///     fn log(&self, entry: &LogEntry) {
///         if entry.severity == LogSeverity::Error {
///             self.0.fetch_add(1, Ordering::Relaxed);
///         }
///     }
/// }
/// ```
pub trait Logger: Send + Sync {
    /// Log an entry
    ///
    /// # Arguments
    ///
    /// * `entry` - The log entry to process
    fn log(&self, entry: &LogEntry);
}

/// Log entry containing all information about a log message
#[derive(Debug, Clone)]
pub struct LogEntry {
    /// Severity level (Trace, Debug, Info, Warn, Error)
    pub severity: LogSeverity,

    /// Timestamp when the log was created
    pub timestamp: SystemTime,

    /// Source module (e.g., "galaxy3d::KdTree3", "galaxy3d::Picker")
    pub source: String,

    /// Log message
    pub message: String,

    /// Source file (only for detailed ERROR logs)
    pub file: Option<&'static str>,

    /// Source line (only for detailed ERROR logs)
    pub line: Option<u32>,
}

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogSeverity {
    /// Per-pick and per-cache-entry activity
    Trace,

    /// Tree build statistics
    Debug,

    Info,

    /// Recoverable problems (e.g. a skipped singular mesh)
    Warn,

    /// Failed operations, with file:line
    Error,
}

/// Default logger implementation using colored console output
///
/// Colors:
/// - Trace: bright_black
/// - Debug: cyan
/// - Info: green
/// - Warn: yellow
/// - Error: red + bold
///
/// Format:
/// - Normal: `[timestamp] [SEVERITY] [source] message`
/// - Error: `[timestamp] [ERROR] [source] message (file:line)`
pub struct DefaultLogger;

impl DefaultLogger {
    /// Format an entry the way it is printed (with ANSI colors)
    pub fn format_entry(entry: &LogEntry) -> String {
        // Format timestamp as YYYY-MM-DD HH:MM:SS.mmm
        let datetime: DateTime<Local> = entry.timestamp.into();
        let timestamp = datetime.format("%Y-%m-%d %H:%M:%S%.3f").to_string();

        let severity_str = match entry.severity {
            LogSeverity::Trace => "TRACE".bright_black(),
            LogSeverity::Debug => "DEBUG".cyan(),
            LogSeverity::Info => "INFO ".green(),
            LogSeverity::Warn => "WARN ".yellow(),
            LogSeverity::Error => "ERROR".red().bold(),
        };

        let source = entry.source.bright_blue();

        match (entry.file, entry.line) {
            (Some(file), Some(line)) => format!(
                "[{}] [{}] [{}] {} ({}:{})",
                timestamp, severity_str, source, entry.message, file, line
            ),
            _ => format!(
                "[{}] [{}] [{}] {}",
                timestamp, severity_str, source, entry.message
            ),
        }
    }
}

impl Logger for DefaultLogger {
    fn log(&self, entry: &LogEntry) {
        println!("{}", Self::format_entry(entry));
    }
}

// ===== LOGGING MACROS =====

/// Log a TRACE message (very verbose, typically disabled)
///
/// # Example
///
/// ```
/// use galaxy_3d_spatial::engine_trace;
///
/// let hits = 2;
/// engine_trace!("galaxy3d::Picker", "Ray pick: {} objects hit", hits);
/// ```
#[macro_export]
macro_rules! engine_trace {
    ($source:expr, $($arg:tt)*) => {
        $crate::galaxy3d::Engine::log(
            $crate::galaxy3d::log::LogSeverity::Trace,
            $source,
            format!($($arg)*)
        )
    };
}

/// Log a DEBUG message (development information)
///
/// # Example
///
/// ```
/// use galaxy_3d_spatial::engine_debug;
///
/// let count = 7;
/// engine_debug!("galaxy3d::KdTree3", "Built tree with {} nodes", count);
/// ```
#[macro_export]
macro_rules! engine_debug {
    ($source:expr, $($arg:tt)*) => {
        $crate::galaxy3d::Engine::log(
            $crate::galaxy3d::log::LogSeverity::Debug,
            $source,
            format!($($arg)*)
        )
    };
}

/// Log an INFO message (important events)
///
/// # Example
///
/// ```
/// use galaxy_3d_spatial::engine_info;
///
/// engine_info!("galaxy3d::Picker", "Prims cache cleared");
/// ```
#[macro_export]
macro_rules! engine_info {
    ($source:expr, $($arg:tt)*) => {
        $crate::galaxy3d::Engine::log(
            $crate::galaxy3d::log::LogSeverity::Info,
            $source,
            format!($($arg)*)
        )
    };
}

/// Log a WARN message (potential issues)
///
/// # Example
///
/// ```
/// use galaxy_3d_spatial::engine_warn;
///
/// let mesh_index = 1;
/// engine_warn!("galaxy3d::Picker", "Skipping mesh {}: singular transform", mesh_index);
/// ```
#[macro_export]
macro_rules! engine_warn {
    ($source:expr, $($arg:tt)*) => {
        $crate::galaxy3d::Engine::log(
            $crate::galaxy3d::log::LogSeverity::Warn,
            $source,
            format!($($arg)*)
        )
    };
}

/// Log an ERROR message with file:line information
///
/// # Example
///
/// ```
/// use galaxy_3d_spatial::engine_error;
/// use galaxy_3d_spatial::galaxy3d::boundary::{AABB, Boundary};
///
/// let aabb = AABB::collapsed();
/// engine_error!("galaxy3d::KdTree3", "Rejected boundary: {:?}", aabb);
/// ```
#[macro_export]
macro_rules! engine_error {
    ($source:expr, $($arg:tt)*) => {
        $crate::galaxy3d::Engine::log_detailed(
            $crate::galaxy3d::log::LogSeverity::Error,
            $source,
            format!($($arg)*),
            file!(),
            line!()
        )
    };
}

/// Build an [`Error`](crate::galaxy3d::Error) and log it at ERROR severity
///
/// The first argument is the error variant constructor, the second the
/// log source. The formatted message is used for both the log entry and
/// the error payload.
///
/// # Example
///
/// ```
/// use galaxy_3d_spatial::engine_err;
/// use galaxy_3d_spatial::galaxy3d::Error;
///
/// let err = engine_err!(Error::EmptyInput, "galaxy3d::KdTree3", "No objects to index");
/// assert!(matches!(err, Error::EmptyInput(_)));
/// ```
#[macro_export]
macro_rules! engine_err {
    ($ctor:path, $source:expr, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::engine_error!($source, "{}", message);
        $ctor(message)
    }};
}

/// Log an error and return it from the enclosing function
///
/// # Example
///
/// ```
/// use galaxy_3d_spatial::engine_bail;
/// use galaxy_3d_spatial::galaxy3d::{Error, Result};
///
/// fn check_depth(max_depth: usize) -> Result<usize> {
///     if max_depth == 0 {
///         engine_bail!(Error::InvalidInput, "galaxy3d::KdTree3", "Max depth must be positive");
///     }
///     Ok(max_depth)
/// }
///
/// assert!(check_depth(0).is_err());
/// ```
#[macro_export]
macro_rules! engine_bail {
    ($ctor:path, $source:expr, $($arg:tt)*) => {
        return Err($crate::engine_err!($ctor, $source, $($arg)*))
    };
}

#[cfg(test)]
#[path = "log_tests.rs"]
mod tests;
