//! Logger module
//!
//! Console and file logging for the preview server:
//! - Startup, ready, and shutdown banners
//! - Access logging in common or JSON format
//! - Error and warning logging

mod format;

pub use format::AccessLogEntry;

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Mutex, OnceLock};

use crate::config::Config;

/// Global log writer instance
static LOG_WRITER: OnceLock<LogWriter> = OnceLock::new();

/// Log output target
enum LogTarget {
    /// Write to stdout
    Stdout,
    /// Write to stderr
    Stderr,
    /// Write to file
    File(Mutex<File>),
}

/// Thread-safe writer for the access and error streams
struct LogWriter {
    access: LogTarget,
    error: LogTarget,
}

impl LogWriter {
    fn new(access_log_file: Option<&str>, error_log_file: Option<&str>) -> io::Result<Self> {
        let access = match access_log_file {
            Some(path) => LogTarget::File(Mutex::new(open_log_file(path)?)),
            None => LogTarget::Stdout,
        };
        let error = match error_log_file {
            Some(path) => LogTarget::File(Mutex::new(open_log_file(path)?)),
            None => LogTarget::Stderr,
        };
        Ok(Self { access, error })
    }
}

/// Open or create a log file for appending
fn open_log_file(path: &str) -> io::Result<File> {
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Write message to log target
fn write_to_target(target: &LogTarget, message: &str) {
    match target {
        LogTarget::Stdout => println!("{message}"),
        LogTarget::Stderr => eprintln!("{message}"),
        LogTarget::File(file) => {
            if let Ok(mut f) = file.lock() {
                let _ = writeln!(f, "{message}");
            }
        }
    }
}

/// Initialize the global log writer from configuration.
///
/// Should be called once at application startup; logging falls back to
/// stdout/stderr until then (and in tests, which never initialize it).
pub fn init(config: &Config) -> io::Result<()> {
    let writer = LogWriter::new(
        config.logging.access_log_file.as_deref(),
        config.logging.error_log_file.as_deref(),
    )?;
    LOG_WRITER.set(writer).map_err(|_| {
        io::Error::new(
            io::ErrorKind::AlreadyExists,
            "Log writer already initialized",
        )
    })
}

/// Write to the info/access stream
fn write_info(message: &str) {
    match LOG_WRITER.get() {
        Some(w) => write_to_target(&w.access, message),
        None => println!("{message}"),
    }
}

/// Write to the error stream
fn write_error_line(message: &str) {
    match LOG_WRITER.get() {
        Some(w) => write_to_target(&w.error, message),
        None => eprintln!("{message}"),
    }
}

/// Print the informational banner shown before the listener is bound.
pub fn log_startup(root: &Path, port: u16) {
    write_info("Add-in preview server");
    write_info("=====================");
    write_info(&format!("Directory: {}", root.display()));
    write_info(&format!("Port: {port}"));
    write_info("");
    write_info("Starting server...");
}

/// Print the confirmation banner once the listener is bound.
pub fn log_ready(port: u16) {
    write_info("✓ Server started successfully!");
    write_info("");
    write_info("Test URLs:");
    write_info(&format!("  Main page: http://localhost:{port}/index.html"));
    write_info(&format!("  Styles:    http://localhost:{port}/style.css"));
    write_info(&format!("  Script:    http://localhost:{port}/main.js"));
    write_info(&format!("  Config:    http://localhost:{port}/config.json"));
    write_info("");
    write_info("Press Ctrl+C to stop the server");
    write_info("");
}

/// Print the shutdown confirmation for the interrupt path.
pub fn log_shutdown() {
    write_info("\n✓ Server stopped by user");
}

pub fn log_error(message: &str) {
    write_error_line(&format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    write_error_line(&format!("[WARN] {message}"));
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    write_error_line(&format!("[ERROR] Failed to serve connection: {err:?}"));
}

/// Log formatted access log entry
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    write_info(&entry.format(format));
}
