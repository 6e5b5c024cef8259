#![deny(missing_docs)]
//! Shared logging utilities for the workstream workspace.
//!
//! This crate provides the `ws_*` logging macros used across the codebase,
//! a thread-local run context that tags log lines with the active run, and
//! the `simplelog` initializers for binaries and tests.

use std::cell::Cell;
use std::fs::File;
use std::path::PathBuf;

use log::LevelFilter;
use serde::{Deserialize, Serialize};
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

/// File written by [`LogDestination::File`] and [`LogDestination::Both`].
pub const LOG_FILE: &str = "./workstream.log";

thread_local! {
    /// Run identifier the current thread is working for, if any.
    static RUN_CONTEXT: Cell<Option<u64>> = const { Cell::new(None) };
}

/// Tags every `ws_*` log line emitted on this thread with `run_id`.
pub fn set_run_context(run_id: u64) {
    RUN_CONTEXT.with(|v| v.set(Some(run_id)));
}

/// Removes the run tag from this thread.
pub fn clear_run_context() {
    RUN_CONTEXT.with(|v| v.set(None));
}

/// Returns the run the current thread is tagged with.
pub fn current_run() -> Option<u64> {
    RUN_CONTEXT.with(|v| v.get())
}

#[doc(hidden)]
pub use log;

#[doc(hidden)]
pub fn __log(target: &str, level: log::Level, args: std::fmt::Arguments<'_>) {
    match current_run() {
        Some(run_id) => log::log!(target: target, level, "[run {}] {}", run_id, args),
        None => log::log!(target: target, level, "{}", args),
    }
}

/// Logs a trace-level message, tagged with the current run.
#[macro_export]
macro_rules! ws_trace {
    ($($arg:tt)*) => {{
        $crate::__log(module_path!(), $crate::log::Level::Trace, format_args!($($arg)*));
    }};
}

/// Logs a debug-level message, tagged with the current run.
#[macro_export]
macro_rules! ws_debug {
    ($($arg:tt)*) => {{
        $crate::__log(module_path!(), $crate::log::Level::Debug, format_args!($($arg)*));
    }};
}

/// Logs an info-level message, tagged with the current run.
#[macro_export]
macro_rules! ws_info {
    ($($arg:tt)*) => {{
        $crate::__log(module_path!(), $crate::log::Level::Info, format_args!($($arg)*));
    }};
}

/// Logs a warn-level message, tagged with the current run.
#[macro_export]
macro_rules! ws_warn {
    ($($arg:tt)*) => {{
        $crate::__log(module_path!(), $crate::log::Level::Warn, format_args!($($arg)*));
    }};
}

/// Logs an error-level message, tagged with the current run.
#[macro_export]
macro_rules! ws_error {
    ($($arg:tt)*) => {{
        $crate::__log(module_path!(), $crate::log::Level::Error, format_args!($($arg)*));
    }};
}

/// Destination for log output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LogDestination {
    /// Write to `./workstream.log` in the current directory.
    #[default]
    File,
    /// Write to the terminal on stderr, leaving stdout to the chat.
    Terminal,
    /// Write to both file and terminal.
    Both,
}

/// Initialize the global logger with the specified destination and level.
///
/// Safe to call more than once; later calls are ignored by `log`.
pub fn initialize(destination: LogDestination, level: LevelFilter) {
    let config = build_config();

    let loggers: Vec<Box<dyn SharedLogger>> = match destination {
        LogDestination::File => match create_file_logger(level, config) {
            Some(file_logger) => vec![file_logger],
            None => return,
        },
        LogDestination::Terminal => vec![TermLogger::new(
            level,
            config,
            TerminalMode::Stderr,
            ColorChoice::Auto,
        )],
        LogDestination::Both => {
            let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
                level,
                config.clone(),
                TerminalMode::Stderr,
                ColorChoice::Auto,
            )];
            if let Some(file_logger) = create_file_logger(level, config) {
                loggers.push(file_logger);
            }
            loggers
        }
    };

    let _ = CombinedLogger::init(loggers);
}

/// Initializes a simple terminal logger for use in tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    // Use debug level in debug builds, info in release builds.
    let level = if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}

fn build_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .set_thread_level(LevelFilter::Debug)
        .build()
}

fn create_file_logger(level: LevelFilter, config: Config) -> Option<Box<WriteLogger<File>>> {
    let log_path = PathBuf::from(LOG_FILE);
    match File::create(&log_path) {
        Ok(file) => Some(WriteLogger::new(level, config, file)),
        Err(err) => {
            eprintln!("Warning: Could not create log file at {:?}: {}", log_path, err);
            None
        }
    }
}
