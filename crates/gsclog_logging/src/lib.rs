#![deny(missing_docs)]
//! Shared logging utilities for the log viewer workspace.
//!
//! This crate provides the `gsclog_*` logging macros used across the codebase
//! and a minimal test initializer for the global logger.

use std::cell::Cell;

thread_local! {
    /// Thread-local storage for the import run the current thread works on.
    static RUN_ID: Cell<u64> = const { Cell::new(0) };
}

/// Tags every log line emitted from the current thread with `run_id`.
/// The import worker calls this once when its thread starts a run.
pub fn set_run_id(run_id: u64) {
    RUN_ID.with(|v| v.set(run_id));
}

/// Retrieves the run id for the current thread.
/// Returns 0 if no run has been set.
pub fn current_run_id() -> u64 {
    RUN_ID.with(|v| v.get())
}

/// Returns the `[run N] ` prefix for the current thread, or an empty string.
#[doc(hidden)]
pub fn run_prefix() -> String {
    match current_run_id() {
        0 => String::new(),
        id => format!("[run {id}] "),
    }
}

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! gsclog_trace {
    ($($arg:tt)*) => {{
        log::trace!("{}{}", $crate::run_prefix(), format_args!($($arg)*));
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! gsclog_info {
    ($($arg:tt)*) => {{
        log::info!("{}{}", $crate::run_prefix(), format_args!($($arg)*));
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! gsclog_debug {
    ($($arg:tt)*) => {{
        log::debug!("{}{}", $crate::run_prefix(), format_args!($($arg)*));
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! gsclog_warn {
    ($($arg:tt)*) => {{
        log::warn!("{}{}", $crate::run_prefix(), format_args!($($arg)*));
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! gsclog_error {
    ($($arg:tt)*) => {{
        log::error!("{}{}", $crate::run_prefix(), format_args!($($arg)*));
    }};
}

/// Initializes a simple terminal logger for use in unit tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    // Use debug level in debug builds, info in release builds.
    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    // Ignore the error if a logger was already set by another test.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_prefix_is_empty_until_a_run_is_set() {
        std::thread::spawn(|| {
            assert_eq!(current_run_id(), 0);
            assert_eq!(run_prefix(), "");
            set_run_id(7);
            assert_eq!(run_prefix(), "[run 7] ");
        })
        .join()
        .unwrap();
    }
}
