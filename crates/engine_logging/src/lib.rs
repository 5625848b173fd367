#![deny(missing_docs)]
//! Shared logging utilities for the Axiom workspace.
//!
//! This crate provides the `engine_*` logging macros used across the codebase
//! and a minimal test initializer for the global logger. Every record emitted
//! through the macros is tagged with the conversation turn that is active on
//! the current thread, so the interleaved retrieval and reveal work of one
//! turn can be followed in the log file.

use std::cell::Cell;

#[doc(hidden)]
pub use log as __log;

thread_local! {
    /// Thread-local storage for the turn currently being driven.
    static ACTIVE_TURN: Cell<Option<u64>> = const { Cell::new(None) };
}

/// Sets the active turn for the current thread.
/// The session driver calls this whenever a turn starts or ends.
pub fn set_active_turn(turn: Option<u64>) {
    ACTIVE_TURN.with(|v| v.set(turn));
}

/// Retrieves the active turn for the current thread, if any.
pub fn active_turn() -> Option<u64> {
    ACTIVE_TURN.with(|v| v.get())
}

/// Prefix applied to every record by the logging macros.
#[doc(hidden)]
pub fn turn_prefix() -> String {
    match active_turn() {
        Some(turn) => format!("[turn {turn}] "),
        None => String::new(),
    }
}

/// Logs a trace-level message tagged with the active turn.
#[macro_export]
macro_rules! engine_trace {
    ($($arg:tt)*) => {{
        $crate::__log::trace!("{}{}", $crate::turn_prefix(), format_args!($($arg)*));
    }};
}

/// Logs an info-level message tagged with the active turn.
#[macro_export]
macro_rules! engine_info {
    ($($arg:tt)*) => {{
        $crate::__log::info!("{}{}", $crate::turn_prefix(), format_args!($($arg)*));
    }};
}

/// Logs a debug-level message tagged with the active turn.
#[macro_export]
macro_rules! engine_debug {
    ($($arg:tt)*) => {{
        $crate::__log::debug!("{}{}", $crate::turn_prefix(), format_args!($($arg)*));
    }};
}

/// Logs a warn-level message tagged with the active turn.
#[macro_export]
macro_rules! engine_warn {
    ($($arg:tt)*) => {{
        $crate::__log::warn!("{}{}", $crate::turn_prefix(), format_args!($($arg)*));
    }};
}

/// Logs an error-level message tagged with the active turn.
#[macro_export]
macro_rules! engine_error {
    ($($arg:tt)*) => {{
        $crate::__log::error!("{}{}", $crate::turn_prefix(), format_args!($($arg)*));
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
    fn prefix_follows_active_turn() {
        set_active_turn(None);
        assert_eq!(turn_prefix(), "");

        set_active_turn(Some(4));
        assert_eq!(active_turn(), Some(4));
        assert_eq!(turn_prefix(), "[turn 4] ");

        set_active_turn(None);
        assert_eq!(active_turn(), None);
    }

    #[test]
    fn macros_accept_format_arguments() {
        initialize_for_tests();
        set_active_turn(Some(1));
        engine_info!("turn started query_len={}", 12);
        engine_debug!("plain message");
        engine_trace!("value {value}", value = 3);
        engine_warn!("warned {}", "here");
        engine_error!("failed {:?}", Some(1));
        set_active_turn(None);
    }
}
