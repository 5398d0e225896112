// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Logging for the bucketfs crates.
//!
//! Events are structured `emit` events written to stderr. The level comes
//! from the `BUCKETFS_LOG` environment variable:
//! - `off` (default): nothing is written
//! - `error`, `warn`, `info`, `debug`: that level and above

use std::sync::Once;

pub use emit;

/// Environment variable selecting the log level
pub const LOG_ENV: &str = "BUCKETFS_LOG";

static INIT: Once = Once::new();

/// Outcome of reading a `BUCKETFS_LOG` value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogSetting {
    Off,
    Min(emit::Level),
    /// Unrecognized value; logging falls back to info
    Unknown,
}

/// Map a `BUCKETFS_LOG` value to a setting. Matching is case-insensitive.
pub fn parse_setting(value: &str) -> LogSetting {
    match value.trim().to_ascii_lowercase().as_str() {
        "" | "off" => LogSetting::Off,
        "error" => LogSetting::Min(emit::Level::Error),
        "warn" => LogSetting::Min(emit::Level::Warn),
        "info" => LogSetting::Min(emit::Level::Info),
        "debug" => LogSetting::Min(emit::Level::Debug),
        _ => LogSetting::Unknown,
    }
}

/// Initialize logging from `BUCKETFS_LOG`.
///
/// Call once at startup. Later calls are ignored.
pub fn init_diagnostics() {
    INIT.call_once(|| {
        let value = std::env::var(LOG_ENV).unwrap_or_default();

        let min = match parse_setting(&value) {
            LogSetting::Off => return,
            LogSetting::Min(level) => level,
            LogSetting::Unknown => emit::Level::Info,
        };

        let rt = emit::setup()
            .emit_to(emit_term::stderr())
            .emit_when(emit::level::min_filter(min))
            .init();

        if parse_setting(&value) == LogSetting::Unknown {
            emit::warn!("unknown log level {value}, using info", value: value.as_str());
        }

        // The runtime must outlive every emitting thread; process exit flushes stderr.
        std::mem::forget(rt);
    });
}

/// Routine operations a user may want to see (listing finished, object moved)
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        $crate::emit::info!($($arg)*)
    };
}

/// Per-page and per-stage detail
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        $crate::emit::debug!($($arg)*)
    };
}

/// Degraded but non-fatal outcomes, e.g. a preview that could not be regenerated
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        $crate::emit::warn!($($arg)*)
    };
}

/// Failures surfaced to the caller
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        $crate::emit::error!($($arg)*)
    };
}

#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {
        $crate::emit::info!($($arg)*)
    };
}

#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {
        $crate::emit::debug!($($arg)*)
    };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        $crate::emit::warn!($($arg)*)
    };
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {
        $crate::emit::error!($($arg)*)
    };
}

pub use init_diagnostics as init;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_setting() {
        assert_eq!(parse_setting(""), LogSetting::Off);
        assert_eq!(parse_setting("off"), LogSetting::Off);
        assert_eq!(parse_setting("DEBUG"), LogSetting::Min(emit::Level::Debug));
        assert_eq!(parse_setting(" warn "), LogSetting::Min(emit::Level::Warn));
        assert_eq!(parse_setting("verbose"), LogSetting::Unknown);
    }

    #[test]
    fn test_init_is_safe_to_call_multiple_times() {
        init_diagnostics();
        init_diagnostics();
    }

    #[test]
    fn test_macros_compile() {
        log_info!("listing {prefix}", prefix: "docs/");
        log_debug!("page {page} with {count} objects", page: 1, count: 42);
        warn!("preview skipped");
        error!("copy failed");
    }
}
