//! Terminal output of the command-line tool.
//!
//! Everything goes through `log` so `--verbose` and `--no-color` apply to
//! library crates and to command output alike.

use std::fmt;

use fern::Dispatch;
use log::LevelFilter;

/// Crates whose records follow `--verbose`. Everything else logs warnings only.
const CRATES: [&str; 5] = [
    "padbind",
    "padbind_gamepad",
    "padbind_mapping",
    "padbind_workspace",
    "padbind_resolver",
];

const TIME_FORMAT: &str = "%H:%M:%S%.3f";

/// Prefixes a message with the local time.
pub(crate) fn stamp(message: fmt::Arguments<'_>) -> String {
    format!("{} {message}", chrono::Local::now().format(TIME_FORMAT))
}

#[macro_export]
macro_rules! print_error {
    ($($arg:tt)*) => {
        log::error!(
            "{}",
            colored::Colorize::bright_red($crate::logging::stamp(format_args!($($arg)*)).as_str())
        )
    };
}

#[macro_export]
macro_rules! print_warning {
    ($($arg:tt)*) => {
        log::warn!(
            "{}",
            colored::Colorize::yellow($crate::logging::stamp(format_args!($($arg)*)).as_str())
        )
    };
}

#[macro_export]
macro_rules! print_info {
    ($($arg:tt)*) => {
        log::info!("{}", $crate::logging::stamp(format_args!($($arg)*)))
    };
}

#[macro_export]
macro_rules! print_debug {
    ($($arg:tt)*) => {
        log::debug!(
            "{}",
            colored::Colorize::dimmed($crate::logging::stamp(format_args!($($arg)*)).as_str())
        )
    };
}

/// Installs the stdout logger.
pub(crate) fn setup(verbose: bool, no_color: bool) -> Result<(), log::SetLoggerError> {
    if no_color {
        colored::control::set_override(false);
    }
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    CRATES
        .iter()
        .fold(Dispatch::new().level(LevelFilter::Warn), |dispatch, name| {
            dispatch.level_for(*name, level)
        })
        .chain(std::io::stdout())
        .apply()
}
