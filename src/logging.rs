//! Log output.
//!
//! Everything the program retrieves from Reddit is written to the log
//! rather than to standard output. The amount of detail is controlled by
//! a [`LogLevel`], which is turned into a concrete logger by [`logger()`]
//! and installed exactly once, by the binary, with [`install()`].

use env_logger::{Builder, Logger};
use log::{LevelFilter, SetLoggerError};

/// How much detail to write to the log.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LogLevel {
    /// Retrieved items and fatal errors only.
    #[default]
    Quiet,

    /// Also include diagnostic detail, such as the configuration file in
    /// use and the underlying cause of authentication failures.
    Verbose,
}

impl From<bool> for LogLevel {
    fn from(verbose: bool) -> Self {
        if verbose {
            LogLevel::Verbose
        } else {
            LogLevel::Quiet
        }
    }
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Quiet => LevelFilter::Info,
            LogLevel::Verbose => LevelFilter::Debug,
        }
    }
}

/// Builds a logger that writes to standard error at the given `level`.
///
/// Dependencies are noisy at debug level, so only this crate's records
/// are let through above info.
pub fn logger(level: LogLevel) -> Logger {
    Builder::new()
        .filter_level(LevelFilter::Info)
        .filter_module(env!("CARGO_CRATE_NAME"), level.into())
        .format_timestamp(None)
        .format_target(false)
        .build()
}

/// Installs `logger` as the process-wide logger.
///
/// Returns an error if a logger has already been installed.
pub fn install(logger: Logger) -> Result<(), SetLoggerError> {
    let max_level = logger.filter();
    log::set_boxed_logger(Box::new(logger))?;
    log::set_max_level(max_level);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_is_quiet_by_default() {
        assert_eq!(LogLevel::default(), LogLevel::Quiet);
    }

    #[test]
    fn it_is_verbose_when_the_flag_is_set() {
        assert_eq!(LogLevel::from(true), LogLevel::Verbose);
        assert_eq!(LogLevel::from(false), LogLevel::Quiet);
    }

    #[test]
    fn it_logs_info_when_quiet() {
        assert_eq!(LevelFilter::from(LogLevel::Quiet), LevelFilter::Info);
        assert_eq!(logger(LogLevel::Quiet).filter(), LevelFilter::Info);
    }

    #[test]
    fn it_logs_debug_when_verbose() {
        assert_eq!(LevelFilter::from(LogLevel::Verbose), LevelFilter::Debug);
        assert_eq!(logger(LogLevel::Verbose).filter(), LevelFilter::Debug);
    }
}
