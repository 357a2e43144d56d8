//! Forwarding of this crate's log records to a host-provided logger.
//!
//! The SDK logs through the [`log`] facade; the host registers a [`Logger`]
//! implementation once at startup and receives every record from then on.

use std::sync::{Arc, OnceLock};

/// A logger that receives this crate's log records.
///
/// Implemented by foreign code and registered once via [`set_logger`].
///
/// ## Swift
///
/// ```swift
/// class AutofillKitLoggerBridge: Logger {
///     func log(level: LogLevel, message: String) {
///         os_log("%{public}@", message)
///     }
/// }
///
/// // In the app delegate. Call this only once!
/// setLogger(logger: AutofillKitLoggerBridge())
/// ```
#[uniffi::export(with_foreign)]
pub trait Logger: Sync + Send {
    /// Logs a message at the specified log level.
    fn log(&self, level: LogLevel, message: String);
}

/// Severity of a log record.
#[derive(Debug, Clone, uniffi::Enum)]
pub enum LogLevel {
    /// Very low priority, extremely detailed messages.
    Trace,
    /// Lower priority debugging information.
    Debug,
    /// Informational messages highlighting the progress of a flow.
    Info,
    /// Potentially harmful situations.
    Warn,
    /// Errors that might still allow the extension to continue running.
    Error,
}

const fn level_for(level: log::Level) -> LogLevel {
    match level {
        log::Level::Error => LogLevel::Error,
        log::Level::Warn => LogLevel::Warn,
        log::Level::Info => LogLevel::Info,
        log::Level::Debug => LogLevel::Debug,
        log::Level::Trace => LogLevel::Trace,
    }
}

/// Bridges the `log` facade to the registered [`Logger`].
struct ForeignLogger;

impl log::Log for ForeignLogger {
    fn enabled(&self, _metadata: &log::Metadata) -> bool {
        true
    }

    fn log(&self, record: &log::Record) {
        // Debug/trace records from other crates are dropped; the host only
        // cares about this SDK's internals at those levels.
        let from_this_crate = record
            .module_path()
            .is_some_and(|module_path| module_path.starts_with("autofillkit"));
        if record.level() >= log::Level::Debug && !from_this_crate {
            return;
        }

        if let Some(logger) = LOGGER_INSTANCE.get() {
            logger.log(level_for(record.level()), format!("{}", record.args()));
        } else {
            eprintln!("Logger not set: {}", record.args());
        }
    }

    fn flush(&self) {}
}

/// The host-provided logger, set at most once per process.
static LOGGER_INSTANCE: OnceLock<Arc<dyn Logger>> = OnceLock::new();

/// Sets the global logger and initializes the logging system.
///
/// Call once, before any logging occurs; later calls are ignored.
#[uniffi::export]
pub fn set_logger(logger: Arc<dyn Logger>) {
    if LOGGER_INSTANCE.set(logger).is_err() {
        println!("Logger already set");
    }

    if let Err(e) = init_logger() {
        eprintln!("Failed to set logger: {e}");
    }
}

fn init_logger() -> Result<(), log::SetLoggerError> {
    static FOREIGN_LOGGER: ForeignLogger = ForeignLogger;
    log::set_logger(&FOREIGN_LOGGER)?;
    log::set_max_level(log::LevelFilter::Trace);
    Ok(())
}
