//! Console logger implementation

use std::env;

use super::traits::{Level, Logger};

/// Environment variable read by [`ConsoleLogger::from_env`]
pub const LOG_LEVEL_VAR: &str = "ENVCFG_LOG";

/// A logger that writes to stdout (info) and stderr (everything else)
///
/// Messages below the minimum level are dropped. Resolution traces are
/// logged at debug, so the default `Info` keeps the console quiet unless a
/// factory fails or a cycle is found.
///
/// ```
/// use envcfg_core::logging::{ConsoleLogger, Level};
///
/// let logger = ConsoleLogger::new().with_level(Level::Warn);
/// assert!(!logger.enabled(Level::Info));
/// assert!(logger.enabled(Level::Error));
/// ```
#[derive(Debug, Clone)]
pub struct ConsoleLogger {
    prefix: String,
    level: Level,
}

impl Default for ConsoleLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleLogger {
    /// Create a console logger with the `[envcfg]` prefix at `Info`
    pub fn new() -> Self {
        Self::with_prefix("[envcfg]")
    }

    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            level: Level::default(),
        }
    }

    /// Take the minimum level from `ENVCFG_LOG`; unset or unknown means `Info`
    pub fn from_env() -> Self {
        let level = env::var(LOG_LEVEL_VAR)
            .ok()
            .and_then(|name| Level::from_name(&name))
            .unwrap_or_default();
        Self::new().with_level(level)
    }

    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn enabled(&self, level: Level) -> bool {
        level >= self.level
    }

    fn line(&self, level: Level, message: &str) -> String {
        format!("{} {}: {}", self.prefix, level, message)
    }

    fn write(&self, level: Level, message: &str) {
        if !self.enabled(level) {
            return;
        }
        match level {
            Level::Info => println!("{}", self.line(level, message)),
            _ => eprintln!("{}", self.line(level, message)),
        }
    }
}

impl Logger for ConsoleLogger {
    fn debug(&self, message: &str) {
        self.write(Level::Debug, message);
    }

    fn info(&self, message: &str) {
        self.write(Level::Info, message);
    }

    fn warn(&self, message: &str) {
        self.write(Level::Warn, message);
    }

    fn error(&self, message: &str) {
        self.write(Level::Error, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_console_logger_prefix() {
        assert_eq!(ConsoleLogger::new().prefix(), "[envcfg]");
        assert_eq!(ConsoleLogger::with_prefix("[app]").prefix(), "[app]");
    }

    #[test]
    fn test_console_logger_level_filter() {
        let logger = ConsoleLogger::new();
        assert_eq!(logger.level(), Level::Info);
        assert!(!logger.enabled(Level::Debug));
        assert!(logger.enabled(Level::Info));

        let verbose = logger.with_level(Level::Debug);
        assert!(verbose.enabled(Level::Debug));
    }

    #[test]
    fn test_console_logger_line_format() {
        let logger = ConsoleLogger::with_prefix("[app]");
        assert_eq!(logger.line(Level::Warn, "retrying"), "[app] WARN: retrying");
    }

    #[test]
    fn test_console_logger_from_env() {
        env::set_var(LOG_LEVEL_VAR, "error");
        assert_eq!(ConsoleLogger::from_env().level(), Level::Error);

        env::set_var(LOG_LEVEL_VAR, "nonsense");
        assert_eq!(ConsoleLogger::from_env().level(), Level::Info);

        env::remove_var(LOG_LEVEL_VAR);
    }
}
