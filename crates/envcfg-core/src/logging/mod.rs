//! Logging abstractions used by the container and services

mod traits;
mod console;
mod tracing_logger;

pub use traits::{Level, Logger, LoggerExt, NoOpLogger, SharedLogger};
pub use console::{ConsoleLogger, LOG_LEVEL_VAR};
pub use tracing_logger::TracingLogger;
