use crate::error::ConfigError;
use crate::settings::LoggingSettings;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

const LOG_FILE_PREFIX: &str = "spreadlab.log";

/// Installs the global `tracing` subscriber.
///
/// Human-readable logs go to stderr so stdout stays free for the console report.
/// When a log directory is configured, a second, non-blocking layer writes
/// plain-text logs to a daily rolling file there. The returned guard must be
/// kept alive until the program exits, otherwise buffered file logs are lost.
pub fn init_tracing(settings: &LoggingSettings) -> Result<Option<WorkerGuard>, ConfigError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.level))
        .map_err(|e| ConfigError::LoggingError(format!("invalid log level '{}': {}", settings.level, e)))?;

    let stderr_layer = fmt::layer().with_target(false).with_writer(std::io::stderr);

    match &settings.directory {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);

            tracing_subscriber::registry()
                .with(filter)
                .with(stderr_layer)
                .with(fmt::layer().with_ansi(false).with_writer(writer))
                .try_init()
                .map_err(|e| ConfigError::LoggingError(e.to_string()))?;

            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(stderr_layer)
                .try_init()
                .map_err(|e| ConfigError::LoggingError(e.to_string()))?;

            Ok(None)
        }
    }
}
