use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::{config::Config, error::Error, Result};

pub const LOG_FILE_NAME: &str = "health_uploads.log";

/// Installs the global subscriber: pretty events, filtered by
/// `config.log_filter`, written to an hourly rolling file in
/// `config.log_directory`.
///
/// Keep the returned guard alive for as long as logs should be flushed.
pub fn init(config: &Config) -> Result<WorkerGuard> {
    let filter = EnvFilter::try_new(&config.log_filter)
        .map_err(|e| Error::Config(format!("invalid log filter: {e}")))?;

    let f_appender = tracing_appender::rolling::hourly(&config.log_directory, LOG_FILE_NAME);
    let (non_blk, guard) = tracing_appender::non_blocking(f_appender);
    tracing_subscriber::fmt::fmt()
        .with_env_filter(filter)
        .event_format(tracing_subscriber::fmt::format().pretty())
        .with_writer(non_blk)
        .try_init()
        .map_err(|e| Error::Config(e.to_string()))?;

    Ok(guard)
}
