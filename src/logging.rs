//! log4rs setup shared by the binaries.

use log::{LevelFilter, SetLoggerError};
use log4rs::{
    append::{
        console::{ConsoleAppender, Target},
        file::FileAppender,
    },
    config::{Appender, Config, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
};
use thiserror::Error;

const LOGGING_PATTERN: &str = "{d} {l} {t} - {m}\n";

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("failed to open log file {path}: {source}")]
    File {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid logger configuration: {0}")]
    Config(#[from] log4rs::config::runtime::ConfigErrors),
    #[error(transparent)]
    SetLogger(#[from] SetLoggerError),
}

/// Build the logger configuration: stderr at `log_level`, and everything at
/// `log_level` to `file_path` when given.
pub fn build_config(
    log_level: LevelFilter,
    file_path: Option<&str>,
) -> Result<Config, LoggingError> {
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(LOGGING_PATTERN)))
        .build();

    let mut config_builder = Config::builder().appender(
        Appender::builder()
            .filter(Box::new(ThresholdFilter::new(log_level)))
            .build("stderr", Box::new(stderr)),
    );
    let mut root = Root::builder().appender("stderr");

    if let Some(path) = file_path {
        let logfile = FileAppender::builder()
            .encoder(Box::new(PatternEncoder::new(LOGGING_PATTERN)))
            .build(path)
            .map_err(|source| LoggingError::File {
                path: path.to_string(),
                source,
            })?;
        config_builder =
            config_builder.appender(Appender::builder().build("logfile", Box::new(logfile)));
        root = root.appender("logfile");
    }

    Ok(config_builder.build(root.build(log_level))?)
}

/// Install the global logger. Fails if a logger is already installed.
pub fn initialize_logger(
    log_level: LevelFilter,
    file_path: Option<&str>,
) -> Result<(), LoggingError> {
    let config = build_config(log_level, file_path)?;
    let _handle = log4rs::init_config(config)?;
    Ok(())
}
