use thiserror::Error;

/// Top-level error type used across the entire application.
#[derive(Debug, Error)]
pub enum LivemonError {
    #[error("config error: {0}")]
    Config(String),

    #[error("unknown metric '{0}' (expected cpu, memory or temperature)")]
    UnknownMetric(String),

    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

pub type Result<T, E = LivemonError> = std::result::Result<T, E>;
