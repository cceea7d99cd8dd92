use std::error::Error;
use std::fmt;

/// Unified application error.
///
/// Covers startup and serving failures of the binary. Upstream and
/// analytics failures never reach this type: they resolve to default
/// quotes or fallback history inside `analytics`.
#[derive(Debug)]
pub enum AppError {
    Config(String),
    Metrics(String),
    Server(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(msg) => write!(f, "Config error: {}", msg),
            AppError::Metrics(msg) => write!(f, "Metrics error: {}", msg),
            AppError::Server(msg) => write!(f, "Server error: {}", msg),
        }
    }
}

impl Error for AppError {}
