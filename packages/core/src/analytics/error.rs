//! Error types for gas price analytics

use thiserror::Error;

/// Analytics failure kinds.
///
/// None of these escape the public entry points: each one is logged and
/// resolved to a default quote or a fallback series.
#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("Price source {source_name} unavailable: {reason}")]
    SourceUnavailable { source_name: String, reason: String },

    #[error("All price sources unavailable")]
    AllSourcesUnavailable,

    #[error("History generation failed: {message}")]
    GenerationFailure { message: String },

    #[error("Invalid base price {value}")]
    InvalidBasePrice { value: f64 },
}

/// Errors from upstream price sources
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Network error: {message}")]
    NetworkError { message: String },

    #[error("Data format error: {message}")]
    FormatError { message: String },

    #[error("Upstream reported status {status}: {message}")]
    StatusError { status: String, message: String },

    #[error("Service unavailable")]
    ServiceUnavailable,
}

impl AnalyticsError {
    pub fn source_unavailable(source_name: impl Into<String>, reason: impl ToString) -> Self {
        Self::SourceUnavailable {
            source_name: source_name.into(),
            reason: reason.to_string(),
        }
    }

    pub fn generation_failure(message: impl Into<String>) -> Self {
        Self::GenerationFailure { message: message.into() }
    }
}

impl ProviderError {
    pub fn network(message: impl Into<String>) -> Self {
        Self::NetworkError { message: message.into() }
    }

    pub fn format(message: impl Into<String>) -> Self {
        Self::FormatError { message: message.into() }
    }
}
