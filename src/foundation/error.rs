//! Error taxonomy shared by every stage.

/// Convenience result type used across the garden pipeline.
pub type GardenResult<T> = Result<T, GardenError>;

/// Why a transport attempt failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransportFailure {
    /// The request did not finish before the configured deadline.
    Timeout,
    /// The endpoint answered with a non-2xx status.
    HttpStatus(u16),
    /// The request could not be sent, or the callback was never invoked.
    LoadError,
    /// The callback was invoked with something that is not JSON.
    ParseError,
    /// A newer request cancelled this one.
    Cancelled,
}

impl std::fmt::Display for TransportFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Timeout => write!(f, "timeout"),
            Self::HttpStatus(code) => write!(f, "http-status:{code}"),
            Self::LoadError => write!(f, "load-error"),
            Self::ParseError => write!(f, "parse-error"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Failure of a single transport attempt, with a reason tag and free-form detail.
#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
#[error("{reason}: {detail}")]
pub struct TransportError {
    /// Machine-readable reason.
    pub reason: TransportFailure,
    /// Human-readable detail (status text, body excerpt, underlying error).
    pub detail: String,
}

impl TransportError {
    /// Build a transport error from a reason and detail text.
    pub fn new(reason: TransportFailure, detail: impl Into<String>) -> Self {
        Self {
            reason,
            detail: detail.into(),
        }
    }
}

/// Top-level error taxonomy used by the pipeline APIs.
#[derive(thiserror::Error, Debug)]
pub enum GardenError {
    /// Network failure, timeout, or script-injection load failure.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// A response arrived but its body is not JSON.
    #[error("format error: {0}")]
    Format(String),

    /// The payload parsed but declares failure or carries no rows.
    #[error("validation error: {0}")]
    Validation(String),

    /// Invalid configuration (endpoint, viewport, config file).
    #[error("config error: {0}")]
    Config(String),

    /// Cache store read/write failure.
    #[error("cache error: {0}")]
    Cache(String),

    /// A reload completed after a newer reload was issued.
    #[error("superseded: request generation {generation} is behind {current}")]
    Superseded {
        /// Generation of the discarded request.
        generation: u64,
        /// Generation current at completion time.
        current: u64,
    },

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GardenError {
    /// Build a [`GardenError::Transport`] value.
    pub fn transport(reason: TransportFailure, detail: impl Into<String>) -> Self {
        Self::Transport(TransportError::new(reason, detail))
    }

    /// Build a [`GardenError::Format`] value.
    pub fn format(msg: impl Into<String>) -> Self {
        Self::Format(msg.into())
    }

    /// Build a [`GardenError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`GardenError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`GardenError::Cache`] value.
    pub fn cache(msg: impl Into<String>) -> Self {
        Self::Cache(msg.into())
    }

    /// Whether a cached payload may stand in for this failure.
    ///
    /// Cancellation and supersession mean nobody is waiting for the answer anymore.
    pub fn allows_cache_fallback(&self) -> bool {
        match self {
            Self::Transport(e) => e.reason != TransportFailure::Cancelled,
            Self::Format(_) | Self::Validation(_) => true,
            Self::Config(_) | Self::Cache(_) | Self::Superseded { .. } | Self::Other(_) => false,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
