//! Error handling for the trait mapping pipeline
//!
//! A single `thiserror` enum covers every fault the library can raise.
//! "No information" outcomes (an empty annotation response, a term absent
//! from the ontology, an unsupported cross-reference database) are values,
//! not errors.

use thiserror::Error;

/// Main error type for trait mapping
#[derive(Error, Debug)]
pub enum MappingError {
    #[error("HTTP error talking to {service}: {source}")]
    Http {
        service: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{service} returned unexpected status {status}")]
    UnexpectedStatus {
        service: &'static str,
        status: u16,
    },

    #[error("Malformed {service} payload: {message}")]
    Payload {
        service: &'static str,
        message: String,
    },

    #[error("Unknown confidence label '{0}' from annotation source")]
    UnknownConfidence(String),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl MappingError {
    pub fn http(service: &'static str, source: reqwest::Error) -> Self {
        Self::Http { service, source }
    }

    pub fn payload(service: &'static str, message: impl Into<String>) -> Self {
        Self::Payload {
            service,
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Whether the bounded retry loop may try the call again.
    ///
    /// Transport failures and server-side statuses are transient. A
    /// malformed payload or an unknown confidence label will not improve on
    /// a second attempt.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Http { .. } => true,
            Self::UnexpectedStatus { status, .. } => *status >= 500 || *status == 429,
            _ => false,
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, MappingError>;
