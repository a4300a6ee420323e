//! Error types for data generation and storage sinks.

use thiserror::Error;

/// Errors raised by a [`StorageSink`](crate::sink::StorageSink).
#[derive(Error, Debug)]
pub enum SinkError {
    /// The store could not be reached or opened.
    #[error("Connection failed: {message}")]
    Connection { message: String },

    /// A statement was rejected by the store (including constraint violations).
    #[error("Statement '{statement}' failed: {message}")]
    Statement { statement: String, message: String },

    /// An insert that should return a generated identifier did not.
    #[error("No identifier returned for new {entity}")]
    MissingId { entity: String },

    /// Generic sink error.
    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl SinkError {
    /// Create a connection error.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a statement error.
    pub fn statement(statement: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Statement {
            statement: statement.into(),
            message: message.into(),
        }
    }

    /// Create a missing-identifier error.
    pub fn missing_id(entity: impl Into<String>) -> Self {
        Self::MissingId {
            entity: entity.into(),
        }
    }
}

/// Errors that abort a generation run.
#[derive(Error, Debug)]
pub enum GenerateError {
    /// The generator was used out of order (e.g. donors generated twice).
    #[error("Precondition violated: {0}")]
    Precondition(String),

    /// The storage sink failed; the sink's error is passed through unchanged.
    #[error(transparent)]
    Storage(#[from] SinkError),

    /// The fund selector was asked for more distinct funds than exist.
    #[error("Cannot select {requested} distinct funds from a catalog of {available}")]
    SamplingInvariant { requested: usize, available: usize },

    /// The generator configuration is unusable.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl GenerateError {
    pub fn precondition(message: impl Into<String>) -> Self {
        Self::Precondition(message.into())
    }

    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }
}
