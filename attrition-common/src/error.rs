//! Common error types for the attrition service

use thiserror::Error;

/// Common result type for attrition operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types shared by the API, the import tool and the dashboard
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation error (wraps sqlx::Error)
    #[cfg(feature = "sqlx")]
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV decoding error during bulk load
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// The classifier artifact failed to load at startup.
    /// Permanent for the lifetime of the process.
    #[error("Model unavailable: {0}")]
    ModelUnavailable(String),

    /// The model artifact is malformed or does not match the feature schema
    #[error("Invalid model artifact: {0}")]
    ModelArtifact(String),

    /// Probability outside [0, 1] or NaN
    #[error("Invalid probability: {0}")]
    InvalidProbability(f64),

    /// Failure while scoring a feature vector
    #[error("Prediction error: {0}")]
    Prediction(String),
}
