//! Error types for the enrichment pipelines.
//!
//! One error enum per stage, plus a top-level wrapper:
//!
//! - [`ConfigError`] - Missing or invalid configuration
//! - [`LoadError`] - Reading and decoding input files
//! - [`AiError`] - Generative service errors
//! - [`WriteError`] - CSV output errors
//! - [`PipelineError`] - Top-level orchestration errors
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across stage boundaries.

use std::path::PathBuf;
use thiserror::Error;

// =============================================================================
// Configuration Errors
// =============================================================================

/// Errors while building the run configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Credential variable absent or empty.
    #[error("Missing {0} environment variable")]
    MissingApiKey(String),
}

// =============================================================================
// Loader Errors
// =============================================================================

/// Errors while reading an input file.
#[derive(Debug, Error)]
pub enum LoadError {
    /// File missing or unreadable.
    #[error("Cannot read '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

// =============================================================================
// Generative Service Errors
// =============================================================================

/// Errors from the generative service.
#[derive(Debug, Error)]
pub enum AiError {
    /// Transport-level failure (connection, TLS, body read).
    #[error("HTTP request failed: {0}")]
    RequestFailed(String),

    /// The service answered with a non-success status.
    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// The response body was not the expected JSON.
    #[error("Invalid JSON response: {0}")]
    InvalidJson(String),

    /// The service returned no candidate at all.
    #[error("Response contained no candidates")]
    NoCandidates,
}

impl From<reqwest::Error> for AiError {
    fn from(err: reqwest::Error) -> Self {
        AiError::RequestFailed(err.to_string())
    }
}

// =============================================================================
// Writer Errors
// =============================================================================

/// Errors while writing the output table.
#[derive(Debug, Error)]
pub enum WriteError {
    /// Output file could not be created.
    #[error("Cannot write '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// CSV serialization or flush failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

// =============================================================================
// Pipeline Errors (top-level)
// =============================================================================

/// Top-level pipeline errors.
///
/// Returned by [`crate::pipeline::run_reviews`] and [`crate::pipeline::run_emails`].
/// Every variant is fatal for the run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Load error: {0}")]
    Load(#[from] LoadError),

    #[error("AI error: {0}")]
    Ai(#[from] AiError),

    #[error("Write error: {0}")]
    Write(#[from] WriteError),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for loader operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Result type for generative service operations.
pub type AiResult<T> = Result<T, AiError>;

/// Result type for writer operations.
pub type WriteResult<T> = Result<T, WriteError>;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;
