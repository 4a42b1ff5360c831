//! CLI-specific error types and mappings.

use resonate_core::{ConfigError, InferenceError};
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO error (file not found, permission denied, etc.).
    #[error("IO error: {0}")]
    Io(String),

    /// The model rejected or failed on the input.
    #[error("{0}")]
    Inference(#[from] InferenceError),

    /// The server could not start, or stopped with an error.
    #[error("Server error: {0}")]
    Server(String),
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow sysexits.h where one fits.
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => 78, // EX_CONFIG
            Self::Io(_) => 74,     // EX_IOERR
            Self::Inference(e) if e.is_malformed() => 65, // EX_DATAERR
            Self::Inference(_) => 1,
            Self::Server(_) => 69, // EX_UNAVAILABLE
        }
    }

    /// Classify an error from bootstrapping or running the server.
    ///
    /// Configuration and inference failures keep their own variants so the
    /// exit code reflects the cause rather than the layer that reported it.
    pub fn from_startup(err: anyhow::Error) -> Self {
        if let Some(config) = err.downcast_ref::<ConfigError>() {
            return Self::Config(config.clone());
        }
        match err.downcast::<InferenceError>() {
            Ok(inference) => Self::Inference(inference),
            Err(other) => Self::Server(format!("{other:#}")),
        }
    }
}
