//! Application error type.
//!
//! Every fallible operation in the crate returns `AppError`. The `kind`
//! decides the process exit code so the binary can report failures without
//! inspecting messages.

use crate::models::ModelError;

/// Broad classification of a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// File could not be opened or read.
    Io,
    /// Malformed table row or matrix shape.
    Parse,
    /// A required named column is absent from a table header.
    MissingColumn,
    /// Non-physical input (e.g. η > 0.25, non-positive mass ratio).
    Domain,
    /// Aggregation over a batch with no samples.
    EmptyBatch,
    /// EOS sequence could not be loaded or is malformed.
    Eos,
    /// Invalid configuration value.
    Config,
    /// Non-recoverable failure reported by the remnant-mass model.
    Model,
}

impl ErrorKind {
    pub fn exit_code(self) -> u8 {
        match self {
            ErrorKind::Io
            | ErrorKind::Parse
            | ErrorKind::MissingColumn
            | ErrorKind::Domain
            | ErrorKind::Config => 2,
            ErrorKind::EmptyBatch => 3,
            ErrorKind::Eos | ErrorKind::Model => 4,
        }
    }
}

#[derive(Clone)]
pub struct AppError {
    kind: ErrorKind,
    message: String,
}

impl AppError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Io, message)
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Parse, message)
    }

    pub fn domain(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Domain, message)
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Config, message)
    }

    pub fn eos(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Eos, message)
    }

    pub fn empty_batch(operation: &str) -> Self {
        Self::new(
            ErrorKind::EmptyBatch,
            format!("Cannot compute {operation}: the sample batch is empty."),
        )
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn exit_code(&self) -> u8 {
        self.kind.exit_code()
    }
}

impl From<ModelError> for AppError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::Domain(_) => AppError::new(ErrorKind::Domain, err.to_string()),
            _ => AppError::new(ErrorKind::Model, err.to_string()),
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("kind", &self.kind)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
