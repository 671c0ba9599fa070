//! Solver run errors.

use std::io;
use std::path::PathBuf;

use pgraph_codec::CodecError;
use thiserror::Error;

/// Errors that can occur while running the external solver.
#[derive(Debug, Error)]
pub enum SolverError {
    /// The solver process failed or left no report behind.
    #[error("solver invocation failed: {message}")]
    InvocationFailed { message: String },

    #[error("{0}")]
    Codec(#[from] CodecError),

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl SolverError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        SolverError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn invocation(message: impl Into<String>) -> Self {
        SolverError::InvocationFailed {
            message: message.into(),
        }
    }
}

/// Result type for solver runs.
pub type Result<T> = std::result::Result<T, SolverError>;
