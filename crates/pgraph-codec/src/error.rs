//! Codec errors.

use pgraph_core::ModelError;
use thiserror::Error;

/// Errors that can occur while encoding a model or decoding a solver report.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("invalid model: {}", join_issues(.0))]
    InvalidModel(Vec<ModelError>),

    #[error("unsupported solver mode '{0}' (expected MSG, SSG, SSGLP, INSIDEOUT/ABB or 0-3)")]
    UnsupportedMode(String),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// A report line the decoder could not make sense of.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("parse error at line {line_no} (byte {offset}): {reason}: '{line}'")]
pub struct ParseError {
    /// Reassembled text of the offending line.
    pub line: String,
    /// 1-based line number in the raw report.
    pub line_no: usize,
    /// Byte offset of the line start in the raw report.
    pub offset: usize,
    pub reason: String,
}

impl ParseError {
    pub(crate) fn at(line: &crate::reassemble::LogicalLine, reason: impl Into<String>) -> Self {
        Self {
            line: line.text.clone(),
            line_no: line.line_no,
            offset: line.offset,
            reason: reason.into(),
        }
    }
}

fn join_issues(issues: &[ModelError]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result type for codec operations.
pub type Result<T> = std::result::Result<T, CodecError>;
