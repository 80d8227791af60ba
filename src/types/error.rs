//! Diagnostic error type

use thiserror::Error;

/// Contract violations at the edges of the classification core.
///
/// Degenerate numeric input never produces one of these; it is normalised
/// to 0 and classified.
#[derive(Error, Debug)]
pub enum DiagnosticError {
    #[error("Invalid machine class '{0}': expected 1, 2, 3 or 4")]
    InvalidMachineClass(String),

    #[error("Invalid vibration channel '{0}': expected 1, 2, 3 or all")]
    InvalidChannel(String),

    #[error("Malformed payload: {0}")]
    Payload(#[from] serde_json::Error),
}
