//! Common result and error types for the Weft fabric generator.

/// The standard result type for fallible internal operations.
///
/// `Err` indicates an unrecoverable internal error (a bug in Weft), not a
/// problem with the input architecture or routing graph. Input problems are
/// reported through typed domain errors or the diagnostic sink; an
/// `InternalError` should never occur during normal operation.
pub type WeftResult<T> = Result<T, InternalError>;

/// An internal generator error indicating a bug in Weft, not an input problem.
///
/// If one of these occurs, there is a logic error in the generator that
/// should be fixed.
#[derive(Debug, thiserror::Error)]
#[error("internal fabric generator error: {message}")]
pub struct InternalError {
    /// Description of the internal error.
    pub message: String,
}

impl InternalError {
    /// Creates a new internal error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<String> for InternalError {
    fn from(message: String) -> Self {
        Self { message }
    }
}
