//! Structured diagnostic messages with severity, codes, and fabric locations.

use crate::code::DiagnosticCode;
use crate::location::Location;
use crate::severity::Severity;
use serde::{Deserialize, Serialize};

/// A structured diagnostic message anchored to a fabric location.
///
/// Diagnostics are the primary mechanism for reporting warnings and notes
/// to the user during fabric generation. Hard failures use typed error
/// returns instead; an error-severity diagnostic records the user-facing
/// description of such a failure before the run aborts.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Diagnostic {
    /// The severity level of this diagnostic.
    pub severity: Severity,
    /// The code identifying the type of diagnostic.
    pub code: DiagnosticCode,
    /// The main diagnostic message.
    pub message: String,
    /// Where on the fabric the issue was detected, if localized.
    pub location: Option<Location>,
    /// Explanatory footnotes (e.g., "note: ...").
    pub notes: Vec<String>,
}

impl Diagnostic {
    /// Creates a new error diagnostic with the given code and message.
    pub fn error(code: DiagnosticCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
            location: None,
            notes: Vec::new(),
        }
    }

    /// Creates a new warning diagnostic with the given code and message.
    pub fn warning(code: DiagnosticCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
            location: None,
            notes: Vec::new(),
        }
    }

    /// Creates a new note diagnostic with the given code and message.
    pub fn note(code: DiagnosticCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Note,
            code,
            message: message.into(),
            location: None,
            notes: Vec::new(),
        }
    }

    /// Sets the fabric location of this diagnostic.
    pub fn at(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    /// Adds a note to this diagnostic.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::Category;

    #[test]
    fn create_error() {
        let code = DiagnosticCode::new(Category::Error, 101);
        let diag = Diagnostic::error(code, "selected driver missing from fan-in");
        assert_eq!(diag.severity, Severity::Error);
        assert_eq!(diag.message, "selected driver missing from fan-in");
        assert_eq!(format!("{}", diag.code), "E101");
        assert!(diag.location.is_none());
    }

    #[test]
    fn create_warning() {
        let code = DiagnosticCode::new(Category::Routing, 201);
        let diag = Diagnostic::warning(code, "block has no multiplexers");
        assert_eq!(diag.severity, Severity::Warning);
    }

    #[test]
    fn create_note() {
        let code = DiagnosticCode::new(Category::Routing, 10);
        let diag = Diagnostic::note(code, "multiplexer left on default path");
        assert_eq!(diag.severity, Severity::Note);
    }

    #[test]
    fn builder_methods() {
        let code = DiagnosticCode::new(Category::Memory, 5);
        let diag = Diagnostic::warning(code, "empty configuration window")
            .at(Location::block(2, 3, "sb"))
            .with_note("a block without multiplexers consumes no bits");
        assert_eq!(diag.location.as_ref().unwrap().x, 2);
        assert_eq!(diag.notes.len(), 1);
    }
}
