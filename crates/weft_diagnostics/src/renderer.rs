//! Plain-text rendering of diagnostics for terminal output.

use crate::diagnostic::Diagnostic;

/// Renders a diagnostic as a single human-readable block of text.
///
/// Format:
///
/// ```text
/// warning[R201] sb[1][2]: block has no multiplexers
///   note: a block without multiplexers consumes no bits
/// ```
pub fn render_diagnostic(diag: &Diagnostic) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}[{}]", diag.severity, diag.code));
    if let Some(location) = &diag.location {
        out.push_str(&format!(" {location}"));
    }
    out.push_str(&format!(": {}", diag.message));
    for note in &diag.notes {
        out.push_str(&format!("\n  note: {note}"));
    }
    out
}
