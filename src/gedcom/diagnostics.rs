//! Diagnostics
//!
//!     Structural and data anomalies never stop a read. The assembler records each one as a
//!     [Diagnostic] carrying the physical line it was found on, a short machine readable
//!     code and a message, and mirrors it to the `log` facade. The collected diagnostics are
//!     returned with the parsed database.
//!
//! Codes
//!
//!     - `unknown-tag`: a tag the owning record does not understand (kept as custom data).
//!     - `unparented-tag`: a line with no open record to attach to.
//!     - `missing-xref`: a top level record without the xref it needs.
//!     - `duplicate-xref`: a second record under an id already in the database.
//!     - `duplicate-header`: a second `HEAD` record.
//!     - `missing-reference`: a pointer to a record that never appeared.
//!     - `invalid-reference`: a pointer to a record of another kind than the line expects.
//!     - `invalid-value`: an enumeration or number that could not be read.
//!     - `lexical-error`: a skipped line, when the reader is told to keep going.

use serde::Serialize;
use std::fmt;

/// Diagnostic severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DiagnosticSeverity {
    Error,
    Warning,
    Information,
}

impl fmt::Display for DiagnosticSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticSeverity::Error => write!(f, "error"),
            DiagnosticSeverity::Warning => write!(f, "warning"),
            DiagnosticSeverity::Information => write!(f, "info"),
        }
    }
}

/// A non-fatal finding, tied to a physical line (0 for findings of the fix-up pass).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    pub line: usize,
    pub severity: DiagnosticSeverity,
    pub message: String,
    pub code: Option<String>,
}

impl Diagnostic {
    pub fn new(line: usize, severity: DiagnosticSeverity, message: impl Into<String>) -> Self {
        Self {
            line,
            severity,
            message: message.into(),
            code: None,
        }
    }

    pub fn warning(line: usize, message: impl Into<String>) -> Self {
        Self::new(line, DiagnosticSeverity::Warning, message)
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn has_code(&self, code: &str) -> bool {
        self.code.as_deref() == Some(code)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.code {
            Some(code) => write!(
                f,
                "{} [{}]: {} at line {}",
                self.severity, code, self.message, self.line
            ),
            None => write!(f, "{}: {} at line {}", self.severity, self.message, self.line),
        }
    }
}

/// Ordered collection of diagnostics for one parse.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a diagnostic and forward it to the log.
    pub fn push(&mut self, diagnostic: Diagnostic) {
        match diagnostic.severity {
            DiagnosticSeverity::Error | DiagnosticSeverity::Warning => {
                log::warn!("event=diagnostic {}", diagnostic)
            }
            DiagnosticSeverity::Information => log::info!("event=diagnostic {}", diagnostic),
        }
        self.entries.push(diagnostic);
    }

    pub fn warn(&mut self, line: usize, code: &str, message: impl Into<String>) {
        self.push(Diagnostic::warning(line, message).with_code(code));
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_display_with_code() {
        let diagnostic =
            Diagnostic::warning(7, "no record for @S9@").with_code("missing-reference");
        assert_eq!(
            diagnostic.to_string(),
            "warning [missing-reference]: no record for @S9@ at line 7"
        );
        assert!(diagnostic.has_code("missing-reference"));
    }

    #[test]
    fn test_collector_keeps_order() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.warn(1, "unknown-tag", "first");
        diagnostics.warn(2, "unknown-tag", "second");

        let messages: Vec<_> = diagnostics.iter().map(|d| d.message.as_str()).collect();
        assert_eq!(messages, vec!["first", "second"]);
    }
}
