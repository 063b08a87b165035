//! Diagnostics collected during a generation pass.
//!
//! Configuration, I/O and structural problems never abort processing of the
//! remaining entities. Each one is recorded here against the entity or member
//! it concerns, mirrored to `tracing`, and inspected at the end of the run to
//! decide whether the build failed.

use std::fmt;

use serde::Serialize;
use tracing::{error, warn};

/// How serious a diagnostic is
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// Which part of the pipeline raised the diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticKind {
    /// Unknown template names, missing required entity data, bad ids
    Configuration,
    /// Unreadable template files, failed resource or source writes
    Io,
    /// Misdeclared callbacks and register fields
    Structural,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticKind::Configuration => write!(f, "configuration"),
            DiagnosticKind::Io => write!(f, "io"),
            DiagnosticKind::Structural => write!(f, "structural"),
        }
    }
}

/// A single reported problem
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub kind: DiagnosticKind,
    /// The container, field or method the diagnostic is attached to, e.g.
    /// `com.example.ModBlocks.COPPER_ORE` or `com.example.ModBlocks.onBlock()`
    pub subject: Option<String>,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.subject {
            Some(subject) => write!(
                f,
                "{} [{}] {}: {}",
                self.severity, self.kind, subject, self.message
            ),
            None => write!(f, "{} [{}] {}", self.severity, self.kind, self.message),
        }
    }
}

/// Accumulates diagnostics for one generation run
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a diagnostic and mirror it to the log
    pub fn push(&mut self, diagnostic: Diagnostic) {
        let subject = diagnostic.subject.as_deref().unwrap_or("-");
        match diagnostic.severity {
            Severity::Error => error!(
                kind = %diagnostic.kind,
                subject = subject,
                "{}",
                diagnostic.message
            ),
            Severity::Warning => warn!(
                kind = %diagnostic.kind,
                subject = subject,
                "{}",
                diagnostic.message
            ),
        }
        self.entries.push(diagnostic);
    }

    pub fn error(&mut self, kind: DiagnosticKind, subject: Option<&str>, message: impl Into<String>) {
        self.report(Severity::Error, kind, subject, message);
    }

    pub fn warning(
        &mut self,
        kind: DiagnosticKind,
        subject: Option<&str>,
        message: impl Into<String>,
    ) {
        self.report(Severity::Warning, kind, subject, message);
    }

    /// Shorthand for a configuration error attached to `subject`
    pub fn configuration(&mut self, subject: &str, message: impl Into<String>) {
        self.error(DiagnosticKind::Configuration, Some(subject), message);
    }

    /// Shorthand for a structural error attached to `subject`
    pub fn structural(&mut self, subject: &str, message: impl Into<String>) {
        self.error(DiagnosticKind::Structural, Some(subject), message);
    }

    fn report(
        &mut self,
        severity: Severity,
        kind: DiagnosticKind,
        subject: Option<&str>,
        message: impl Into<String>,
    ) {
        self.push(Diagnostic {
            severity,
            kind,
            subject: subject.map(str::to_string),
            message: message.into(),
        });
    }

    pub fn has_errors(&self) -> bool {
        self.entries.iter().any(|d| d.severity == Severity::Error)
    }

    pub fn error_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .count()
    }

    /// All diagnostics attached to `subject`
    pub fn for_subject<'a>(&'a self, subject: &'a str) -> impl Iterator<Item = &'a Diagnostic> {
        self.entries
            .iter()
            .filter(move |d| d.subject.as_deref() == Some(subject))
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
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    #[test]
    fn test_warnings_do_not_fail_the_build() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.warning(
            DiagnosticKind::Configuration,
            Some("examplemod:ore"),
            "duplicate id",
        );

        assert_eq!(diagnostics.len(), 1);
        assert!(!diagnostics.has_errors());
        assert_eq!(diagnostics.error_count(), 0);
    }

    #[test]
    fn test_errors_are_filtered_by_subject() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.configuration("examplemod:a", "block template not found: foo");
        diagnostics.structural("ModBlocks.onBlock", "callback must be static");
        diagnostics.configuration("examplemod:a", "drop_other requires loot_data");

        assert!(diagnostics.has_errors());
        assert_eq!(diagnostics.error_count(), 3);
        assert_eq!(diagnostics.for_subject("examplemod:a").count(), 2);
        assert_eq!(diagnostics.for_subject("examplemod:b").count(), 0);
    }

    #[test]
    fn test_diagnostic_display() {
        let diagnostic = Diagnostic {
            severity: Severity::Error,
            kind: DiagnosticKind::Io,
            subject: None,
            message: "failed to read pillar.json".to_string(),
        };
        assert_eq!(diagnostic.to_string(), "error [io] failed to read pillar.json");

        let diagnostic = Diagnostic {
            subject: Some("examplemod:ore".to_string()),
            ..diagnostic
        };
        assert_eq!(
            diagnostic.to_string(),
            "error [io] examplemod:ore: failed to read pillar.json"
        );
    }

    #[test]
    #[traced_test]
    fn test_diagnostics_are_logged() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.configuration("examplemod:ore", "item template not found: shiny");

        assert!(logs_contain("item template not found: shiny"));
    }
}
