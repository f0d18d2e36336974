//! Generation-scoped diagnostics.
//!
//! A [`DiagnosticCollector`] accumulates suppressible warnings and errors
//! while a framework compiles. It is created per compilation and passed
//! explicitly through every build and generation step; there is no ambient
//! global state, so independent frameworks can compile concurrently without
//! sharing a collector.
//!
//! Lifecycle: diagnostics are reported as the pipeline runs, then asserted
//! at checkpoints via [`DiagnosticCollector::finalize`], once after IR
//! construction and once after all generators have completed. An
//! unsuppressed [`Severity::Error`] fails the checkpoint; warnings and infos
//! only log. Suppression is keyed by the diagnostic's stable string ID and
//! supplied from per-framework configuration.

use std::collections::HashSet;
use std::fmt;

/// Severity of a diagnostic entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Appears in the log, nothing else.
    Info,
    /// Appears in the log and the lint summary; never fails a checkpoint.
    Warning,
    /// Fails the next checkpoint unless the ID was suppressed.
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => write!(f, "INFO"),
            Severity::Warning => write!(f, "WARNING"),
            Severity::Error => write!(f, "ERROR"),
        }
    }
}

/// A single diagnostic entry.
///
/// The `id` must be stable across compilations of the same template: it is
/// the key developers put into a framework's suppression list.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub id: String,
    pub severity: Severity,
    pub message: String,
    /// Row or field reference, e.g. `row 14` or `general.masterData`.
    pub location: Option<String>,
}

impl Diagnostic {
    pub fn new(severity: Severity, id: impl Into<String>, message: impl Into<String>) -> Self {
        Diagnostic {
            id: id.into(),
            severity,
            message: message.into(),
            location: None,
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.location {
            Some(loc) => write!(
                f,
                "[{}] {} ({}): {}",
                self.severity, self.id, loc, self.message
            ),
            None => write!(f, "[{}] {}: {}", self.severity, self.id, self.message),
        }
    }
}

/// Raised by [`DiagnosticCollector::finalize`] when a checkpoint fails.
///
/// The summary lists every failing entry at once so all problems of one run
/// are visible together instead of one at a time.
#[derive(Debug, Clone)]
pub struct DiagnosticFailure {
    pub summary: String,
}

impl fmt::Display for DiagnosticFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.summary)
    }
}

impl std::error::Error for DiagnosticFailure {}

/// Collects diagnostics for exactly one framework compilation.
#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    messages: Vec<Diagnostic>,
    seen_ids: HashSet<String>,
    duplicate_ids: Vec<String>,
    requested_suppressions: HashSet<String>,
    fired_suppressions: HashSet<String>,
}

impl DiagnosticCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark an ID as suppressed. Must be called before the diagnostic is
    /// reported; a suppression that never fires is flagged by
    /// [`DiagnosticCollector::assert_suppressions_used`].
    pub fn suppress(&mut self, id: impl Into<String>) {
        self.requested_suppressions.insert(id.into());
    }

    /// Report a diagnostic.
    ///
    /// Suppressed entries are swallowed. A diagnostic ID may only be
    /// reported once per compilation; a repeat is recorded and fails the
    /// next checkpoint unconditionally, since it means the ID is not stable
    /// enough to suppress.
    pub fn report(&mut self, diagnostic: Diagnostic) {
        if !self.seen_ids.insert(diagnostic.id.clone()) {
            tracing::error!(id = %diagnostic.id, "diagnostic id reported twice");
            self.duplicate_ids.push(diagnostic.id);
            return;
        }
        if self.requested_suppressions.contains(&diagnostic.id) {
            self.fired_suppressions.insert(diagnostic.id);
            return;
        }
        match diagnostic.severity {
            Severity::Info => tracing::info!("{diagnostic}"),
            Severity::Warning => tracing::warn!("{diagnostic}"),
            Severity::Error => tracing::error!("{diagnostic}"),
        }
        self.messages.push(diagnostic);
    }

    pub fn info(&mut self, id: impl Into<String>, message: impl Into<String>) {
        self.report(Diagnostic::new(Severity::Info, id, message));
    }

    pub fn warning(&mut self, id: impl Into<String>, message: impl Into<String>) {
        self.report(Diagnostic::new(Severity::Warning, id, message));
    }

    pub fn error(&mut self, id: impl Into<String>, message: impl Into<String>) {
        self.report(Diagnostic::new(Severity::Error, id, message));
    }

    pub fn warn_if(&mut self, condition: bool, id: impl Into<String>, message: impl Into<String>) {
        if condition {
            self.warning(id, message);
        }
    }

    /// Entries collected since the last checkpoint.
    pub fn messages(&self) -> &[Diagnostic] {
        &self.messages
    }

    /// Checkpoint: fail if any unsuppressed error (or duplicated ID) was
    /// collected. Clears the message log so the next checkpoint only sees
    /// new entries; suppressions and the seen-ID set survive, both span the
    /// whole compilation.
    pub fn finalize(&mut self) -> Result<(), DiagnosticFailure> {
        let failing: Vec<&Diagnostic> = self
            .messages
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .collect();

        if failing.is_empty() && self.duplicate_ids.is_empty() {
            self.messages.clear();
            return Ok(());
        }

        let mut summary = format!("{} failing diagnostic entries:\n", failing.len());
        for (i, d) in failing.iter().enumerate() {
            summary.push_str(&format!("{}: {}\n", i + 1, d));
            summary.push_str(&format!(
                "    suppress with id \"{}\" in the framework definition if this is intentional\n",
                d.id
            ));
        }
        for id in &self.duplicate_ids {
            summary.push_str(&format!("duplicate diagnostic id: {}\n", id));
        }
        self.messages.clear();
        self.duplicate_ids.clear();
        Err(DiagnosticFailure { summary })
    }

    /// End-of-compilation check: every configured suppression must have
    /// fired at least once, otherwise the suppression list has gone stale.
    pub fn assert_suppressions_used(&self) -> Result<(), DiagnosticFailure> {
        let mut unused: Vec<&String> = self
            .requested_suppressions
            .difference(&self.fired_suppressions)
            .collect();
        if unused.is_empty() {
            return Ok(());
        }
        unused.sort();
        let list = unused
            .iter()
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        Err(DiagnosticFailure {
            summary: format!("{} suppressed diagnostics never fired: {}", unused.len(), list),
        })
    }

    /// Reset all state for the next compilation.
    pub fn reset(&mut self) {
        self.messages.clear();
        self.seen_ids.clear();
        self.duplicate_ids.clear();
        self.requested_suppressions.clear();
        self.fired_suppressions.clear();
    }
}

/// Print collected diagnostics to stdout for the `lint` subcommand.
pub fn print_diagnostics(diagnostics: &[Diagnostic]) {
    if diagnostics.is_empty() {
        println!("✅ No diagnostics");
        return;
    }
    let errors = diagnostics
        .iter()
        .filter(|d| d.severity == Severity::Error)
        .count();
    let warnings = diagnostics
        .iter()
        .filter(|d| d.severity == Severity::Warning)
        .count();
    println!(
        "Found {} diagnostics ({} errors, {} warnings):\n",
        diagnostics.len(),
        errors,
        warnings
    );
    for d in diagnostics {
        let icon = match d.severity {
            Severity::Error => "❌",
            Severity::Warning => "⚠️ ",
            Severity::Info => "ℹ️ ",
        };
        println!("{icon} {d}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finalize_passes_without_errors() {
        let mut collector = DiagnosticCollector::new();
        collector.info("a", "just info");
        collector.warning("b", "a warning");
        assert!(collector.finalize().is_ok());
    }

    #[test]
    fn test_unsuppressed_error_fails_finalize() {
        let mut collector = DiagnosticCollector::new();
        collector.error("template:bad", "broken row");
        let err = collector.finalize().unwrap_err();
        assert!(err.summary.contains("template:bad"));
    }

    #[test]
    fn test_suppressed_error_passes_finalize() {
        let mut collector = DiagnosticCollector::new();
        collector.suppress("template:bad");
        collector.error("template:bad", "broken row");
        assert!(collector.finalize().is_ok());
        assert!(collector.assert_suppressions_used().is_ok());
    }

    #[test]
    fn test_unused_suppression_is_flagged() {
        let mut collector = DiagnosticCollector::new();
        collector.suppress("never-fired");
        assert!(collector.finalize().is_ok());
        let err = collector.assert_suppressions_used().unwrap_err();
        assert!(err.summary.contains("never-fired"));
    }

    #[test]
    fn test_duplicate_id_fails_checkpoint() {
        let mut collector = DiagnosticCollector::new();
        collector.warning("dup", "first");
        collector.warning("dup", "second");
        let err = collector.finalize().unwrap_err();
        assert!(err.summary.contains("duplicate diagnostic id: dup"));
    }

    #[test]
    fn test_message_log_clears_between_checkpoints() {
        let mut collector = DiagnosticCollector::new();
        collector.error("first-phase", "boom");
        assert!(collector.finalize().is_err());
        // second checkpoint only sees entries reported after the first
        assert!(collector.finalize().is_ok());
    }

    #[test]
    fn test_reset_clears_seen_ids() {
        let mut collector = DiagnosticCollector::new();
        collector.warning("x", "one");
        collector.reset();
        collector.warning("x", "again");
        assert!(collector.finalize().is_ok());
    }
}
