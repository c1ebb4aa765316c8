//! Core types for lint findings and results.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A finding returned by a rule for one visited node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Human-readable message.
    pub message: String,
    /// Stable identifier (e.g., "forbidden-param-type").
    pub identifier: String,
    /// Line number (1-indexed).
    pub line: usize,
}

impl Diagnostic {
    /// Creates a new diagnostic.
    #[must_use]
    pub fn new(message: impl Into<String>, identifier: impl Into<String>, line: usize) -> Self {
        Self {
            message: message.into(),
            identifier: identifier.into(),
            line,
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: [{}] {}", self.line, self.identifier, self.message)
    }
}

/// A diagnostic attributed to a rule and a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Rule name (e.g., "forbidden-type-usage").
    pub rule: String,
    /// File the visited node belongs to.
    pub file: PathBuf,
    /// The underlying diagnostic.
    #[serde(flatten)]
    pub diagnostic: Diagnostic,
}

impl Violation {
    /// Creates a new violation.
    #[must_use]
    pub fn new(rule: impl Into<String>, file: impl Into<PathBuf>, diagnostic: Diagnostic) -> Self {
        Self {
            rule: rule.into(),
            file: file.into(),
            diagnostic,
        }
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}: [{}] {}",
            self.file.display(),
            self.diagnostic.line,
            self.diagnostic.identifier,
            self.diagnostic.message
        )
    }
}

/// Result of running lint analysis over a stream of nodes.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct LintResult {
    /// All violations found, in visitation order.
    pub violations: Vec<Violation>,
    /// Number of nodes visited.
    pub nodes_checked: usize,
}

impl LintResult {
    /// Creates a new empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if there are any violations.
    #[must_use]
    pub fn has_violations(&self) -> bool {
        !self.violations.is_empty()
    }

    /// Returns violations with the given identifier.
    #[must_use]
    pub fn by_identifier(&self, identifier: &str) -> Vec<&Violation> {
        self.violations
            .iter()
            .filter(|v| v.diagnostic.identifier == identifier)
            .collect()
    }

    /// Produces a human-readable multi-line report.
    #[must_use]
    pub fn format_report(&self) -> String {
        use std::fmt::Write;

        let mut report = String::new();
        for v in &self.violations {
            let _ = writeln!(report, "{v}");
        }
        let _ = writeln!(
            report,
            "\nFound {} violation(s) in {} node(s)",
            self.violations.len(),
            self.nodes_checked
        );
        report
    }

    /// Adds violations from another result.
    pub fn extend(&mut self, other: Self) {
        self.violations.extend(other.violations);
        self.nodes_checked += other.nodes_checked;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_violation(identifier: &str) -> Violation {
        Violation::new(
            "forbidden-type-usage",
            "src/Service.php",
            Diagnostic::new("Parameter $x of function f() has forbidden type Foo.", identifier, 12),
        )
    }

    #[test]
    fn test_display_includes_location_and_identifier() {
        let v = make_violation("forbidden-param-type");
        assert_eq!(
            v.to_string(),
            "src/Service.php:12: [forbidden-param-type] Parameter $x of function f() has forbidden type Foo."
        );
    }

    #[test]
    fn test_by_identifier_filters() {
        let mut result = LintResult::new();
        result.violations.push(make_violation("forbidden-param-type"));
        result.violations.push(make_violation("forbidden-extends"));
        assert_eq!(result.by_identifier("forbidden-extends").len(), 1);
        assert!(result.has_violations());
    }

    #[test]
    fn test_format_report_counts() {
        let mut result = LintResult::new();
        result.nodes_checked = 3;
        result.violations.push(make_violation("forbidden-param-type"));

        let report = result.format_report();
        assert!(report.starts_with("src/Service.php:12: [forbidden-param-type] "));
        assert!(report.contains("Found 1 violation(s) in 3 node(s)"));
    }

    #[test]
    fn test_extend_merges_counts() {
        let mut a = LintResult::new();
        a.nodes_checked = 1;
        let mut b = LintResult::new();
        b.nodes_checked = 2;
        b.violations.push(make_violation("forbidden-trait"));
        a.extend(b);
        assert_eq!(a.nodes_checked, 3);
        assert_eq!(a.violations.len(), 1);
    }
}
