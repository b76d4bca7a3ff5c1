//! Rich error formatting for assertion failures.

use crate::failures::Tally;
use crate::fixture::AssertionBody;
use crate::matcher::{AssertionOutcome, AssertionResult};
use std::fmt;

/// A failed assertion with its context, rendered through `Display`.
pub struct FailureReport<'a> {
    pub fixture_name: &'a str,
    pub result: &'a AssertionResult,
    /// Bracketed tree of the failing case
    pub tree: Option<&'a str>,
}

impl fmt::Display for FailureReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let assertion = &self.result.assertion;

        // Header
        writeln!(f, "\nFAIL: {}:{}", self.fixture_name, assertion.source_line)?;
        writeln!(f)?;

        if let Some(tree) = self.tree {
            writeln!(f, "  {}", tree)?;
            writeln!(f)?;
        }

        // Main failure message
        match &self.result.outcome {
            AssertionOutcome::Failed(fields) => {
                writeln!(f, "  assertion failed for case {}", self.result.case)?;
                for field in fields {
                    writeln!(
                        f,
                        "    \u{2717} {}: expected `{}`, found `{}`",
                        field.field, field.expected, field.actual
                    )?;
                }
            }
            AssertionOutcome::NotFound { reason } => {
                writeln!(f, "  quantifier not found: {}", reason)?;
            }
            AssertionOutcome::UnexpectedError { message } => {
                writeln!(f, "  tree could not be projected: {}", message)?;
            }
            AssertionOutcome::MissingError => {
                writeln!(f, "  expected a structural error, but the tree projected")?;
            }
            AssertionOutcome::Passed => {
                writeln!(f, "  (passed)")?;
            }
        }

        // Assertion source
        writeln!(f)?;
        writeln!(f, "  Assertion was: {}", assertion.body)?;

        if let Some(hint) = generate_hint(self.result) {
            writeln!(f)?;
            writeln!(f, "  hint: {}", hint)?;
        }

        Ok(())
    }
}

/// Format a failed assertion with rich context.
pub fn format_failure(fixture_name: &str, result: &AssertionResult, tree: Option<&str>) -> String {
    FailureReport {
        fixture_name,
        result,
        tree,
    }
    .to_string()
}

/// Per-fixture tally, rendered through `Display`.
pub struct Summary<'a> {
    pub fixture_name: &'a str,
    pub tally: &'a Tally,
}

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tally = self.tally;
        let status = if tally.success() { "PASS" } else { "FAIL" };
        writeln!(f, "\n{}: {}", status, self.fixture_name)?;
        writeln!(
            f,
            "  {} passed, {} failed ({} expected, {} regressions)",
            tally.passed,
            tally.failed(),
            tally.expected_failures,
            tally.regressions
        )?;
        if tally.now_passing > 0 {
            writeln!(
                f,
                "  {} listed as expected failures now pass; remove them from expected-failures.toml",
                tally.now_passing
            )?;
        }
        Ok(())
    }
}

/// Format a one-fixture summary.
pub fn format_summary(fixture_name: &str, tally: &Tally) -> String {
    Summary {
        fixture_name,
        tally,
    }
    .to_string()
}

fn generate_hint(result: &AssertionResult) -> Option<String> {
    match (&result.assertion.body, &result.outcome) {
        (AssertionBody::Marks(_), AssertionOutcome::Failed(fields)) => {
            if fields.iter().any(|f| f.field == "length" || f.field.starts_with("word ")) {
                return Some("the marks line must list every leaf of the tree, in order".to_string());
            }
            if fields.iter().any(|f| f.expected == "v" && f.actual == "^") {
                return Some(
                    "a token left upward lies outside every projected scope - check the trigger and its projection query"
                        .to_string(),
                );
            }
            if fields.iter().any(|f| f.expected == "^" && f.actual == "v") {
                return Some(
                    "two downward scopes cancel under composition; under first_claim_wins they do not"
                        .to_string(),
                );
            }
            None
        }
        (AssertionBody::Scope(_), AssertionOutcome::NotFound { .. }) => Some(
            "no operator in the catalog fired on these words - check its trigger query".to_string(),
        ),
        _ => None,
    }
}
