//! Expected failures, read from `expected-failures.toml`.
//!
//! Each entry points at one assertion of one fixture case by an
//! [`AssertionRef`] written `C<case>.<key>`, for example `C2.marks` or
//! `C0.scope:at most`.

use crate::errors::{SpecError, SpecResult};
use crate::fixture::MonoFixture;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Names one assertion of one case.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AssertionRef {
    pub case: usize,
    /// `marks`, `error`, or `scope:<quantifier words>`
    pub key: String,
}

impl AssertionRef {
    pub fn new(case: usize, key: impl Into<String>) -> Self {
        Self {
            case,
            key: key.into(),
        }
    }
}

impl fmt::Display for AssertionRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "C{}.{}", self.case, self.key)
    }
}

impl FromStr for AssertionRef {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (case, key) = s
            .strip_prefix('C')
            .and_then(|rest| rest.split_once('.'))
            .ok_or_else(|| format!("`{}` is not of the form C<case>.<key>", s))?;
        let case = case
            .parse()
            .map_err(|_| format!("`{}` has a non-numeric case index", s))?;
        let known_key = key == "marks"
            || key == "error"
            || key.strip_prefix("scope:").is_some_and(|q| !q.trim().is_empty());
        if !known_key {
            return Err(format!("`{}` has unknown assertion key `{}`", s, key));
        }
        Ok(Self::new(case, key))
    }
}

/// A single expected failure entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailureEntry {
    /// Fixture path relative to the fixtures directory.
    pub fixture: String,
    /// Assertion reference, e.g. "C3.marks".
    pub assertion: String,
    #[serde(default)]
    pub reason: Option<String>,
    /// Date added (YYYY-MM-DD).
    #[serde(default)]
    pub added: Option<String>,
}

impl FailureEntry {
    pub fn reference(&self) -> Option<AssertionRef> {
        self.assertion.parse().ok()
    }

    fn matches(&self, fixture: &str, reference: &AssertionRef) -> bool {
        self.fixture == fixture && self.reference().as_ref() == Some(reference)
    }
}

/// How a failing assertion is classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureState {
    /// Known limitation, won't fix soon.
    Known,
    /// Awaiting fix, not blocking.
    Pending,
    /// Expected to pass.
    Regression,
}

/// Loaded expected failures.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExpectedFailures {
    #[serde(default)]
    pub known: Vec<FailureEntry>,
    #[serde(default)]
    pub pending: Vec<FailureEntry>,
}

impl ExpectedFailures {
    /// Load from a TOML file. A missing file means no expected failures.
    ///
    /// Every entry's assertion reference is validated up front.
    pub fn load(path: &Path) -> SpecResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let load_error = |message: String| SpecError::Load {
            path: path.display().to_string(),
            message,
        };

        let content = fs::read_to_string(path).map_err(|e| load_error(e.to_string()))?;
        let failures: Self = toml::from_str(&content).map_err(|e| load_error(e.to_string()))?;
        for entry in failures.entries().map(|(_, entry)| entry) {
            entry
                .assertion
                .parse::<AssertionRef>()
                .map_err(|message| load_error(format!("{}: {}", entry.fixture, message)))?;
        }
        Ok(failures)
    }

    fn entries(&self) -> impl Iterator<Item = (FailureState, &FailureEntry)> {
        self.known
            .iter()
            .map(|e| (FailureState::Known, e))
            .chain(self.pending.iter().map(|e| (FailureState::Pending, e)))
    }

    /// Classify a failure of `reference` in `fixture`.
    pub fn classify(&self, fixture: &str, reference: &AssertionRef) -> FailureState {
        self.entries()
            .find(|(_, e)| e.matches(fixture, reference))
            .map_or(FailureState::Regression, |(state, _)| state)
    }

    pub fn entry(&self, fixture: &str, reference: &AssertionRef) -> Option<&FailureEntry> {
        self.entries()
            .map(|(_, e)| e)
            .find(|e| e.matches(fixture, reference))
    }

    pub fn len(&self) -> usize {
        self.known.len() + self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Entries that no longer point at any assertion of the loaded fixtures.
    pub fn stale<'a>(&'a self, fixtures: &[(String, MonoFixture)]) -> Vec<&'a FailureEntry> {
        self.entries()
            .map(|(_, e)| e)
            .filter(|entry| {
                let Some(reference) = entry.reference() else {
                    return true;
                };
                let case = fixtures
                    .iter()
                    .find(|(name, _)| *name == entry.fixture)
                    .and_then(|(_, fixture)| fixture.cases.get(reference.case));
                !case.is_some_and(|case| {
                    case.assertions
                        .iter()
                        .any(|a| a.body.key() == reference.key)
                })
            })
            .collect()
    }
}

/// Assertion counts for one fixture.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub passed: usize,
    /// Failures listed as known or pending
    pub expected_failures: usize,
    pub regressions: usize,
    /// Listed as expected to fail, but passed
    pub now_passing: usize,
}

impl Tally {
    /// Count one assertion, given how the expected-failures file lists it.
    pub fn record(&mut self, passed: bool, state: FailureState) {
        match (passed, state) {
            (true, FailureState::Regression) => self.passed += 1,
            (true, _) => {
                self.passed += 1;
                self.now_passing += 1;
            }
            (false, FailureState::Regression) => self.regressions += 1,
            (false, _) => self.expected_failures += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.passed + self.failed()
    }

    pub fn failed(&self) -> usize {
        self.expected_failures + self.regressions
    }

    pub fn success(&self) -> bool {
        self.regressions == 0
    }

    fn add(&mut self, other: &Tally) {
        self.passed += other.passed;
        self.expected_failures += other.expected_failures;
        self.regressions += other.regressions;
        self.now_passing += other.now_passing;
    }
}

/// Tallies for a whole harness run, one per fixture in run order.
#[derive(Debug, Clone, Default)]
pub struct HarnessResult {
    pub fixtures: Vec<(String, Tally)>,
}

impl HarnessResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, fixture: &str, tally: Tally) {
        self.fixtures.push((fixture.to_string(), tally));
    }

    pub fn totals(&self) -> Tally {
        let mut totals = Tally::default();
        for (_, tally) in &self.fixtures {
            totals.add(tally);
        }
        totals
    }

    /// No fixture has a regression.
    pub fn success(&self) -> bool {
        self.fixtures.iter().all(|(_, tally)| tally.success())
    }
}
