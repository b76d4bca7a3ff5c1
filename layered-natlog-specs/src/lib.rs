#![doc(
    html_logo_url = "https://raw.githubusercontent.com/storyscript/layered-nlp/main/assets/layered-nlp.svg",
    issue_tracker_base_url = "https://github.com/storyscript/layered-nlp/issues/"
)]

//! Fixture-driven testing infrastructure for layered-natlog.
//!
//! Test cases are written declaratively in `.mono` fixture files: a
//! bracketed parse followed by the markings and scopes expected of it.
//!
//! ## Modules
//!
//! - [`parser`] - Parses `.mono` fixture files
//! - [`fixture`] - Fixture and assertion types
//! - [`loader`] - Fixture file loading
//! - [`matcher`] - Checks assertions against a projection
//! - [`runner`] - Runs fixtures through the projection engine
//! - [`errors`] - Error types for the harness
//! - [`formatter`] - Rich error formatting with field-level diagnostics
//! - [`failures`] - Expected failures tracking via TOML

pub mod config;
pub mod errors;
pub mod failures;
pub mod fixture;
pub mod formatter;
pub mod loader;
pub mod matcher;
pub mod parser;
pub mod runner;

// Re-exports for convenient access to core types
pub use config::PipelineConfig;
pub use errors::{SpecError, SpecResult};
pub use failures::{AssertionRef, ExpectedFailures, FailureEntry, FailureState, HarnessResult, Tally};
pub use fixture::{
    Assertion, AssertionBody, ExpectedError, FixtureCase, MarkedWord, MonoFixture,
    ScopeExpectation,
};
pub use formatter::{format_failure, format_summary};
pub use loader::{load_all_fixtures, load_fixture};
pub use matcher::{check_marks, check_scope, AssertionOutcome, AssertionResult, FieldMismatch};
pub use parser::{parse_fixture, parse_marks, parse_scope};
pub use runner::{check_case, check_fixture, project_case, run_fixture, CaseOutput, FixtureRun};
