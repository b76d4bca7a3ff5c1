//! Pipeline runner for executing fixtures through the projection engine.

use crate::config::PipelineConfig;
use crate::errors::SpecResult;
use crate::failures::{AssertionRef, ExpectedFailures, FailureState, Tally};
use crate::fixture::{AssertionBody, FixtureCase, MonoFixture};
use crate::formatter::format_failure;
use crate::matcher::{check_marks, check_scope, AssertionOutcome, AssertionResult};
use layered_natlog::{
    ConstituencyTree, OperatorCatalog, ParseTree, Projection, ProjectionEngine, StructuralError,
};

/// What reading and projecting one case produced.
#[derive(Debug)]
pub enum CaseOutput {
    Projected {
        words: Vec<String>,
        projection: Projection,
    },
    Failed(StructuralError),
}

/// Read a case's tree and project it, honoring its policy override.
pub fn project_case(
    case: &FixtureCase,
    catalog: &OperatorCatalog,
    config: &PipelineConfig,
) -> CaseOutput {
    let mut engine_config = config.engine.clone();
    if let Some(policy) = case.policy {
        engine_config = engine_config.with_policy(policy);
    }

    let projected = ConstituencyTree::from_bracketed(&case.tree).and_then(|tree| {
        let projection = ProjectionEngine::with_config(catalog, engine_config).project(&tree)?;
        Ok((tree.words().to_vec(), projection))
    });

    match projected {
        Ok((words, projection)) => CaseOutput::Projected { words, projection },
        Err(err) => CaseOutput::Failed(err),
    }
}

/// Check every assertion of one case.
pub fn check_case(case: &FixtureCase, output: &CaseOutput) -> Vec<AssertionResult> {
    case.assertions
        .iter()
        .map(|assertion| {
            let outcome = match (&assertion.body, output) {
                (AssertionBody::Error(_), CaseOutput::Failed(_)) => AssertionOutcome::Passed,
                (AssertionBody::Error(_), CaseOutput::Projected { .. }) => {
                    AssertionOutcome::MissingError
                }
                (_, CaseOutput::Failed(err)) => AssertionOutcome::UnexpectedError {
                    message: err.to_string(),
                },
                (AssertionBody::Marks(expected), CaseOutput::Projected { words, projection }) => {
                    check_marks(words, projection, expected)
                }
                (AssertionBody::Scope(expected), CaseOutput::Projected { words, projection }) => {
                    check_scope(words, projection, expected)
                }
            };
            AssertionResult {
                case: case.index,
                assertion: assertion.clone(),
                outcome,
            }
        })
        .collect()
}

/// Run a fixture through the engine and check every assertion.
pub fn run_fixture(fixture: &MonoFixture, config: &PipelineConfig) -> SpecResult<Vec<AssertionResult>> {
    let catalog = config.catalog()?;
    let mut results = Vec::with_capacity(fixture.assertion_count());
    for case in &fixture.cases {
        let output = project_case(case, &catalog, config);
        results.extend(check_case(case, &output));
    }
    Ok(results)
}

/// What [`check_fixture`] found for one fixture.
#[derive(Debug, Clone, Default)]
pub struct FixtureRun {
    pub tally: Tally,
    /// A rendered report for every failing assertion
    pub reports: Vec<String>,
}

/// Run a named fixture and classify each outcome against `expected`.
pub fn check_fixture(
    name: &str,
    fixture: &MonoFixture,
    config: &PipelineConfig,
    expected: &ExpectedFailures,
) -> SpecResult<FixtureRun> {
    let mut run = FixtureRun::default();
    for result in run_fixture(fixture, config)? {
        let reference = AssertionRef::new(result.case, result.assertion.body.key());
        let state = expected.classify(name, &reference);
        let passed = result.outcome.is_passed();
        run.tally.record(passed, state);
        if passed {
            continue;
        }

        let tree = fixture
            .cases
            .get(result.case)
            .map(|case| case.tree.as_str());
        let mut report = format_failure(name, &result, tree);
        if state != FailureState::Regression {
            report.push_str(&format!("  ({:?}: {})\n", state, reference));
        }
        run.reports.push(report);
    }
    Ok(run)
}
