//! Parser for `.mono` fixture files.
//!
//! ```text
//! # Universal quantifier
//! (ROOT (S (NP (DT all) (NNS cats))
//!          (VP (VBP have) (NP (NNS tails)))))
//! > marks: all^ catsv have^ tails^
//! > scope: { all } [ cats ] [ have tails ]
//! ---
//! ...
//! ```

use crate::errors::{SpecError, SpecResult};
use crate::fixture::{
    Assertion, AssertionBody, ExpectedError, FixtureCase, MarkedWord, MonoFixture,
    ScopeExpectation,
};
use layered_natlog::{CompositionPolicy, Monotonicity};

/// Lines gathered for one case before its assertions are parsed.
#[derive(Default)]
struct PendingCase<'a> {
    tree_lines: Vec<(usize, &'a str)>,
    assertion_lines: Vec<(usize, &'a str)>,
}

/// Parse a full `.mono` fixture file.
pub fn parse_fixture(input: &str) -> SpecResult<MonoFixture> {
    let mut title = None;
    let mut pending: Vec<PendingCase> = vec![PendingCase::default()];

    for (line_num, line) in input.lines().enumerate() {
        let trimmed = line.trim();
        let line_num = line_num + 1;

        // Parse title from # header
        if let Some(rest) = trimmed.strip_prefix("# ") {
            if title.is_none() {
                title = Some(rest.trim().to_string());
            }
        }
        // Case separator
        else if trimmed == "---" {
            pending.push(PendingCase::default());
        }
        // Parse assertions from > blockquotes
        else if let Some(rest) = trimmed.strip_prefix("> ") {
            if let Some(last) = pending.last_mut() {
                last.assertion_lines.push((line_num, rest.trim()));
            }
        }
        // Skip empty lines and comments
        else if !trimmed.is_empty() && !trimmed.starts_with("//") {
            if let Some(last) = pending.last_mut() {
                last.tree_lines.push((line_num, trimmed));
            }
        }
    }

    let mut cases = Vec::new();
    for case in pending {
        let Some((first_line, _)) = case.tree_lines.first().copied() else {
            if let Some((line, _)) = case.assertion_lines.first() {
                return Err(SpecError::Parse {
                    line: *line,
                    message: "assertions without a tree".to_string(),
                });
            }
            continue;
        };

        let tree = case
            .tree_lines
            .iter()
            .map(|(_, l)| *l)
            .collect::<Vec<_>>()
            .join(" ");

        let mut policy = None;
        let mut assertions = Vec::new();
        for (line, text) in case.assertion_lines {
            let (key, value) = text.split_once(':').ok_or_else(|| SpecError::Parse {
                line,
                message: format!("expected `key: value`, found `{}`", text),
            })?;
            let value = value.trim();
            let body = match key.trim() {
                "marks" => AssertionBody::Marks(parse_marks(value, line)?),
                "scope" => AssertionBody::Scope(parse_scope(value, line)?),
                "error" => AssertionBody::Error(parse_expected_error(value, line)?),
                "policy" => {
                    policy = Some(parse_policy(value, line)?);
                    continue;
                }
                other => {
                    return Err(SpecError::Parse {
                        line,
                        message: format!("unknown assertion `{}`", other),
                    })
                }
            };
            assertions.push(Assertion {
                body,
                source_line: line,
            });
        }

        cases.push(FixtureCase {
            index: cases.len(),
            tree,
            source_line: first_line,
            policy,
            assertions,
        });
    }

    Ok(MonoFixture { title, cases })
}

/// Parse `all^ catsv have^ tails^`: each word is followed by its mark symbol.
pub fn parse_marks(input: &str, line: usize) -> SpecResult<Vec<MarkedWord>> {
    input
        .split_whitespace()
        .map(|token| {
            let symbol = token.chars().last().and_then(Monotonicity::from_symbol);
            match symbol {
                Some(mark) if token.len() > 1 => Ok(MarkedWord {
                    word: token[..token.len() - 1].to_string(),
                    mark,
                }),
                _ => Err(SpecError::Parse {
                    line,
                    message: format!("`{}` must be a word followed by one of ^ v *", token),
                }),
            }
        })
        .collect()
}

/// Parse `{ quantifier words } [ subject words ] [ object words ]`.
///
/// The object group is omitted for unary operators.
pub fn parse_scope(input: &str, line: usize) -> SpecResult<ScopeExpectation> {
    let error = |message: &str| SpecError::Parse {
        line,
        message: format!("{} in scope `{}`", message, input),
    };

    let (quantifier, rest) = take_group(input, '{', '}').ok_or_else(|| error("expected `{ ... }`"))?;
    let (subject, rest) = take_group(rest, '[', ']').ok_or_else(|| error("expected `[ subject ]`"))?;
    let (object, rest) = match take_group(rest, '[', ']') {
        Some((object, rest)) => (Some(object), rest),
        None => (None, rest),
    };
    if !rest.trim().is_empty() {
        return Err(error("unexpected trailing text"));
    }

    Ok(ScopeExpectation {
        quantifier,
        subject,
        object,
    })
}

/// Split off a leading `open ... close` group, normalizing the words inside.
fn take_group(input: &str, open: char, close: char) -> Option<(String, &str)> {
    let rest = input.trim_start().strip_prefix(open)?;
    let end = rest.find(close)?;
    let words = rest[..end].split_whitespace().collect::<Vec<_>>().join(" ");
    Some((words, &rest[end + close.len_utf8()..]))
}

fn parse_expected_error(input: &str, line: usize) -> SpecResult<ExpectedError> {
    match input {
        "structural" => Ok(ExpectedError::Structural),
        other => Err(SpecError::Parse {
            line,
            message: format!("unknown error kind `{}`", other),
        }),
    }
}

fn parse_policy(input: &str, line: usize) -> SpecResult<CompositionPolicy> {
    match input {
        "compose_then_accumulate" => Ok(CompositionPolicy::ComposeThenAccumulate),
        "first_claim_wins" => Ok(CompositionPolicy::FirstClaimWins),
        other => Err(SpecError::Parse {
            line,
            message: format!("unknown policy `{}`", other),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_marks() {
        let marks = parse_marks("all^ catsv have* n't^", 1).unwrap();
        assert_eq!(marks.len(), 4);
        assert_eq!(marks[0].word, "all");
        assert_eq!(marks[1].mark, Monotonicity::Down);
        assert_eq!(marks[2].mark, Monotonicity::Non);
        assert_eq!(marks[3].word, "n't");
    }

    #[test]
    fn test_parse_marks_rejects_bare_words() {
        let err = parse_marks("all^ cats", 7).unwrap_err();
        assert!(matches!(err, SpecError::Parse { line: 7, .. }));
        assert!(parse_marks("^", 1).is_err());
    }

    #[test]
    fn test_parse_binary_scope() {
        let scope = parse_scope("{ at most } [ 3 cats ] [ slept ]", 1).unwrap();
        assert_eq!(scope.quantifier, "at most");
        assert_eq!(scope.subject, "3 cats");
        assert_eq!(scope.object.as_deref(), Some("slept"));
    }

    #[test]
    fn test_parse_unary_scope() {
        let scope = parse_scope("{not}[have   tails]", 1).unwrap();
        assert_eq!(scope.quantifier, "not");
        assert_eq!(scope.subject, "have tails");
        assert_eq!(scope.object, None);
    }

    #[test]
    fn test_parse_scope_errors() {
        assert!(parse_scope("[ cats ]", 1).is_err());
        assert!(parse_scope("{ all } cats", 1).is_err());
        assert!(parse_scope("{ all } [ cats ] [ have ] extra", 1).is_err());
    }

    #[test]
    fn test_parse_fixture_cases() {
        let input = r#"
# Title here
// leading comment
(ROOT (S (NP (DT all) (NNS cats))
         (VP (VBP purr))))
> marks: all^ catsv purr^
> scope: { all } [ cats ] [ purr ]
---
(ROOT (NP (DT no) (NN tail)))
> policy: first_claim_wins
> marks: no^ tailv
"#;
        let fixture = parse_fixture(input).unwrap();
        assert_eq!(fixture.title.as_deref(), Some("Title here"));
        assert_eq!(fixture.cases.len(), 2);
        assert_eq!(
            fixture.cases[0].tree,
            "(ROOT (S (NP (DT all) (NNS cats)) (VP (VBP purr))))"
        );
        assert_eq!(fixture.cases[0].source_line, 4);
        assert_eq!(fixture.cases[0].assertions.len(), 2);
        assert_eq!(fixture.cases[0].assertions[1].source_line, 7);
        assert_eq!(fixture.cases[0].policy, None);
        assert_eq!(fixture.cases[1].index, 1);
        assert_eq!(fixture.cases[1].policy, Some(CompositionPolicy::FirstClaimWins));
        assert_eq!(fixture.cases[1].assertions.len(), 1);
        assert_eq!(fixture.assertion_count(), 3);
    }

    #[test]
    fn test_assertions_without_tree_are_rejected() {
        let err = parse_fixture("> marks: a^\n").unwrap_err();
        assert!(matches!(err, SpecError::Parse { line: 1, .. }));
    }

    #[test]
    fn test_unknown_assertion_key() {
        let err = parse_fixture("(ROOT (NN cat))\n> colour: red\n").unwrap_err();
        assert!(err.to_string().contains("unknown assertion `colour`"));
    }

    #[test]
    fn test_assertion_display_round_trips() {
        let fixture = parse_fixture("(ROOT (NN cat))\n> marks: cat^\n> error: structural\n").unwrap();
        let rendered: Vec<String> = fixture.cases[0]
            .assertions
            .iter()
            .map(|a| a.body.to_string())
            .collect();
        assert_eq!(rendered, vec!["marks: cat^", "error: structural"]);
    }
}
