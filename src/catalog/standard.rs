//! The standard English operator table.
//!
//! Order matters: earlier operators are applied first. Negation and
//! superlatives come before the determiners so that, for example, `most`
//! is claimed by its own operator rather than as a superlative.

use super::{ChildQuery, DominanceContext, OperatorDef, ProjectionQuery, TriggerQuery};
use crate::monotonicity::Monotonicity::{Down, Non, Up};

use DominanceContext::{NounPhraseUnderVerbPhrase, OutsideVerbPhrase};
use ProjectionQuery::{ClauseS, MaximalNp, Parent, ParentPp};

pub(crate) fn standard_defs() -> Vec<OperatorDef> {
    let not_after_a = || ChildQuery::word("DT", "a");
    vec![
        // down, unary ----------------------------------------------------------
        OperatorDef::unary("not", TriggerQuery::words("RB", &["not", "n't"]), Down, Parent),
        OperatorDef::unary("without", TriggerQuery::words("IN", &["without"]), Down, ParentPp),
        // non, unary -----------------------------------------------------------
        OperatorDef::unary(
            "superlative",
            TriggerQuery::words("JJS", &[]).excluding_words(&["most", "least"]),
            Non,
            MaximalNp,
        ),
        OperatorDef::unary(
            "unary no",
            TriggerQuery::words("DT", &["no"]).in_context(NounPhraseUnderVerbPhrase),
            Down,
            MaximalNp,
        ),
        // down-down ------------------------------------------------------------
        OperatorDef::binary(
            "no",
            TriggerQuery::words("DT", &["no", "neither"]).in_context(OutsideVerbPhrase),
            (Down, MaximalNp),
            (Down, ClauseS),
        ),
        OperatorDef::binary(
            "at most",
            TriggerQuery::phrase(
                "QP",
                vec![
                    ChildQuery::word("IN", "at"),
                    ChildQuery::word("JJS", "most"),
                    ChildQuery::new("CD"),
                ],
            ),
            (Down, MaximalNp),
            (Down, ClauseS),
        ),
        OperatorDef::binary(
            "few",
            TriggerQuery::words("JJ", &["few"])
                .excluding_left_sister(not_after_a())
                .in_context(OutsideVerbPhrase),
            (Down, MaximalNp),
            (Down, ClauseS),
        ),
        OperatorDef::unary(
            "unary few",
            TriggerQuery::words("JJ", &["few"])
                .excluding_left_sister(not_after_a())
                .in_context(NounPhraseUnderVerbPhrase),
            Down,
            MaximalNp,
        ),
        // down-up --------------------------------------------------------------
        OperatorDef::binary(
            "all",
            TriggerQuery::words("DT", &["all", "each", "every"]).in_context(OutsideVerbPhrase),
            (Down, MaximalNp),
            (Up, ClauseS),
        ),
        // non-up ---------------------------------------------------------------
        OperatorDef::binary(
            "most",
            TriggerQuery::words("JJS|DT|RBS", &["most"])
                .excluding_parent("QP")
                .in_context(OutsideVerbPhrase),
            (Non, MaximalNp),
            (Up, ClauseS),
        ),
        OperatorDef::binary(
            "many",
            TriggerQuery::words("JJ|DT", &["many"]).in_context(OutsideVerbPhrase),
            (Non, MaximalNp),
            (Up, ClauseS),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::OperatorCatalog;

    #[test]
    fn test_standard_catalog_builds() {
        let catalog = OperatorCatalog::standard().unwrap();
        let names: Vec<&str> = catalog.operators().iter().map(|op| op.name()).collect();
        assert_eq!(
            names,
            vec![
                "not",
                "without",
                "superlative",
                "unary no",
                "no",
                "at most",
                "few",
                "unary few",
                "all",
                "most",
                "many"
            ]
        );
    }

    #[test]
    fn test_standard_arities() {
        let catalog = OperatorCatalog::standard().unwrap();
        for unary in ["not", "without", "superlative", "unary no", "unary few"] {
            assert_eq!(catalog.get(unary).unwrap().arity(), 1, "{}", unary);
        }
        for binary in ["no", "at most", "few", "all", "most", "many"] {
            assert_eq!(catalog.get(binary).unwrap().arity(), 2, "{}", binary);
        }
    }

    #[test]
    fn test_standard_monotonicities() {
        let catalog = OperatorCatalog::standard().unwrap();
        let monos = |name: &str| -> Vec<_> {
            catalog.get(name).unwrap().args().iter().map(|a| a.mono).collect()
        };
        assert_eq!(monos("all"), vec![Down, Up]);
        assert_eq!(monos("no"), vec![Down, Down]);
        assert_eq!(monos("most"), vec![Non, Up]);
        assert_eq!(monos("superlative"), vec![Non]);
    }
}
