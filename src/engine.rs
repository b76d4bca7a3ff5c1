//! The projection engine: from a parsed sentence to one monotonicity per token.
//!
//! Operators are applied in catalog order. Under the default policy each
//! operator writes into its own overlay, first writer wins within that
//! overlay, and the overlay is composed into the running marks only if the
//! operator resolved at least one argument. Different operators on the same
//! token therefore compose, while the two slots of one operator do not.
//!
//! Dependency parses carry no phrase categories for the catalog's
//! projections to climb, so they are marked from the scopes
//! [`annotate_scopes`] reads off their arcs instead, each quantifier taking
//! the signatures of its lexicon entry.

use crate::catalog::{Operator, OperatorCatalog};
use crate::config::{CompositionPolicy, EngineConfig};
use crate::display::MarkingDisplay;
use crate::lexicon::Quantifier;
use crate::matcher::{DirectMatcher, TreeMatcher};
use crate::monotonicity::Monotonicity;
use crate::quantifier_spec::QuantifierSpec;
use crate::scope_algebra::{exclude_interval, strip_leading_quantifier};
use crate::scope_annotator::annotate_scopes;
use crate::tree::{DependencyTree, NodeId, ParseTree};
use crate::{Span, StructuralError, TreeSpanIndex};
use tracing::{debug, trace};

/// The result of projecting one sentence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection {
    /// One marking per token
    pub marks: Vec<Monotonicity>,
    /// Detected operator occurrences, ordered by quantifier position.
    ///
    /// An occurrence is listed only when its first argument resolved. One
    /// that resolved just its second argument still marks that scope but
    /// has no subject to report.
    pub quantifiers: Vec<QuantifierSpec>,
    /// Names of operators that resolved at least one argument, in catalog order
    pub fired: Vec<String>,
}

impl Projection {
    /// Marks in `^`/`v`/`*` notation, one character per token.
    pub fn symbols(&self) -> String {
        self.marks.iter().map(|m| m.symbol()).collect()
    }

    /// Render the marks and scopes under the sentence's words.
    pub fn display<'a>(&'a self, words: &'a [String]) -> MarkingDisplay<'a> {
        MarkingDisplay::new(words, self)
    }
}

// ============================================================================
// Accumulation policies
// ============================================================================

enum Accumulator {
    Compose {
        marks: Vec<Monotonicity>,
        overlay: Vec<Monotonicity>,
    },
    FirstClaim {
        marks: Vec<Monotonicity>,
        claimed: Vec<bool>,
    },
}

impl Accumulator {
    fn new(policy: CompositionPolicy, len: usize) -> Self {
        let marks = vec![Monotonicity::DEFAULT; len];
        match policy {
            CompositionPolicy::ComposeThenAccumulate => Accumulator::Compose {
                marks,
                overlay: vec![Monotonicity::Up; len],
            },
            CompositionPolicy::FirstClaimWins => Accumulator::FirstClaim {
                marks,
                claimed: vec![false; len],
            },
        }
    }

    fn claim(&mut self, span: Span, mono: Monotonicity) {
        match self {
            Accumulator::Compose { overlay, .. } => {
                for i in span.tokens() {
                    if overlay[i] == Monotonicity::Up {
                        overlay[i] = mono;
                    }
                }
            }
            Accumulator::FirstClaim { marks, claimed } => {
                for i in span.tokens() {
                    if !claimed[i] {
                        claimed[i] = true;
                        marks[i] = mono;
                    }
                }
            }
        }
    }

    fn finish_operator(&mut self, matched: bool) {
        if let Accumulator::Compose { marks, overlay } = self {
            if matched {
                for (mark, local) in marks.iter_mut().zip(overlay.iter()) {
                    *mark = mark.compose(*local);
                }
            }
            overlay.fill(Monotonicity::Up);
        }
    }

    fn into_marks(self) -> Vec<Monotonicity> {
        match self {
            Accumulator::Compose { marks, .. } | Accumulator::FirstClaim { marks, .. } => marks,
        }
    }
}

// ============================================================================
// Engine
// ============================================================================

/// Projects monotonicity markings over parsed sentences.
///
/// Holds only shared, read-only state, so one engine can serve any number
/// of threads.
#[derive(Debug, Clone)]
pub struct ProjectionEngine<'c, M: TreeMatcher = DirectMatcher> {
    catalog: &'c OperatorCatalog,
    matcher: M,
    config: EngineConfig,
}

impl<'c> ProjectionEngine<'c, DirectMatcher> {
    pub fn new(catalog: &'c OperatorCatalog) -> Self {
        Self::with_config(catalog, EngineConfig::default())
    }

    pub fn with_config(catalog: &'c OperatorCatalog, config: EngineConfig) -> Self {
        Self::with_matcher(catalog, DirectMatcher, config)
    }
}

impl<'c, M: TreeMatcher> ProjectionEngine<'c, M> {
    /// Use a custom matcher in place of the built-in tree walker.
    pub fn with_matcher(catalog: &'c OperatorCatalog, matcher: M, config: EngineConfig) -> Self {
        Self {
            catalog,
            matcher,
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn catalog(&self) -> &OperatorCatalog {
        self.catalog
    }

    /// Mark every token of `tree`.
    ///
    /// Fails only when the tree's leaves do not tile its tokens. Triggers
    /// whose arguments cannot be located are skipped silently.
    pub fn project(&self, tree: &dyn ParseTree) -> Result<Projection, StructuralError> {
        let index = TreeSpanIndex::build(tree)?;
        if let Some(dependency) = tree.as_dependency() {
            return Ok(self.project_dependency(dependency, index.token_count()));
        }
        let mut acc = Accumulator::new(self.config.policy, index.token_count());
        let mut quantifiers = Vec::new();
        let mut fired = Vec::new();

        for operator in self.catalog.operators() {
            let triggers = self.matcher.find_all(tree, operator.trigger());
            let mut matched = false;
            for trigger in &triggers {
                trace!(operator = operator.name(), node = trigger.index(), "trigger matched");
                let resolved = self.resolve(tree, &index, operator, *trigger);
                let mut slots = resolved.iter();
                for (arg, scope) in operator.args().iter().zip(resolved.iter()) {
                    if let Some(scope) = scope {
                        acc.claim(*scope, arg.mono);
                        matched = true;
                    }
                }
                if let (Some(Some(subject)), Some(quantifier)) = (slots.next(), index.span(*trigger)) {
                    let spec = match slots.next() {
                        Some(Some(object)) => {
                            QuantifierSpec::binary(operator.name(), quantifier, *subject, *object)
                        }
                        _ => QuantifierSpec::unary(operator.name(), quantifier, *subject),
                    };
                    quantifiers.push(spec);
                }
            }
            acc.finish_operator(matched);
            if matched {
                debug!(
                    operator = operator.name(),
                    triggers = triggers.len(),
                    "operator fired"
                );
                fired.push(operator.name().to_string());
            }
        }

        quantifiers.sort_by_key(|q| q.quantifier);
        let marks = acc.into_marks();
        debug!(
            tokens = marks.len(),
            quantifiers = quantifiers.len(),
            "projection complete"
        );
        Ok(Projection {
            marks,
            quantifiers,
            fired,
        })
    }

    /// Mark a dependency parse from its annotated quantifier scopes.
    ///
    /// Each annotation acts as one operator. Unary ones (negation) go first,
    /// mirroring the catalog's order, then the rest by position.
    fn project_dependency(&self, tree: &DependencyTree, token_count: usize) -> Projection {
        let mut specs = annotate_scopes(tree);
        let mut acc = Accumulator::new(self.config.policy, token_count);
        let mut fired: Vec<String> = Vec::new();

        let mut order: Vec<usize> = (0..specs.len()).collect();
        order.sort_by_key(|i| specs[*i].is_binary());
        for i in order {
            let spec = &specs[i];
            let Some(entry) = Quantifier::from_gloss(&spec.name) else {
                trace!(quantifier = %spec.name, "not in the lexicon");
                continue;
            };
            let (subject, object) = entry.signatures();
            acc.claim(spec.subject, subject.mono);
            if let Some(object) = object.filter(|_| spec.is_binary()) {
                acc.claim(spec.object, object.mono);
            }
            acc.finish_operator(true);
            if !fired.contains(&spec.name) {
                fired.push(spec.name.clone());
            }
        }

        specs.sort_by_key(|q| q.quantifier);
        let marks = acc.into_marks();
        debug!(
            tokens = marks.len(),
            quantifiers = specs.len(),
            "dependency projection complete"
        );
        Projection {
            marks,
            quantifiers: specs,
            fired,
        }
    }

    /// Scope of each argument slot of `operator` at `trigger`, `None` where
    /// the projection has nothing to anchor to.
    fn resolve(
        &self,
        tree: &dyn ParseTree,
        index: &TreeSpanIndex,
        operator: &Operator,
        trigger: NodeId,
    ) -> Vec<Option<Span>> {
        let Some(trigger_span) = index.span(trigger) else {
            return vec![None; operator.arity()];
        };
        let mut first_raw: Option<Span> = None;
        let mut scopes = Vec::with_capacity(operator.arity());
        for (slot, arg) in operator.args().iter().enumerate() {
            let raw = self
                .matcher
                .match_at(tree, arg.projection, trigger)
                .and_then(|node| index.span(node));
            let Some(raw) = raw else {
                trace!(operator = operator.name(), slot = slot + 1, "no projection");
                scopes.push(None);
                continue;
            };

            let mut scope = if self.config.strip_quantifier_prefix {
                strip_leading_quantifier(raw, tree.words())
            } else {
                raw
            };
            scope = exclude_interval(scope, trigger_span);
            if slot > 0 {
                if let Some(first) = first_raw {
                    scope = exclude_interval(scope, first);
                }
            } else {
                first_raw = Some(raw);
            }
            scopes.push(Some(scope));
        }
        scopes
    }
}

/// Project `tree` with the default configuration.
pub fn project(
    tree: &dyn ParseTree,
    catalog: &OperatorCatalog,
) -> Result<Projection, StructuralError> {
    ProjectionEngine::new(catalog).project(tree)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{OperatorDef, ProjectionQuery, TriggerQuery};
    use crate::tree::strategies::{arbitrary_tree, trigger_free_tree};
    use crate::tree::{ConstituencyTree, DependencyTree, TreeBuilder};
    use proptest::prelude::*;
    use Monotonicity::*;

    fn parse(text: &str) -> ConstituencyTree {
        ConstituencyTree::from_bracketed(text).unwrap()
    }

    fn standard() -> OperatorCatalog {
        OperatorCatalog::standard().unwrap()
    }

    #[test]
    fn test_all_cats_have_tails() {
        let tree = parse("(ROOT (S (NP (DT all) (NNS cats)) (VP (VBP have) (NP (NNS tails)))))");
        let projection = project(&tree, &standard()).unwrap();
        assert_eq!(projection.marks, vec![Up, Down, Up, Up]);
        assert_eq!(
            projection.quantifiers,
            vec![QuantifierSpec::binary(
                "all",
                Span::new(0, 1),
                Span::new(1, 2),
                Span::new(2, 4)
            )]
        );
        assert_eq!(projection.fired, vec!["all"]);
    }

    #[test]
    fn test_no_cats_have_no_tail() {
        let tree = parse(
            "(ROOT (S (NP (DT no) (NNS cats)) (VP (VBP have) (NP (DT no) (NN tail)))))",
        );
        let projection = project(&tree, &standard()).unwrap();
        // the two downward scopes overlap on "tail" and cancel there
        assert_eq!(projection.marks, vec![Up, Down, Down, Down, Up]);
        assert_eq!(
            projection.quantifiers,
            vec![
                QuantifierSpec::binary("no", Span::new(0, 1), Span::new(1, 2), Span::new(2, 5)),
                QuantifierSpec::unary("unary no", Span::new(3, 4), Span::new(4, 5)),
            ]
        );
        assert_eq!(projection.fired, vec!["unary no", "no"]);
    }

    #[test]
    fn test_no_cats_have_no_tail_first_claim() {
        let tree = parse(
            "(ROOT (S (NP (DT no) (NNS cats)) (VP (VBP have) (NP (DT no) (NN tail)))))",
        );
        let catalog = standard();
        let config = EngineConfig::default().with_policy(CompositionPolicy::FirstClaimWins);
        let projection = ProjectionEngine::with_config(&catalog, config)
            .project(&tree)
            .unwrap();
        assert_eq!(projection.marks, vec![Up, Down, Down, Down, Down]);
    }

    #[test]
    fn test_not_projects_to_parent() {
        let tree = parse(
            "(ROOT (S (NP (DT some) (NNS cats)) (VP (VBP do) (RB not) (VP (VB have) (NP (NNS tails))))))",
        );
        let projection = project(&tree, &standard()).unwrap();
        assert_eq!(projection.marks, vec![Up, Up, Up, Up, Down, Down]);
        assert_eq!(
            projection.quantifiers,
            vec![QuantifierSpec::unary("not", Span::new(3, 4), Span::new(4, 6))]
        );
    }

    #[test]
    fn test_not_without_prefix_stripping() {
        let tree = parse(
            "(ROOT (S (NP (DT some) (NNS cats)) (VP (VBP do) (RB not) (VP (VB have) (NP (NNS tails))))))",
        );
        let catalog = standard();
        let config = EngineConfig {
            strip_quantifier_prefix: false,
            ..EngineConfig::default()
        };
        let projection = ProjectionEngine::with_config(&catalog, config)
            .project(&tree)
            .unwrap();
        // the trigger sits strictly inside its parent, so nothing is carved out
        assert_eq!(projection.marks, vec![Up, Up, Down, Down, Down, Down]);
    }

    #[test]
    fn test_a_few_does_not_trigger() {
        let tree = parse(
            "(ROOT (S (NP (DT a) (JJ few) (NNS cats)) (VP (VBP have) (NP (NNS tails)))))",
        );
        let projection = project(&tree, &standard()).unwrap();
        assert_eq!(projection.marks, vec![Up; 5]);
        assert!(projection.quantifiers.is_empty());
        assert!(projection.fired.is_empty());
    }

    #[test]
    fn test_few_is_down_down() {
        let tree = parse("(ROOT (S (NP (JJ few) (NNS cats)) (VP (VBP have) (NP (NNS tails)))))");
        let projection = project(&tree, &standard()).unwrap();
        assert_eq!(projection.marks, vec![Up, Down, Down, Down]);
    }

    #[test]
    fn test_no_operator_matches() {
        let tree = parse("(ROOT (S (NP (NNS cats)) (VP (VBP purr))))");
        let projection = project(&tree, &standard()).unwrap();
        assert_eq!(projection.marks, vec![Up, Up]);
        assert!(projection.quantifiers.is_empty());
    }

    #[test]
    fn test_leaf_outside_sentence_is_structural_error() {
        let mut b = TreeBuilder::new(vec!["cats".to_string(), "purr".to_string()]);
        let cats = b.preterminal("NNS", 0);
        let purr = b.preterminal("VBP", 5);
        let s = b.phrase("S", [cats, purr]);
        let tree = b.finish(s);
        let err = project(&tree, &standard()).unwrap_err();
        assert!(matches!(err, StructuralError::TokenOutOfRange { token: 5, .. }));
    }

    #[test]
    fn test_superlative_is_non_monotone() {
        let tree = parse("(ROOT (NP (JJS angriest) (NN senator)))");
        assert_eq!(project(&tree, &standard()).unwrap().marks, vec![Up, Non]);

        let tree = parse("(ROOT (NP (DT the) (JJS angriest) (NN senator)))");
        assert_eq!(project(&tree, &standard()).unwrap().marks, vec![Up, Up, Non]);
    }

    #[test]
    fn test_double_negation_cancels() {
        let tree = parse(
            "(ROOT (S (NP (NNS cats)) (VP (VBP do) (RB not) (VP (VB have) (NP (DT no) (NN tail))))))",
        );
        let catalog = standard();
        let projection = project(&tree, &catalog).unwrap();
        assert_eq!(projection.marks, vec![Up, Up, Up, Down, Down, Up]);

        let config = EngineConfig::default().with_policy(CompositionPolicy::FirstClaimWins);
        let projection = ProjectionEngine::with_config(&catalog, config)
            .project(&tree)
            .unwrap();
        assert_eq!(projection.marks, vec![Up, Up, Up, Down, Down, Down]);
    }

    #[test]
    fn test_without_and_at_most() {
        let tree = parse(
            "(ROOT (S (NP (NNS cats)) (VP (VBP live) (PP (IN without) (NP (NNS tails))))))",
        );
        assert_eq!(project(&tree, &standard()).unwrap().symbols(), "^^^v");

        let tree = parse(
            "(ROOT (S (NP (QP (IN at) (JJS most) (CD 3)) (NNS cats)) (VP (VBD slept))))",
        );
        let projection = project(&tree, &standard()).unwrap();
        assert_eq!(projection.symbols(), "^^^vv");
        assert_eq!(
            projection.quantifiers,
            vec![QuantifierSpec::binary(
                "at most",
                Span::new(0, 3),
                Span::new(3, 4),
                Span::new(4, 5)
            )]
        );
    }

    #[test]
    fn test_most_is_non_up() {
        let tree = parse("(ROOT (S (NP (JJS most) (NNS cats)) (VP (VBP purr))))");
        let projection = project(&tree, &standard()).unwrap();
        assert_eq!(projection.marks, vec![Up, Non, Up]);
        assert_eq!(projection.fired, vec!["most"]);
    }

    #[test]
    fn test_unresolved_projection_is_silent() {
        // "without" outside a PP has nothing to project to
        let tree = parse("(ROOT (S (NP (NNS cats)) (VP (VBP purr) (IN without))))");
        let projection = project(&tree, &standard()).unwrap();
        assert_eq!(projection.marks, vec![Up, Up, Up]);
        assert!(projection.fired.is_empty());
    }

    #[test]
    fn test_every_trigger_occurrence_is_applied() {
        let catalog = OperatorCatalog::build(&[OperatorDef::unary(
            "not",
            TriggerQuery::words("RB", &["not"]),
            Down,
            ProjectionQuery::Parent,
        )])
        .unwrap();
        let tree = parse(
            "(ROOT (S (ADVP (RB not) (NN this)) (CC and) (ADVP (RB not) (NN that))))",
        );
        let projection = project(&tree, &catalog).unwrap();
        assert_eq!(projection.marks, vec![Up, Down, Up, Up, Down]);
        assert_eq!(projection.quantifiers.len(), 2);
    }

    #[test]
    fn test_second_slot_alone_marks_but_is_not_listed() {
        let catalog = OperatorCatalog::build(&[OperatorDef::binary(
            "odd",
            TriggerQuery::words("DT", &["all"]),
            (Down, ProjectionQuery::ParentPp),
            (Down, ProjectionQuery::ClauseS),
        )])
        .unwrap();
        let tree = parse("(ROOT (S (NP (DT all) (NNS cats)) (VP (VBP purr))))");
        let projection = project(&tree, &catalog).unwrap();
        assert_eq!(projection.marks, vec![Up, Down, Down]);
        assert!(projection.quantifiers.is_empty());
        assert_eq!(projection.fired, vec!["odd"]);
    }

    fn conll(text: &str) -> DependencyTree {
        DependencyTree::from_conll(text).unwrap()
    }

    #[test]
    fn test_dependency_tree_projection() {
        let tree = conll(
            "1 no no DT 2 det
             2 cats cat NNS 3 nsubj
             3 have have VBP 0 root
             4 tails tail NNS 3 dobj",
        );
        let projection = project(&tree, &standard()).unwrap();
        assert_eq!(projection.symbols(), "^vvv");
        assert_eq!(
            projection.quantifiers,
            vec![QuantifierSpec::binary(
                "no",
                Span::new(0, 1),
                Span::new(1, 2),
                Span::new(2, 4)
            )]
        );
        assert_eq!(projection.fired, vec!["no"]);
    }

    #[test]
    fn test_dependency_negation_under_both_policies() {
        let tree = conll(
            "1 Some some DT 2 det
             2 cats cat NNS 5 nsubj
             3 do do VBP 5 aux
             4 n't not RB 5 neg
             5 like like VB 0 root
             6 dogs dog NNS 5 dobj",
        );
        let catalog = standard();
        let projection = project(&tree, &catalog).unwrap();
        assert_eq!(projection.symbols(), "^^^^vv");
        assert_eq!(projection.fired, vec!["not", "some"]);
        assert_eq!(projection.quantifiers.len(), 2);

        let config = EngineConfig::default().with_policy(CompositionPolicy::FirstClaimWins);
        let projection = ProjectionEngine::with_config(&catalog, config)
            .project(&tree)
            .unwrap();
        assert_eq!(projection.symbols(), "^^^^vv");
    }

    #[test]
    fn test_dependency_negated_intransitive() {
        let tree = conll(
            "1 cats cat NNS 3 nsubj
             2 not not RB 3 neg
             3 purr purr VBP 0 root",
        );
        let projection = project(&tree, &standard()).unwrap();
        assert_eq!(projection.symbols(), "^^v");
        assert_eq!(
            projection.quantifiers,
            vec![QuantifierSpec::unary("not", Span::new(1, 2), Span::new(2, 3))]
        );
    }

    #[test]
    fn test_dependency_tree_without_quantifiers_stays_up() {
        let tree = conll(
            "1 cats cat NNS 2 nsubj
             2 purr purr VBP 0 root",
        );
        let projection = project(&tree, &standard()).unwrap();
        assert_eq!(projection.marks, vec![Up, Up]);
        assert!(projection.fired.is_empty());
    }

    struct RootMatcher;

    impl TreeMatcher for RootMatcher {
        fn find_all(
            &self,
            tree: &dyn ParseTree,
            _pattern: &crate::catalog::TriggerPattern,
        ) -> Vec<NodeId> {
            tree.children(tree.root()).iter().take(1).copied().collect()
        }

        fn match_at(
            &self,
            tree: &dyn ParseTree,
            _query: ProjectionQuery,
            _anchor: NodeId,
        ) -> Option<NodeId> {
            Some(tree.root())
        }
    }

    #[test]
    fn test_custom_matcher() {
        let catalog = OperatorCatalog::build(&[OperatorDef::unary(
            "everything",
            TriggerQuery::words("X", &[]),
            Non,
            ProjectionQuery::Parent,
        )])
        .unwrap();
        let tree = parse("(ROOT (NN first) (NN second) (NN third))");
        let engine = ProjectionEngine::with_matcher(&catalog, RootMatcher, EngineConfig::default());
        let projection = engine.project(&tree).unwrap();
        // the trigger covers the first token, which is carved off the front
        assert_eq!(projection.marks, vec![Up, Non, Non]);
    }

    #[test]
    fn test_catalog_shared_across_threads() {
        let catalog = standard();
        let sentences = [
            "(ROOT (S (NP (DT all) (NNS cats)) (VP (VBP have) (NP (NNS tails)))))",
            "(ROOT (S (NP (JJ few) (NNS cats)) (VP (VBP have) (NP (NNS tails)))))",
            "(ROOT (S (NP (NNS cats)) (VP (VBP purr))))",
        ];
        let expected: Vec<String> = sentences
            .iter()
            .map(|s| project(&parse(s), &catalog).unwrap().symbols())
            .collect();

        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| {
                    scope.spawn(|| {
                        let engine = ProjectionEngine::new(&catalog);
                        sentences
                            .iter()
                            .map(|s| engine.project(&parse(s)).unwrap().symbols())
                            .collect::<Vec<_>>()
                    })
                })
                .collect();
            for handle in handles {
                assert_eq!(handle.join().unwrap(), expected);
            }
        });
    }

    fn any_mono() -> impl Strategy<Value = Monotonicity> {
        prop_oneof![Just(Up), Just(Down), Just(Non)]
    }

    proptest! {
        #[test]
        fn marks_cover_every_token(tree in arbitrary_tree()) {
            let projection = project(&tree, &standard()).unwrap();
            prop_assert_eq!(projection.marks.len(), tree.token_count());
            for spec in &projection.quantifiers {
                prop_assert!(spec.subject.right <= tree.token_count());
                prop_assert!(spec.object.right <= tree.token_count());
            }
        }

        #[test]
        fn trigger_free_trees_stay_up(tree in trigger_free_tree()) {
            let projection = project(&tree, &standard()).unwrap();
            prop_assert!(projection.marks.iter().all(|m| *m == Up));
            prop_assert!(projection.quantifiers.is_empty());
        }

        #[test]
        fn unclaimed_tokens_stay_up(
            claims in prop::collection::vec((0usize..10, 0usize..10, any_mono(), any::<bool>()), 0..12),
            first_claim in any::<bool>(),
        ) {
            let policy = if first_claim {
                CompositionPolicy::FirstClaimWins
            } else {
                CompositionPolicy::ComposeThenAccumulate
            };
            let mut acc = Accumulator::new(policy, 10);
            let mut touched = [false; 10];
            for (a, b, mono, ends_operator) in claims {
                let span = Span::new(a.min(b), a.max(b));
                for i in span.tokens() {
                    touched[i] = true;
                }
                acc.claim(span, mono);
                if ends_operator {
                    acc.finish_operator(true);
                }
            }
            acc.finish_operator(true);
            let marks = acc.into_marks();
            for (i, mark) in marks.iter().enumerate() {
                if !touched[i] {
                    prop_assert_eq!(*mark, Up);
                }
            }
        }
    }
}
