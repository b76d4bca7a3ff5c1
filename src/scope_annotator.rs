//! Quantifier scopes read directly off a dependency parse.
//!
//! This is the second way to find scopes, alongside the operator catalog.
//! A handful of structural patterns over arc labels pick out a quantifier,
//! the noun it determines, the predicate pivot and its object. The
//! quantifier is then validated against the lexicon by its head word and
//! the subject and object scopes are cut out of the relevant subtrees.

use crate::lexicon::{is_quantifier_head, Quantifier};
use crate::quantifier_spec::QuantifierSpec;
use crate::scope_algebra::{exclude_interval, include_span};
use crate::tree::DependencyTree;
use crate::Span;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, trace};

/// Longest quantifier phrase, in tokens, looked for behind a head word.
const MAX_QUANTIFIER_LEN: usize = 10;

/// Arcs from a pivot whose subtrees the object of a binary quantifier absorbs.
const MODIFIER_ARCS: &[&str] = &["aux", "prep"];

/// Arcs from a pivot whose subtrees a unary quantifier's scope absorbs.
const UNARY_MODIFIER_ARCS: &[&str] = &["prep"];

fn is_determiner_arc(relation: &str) -> bool {
    matches!(
        relation,
        "det" | "predet" | "amod" | "advmod" | "neg" | "num"
    )
}

fn is_subject_arc(relation: &str) -> bool {
    matches!(relation, "nsubj" | "isubj")
}

fn is_object_arc(relation: &str) -> bool {
    matches!(relation, "dobj" | "iobj" | "xcomp")
}

fn is_copula_arc(relation: &str) -> bool {
    matches!(relation, "cop" | "aux")
}

/// The structural shapes a quantified clause is recognized by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DependencyPattern {
    /// `All cats eat mice`: quantified subject and an object of the pivot
    SubjectObject,
    /// `All cats are in boxes`: verbal pivot with a prepositional object
    PrepositionalObject,
    /// `All cats are cute`: the predicate governs both subject and copula
    Copular,
    /// `Felix likes cat food`: a proper-noun subject reads as "all"
    ProperNounSubject,
    /// `Some cats don't like dogs`: a negated pivot with an object
    NegatedObject,
    /// `Cats do not purr`: a negated pivot with no object
    NegatedPredicate,
}

/// One way a pattern bound against the tree.
#[derive(Debug, Clone, Copy)]
struct PatternMatch {
    pattern: DependencyPattern,
    pivot: usize,
    /// Head word of the quantifier; for a proper-noun subject, the subject itself
    quantifier: usize,
    subject: Option<usize>,
    /// Object of the pivot; the pivot itself when there is none
    object: usize,
}

fn quantifier_dependents(tree: &DependencyTree, noun: usize) -> impl Iterator<Item = usize> + '_ {
    tree.dependents_via(noun, is_determiner_arc)
        .filter(move |q| is_quantifier_head(&tree.tokens()[*q].lemma_or_word()))
}

fn find_matches(tree: &DependencyTree) -> Vec<PatternMatch> {
    let len = tree.tokens().len();
    let mut found = Vec::new();

    for pivot in 0..len {
        for subject in tree.dependents_via(pivot, is_subject_arc) {
            for quantifier in quantifier_dependents(tree, subject) {
                for object in tree.dependents_via(pivot, is_object_arc) {
                    found.push(PatternMatch {
                        pattern: DependencyPattern::SubjectObject,
                        pivot,
                        quantifier,
                        subject: Some(subject),
                        object,
                    });
                }
            }
        }
    }

    for pivot in (0..len).filter(|p| tree.tokens()[*p].tag.starts_with('V')) {
        for subject in tree.dependents_via(pivot, is_subject_arc) {
            for quantifier in quantifier_dependents(tree, subject) {
                for object in tree.dependents_via(pivot, |r| r == "prep") {
                    found.push(PatternMatch {
                        pattern: DependencyPattern::PrepositionalObject,
                        pivot,
                        quantifier,
                        subject: Some(subject),
                        object,
                    });
                }
            }
        }
    }

    for object in 0..len {
        for subject in tree.dependents_via(object, is_subject_arc) {
            for quantifier in quantifier_dependents(tree, subject) {
                for pivot in tree.dependents_via(object, is_copula_arc) {
                    found.push(PatternMatch {
                        pattern: DependencyPattern::Copular,
                        pivot,
                        quantifier,
                        subject: Some(subject),
                        object,
                    });
                }
            }
        }
    }

    for pivot in 0..len {
        for subject in tree
            .dependents_via(pivot, is_subject_arc)
            .filter(|s| tree.tokens()[*s].tag == "NNP")
        {
            for object in tree.dependents_via(pivot, is_object_arc) {
                found.push(PatternMatch {
                    pattern: DependencyPattern::ProperNounSubject,
                    pivot,
                    quantifier: subject,
                    subject: Some(subject),
                    object,
                });
            }
        }
    }

    for pivot in 0..len {
        let negations: Vec<usize> = tree
            .dependents_via(pivot, |r| r == "neg")
            .filter(|q| is_quantifier_head(&tree.tokens()[*q].lemma_or_word()))
            .collect();
        let objects: Vec<usize> = tree.dependents_via(pivot, is_object_arc).collect();
        for quantifier in negations {
            if objects.is_empty() {
                found.push(PatternMatch {
                    pattern: DependencyPattern::NegatedPredicate,
                    pivot,
                    quantifier,
                    subject: None,
                    object: pivot,
                });
            }
            for object in &objects {
                found.push(PatternMatch {
                    pattern: DependencyPattern::NegatedObject,
                    pivot,
                    quantifier,
                    subject: None,
                    object: *object,
                });
            }
        }
    }

    found
}

/// Find the lexicon entry whose gloss ends at `head`, preferring the longest.
pub fn validate_by_head(tree: &DependencyTree, head: usize) -> Option<(&'static Quantifier, Span)> {
    let tokens = tree.tokens();
    let end = head + 1;
    if end > tokens.len() {
        return None;
    }
    (end.saturating_sub(MAX_QUANTIFIER_LEN)..end).find_map(|start| {
        let gloss = tokens[start..end]
            .iter()
            .map(|t| t.lemma_or_word())
            .collect::<Vec<_>>()
            .join(" ");
        Quantifier::from_gloss(&gloss).map(|q| (q, Span::new(start, end)))
    })
}

fn compute_scope(
    tree: &DependencyTree,
    found: &PatternMatch,
    name: &str,
    quantifier: Span,
) -> QuantifierSpec {
    match found.subject {
        Some(subject) => {
            let subject_tree = tree.subtree_span(subject);
            let subject_scope = exclude_interval(subject_tree, quantifier);
            let object_scope = exclude_interval(
                include_span(
                    tree.subtree_span(found.object),
                    tree.subtree_span_via(found.pivot, MODIFIER_ARCS),
                ),
                subject_tree,
            );
            QuantifierSpec::binary(name, quantifier, subject_scope, object_scope)
        }
        None if found.pattern == DependencyPattern::NegatedPredicate => {
            let scope = tree.subtree_span_via(found.pivot, UNARY_MODIFIER_ARCS);
            QuantifierSpec::unary(name, quantifier, scope)
        }
        None => {
            let scope = include_span(
                tree.subtree_span(found.object),
                tree.subtree_span_via(found.pivot, UNARY_MODIFIER_ARCS),
            );
            QuantifierSpec::unary(name, quantifier, scope)
        }
    }
}

/// Annotate every quantifier in `tree` with its subject and object scopes.
///
/// Each quantifier head carries at most one annotation. When several
/// patterns bind the same head, the longer quantifier phrase wins and
/// identical quantifiers are merged by widening their scopes. Quantifiers
/// nested inside a longer quantifier phrase (`a` inside `a few`) are
/// dropped. The result is ordered by quantifier position.
pub fn annotate_scopes(tree: &DependencyTree) -> Vec<QuantifierSpec> {
    let mut by_token: BTreeMap<usize, QuantifierSpec> = BTreeMap::new();

    for found in find_matches(tree) {
        let validated = if found.pattern == DependencyPattern::ProperNounSubject {
            Quantifier::from_gloss("all").map(|q| (q, Span::empty_at(found.quantifier)))
        } else {
            validate_by_head(tree, found.quantifier)
        };
        let Some((quantifier, span)) = validated else {
            trace!(pattern = ?found.pattern, head = found.quantifier, "not a quantifier");
            continue;
        };

        let spec = compute_scope(tree, &found, quantifier.gloss, span);
        trace!(pattern = ?found.pattern, scope = %spec, "pattern matched");

        let replaced = match by_token.get(&found.quantifier) {
            Some(old) if old.quantifier_len() >= spec.quantifier_len() && old.name == spec.name => {
                Some(old.merge(&spec))
            }
            _ => None,
        };
        by_token.insert(found.quantifier, replaced.unwrap_or(spec));
    }

    let mut longest_first: Vec<(usize, QuantifierSpec)> = by_token.into_iter().collect();
    longest_first.sort_by(|(_, a), (_, b)| b.quantifier_len().cmp(&a.quantifier_len()));

    let mut dropped = BTreeSet::new();
    for (_, spec) in &longest_first {
        for token in spec.quantifier.tokens() {
            if Some(token) != spec.head() {
                dropped.insert(token);
            }
        }
    }

    let mut kept: Vec<QuantifierSpec> = longest_first
        .into_iter()
        .filter_map(|(token, spec)| {
            if dropped.contains(&token) {
                debug!(token, quantifier = %spec.name, "dropping quantifier inside a longer one");
                None
            } else {
                Some(spec)
            }
        })
        .collect();
    kept.sort_by_key(|spec| (spec.quantifier, spec.subject));
    kept
}
