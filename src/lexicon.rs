//! The quantifier lexicon.
//!
//! Every quantifier the system knows about, with its closest logical meaning
//! and how it is recognized in a constituency parse. Glosses are lowercase
//! and space separated; multiword entries are written in lemma form, and the
//! plural surface forms that differ from the lemma are listed alongside.

use crate::monotonicity::{Monotonicity, MonotonicitySignature, MonotonicityType};
use once_cell::sync::Lazy;
use std::collections::HashSet;

/// The closest pure logical meaning of a quantifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalQuantifier {
    Forall,
    Most,
    Exists,
    None,
}

impl LogicalQuantifier {
    /// Strength ordering; negative for the negative quantifier.
    pub fn partial_order(self) -> i8 {
        match self {
            LogicalQuantifier::Forall => 3,
            LogicalQuantifier::Most => 2,
            LogicalQuantifier::Exists => 1,
            LogicalQuantifier::None => -3,
        }
    }
}

/// How a quantifier is triggered in a constituency parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriggerType {
    UnaryNot,
    UnaryNotIn,
    No,
    Default,
    DontMark,
}

/// One lexicon entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Quantifier {
    /// Lemma gloss, e.g. `"a lot of"`
    pub gloss: &'static str,
    /// Surface variants whose words differ from the lemma gloss
    pub surface: &'static [&'static str],
    pub meaning: LogicalQuantifier,
    pub trigger: TriggerType,
}

const fn q(gloss: &'static str, meaning: LogicalQuantifier, trigger: TriggerType) -> Quantifier {
    Quantifier {
        gloss,
        surface: &[],
        meaning,
        trigger,
    }
}

const fn plural(
    gloss: &'static str,
    surface: &'static [&'static str],
    meaning: LogicalQuantifier,
    trigger: TriggerType,
) -> Quantifier {
    Quantifier {
        gloss,
        surface,
        meaning,
        trigger,
    }
}

use LogicalQuantifier as L;
use TriggerType as T;

/// The exhaustive list of known quantifiers.
pub static QUANTIFIERS: &[Quantifier] = &[
    q("all", L::Forall, T::Default),
    q("any", L::Forall, T::Default),
    q("both", L::Forall, T::Default),
    q("each", L::Forall, T::Default),
    q("every", L::Forall, T::Default),
    q("the lot of", L::Forall, T::DontMark),
    q("all of", L::Forall, T::DontMark),
    q("for all", L::Forall, T::DontMark),
    q("for every", L::Forall, T::DontMark),
    q("for each", L::Forall, T::DontMark),
    q("most", L::Most, T::Default),
    q("enough", L::Most, T::Default),
    q("several", L::Most, T::Default),
    q("more than", L::Most, T::DontMark),
    q("a lot of", L::Most, T::DontMark),
    plural("lot of", &["lots of"], L::Most, T::DontMark),
    q("plenty of", L::Most, T::DontMark),
    plural("heap of", &["heaps of"], L::Most, T::DontMark),
    q("a load of", L::Most, T::DontMark),
    plural("load of", &["loads of"], L::Most, T::DontMark),
    plural("ton of", &["tons of"], L::Most, T::DontMark),
    q("some", L::Exists, T::Default),
    q("either", L::Exists, T::Default),
    q("a", L::Exists, T::Default),
    q("the", L::Exists, T::Default),
    q("less than", L::Exists, T::DontMark),
    q("some of", L::Exists, T::DontMark),
    q("a few", L::Exists, T::DontMark),
    plural("there be", &["there is", "there are"], L::Exists, T::DontMark),
    plural("there exist", &["there exists"], L::Exists, T::DontMark),
    plural("there be some", &["there is some", "there are some"], L::Exists, T::DontMark),
    plural("there be few", &["there are few"], L::Exists, T::DontMark),
    q("no", L::None, T::No),
    q("not", L::None, T::UnaryNot),
    q("n't", L::None, T::UnaryNot),
    q("without", L::None, T::UnaryNotIn),
    q("neither", L::None, T::Default),
    q("few", L::None, T::Default),
    q("none of", L::None, T::DontMark),
    q("at most", L::None, T::DontMark),
];

static GLOSSES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    QUANTIFIERS
        .iter()
        .flat_map(|q| std::iter::once(q.gloss).chain(q.surface.iter().copied()))
        .collect()
});

static HEAD_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    QUANTIFIERS
        .iter()
        .filter_map(|q| q.gloss.split(' ').last())
        .collect()
});

impl Quantifier {
    /// Binary quantifiers take a subject and an object; `not` and `without` take one argument.
    pub fn is_binary(&self) -> bool {
        !matches!(self.trigger, TriggerType::UnaryNot | TriggerType::UnaryNotIn)
    }

    /// Look up an entry by its lemma gloss or one of its surface variants.
    pub fn from_gloss(gloss: &str) -> Option<&'static Quantifier> {
        let gloss = gloss.to_lowercase();
        QUANTIFIERS
            .iter()
            .find(|q| q.gloss == gloss || q.surface.contains(&gloss.as_str()))
    }

    /// Subject and object signatures implied by the logical meaning.
    ///
    /// Unary quantifiers have no object signature.
    pub fn signatures(&self) -> (MonotonicitySignature, Option<MonotonicitySignature>) {
        use Monotonicity::{Down, Non, Up};
        use MonotonicityType::{Additive, Multiplicative};
        let sig = MonotonicitySignature::new;
        let (subject, object) = match self.meaning {
            LogicalQuantifier::Forall => (sig(Down, Additive), sig(Up, Multiplicative)),
            LogicalQuantifier::None => (sig(Down, Additive), sig(Down, Additive)),
            LogicalQuantifier::Exists => (sig(Up, Additive), sig(Up, Additive)),
            LogicalQuantifier::Most => (
                sig(Non, MonotonicityType::None),
                sig(Up, Multiplicative),
            ),
        };
        if self.is_binary() {
            (subject, Some(object))
        } else {
            (subject, None)
        }
    }
}

/// Is `gloss` (lowercase, space separated) a known quantifier?
pub fn is_quantifier_gloss(gloss: &str) -> bool {
    GLOSSES.contains(gloss)
}

/// Is `word` the final word of some quantifier's lemma gloss?
pub fn is_quantifier_head(word: &str) -> bool {
    HEAD_WORDS.contains(word)
}
