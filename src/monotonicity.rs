//! The three-valued monotonicity lattice and its refinements.
//!
//! A token's [`Monotonicity`] says which direction of lexical substitution
//! preserves truth at that position. Nested operators combine through
//! [`Monotonicity::compose`], which is total over the 3x3 product.

use std::fmt;
use std::str::FromStr;

/// Inference direction at a token.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Monotonicity {
    /// Replacing with a more general term preserves truth.
    #[default]
    Up,
    /// Replacing with a more specific term preserves truth.
    Down,
    /// Neither substitution is licensed.
    Non,
}

impl Monotonicity {
    /// The value every token starts with.
    pub const DEFAULT: Monotonicity = Monotonicity::Up;

    /// All three values, in declaration order.
    pub const ALL: [Monotonicity; 3] = [Monotonicity::Up, Monotonicity::Down, Monotonicity::Non];

    /// Combine an outer marking with an inner one.
    ///
    /// `Up` is the identity, `Non` absorbs, and two `Down`s cancel.
    pub fn compose(self, other: Monotonicity) -> Monotonicity {
        use Monotonicity::*;
        match (self, other) {
            (Up, Up) => Up,
            (Up, Down) => Down,
            (Up, Non) => Non,
            (Down, Up) => Down,
            (Down, Down) => Up,
            (Down, Non) => Non,
            (Non, Up) => Non,
            (Non, Down) => Non,
            (Non, Non) => Non,
        }
    }

    /// Single-character notation: `^` up, `v` down, `*` non.
    pub fn symbol(self) -> char {
        match self {
            Monotonicity::Up => '^',
            Monotonicity::Down => 'v',
            Monotonicity::Non => '*',
        }
    }

    /// Inverse of [`Monotonicity::symbol`].
    pub fn from_symbol(c: char) -> Option<Monotonicity> {
        match c {
            '^' => Some(Monotonicity::Up),
            'v' => Some(Monotonicity::Down),
            '*' => Some(Monotonicity::Non),
            _ => None,
        }
    }
}

impl fmt::Display for Monotonicity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Monotonicity::Up => "UP",
            Monotonicity::Down => "DOWN",
            Monotonicity::Non => "NON",
        };
        f.write_str(name)
    }
}

/// Why a monotone direction holds, for picking inference rules downstream.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum MonotonicityType {
    #[default]
    None,
    Additive,
    Multiplicative,
    Both,
}

/// A monotonicity paired with its additivity refinement.
///
/// Written the way quantifier signatures are usually written in the natural
/// logic literature: `"additive"`, `"anti-multiplicative"`, `"nonmonotone"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MonotonicitySignature {
    pub mono: Monotonicity,
    pub kind: MonotonicityType,
}

impl MonotonicitySignature {
    pub const NONMONOTONE: MonotonicitySignature = MonotonicitySignature {
        mono: Monotonicity::Non,
        kind: MonotonicityType::None,
    };

    pub fn new(mono: Monotonicity, kind: MonotonicityType) -> Self {
        Self { mono, kind }
    }
}

/// Error for an unrecognized signature string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown monotonicity signature `{0}`")]
pub struct UnknownSignature(pub String);

impl FromStr for MonotonicitySignature {
    type Err = UnknownSignature;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        use Monotonicity::{Down, Up};
        use MonotonicityType::*;
        let signature = match s.trim() {
            "nonmonotone" => MonotonicitySignature::NONMONOTONE,
            "monotone" => MonotonicitySignature::new(Up, None),
            "additive" => MonotonicitySignature::new(Up, Additive),
            "multiplicative" => MonotonicitySignature::new(Up, Multiplicative),
            "additive-multiplicative" => MonotonicitySignature::new(Up, Both),
            "antitone" => MonotonicitySignature::new(Down, None),
            "anti-additive" => MonotonicitySignature::new(Down, Additive),
            "anti-multiplicative" => MonotonicitySignature::new(Down, Multiplicative),
            "anti-additive-multiplicative" => MonotonicitySignature::new(Down, Both),
            other => return Err(UnknownSignature(other.to_string())),
        };
        Ok(signature)
    }
}

impl fmt::Display for MonotonicitySignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = match self.mono {
            Monotonicity::Non => return f.write_str("nonmonotone"),
            Monotonicity::Up => "",
            Monotonicity::Down => "anti-",
        };
        let body = match self.kind {
            MonotonicityType::None => {
                return f.write_str(if prefix.is_empty() { "monotone" } else { "antitone" })
            }
            MonotonicityType::Additive => "additive",
            MonotonicityType::Multiplicative => "multiplicative",
            MonotonicityType::Both => "additive-multiplicative",
        };
        write!(f, "{}{}", prefix, body)
    }
}

#[cfg(test)]
mod tests {
    use super::Monotonicity::*;
    use super::*;
    use proptest::prelude::*;

    fn any_mono() -> impl Strategy<Value = Monotonicity> {
        prop_oneof![Just(Up), Just(Down), Just(Non)]
    }

    #[test]
    fn test_compose_table() {
        assert_eq!(Up.compose(Down), Down);
        assert_eq!(Down.compose(Up), Down);
        assert_eq!(Down.compose(Down), Up);
        assert_eq!(Down.compose(Non), Non);
        assert_eq!(Non.compose(Up), Non);
        assert_eq!(Non.compose(Down), Non);
    }

    #[test]
    fn test_default_is_up() {
        assert_eq!(Monotonicity::default(), Up);
        assert_eq!(Monotonicity::DEFAULT, Up);
    }

    #[test]
    fn test_symbols() {
        for mono in Monotonicity::ALL {
            assert_eq!(Monotonicity::from_symbol(mono.symbol()), Some(mono));
        }
        assert_eq!(Monotonicity::from_symbol('x'), None);
    }

    #[test]
    fn test_serde_uppercase() {
        #[derive(serde::Deserialize)]
        struct Wrapper {
            mono: Monotonicity,
        }
        let parsed: Wrapper = toml::from_str("mono = \"DOWN\"").unwrap();
        assert_eq!(parsed.mono, Down);
    }

    #[test]
    fn test_signature_strings() {
        let sig: MonotonicitySignature = "anti-additive".parse().unwrap();
        assert_eq!(sig, MonotonicitySignature::new(Down, MonotonicityType::Additive));

        let sig: MonotonicitySignature = "additive-multiplicative".parse().unwrap();
        assert_eq!(sig.kind, MonotonicityType::Both);
        assert_eq!(sig.to_string(), "additive-multiplicative");

        let sig: MonotonicitySignature = "nonmonotone".parse().unwrap();
        assert_eq!(sig.mono, Non);

        assert!("sideways".parse::<MonotonicitySignature>().is_err());
    }

    #[test]
    fn test_signature_display_is_parseable() {
        for name in [
            "nonmonotone",
            "additive",
            "multiplicative",
            "additive-multiplicative",
            "anti-additive",
            "anti-multiplicative",
            "anti-additive-multiplicative",
        ] {
            let sig: MonotonicitySignature = name.parse().unwrap();
            assert_eq!(sig.to_string(), name);
        }
    }

    proptest! {
        #[test]
        fn compose_is_associative(a in any_mono(), b in any_mono(), c in any_mono()) {
            prop_assert_eq!(a.compose(b.compose(c)), a.compose(b).compose(c));
        }

        #[test]
        fn compose_is_commutative(a in any_mono(), b in any_mono()) {
            prop_assert_eq!(a.compose(b), b.compose(a));
        }

        #[test]
        fn up_is_identity_and_non_absorbs(a in any_mono()) {
            prop_assert_eq!(a.compose(Up), a);
            prop_assert_eq!(Non.compose(a), Non);
        }
    }
}
