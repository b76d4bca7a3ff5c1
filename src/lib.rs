#![doc(
    html_logo_url = "https://raw.githubusercontent.com/storyscript/layered-nlp/main/assets/layered-nlp.svg",
    issue_tracker_base_url = "https://github.com/storyscript/layered-nlp/issues/"
)]

//! Monotonicity projection for natural-logic inference.
//!
//! Given a parsed sentence, mark every token as upward (`^`), downward (`v`)
//! or non (`*`) monotone. Downward tokens can be specialized and upward
//! tokens generalized without changing whether the sentence is true.
//!
//! Markings come from a catalog of operators (`all`, `no`, `not`, `few`,
//! `at most`, ...). Each operator has a trigger pattern and, per argument,
//! a projection rule that finds the constituent it scopes over. The engine
//! locates every trigger, projects its scopes and composes the contributed
//! monotonicities into one marking.
//!
//! ## Core Types
//!
//! - [`ParseTree`] - read-only view of a constituency or dependency parse
//! - [`TreeSpanIndex`] - every node's token span, validated
//! - [`OperatorCatalog`] - compiled operator definitions
//! - [`ProjectionEngine`] / [`Projection`] - the marking pass and its result
//! - [`QuantifierSpec`] - a detected operator and its subject and object scopes
//!
//! ## Example
//!
//! ```
//! use layered_natlog::{project, ConstituencyTree, Monotonicity, OperatorCatalog};
//!
//! let tree = ConstituencyTree::from_bracketed(
//!     "(ROOT (S (NP (DT all) (NNS cats)) (VP (VBP have) (NP (NNS tails)))))",
//! )
//! .unwrap();
//! let catalog = OperatorCatalog::standard().unwrap();
//! let projection = project(&tree, &catalog).unwrap();
//!
//! assert_eq!(projection.marks[1], Monotonicity::Down);
//! assert_eq!(projection.symbols(), "^v^^");
//! ```

pub mod catalog;
mod config;
mod display;
mod engine;
mod errors;
pub mod lexicon;
pub mod matcher;
mod monotonicity;
mod quantifier_spec;
pub mod scope_algebra;
mod scope_annotator;
mod span;
mod span_index;
pub mod tree;

// Errors
pub use errors::{ConfigError, NatlogError, NatlogResult, StructuralError};

// Values
pub use monotonicity::{Monotonicity, MonotonicitySignature, MonotonicityType, UnknownSignature};
pub use span::Span;
pub use span_index::{SpanId, TreeSpanIndex};

// Trees
pub use tree::{ConstituencyTree, DepToken, DependencyTree, NodeId, ParseTree, TreeBuilder};

// Operators
pub use catalog::{
    Argument, ChildQuery, DominanceContext, Operator, OperatorCatalog, OperatorDef,
    ProjectionQuery, TriggerQuery,
};
pub use lexicon::{LogicalQuantifier, Quantifier, TriggerType};
pub use matcher::{DirectMatcher, TreeMatcher};

// Projection
pub use config::{CompositionPolicy, EngineConfig};
pub use display::MarkingDisplay;
pub use engine::{project, Projection, ProjectionEngine};
pub use quantifier_spec::QuantifierSpec;
pub use scope_annotator::{annotate_scopes, validate_by_head, DependencyPattern};
