//! Operator definitions and the ordered catalog that holds them.
//!
//! An [`OperatorDef`] is the authored form: plain data, serializable, with
//! tag patterns as strings. [`OperatorCatalog::build`] validates arity and
//! compiles every pattern once, so matching never fails at projection time.
//! Catalog order is match precedence.

mod standard;

use crate::monotonicity::Monotonicity;
use crate::ConfigError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

// ============================================================================
// Authored definitions
// ============================================================================

/// How an argument node is located from a trigger node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectionQuery {
    /// The trigger's parent, whatever its label
    Parent,
    /// The trigger's parent, which must be a PP
    ParentPp,
    /// The highest NP in the unbroken chain of NPs above the trigger
    MaximalNp,
    /// The nearest enclosing S that is not itself directly under an S
    ClauseS,
}

/// Where in the tree a trigger is allowed to sit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DominanceContext {
    #[default]
    Anywhere,
    /// Not dominated by any VP
    OutsideVerbPhrase,
    /// Child of an NP that is itself dominated by a VP
    NounPhraseUnderVerbPhrase,
}

/// A child (or sister) node test: a tag pattern, optionally pinned to a word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildQuery {
    pub tag: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub word: Option<String>,
}

impl ChildQuery {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            word: None,
        }
    }

    pub fn word(tag: &str, word: &str) -> Self {
        Self {
            tag: tag.to_string(),
            word: Some(word.to_string()),
        }
    }
}

/// The trigger side of an operator.
///
/// With no `children`, the trigger is a preterminal whose tag matches `tag`
/// and whose word is one of `words` (any word when empty) and none of
/// `excluded_words`. With `children`, the trigger is a phrase whose label
/// matches `tag` and whose children contain the listed ones, in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerQuery {
    /// Tag or phrase label pattern, anchored at both ends
    pub tag: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub words: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub excluded_words: Vec<String>,
    #[serde(default)]
    pub context: DominanceContext,
    /// Reject the trigger when its parent's label matches one of these
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub excluded_parents: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ChildQuery>,
    /// Reject the trigger when its immediate left sister matches
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excluded_left_sister: Option<ChildQuery>,
}

impl TriggerQuery {
    /// A preterminal trigger over the given words.
    pub fn words(tag: &str, words: &[&str]) -> Self {
        Self {
            tag: tag.to_string(),
            words: words.iter().map(|w| w.to_string()).collect(),
            excluded_words: Vec::new(),
            context: DominanceContext::Anywhere,
            excluded_parents: Vec::new(),
            children: Vec::new(),
            excluded_left_sister: None,
        }
    }

    /// A phrase trigger with the given children.
    pub fn phrase(label: &str, children: Vec<ChildQuery>) -> Self {
        Self {
            children,
            ..TriggerQuery::words(label, &[])
        }
    }

    pub fn in_context(mut self, context: DominanceContext) -> Self {
        self.context = context;
        self
    }

    pub fn excluding_words(mut self, words: &[&str]) -> Self {
        self.excluded_words = words.iter().map(|w| w.to_string()).collect();
        self
    }

    pub fn excluding_left_sister(mut self, sister: ChildQuery) -> Self {
        self.excluded_left_sister = Some(sister);
        self
    }

    pub fn excluding_parent(mut self, label: &str) -> Self {
        self.excluded_parents.push(label.to_string());
        self
    }
}

/// An operator as authored, before validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatorDef {
    pub name: String,
    pub arity: u8,
    pub arg1_mono: Monotonicity,
    pub arg1_projection: ProjectionQuery,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arg2_mono: Option<Monotonicity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arg2_projection: Option<ProjectionQuery>,
    pub trigger: TriggerQuery,
}

impl OperatorDef {
    pub fn unary(
        name: &str,
        trigger: TriggerQuery,
        mono: Monotonicity,
        projection: ProjectionQuery,
    ) -> Self {
        Self {
            name: name.to_string(),
            arity: 1,
            arg1_mono: mono,
            arg1_projection: projection,
            arg2_mono: None,
            arg2_projection: None,
            trigger,
        }
    }

    pub fn binary(
        name: &str,
        trigger: TriggerQuery,
        (mono1, projection1): (Monotonicity, ProjectionQuery),
        (mono2, projection2): (Monotonicity, ProjectionQuery),
    ) -> Self {
        Self {
            name: name.to_string(),
            arity: 2,
            arg1_mono: mono1,
            arg1_projection: projection1,
            arg2_mono: Some(mono2),
            arg2_projection: Some(projection2),
            trigger,
        }
    }
}

// ============================================================================
// Compiled operators
// ============================================================================

/// A compiled child or sister test.
#[derive(Debug, Clone)]
pub struct ChildPattern {
    pub(crate) tag: Regex,
    pub(crate) word: Option<String>,
}

/// A compiled trigger query.
#[derive(Debug, Clone)]
pub struct TriggerPattern {
    pub(crate) tag: Regex,
    pub(crate) words: Vec<String>,
    pub(crate) excluded_words: Vec<String>,
    pub(crate) children: Vec<ChildPattern>,
    pub(crate) context: DominanceContext,
    pub(crate) excluded_left_sister: Option<ChildPattern>,
    pub(crate) excluded_parents: Vec<Regex>,
}

fn compile(name: &str, pattern: &str) -> Result<Regex, ConfigError> {
    Regex::new(&format!("^(?:{})$", pattern)).map_err(|e| ConfigError::InvalidPattern {
        name: name.to_string(),
        pattern: pattern.to_string(),
        message: e.to_string(),
    })
}

fn lowercase_all(words: &[String]) -> Vec<String> {
    words.iter().map(|w| w.to_lowercase()).collect()
}

impl ChildPattern {
    fn compile(name: &str, query: &ChildQuery) -> Result<Self, ConfigError> {
        Ok(Self {
            tag: compile(name, &query.tag)?,
            word: query.word.as_ref().map(|w| w.to_lowercase()),
        })
    }
}

impl TriggerPattern {
    fn compile(name: &str, query: &TriggerQuery) -> Result<Self, ConfigError> {
        Ok(Self {
            tag: compile(name, &query.tag)?,
            words: lowercase_all(&query.words),
            excluded_words: lowercase_all(&query.excluded_words),
            children: query
                .children
                .iter()
                .map(|c| ChildPattern::compile(name, c))
                .collect::<Result<_, _>>()?,
            context: query.context,
            excluded_left_sister: query
                .excluded_left_sister
                .as_ref()
                .map(|c| ChildPattern::compile(name, c))
                .transpose()?,
            excluded_parents: query
                .excluded_parents
                .iter()
                .map(|p| compile(name, p))
                .collect::<Result<_, _>>()?,
        })
    }
}

/// One argument slot of a compiled operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Argument {
    pub mono: Monotonicity,
    pub projection: ProjectionQuery,
}

/// A validated, compiled operator.
#[derive(Debug, Clone)]
pub struct Operator {
    name: String,
    trigger: TriggerPattern,
    args: Vec<Argument>,
}

impl Operator {
    fn from_def(def: &OperatorDef) -> Result<Self, ConfigError> {
        let mismatch = |detail: &str| ConfigError::ArityMismatch {
            name: def.name.clone(),
            arity: def.arity,
            detail: detail.to_string(),
        };
        let first = Argument {
            mono: def.arg1_mono,
            projection: def.arg1_projection,
        };
        let args = match (def.arity, def.arg2_mono, def.arg2_projection) {
            (1, None, None) => vec![first],
            (1, _, _) => return Err(mismatch("has second-argument fields")),
            (2, Some(mono), Some(projection)) => vec![first, Argument { mono, projection }],
            (2, None, _) => return Err(mismatch("is missing arg2_mono")),
            (2, _, None) => return Err(mismatch("is missing arg2_projection")),
            (arity, _, _) => {
                return Err(ConfigError::UnsupportedArity {
                    name: def.name.clone(),
                    arity,
                })
            }
        };
        Ok(Self {
            name: def.name.clone(),
            trigger: TriggerPattern::compile(&def.name, &def.trigger)?,
            args,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn trigger(&self) -> &TriggerPattern {
        &self.trigger
    }

    /// Argument slots in order; one for unary operators, two for binary.
    pub fn args(&self) -> &[Argument] {
        &self.args
    }

    pub fn arity(&self) -> usize {
        self.args.len()
    }

    pub fn is_binary(&self) -> bool {
        self.args.len() == 2
    }
}

// ============================================================================
// Catalog
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
struct CatalogDocument {
    #[serde(default, rename = "operator")]
    operators: Vec<OperatorDef>,
}

/// An ordered, immutable set of operators.
///
/// Built once and shared read-only across any number of projections.
#[derive(Debug, Clone, Default)]
pub struct OperatorCatalog {
    operators: Vec<Operator>,
}

impl OperatorCatalog {
    /// Validate and compile `defs`, preserving their order.
    pub fn build(defs: &[OperatorDef]) -> Result<Self, ConfigError> {
        let operators = defs
            .iter()
            .map(Operator::from_def)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { operators })
    }

    /// The standard English operator table.
    pub fn standard() -> Result<Self, ConfigError> {
        Self::build(&standard::standard_defs())
    }

    /// Parse `[[operator]]` tables from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let document: CatalogDocument =
            toml::from_str(text).map_err(|e| ConfigError::Deserialize {
                source_name: "operator catalog".to_string(),
                message: e.to_string(),
            })?;
        Self::build(&document.operators)
    }

    /// Read a catalog from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&text).map_err(|e| match e {
            ConfigError::Deserialize { message, .. } => ConfigError::Deserialize {
                source_name: path.display().to_string(),
                message,
            },
            other => other,
        })
    }

    /// Render definitions as a TOML catalog document.
    pub fn to_toml_string(defs: &[OperatorDef]) -> Result<String, ConfigError> {
        let document = CatalogDocument {
            operators: defs.to_vec(),
        };
        toml::to_string(&document).map_err(|e| ConfigError::Deserialize {
            source_name: "operator catalog".to_string(),
            message: e.to_string(),
        })
    }

    pub fn operators(&self) -> &[Operator] {
        &self.operators
    }

    pub fn get(&self, name: &str) -> Option<&Operator> {
        self.operators.iter().find(|op| op.name == name)
    }

    pub fn len(&self) -> usize {
        self.operators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operators.is_empty()
    }
}
