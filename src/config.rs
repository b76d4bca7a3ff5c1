//! Engine configuration, loaded from TOML.

use crate::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// How markings from successive operators are merged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompositionPolicy {
    /// Each operator builds its own overlay, which is composed into the
    /// running marks. Nested scopes compose; double negation cancels.
    #[default]
    ComposeThenAccumulate,
    /// The first operator to claim a token fixes its marking. Later claims
    /// on that token are ignored and nothing composes.
    FirstClaimWins,
}

/// Knobs for [`crate::ProjectionEngine`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub policy: CompositionPolicy,
    /// Skip a quantifier phrase at the left edge of each projected scope
    pub strip_quantifier_prefix: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            policy: CompositionPolicy::default(),
            strip_quantifier_prefix: true,
        }
    }
}

impl EngineConfig {
    pub fn with_policy(mut self, policy: CompositionPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|e| ConfigError::Deserialize {
            source_name: "engine config".to_string(),
            message: e.to_string(),
        })
    }

    /// Load from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        toml::from_str(&text).map_err(|e| ConfigError::Deserialize {
            source_name: path.display().to_string(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.policy, CompositionPolicy::ComposeThenAccumulate);
        assert!(config.strip_quantifier_prefix);
        assert_eq!(EngineConfig::from_toml_str("").unwrap(), config);
    }

    #[test]
    fn test_from_toml_str() {
        let config = EngineConfig::from_toml_str(
            r#"
policy = "first_claim_wins"
strip_quantifier_prefix = false
"#,
        )
        .unwrap();
        assert_eq!(config.policy, CompositionPolicy::FirstClaimWins);
        assert!(!config.strip_quantifier_prefix);
    }

    #[test]
    fn test_unknown_policy_is_an_error() {
        let err = EngineConfig::from_toml_str("policy = \"last_wins\"").unwrap_err();
        assert!(matches!(err, ConfigError::Deserialize { .. }));
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let config = EngineConfig::load(Path::new("/nonexistent/natlog.toml")).unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "policy = \"first_claim_wins\"").unwrap();
        let config = EngineConfig::load(file.path()).unwrap();
        assert_eq!(config.policy, CompositionPolicy::FirstClaimWins);
        assert!(config.strip_quantifier_prefix);
    }
}
