//! Pipeline configuration.

use crate::errors::SpecResult;
use layered_natlog::{CompositionPolicy, EngineConfig, OperatorCatalog};
use std::path::PathBuf;

/// Configuration for the fixture pipeline.
#[derive(Debug, Clone, Default)]
pub struct PipelineConfig {
    /// Engine settings; a case's `> policy:` line overrides the policy.
    pub engine: EngineConfig,
    /// Operator catalog to load instead of the standard one.
    pub catalog_path: Option<PathBuf>,
}

impl PipelineConfig {
    /// Standard catalog, default engine settings.
    pub fn standard() -> Self {
        Self::default()
    }

    /// Load the operator catalog from a TOML file.
    pub fn with_catalog(mut self, path: impl Into<PathBuf>) -> Self {
        self.catalog_path = Some(path.into());
        self
    }

    pub fn with_policy(mut self, policy: CompositionPolicy) -> Self {
        self.engine = self.engine.with_policy(policy);
        self
    }

    /// Build the catalog this configuration names.
    pub fn catalog(&self) -> SpecResult<OperatorCatalog> {
        let catalog = match &self.catalog_path {
            Some(path) => OperatorCatalog::load(path)?,
            None => OperatorCatalog::standard()?,
        };
        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SpecError;

    #[test]
    fn test_standard_catalog() {
        let catalog = PipelineConfig::standard().catalog().unwrap();
        assert_eq!(catalog.len(), 11);
    }

    #[test]
    fn test_missing_catalog_file() {
        let err = PipelineConfig::standard()
            .with_catalog("/nonexistent/operators.toml")
            .catalog()
            .unwrap_err();
        assert!(matches!(err, SpecError::Config(_)));
    }
}
