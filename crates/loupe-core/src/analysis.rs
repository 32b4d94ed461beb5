//! Analysis engine: the embedding point for hosts.

use crate::config::Config;
use crate::diagnostic::Diagnostic;
use crate::parser::ParsedFile;
use crate::rules::RuleRegistry;

/// Immutable bundle of the configured rule set. Hosts create one engine and
/// feed it parsed files; analysis itself holds no per-file state.
pub struct AnalysisEngine {
    registry: RuleRegistry,
}

impl AnalysisEngine {
    pub fn new() -> Self {
        Self {
            registry: RuleRegistry::with_default_rules(),
        }
    }

    pub fn with_config(config: &Config) -> Self {
        let mut registry = RuleRegistry::with_default_rules();
        registry.configure(&config.rules);
        Self { registry }
    }

    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    pub fn analyze(&self, file: &ParsedFile) -> Vec<Diagnostic> {
        let diagnostics = self.registry.run_all(file);
        tracing::debug!(
            file = %file.metadata().filename,
            count = diagnostics.len(),
            "analyzed file"
        );
        diagnostics
    }
}

impl Default for AnalysisEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RulesConfig;

    #[test]
    fn engine_runs_default_rules() {
        let engine = AnalysisEngine::new();
        let file = ParsedFile::from_source(
            "test.js",
            "for (var i = 0; i < arr.length; i++) { use(arr[i]); }",
        );

        let diagnostics = engine.analyze(&file);

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].rule_id, "M001");
    }

    #[test]
    fn config_can_disable_rules() {
        let config = Config {
            rules: RulesConfig {
                disabled: vec!["prefer-for-of".to_string()],
                ..Default::default()
            },
            ..Default::default()
        };
        let engine = AnalysisEngine::with_config(&config);
        let file = ParsedFile::from_source(
            "test.js",
            "for (var i = 0; i < arr.length; i++) { use(arr[i]); }",
        );

        assert!(engine.analyze(&file).is_empty());
    }
}
