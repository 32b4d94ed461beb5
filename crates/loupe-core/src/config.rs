//! Configuration loading and parsing for Loupe.
//!
//! Loads `loupe.toml` from the checked directory. Unknown keys are reported
//! as warnings instead of errors so older configs keep working.

use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::rules::Severity;

pub const CONFIG_FILENAME: &str = "loupe.toml";

const KNOWN_TOP_LEVEL_KEYS: &[&str] = &["include", "exclude", "rules"];
const KNOWN_RULES_KEYS: &[&str] = &["disabled", "severity"];

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid TOML in '{path}': {message}")]
    Parse { path: PathBuf, message: String },
}

#[derive(Debug, Clone, Default)]
pub struct ConfigResult {
    pub config: Config,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub include: Vec<String>,
    pub exclude: Vec<String>,
    pub rules: RulesConfig,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct RulesConfig {
    pub disabled: Vec<String>,
    #[serde(default)]
    pub severity: HashMap<String, SeverityValue>,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum SeverityValue {
    Error,
    Warning,
    Info,
    Hint,
}

impl From<SeverityValue> for Severity {
    fn from(value: SeverityValue) -> Self {
        match value {
            SeverityValue::Error => Severity::Error,
            SeverityValue::Warning => Severity::Warning,
            SeverityValue::Info => Severity::Info,
            SeverityValue::Hint => Severity::Hint,
        }
    }
}

/// Parse config text, collecting unknown-key warnings.
pub fn parse_config(text: &str, origin: &Path) -> Result<ConfigResult, ConfigError> {
    let value: toml::Value = toml::from_str(text).map_err(|e| ConfigError::Parse {
        path: origin.to_path_buf(),
        message: e.to_string(),
    })?;

    let mut warnings = Vec::new();
    if let Some(table) = value.as_table() {
        for key in table.keys() {
            if !KNOWN_TOP_LEVEL_KEYS.contains(&key.as_str()) {
                warnings.push(format!("unknown key '{key}' in {CONFIG_FILENAME}"));
            }
        }
        if let Some(rules) = table.get("rules").and_then(|v| v.as_table()) {
            for key in rules.keys() {
                if !KNOWN_RULES_KEYS.contains(&key.as_str()) {
                    warnings.push(format!("unknown key 'rules.{key}' in {CONFIG_FILENAME}"));
                }
            }
        }
    }

    let config: Config = toml::from_str(text).map_err(|e| ConfigError::Parse {
        path: origin.to_path_buf(),
        message: e.to_string(),
    })?;

    Ok(ConfigResult { config, warnings })
}

/// Load `loupe.toml` next to `path` (or in `path` itself when it is a
/// directory). Returns `Ok(None)` when no config file exists.
pub fn load_config(path: &Path) -> Result<Option<ConfigResult>, ConfigError> {
    let dir = if path.is_dir() {
        path
    } else {
        path.parent().unwrap_or(Path::new("."))
    };
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let text = std::fs::read_to_string(&config_path).map_err(|source| ConfigError::Read {
        path: config_path.clone(),
        source,
    })?;

    parse_config(&text, &config_path).map(Some)
}

/// Config resolution for the CLI: missing file means defaults, and load or
/// parse failures degrade to defaults with a warning.
pub fn load_config_or_default_with_warnings(path: &Path) -> ConfigResult {
    match load_config(path) {
        Ok(Some(result)) => result,
        Ok(None) => ConfigResult::default(),
        Err(err) => ConfigResult {
            config: Config::default(),
            warnings: vec![err.to_string()],
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_config() {
        let text = r#"
include = ["src/**/*.js"]
exclude = ["dist"]

[rules]
disabled = ["prefer-for-of"]

[rules.severity]
prefer-for-of = "error"
"#;
        let result = parse_config(text, Path::new("loupe.toml")).unwrap();

        assert!(result.warnings.is_empty());
        assert_eq!(result.config.include, vec!["src/**/*.js"]);
        assert_eq!(result.config.rules.disabled, vec!["prefer-for-of"]);
        assert_eq!(
            result.config.rules.severity.get("prefer-for-of"),
            Some(&SeverityValue::Error)
        );
    }

    #[test]
    fn empty_config_is_default() {
        let result = parse_config("", Path::new("loupe.toml")).unwrap();

        assert_eq!(result.config, Config::default());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn unknown_keys_produce_warnings() {
        let text = r#"
includes = ["typo"]

[rules]
disable = ["typo"]
"#;
        let result = parse_config(text, Path::new("loupe.toml")).unwrap();

        assert_eq!(result.warnings.len(), 2);
        assert!(result.warnings[0].contains("includes"));
        assert!(result.warnings[1].contains("rules.disable"));
    }

    #[test]
    fn invalid_toml_is_an_error() {
        let err = parse_config("rules = [", Path::new("loupe.toml")).unwrap_err();

        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn missing_file_loads_default() {
        let dir = tempfile::tempdir().unwrap();

        assert!(load_config(dir.path()).unwrap().is_none());

        let result = load_config_or_default_with_warnings(dir.path());
        assert_eq!(result.config, Config::default());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn loads_config_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILENAME),
            "[rules]\ndisabled = [\"M001\"]\n",
        )
        .unwrap();

        let result = load_config(dir.path()).unwrap().unwrap();

        assert_eq!(result.config.rules.disabled, vec!["M001"]);
    }

    #[test]
    fn malformed_file_degrades_to_default_with_warning() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILENAME), "rules = [").unwrap();

        let result = load_config_or_default_with_warnings(dir.path());

        assert_eq!(result.config, Config::default());
        assert_eq!(result.warnings.len(), 1);
    }
}
