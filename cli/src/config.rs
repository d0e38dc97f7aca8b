//! YAML configuration for the revision CLI.

use redraft::{Error, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Default config file looked up in the working directory.
const DEFAULT_CONFIG_FILE: &str = "redraft.yaml";

/// CLI configuration, loaded from YAML with per-field defaults.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    /// Chat model name
    pub model: String,

    /// Base URL of the OpenAI-compatible endpoint
    pub api_base: String,

    /// Sampling temperature
    pub temperature: f32,

    /// Context window settings
    pub context: ContextConfig,
}

/// Context window settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContextConfig {
    /// Trailing units fed to the generator
    pub units: usize,

    /// Separator between context fragments
    pub separator: String,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4o".to_string(),
            api_base: "https://api.openai.com/v1".to_string(),
            temperature: 0.3,
            context: ContextConfig::default(),
        }
    }
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            units: 2,
            separator: " [...] ".to_string(),
        }
    }
}

impl CliConfig {
    /// Load configuration.
    ///
    /// An explicit path must exist and parse; without one, `redraft.yaml` in
    /// the working directory is used when present, defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if !default.exists() {
                    return Ok(Self::default());
                }
                default.to_path_buf()
            }
        };

        let data = fs::read_to_string(&path)?;
        serde_yaml::from_str(&data)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = CliConfig::default();
        assert_eq!(config.model, "gpt-4o");
        assert_eq!(config.context.units, 2);
        assert_eq!(config.context.separator, " [...] ");
    }

    #[test]
    fn test_load_partial_yaml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "model: local-llm\ncontext:\n  units: 4").unwrap();

        let config = CliConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.model, "local-llm");
        assert_eq!(config.context.units, 4);
        // Unspecified fields keep their defaults.
        assert_eq!(config.temperature, 0.3);
        assert_eq!(config.context.separator, " [...] ");
    }

    #[test]
    fn test_load_rejects_unknown_fields() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "modle: typo").unwrap();

        assert!(CliConfig::load(Some(file.path())).is_err());
    }

    #[test]
    fn test_missing_default_file_falls_back() {
        let config = CliConfig::load(None).unwrap();
        assert_eq!(config.api_base, "https://api.openai.com/v1");
    }
}
