use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{error::Error, freq::selector::SelectionRule, Result};

pub const DEFAULT_FALLBACK_TAG: &str = "NN";
pub const DEFAULT_WINDOW: usize = 4;

/// Run settings. Every field has a default, so a config file only needs
/// the keys it changes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub tagger: TaggerConfig,
    pub classifier: ClassifierConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaggerConfig {
    /// Tag given to words absent from the training vocabulary.
    pub fallback_tag: String,
    /// Whether surface-form override rules run after scoring.
    pub overrides: bool,
}

impl Default for TaggerConfig {
    fn default() -> Self {
        Self { fallback_tag: DEFAULT_FALLBACK_TAG.to_string(), overrides: true }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Words taken on each side of the head word for window features.
    pub window: usize,
    pub selection: SelectionRule,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self { window: DEFAULT_WINDOW, selection: SelectionRule::default() }
    }
}

impl Config {
    pub fn from_path(path: &Path) -> Result<Self> {
        let s = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let config = serde_json::from_str(&s)?;
        log::debug!("loaded config from {}: {:?}", path.display(), config);
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config: Config = serde_json::from_str(r#"{"classifier": {"selection": "max"}}"#).unwrap();
        assert_eq!(config.classifier.selection, SelectionRule::Maximum);
        assert_eq!(config.classifier.window, DEFAULT_WINDOW);
        assert_eq!(config.tagger, TaggerConfig::default());
    }

    #[test]
    fn empty_json_is_default() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.tagger.fallback_tag, "NN");
        assert!(config.tagger.overrides);
    }

    #[test]
    fn unknown_rule_is_rejected() {
        assert!(serde_json::from_str::<Config>(r#"{"classifier": {"selection": "median"}}"#).is_err());
    }
}
