//! Optional TOML configuration file.
//!
//! ```toml
//! [genetic]
//! population_size = 200
//! goal_bias = 0.9
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use maze_genetic::GeneticParams;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct FileConfig {
    pub(crate) genetic: GeneticParams,
}

impl FileConfig {
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::parse(&contents).with_context(|| format!("failed to parse config {}", path.display()))
    }

    fn parse(contents: &str) -> Result<Self> {
        let config: FileConfig = toml::from_str(contents)?;
        config.genetic.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_take_defaults() {
        let c = FileConfig::parse("[genetic]\nseed = 7\n").unwrap();
        assert_eq!(c.genetic.seed, 7);
        assert_eq!(c.genetic.population_size, 140);
        assert!(FileConfig::parse("").is_ok());
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(FileConfig::parse("[genetic]\ngoal_bias = 1.5\n").is_err());
        let wrong_type = "[genetic]\npopulation_size = \"many\"\n";
        assert!(FileConfig::parse(wrong_type).is_err());
    }
}
