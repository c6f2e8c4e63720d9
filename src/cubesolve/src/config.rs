use std::{fs, path::Path};

use color_eyre::eyre::{Result, WrapErr};
use layercube::{scramble::DEFAULT_SCRAMBLE_LENGTH, solver::DEFAULT_MAX_STAGE_ITERATIONS};
use serde::{Deserialize, Serialize};

/// Settings from the optional configuration file. Every key may be omitted.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Generator applications allowed per stage before the solver gives up.
    pub max_stage_iterations: usize,
    /// Number of random turns in a generated scramble.
    pub scramble_length: usize,
    /// Spell every turn out as a sentence instead of compact notation.
    pub spell_out: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            max_stage_iterations: DEFAULT_MAX_STAGE_ITERATIONS,
            scramble_length: DEFAULT_SCRAMBLE_LENGTH,
            spell_out: false,
        }
    }
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Config::default());
        };
        let text = fs::read_to_string(path)
            .wrap_err_with(|| format!("Failed to read configuration file {}", path.display()))?;
        toml::from_str(&text)
            .wrap_err_with(|| format!("Failed to parse configuration file {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_take_defaults() {
        let config: Config = toml::from_str("spell_out = true").unwrap();
        assert_eq!(
            config,
            Config {
                spell_out: true,
                ..Config::default()
            }
        );
        assert_eq!(toml::from_str::<Config>("").unwrap(), Config::default());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(toml::from_str::<Config>("max_iterations = 3").is_err());
    }
}
