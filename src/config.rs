//! File locations and weighting constants.
//!
//! Defaults match a question bank and history file in the working directory.
//! The binary may override them through `LC_FLASHCARDS_*` environment variables.

use crate::models::{DeckWeights, NO_WEIGHT, YES_WEIGHT};
use std::env;
use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_QUESTIONS_FILE: &str = "lc_flashcards.json";
pub const DEFAULT_HISTORY_FILE: &str = "lc_stats.csv";

const QUESTIONS_VAR: &str = "LC_FLASHCARDS_QUESTIONS";
const HISTORY_VAR: &str = "LC_FLASHCARDS_HISTORY";
const YES_WEIGHT_VAR: &str = "LC_FLASHCARDS_YES_WEIGHT";
const NO_WEIGHT_VAR: &str = "LC_FLASHCARDS_NO_WEIGHT";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid deck weight: {0}")]
    InvalidWeight(String),

    #[error("{var} must be a non-negative integer, got '{value}'")]
    NotAnInteger { var: String, value: String },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub questions_path: PathBuf,
    pub history_path: PathBuf,
    pub weights: DeckWeights,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            questions_path: PathBuf::from(DEFAULT_QUESTIONS_FILE),
            history_path: PathBuf::from(DEFAULT_HISTORY_FILE),
            weights: DeckWeights::default(),
        }
    }
}

impl Config {
    /// Defaults overridden by any `LC_FLASHCARDS_*` variables that are set.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = lookup(QUESTIONS_VAR) {
            config.questions_path = PathBuf::from(path);
        }
        if let Some(path) = lookup(HISTORY_VAR) {
            config.history_path = PathBuf::from(path);
        }

        let solved = parse_weight(YES_WEIGHT_VAR, lookup(YES_WEIGHT_VAR))?.unwrap_or(YES_WEIGHT);
        let unsolved = parse_weight(NO_WEIGHT_VAR, lookup(NO_WEIGHT_VAR))?.unwrap_or(NO_WEIGHT);
        config.weights = DeckWeights::new(solved, unsolved)?;

        Ok(config)
    }
}

fn parse_weight(var: &str, value: Option<String>) -> Result<Option<usize>, ConfigError> {
    match value {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<usize>()
            .map(Some)
            .map_err(|_| ConfigError::NotAnInteger {
                var: var.to_string(),
                value: raw,
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();

        assert_eq!(config, Config::default());
        assert_eq!(config.questions_path, PathBuf::from("lc_flashcards.json"));
        assert_eq!(config.history_path, PathBuf::from("lc_stats.csv"));
        assert_eq!(config.weights.solved(), 2);
        assert_eq!(config.weights.unsolved(), 5);
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("LC_FLASHCARDS_QUESTIONS", "bank.json"),
            ("LC_FLASHCARDS_HISTORY", "/tmp/history.csv"),
            ("LC_FLASHCARDS_YES_WEIGHT", "1"),
            ("LC_FLASHCARDS_NO_WEIGHT", " 8 "),
        ]))
        .unwrap();

        assert_eq!(config.questions_path, PathBuf::from("bank.json"));
        assert_eq!(config.history_path, PathBuf::from("/tmp/history.csv"));
        assert_eq!(config.weights.solved(), 1);
        assert_eq!(config.weights.unsolved(), 8);
    }

    #[test]
    fn test_bad_weight_is_rejected() {
        let result = Config::from_lookup(lookup_from(&[("LC_FLASHCARDS_NO_WEIGHT", "many")]));
        assert!(matches!(result, Err(ConfigError::NotAnInteger { .. })));

        let result = Config::from_lookup(lookup_from(&[("LC_FLASHCARDS_NO_WEIGHT", "1")]));
        assert!(matches!(result, Err(ConfigError::InvalidWeight(_))));
    }
}
