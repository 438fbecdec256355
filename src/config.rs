//! Match configuration parameters.
//!
//! A match is configured by two values: how many marks a player may collect
//! before losing the match, and an optional deal seed. Configurations also
//! parse from the compact `"<target>"` or `"<target>;<seed>"` form used when
//! a match is launched from a single parameter string.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::ConfigError;

/// Marks a player must collect to lose the match. A single bummerl
/// decides the match by default.
pub const DEFAULT_BUMMERL_TARGET: u32 = 1;

/// Match configuration parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Mark count that decides the match. Each lost bummerl adds one or two
    /// marks; the first player to reach the target loses.
    pub bummerl_target: u32,

    /// Seed for shuffling deals. `None` draws a fresh seed per match, so
    /// set it whenever reproducible deals matter.
    pub seed: Option<u64>,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            bummerl_target: DEFAULT_BUMMERL_TARGET,
            seed: None,
        }
    }
}

impl MatchConfig {
    /// Create a new config with a custom bummerl target.
    #[must_use]
    pub fn with_bummerl_target(mut self, target: u32) -> Self {
        self.bummerl_target = target;
        self
    }

    /// Create a new config with a fixed deal seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// The seed matches built from this config will use. Draws a random
    /// seed when none is fixed.
    #[must_use]
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }
}

impl FromStr for MatchConfig {
    type Err = ConfigError;

    /// Parse `""`, `"<target>"` or `"<target>;<seed>"`.
    ///
    /// ## Example
    ///
    /// ```
    /// use schnapsen::config::MatchConfig;
    ///
    /// let config: MatchConfig = "5;42".parse().unwrap();
    /// assert_eq!(config.bummerl_target, 5);
    /// assert_eq!(config.seed, Some(42));
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Ok(Self::default());
        }

        let parts: Vec<&str> = trimmed.split(';').collect();
        if parts.len() > 2 {
            return Err(ConfigError::TooManyFields(trimmed.to_string()));
        }

        let target: u32 = parts[0]
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidTarget(parts[0].trim().to_string()))?;
        if target == 0 {
            return Err(ConfigError::InvalidTarget(parts[0].trim().to_string()));
        }

        let seed = match parts.get(1) {
            Some(raw) => Some(
                raw.trim()
                    .parse::<u64>()
                    .map_err(|_| ConfigError::InvalidSeed(raw.trim().to_string()))?,
            ),
            None => None,
        };

        Ok(Self {
            bummerl_target: target,
            seed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MatchConfig::default();
        assert_eq!(config.bummerl_target, 1);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_builder_pattern() {
        let config = MatchConfig::default().with_bummerl_target(3).with_seed(99);
        assert_eq!(config.bummerl_target, 3);
        assert_eq!(config.seed, Some(99));
    }

    #[test]
    fn test_resolve_seed_fixed() {
        let config = MatchConfig::default().with_seed(1234);
        assert_eq!(config.resolve_seed(), 1234);
        assert_eq!(config.resolve_seed(), 1234);
    }

    #[test]
    fn test_parse_empty_is_default() {
        let config: MatchConfig = "".parse().unwrap();
        assert_eq!(config, MatchConfig::default());

        let config: MatchConfig = "   ".parse().unwrap();
        assert_eq!(config, MatchConfig::default());
    }

    #[test]
    fn test_parse_target_only() {
        let config: MatchConfig = "5".parse().unwrap();
        assert_eq!(config.bummerl_target, 5);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_parse_target_and_seed() {
        let config: MatchConfig = "7;123456".parse().unwrap();
        assert_eq!(config.bummerl_target, 7);
        assert_eq!(config.seed, Some(123_456));
    }

    #[test]
    fn test_parse_rejects_bad_target() {
        assert!(matches!(
            "abc".parse::<MatchConfig>(),
            Err(ConfigError::InvalidTarget(_))
        ));
        assert!(matches!(
            "0".parse::<MatchConfig>(),
            Err(ConfigError::InvalidTarget(_))
        ));
        assert!(matches!(
            "-3".parse::<MatchConfig>(),
            Err(ConfigError::InvalidTarget(_))
        ));
    }

    #[test]
    fn test_parse_rejects_bad_seed() {
        assert!(matches!(
            "7;xyz".parse::<MatchConfig>(),
            Err(ConfigError::InvalidSeed(_))
        ));
    }

    #[test]
    fn test_parse_rejects_extra_fields() {
        assert!(matches!(
            "7;1;2".parse::<MatchConfig>(),
            Err(ConfigError::TooManyFields(_))
        ));
    }

    #[test]
    fn test_serialization() {
        let config = MatchConfig::default().with_seed(42);
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: MatchConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
