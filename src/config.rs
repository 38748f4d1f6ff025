// Kabu Lookup Configuration
// Search defaults with environment overrides

use serde::{Deserialize, Serialize};

use crate::normalize::DEFAULT_MARKET_SUFFIX;

/// Default number of results returned by a search
pub const DEFAULT_LIMIT: usize = 20;

/// Environment variable overriding the default result limit
pub const ENV_LIMIT: &str = "KABU_LOOKUP_LIMIT";

/// Environment variable overriding the market suffix
pub const ENV_SUFFIX: &str = "KABU_LOOKUP_SUFFIX";

/// Search engine settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Results returned by `InstrumentSearch::search`
    pub default_limit: usize,

    /// Suffix stripped from codes to obtain the bare identifier
    pub market_suffix: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_LIMIT,
            market_suffix: DEFAULT_MARKET_SUFFIX.to_string(),
        }
    }
}

impl SearchConfig {
    /// Defaults overridden by `KABU_LOOKUP_LIMIT` / `KABU_LOOKUP_SUFFIX`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; unparsable values keep the default
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_LIMIT) {
            match raw.trim().parse::<usize>() {
                Ok(limit) => config.default_limit = limit,
                Err(e) => log::warn!(
                    "Ignoring {}={:?}: {} (using {})",
                    ENV_LIMIT,
                    raw,
                    e,
                    config.default_limit
                ),
            }
        }

        if let Some(suffix) = lookup(ENV_SUFFIX) {
            config.market_suffix = suffix;
        }

        config
    }

    /// Set the default limit
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.default_limit = limit;
        self
    }

    /// Set the market suffix
    pub fn with_market_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.market_suffix = suffix.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = SearchConfig::default();
        assert_eq!(config.default_limit, 20);
        assert_eq!(config.market_suffix, ".T");
    }

    #[test]
    fn test_lookup_overrides() {
        let config = SearchConfig::from_lookup(lookup_from(&[(ENV_LIMIT, "5"), (ENV_SUFFIX, ".HK")]));
        assert_eq!(config.default_limit, 5);
        assert_eq!(config.market_suffix, ".HK");
    }

    #[test]
    fn test_invalid_limit_keeps_default() {
        let config = SearchConfig::from_lookup(lookup_from(&[(ENV_LIMIT, "lots")]));
        assert_eq!(config.default_limit, DEFAULT_LIMIT);
    }

    #[test]
    fn test_builder() {
        let config = SearchConfig::default().with_limit(3).with_market_suffix("");
        assert_eq!(config.default_limit, 3);
        assert_eq!(config.market_suffix, "");
    }

    #[test]
    fn test_deserialize_partial() {
        let config: SearchConfig = serde_json::from_str(r#"{"default_limit": 7}"#).unwrap();
        assert_eq!(config.default_limit, 7);
        assert_eq!(config.market_suffix, ".T");
    }
}
