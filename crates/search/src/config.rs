use crate::error::{Result, SearchError};
use serde::Deserialize;
use std::env;
use std::time::Duration;

/// Limits and timeouts for one search invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    /// Files shown to the oracle by the semantic-listing strategy
    pub listing_limit: usize,
    /// Paths kept from the semantic pick
    pub semantic_limit: usize,
    /// Merged results at or below this size skip oracle ranking
    pub rank_threshold: usize,
    /// Candidates shown to the oracle for ranking
    pub rank_window: usize,
    /// Ranked prefix kept from the ranking response
    pub rank_keep: usize,
    /// Upper bound for a single search tool run
    pub command_timeout: Duration,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            listing_limit: 500,
            semantic_limit: 15,
            rank_threshold: 15,
            rank_window: 50,
            rank_keep: 15,
            command_timeout: Duration::from_secs(30),
        }
    }
}

/// `[search]` table of the config file.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawSearchConfig {
    pub listing_limit: Option<usize>,
    pub semantic_limit: Option<usize>,
    pub rank_threshold: Option<usize>,
    pub rank_window: Option<usize>,
    pub rank_keep: Option<usize>,
    pub command_timeout_secs: Option<u64>,
}

impl SearchConfig {
    /// Defaults, overlaid with the config file table, overlaid with the environment.
    pub fn resolve(raw: Option<RawSearchConfig>) -> Result<Self> {
        let raw = raw.unwrap_or_default();
        let defaults = Self::default();

        let mut cfg = Self {
            listing_limit: positive("listing_limit", raw.listing_limit, defaults.listing_limit)?,
            semantic_limit: positive("semantic_limit", raw.semantic_limit, defaults.semantic_limit)?,
            rank_threshold: positive("rank_threshold", raw.rank_threshold, defaults.rank_threshold)?,
            rank_window: positive("rank_window", raw.rank_window, defaults.rank_window)?,
            rank_keep: positive("rank_keep", raw.rank_keep, defaults.rank_keep)?,
            command_timeout: defaults.command_timeout,
        };
        if let Some(secs) = raw.command_timeout_secs {
            cfg.command_timeout = timeout_from_secs(secs)?;
        }

        if let Ok(raw) = env::var("SMART_FIND_COMMAND_TIMEOUT_SECS") {
            let raw = raw.trim();
            if !raw.is_empty() {
                let secs = raw.parse::<u64>().map_err(|_| {
                    SearchError::Config(format!(
                        "SMART_FIND_COMMAND_TIMEOUT_SECS must be a positive integer, got '{raw}'"
                    ))
                })?;
                cfg.command_timeout = timeout_from_secs(secs)?;
            }
        }

        Ok(cfg)
    }
}

fn positive(name: &str, value: Option<usize>, default_value: usize) -> Result<usize> {
    match value {
        Some(0) => Err(SearchError::Config(format!("{name} must be greater than zero"))),
        Some(v) => Ok(v),
        None => Ok(default_value),
    }
}

fn timeout_from_secs(secs: u64) -> Result<Duration> {
    if secs == 0 {
        return Err(SearchError::Config(
            "command timeout must be at least one second".to_string(),
        ));
    }
    Ok(Duration::from_secs(secs))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_values_override_defaults() {
        let cfg = SearchConfig::resolve(Some(RawSearchConfig {
            listing_limit: Some(100),
            rank_keep: Some(5),
            ..RawSearchConfig::default()
        }))
        .expect("config");
        assert_eq!(cfg.listing_limit, 100);
        assert_eq!(cfg.rank_keep, 5);
        assert_eq!(cfg.rank_window, 50);
    }

    #[test]
    fn zero_limits_are_rejected() {
        let err = SearchConfig::resolve(Some(RawSearchConfig {
            rank_window: Some(0),
            ..RawSearchConfig::default()
        }))
        .unwrap_err();
        assert!(err.to_string().contains("rank_window"));
        assert!(timeout_from_secs(0).is_err());
    }
}
