//! Engine tuning read from the environment.
//!
//! | var | default |
//! |---|---|
//! | `RECOMMEND_LIMIT` | `5` |
//! | `RANKING_TIMEOUT_SECS` | `30` |
//! | `ENRICH_CONCURRENCY` | `8` |
//! | `RECOMMEND_SEED` | unset (OS entropy) |

use std::time::Duration;

use rand::{SeedableRng, rngs::StdRng};

use crate::enrich::DEFAULT_ENRICH_CONCURRENCY;
use crate::error::RecommenderConfigError;
use crate::ranking::DEFAULT_RANKING_TIMEOUT;
use crate::strategies::DEFAULT_LIMIT;

/// Where per-request randomness comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RngSource {
    #[default]
    Entropy,
    /// Every request starts from the same seed; shuffles are reproducible.
    Seeded(u64),
}

impl RngSource {
    pub fn make_rng(&self) -> StdRng {
        match self {
            RngSource::Entropy => StdRng::from_entropy(),
            RngSource::Seeded(seed) => StdRng::seed_from_u64(*seed),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecommenderConfig {
    /// Maximum items per response.
    pub limit: usize,
    pub ranking_timeout: Duration,
    pub enrich_concurrency: usize,
    pub rng: RngSource,
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            ranking_timeout: DEFAULT_RANKING_TIMEOUT,
            enrich_concurrency: DEFAULT_ENRICH_CONCURRENCY,
            rng: RngSource::Entropy,
        }
    }
}

impl RecommenderConfig {
    pub fn from_env() -> Result<Self, RecommenderConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup; blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, RecommenderConfigError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let defaults = Self::default();

        let limit = parse_positive(&lookup, "RECOMMEND_LIMIT")?.unwrap_or(defaults.limit as u64);
        let timeout_secs = parse_positive(&lookup, "RANKING_TIMEOUT_SECS")?
            .unwrap_or(defaults.ranking_timeout.as_secs());
        let concurrency = parse_positive(&lookup, "ENRICH_CONCURRENCY")?
            .unwrap_or(defaults.enrich_concurrency as u64);
        let rng = match parse_u64(&lookup, "RECOMMEND_SEED")? {
            Some(seed) => RngSource::Seeded(seed),
            None => RngSource::Entropy,
        };

        Ok(Self {
            limit: limit as usize,
            ranking_timeout: Duration::from_secs(timeout_secs),
            enrich_concurrency: concurrency as usize,
            rng,
        })
    }
}

fn parse_u64<F>(lookup: &F, var: &'static str) -> Result<Option<u64>, RecommenderConfigError>
where
    F: Fn(&'static str) -> Option<String>,
{
    match lookup(var) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<u64>()
            .map(Some)
            .map_err(|e| RecommenderConfigError::InvalidNumber {
                var,
                reason: e.to_string(),
            }),
        _ => Ok(None),
    }
}

fn parse_positive<F>(lookup: &F, var: &'static str) -> Result<Option<u64>, RecommenderConfigError>
where
    F: Fn(&'static str) -> Option<String>,
{
    match parse_u64(lookup, var)? {
        Some(0) => Err(RecommenderConfigError::Zero { var }),
        other => Ok(other),
    }
}
