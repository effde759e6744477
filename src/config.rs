//! Runtime configuration for a scoring run

use crate::types::ScoringVariant;
use std::time::Duration;

pub const DEFAULT_FREQUENCY_API_URL: &str =
    "http://api.corpora.uni-leipzig.de/ws/words/deu_news_2012_1M/word/";
pub const DEFAULT_SEARCH_API_URL: &str = "https://api.scaleserp.com/search";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_MAX_CONCURRENT_SAMPLES: usize = 4;

#[derive(Debug, Clone)]
pub struct ScoringConfig {
    /// Base URL; the URL-encoded word is appended
    pub frequency_api_url: String,
    pub search_api_url: String,
    pub search_api_key: Option<String>,
    /// Per-request timeout; a timeout counts as a failed lookup
    pub request_timeout: Duration,
    pub variant: ScoringVariant,
    pub max_concurrent_samples: usize,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            frequency_api_url: DEFAULT_FREQUENCY_API_URL.to_string(),
            search_api_url: DEFAULT_SEARCH_API_URL.to_string(),
            search_api_key: None,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            variant: ScoringVariant::default(),
            max_concurrent_samples: DEFAULT_MAX_CONCURRENT_SAMPLES,
        }
    }
}

impl ScoringConfig {
    /// Concurrency is at least one sample at a time
    pub fn sample_concurrency(&self) -> usize {
        self.max_concurrent_samples.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ScoringConfig::default();
        assert_eq!(config.frequency_api_url, DEFAULT_FREQUENCY_API_URL);
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert_eq!(config.variant, ScoringVariant::Extended);
        assert!(config.search_api_key.is_none());
    }

    #[test]
    fn test_sample_concurrency_floor() {
        let config = ScoringConfig {
            max_concurrent_samples: 0,
            ..Default::default()
        };
        assert_eq!(config.sample_concurrency(), 1);
    }
}
