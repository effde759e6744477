//! Lexical and contextual novelty scorers backed by remote lookups

use crate::lookup::*;
use crate::scoring::{bounded_score, ScoringInput, SentenceScorer};
use crate::text::capitalize;
use crate::types::ScoreKind;
use async_trait::async_trait;
use futures::future::join_all;
use std::sync::Arc;
use tracing::{debug, warn};

/// Fixed divisor for the summed word classes (expected sentence length)
pub const WORD_NOVELTY_DIVISOR: f64 = 4.0;
/// Fixed divisor for the summed context classes (queries per typical sentence)
pub const CONTEXT_NOVELTY_DIVISOR: f64 = 6.0;

pub const NOVELTY_CLASSES: u32 = 20;
pub const NOVELTY_UPPER_BOUND: u64 = 512;

/// Non-adjacent token index pairs queried with the gap operator
pub const SKIP_PAIRS: [(usize, usize); 3] = [(0, 2), (0, 3), (1, 3)];

/// Bucket a result count into a novelty class.
///
/// Each doubling of the bound that the count still exceeds costs one class,
/// so rare phrases keep a high class. Never goes below 1.
pub fn novelty_class(num_results: u64, num_classes: u32, upper_bound: u64) -> u32 {
    let mut classes = num_classes;
    let mut bound = upper_bound;
    while num_results > bound && classes > 1 {
        bound = bound.saturating_mul(2);
        classes -= 1;
    }
    classes
}

/// Scores words by their corpus frequency class
pub struct LexicalNoveltyScorer {
    service: Arc<dyn FrequencyService>,
}

impl LexicalNoveltyScorer {
    pub fn new(service: Arc<dyn FrequencyService>) -> Self {
        Self { service }
    }

    /// Best (lowest) class + 1 of the lowercase and capitalized forms, capped
    /// at 20; 0 when neither form is known.
    pub async fn word_score(&self, word: &str) -> u32 {
        let lower = word.to_lowercase();
        let upper = capitalize(&lower);
        let (lower_outcome, upper_outcome) = futures::join!(
            self.service.frequency_class(&lower),
            self.service.frequency_class(&upper)
        );

        [(&lower, lower_outcome), (&upper, upper_outcome)]
            .into_iter()
            .filter_map(|(form, outcome)| match outcome {
                LookupOutcome::Found(class) => Some(class.saturating_add(1).min(NOVELTY_CLASSES)),
                LookupOutcome::NotFound => None,
                LookupOutcome::Failed(reason) => {
                    warn!("Frequency lookup for '{}' failed: {}", form, reason);
                    None
                }
            })
            .min()
            .unwrap_or(0)
    }
}

#[async_trait]
impl SentenceScorer for LexicalNoveltyScorer {
    fn kind(&self) -> ScoreKind {
        ScoreKind::WordNovelty
    }

    async fn score(&self, input: &ScoringInput<'_>) -> i64 {
        let scores = join_all(input.tokens.iter().map(|word| self.word_score(word))).await;
        let sum: u32 = scores.iter().sum();
        debug!("Word novelty via {}: sum={} over {} tokens", self.service.name(), sum, scores.len());
        bounded_score(sum as f64 / WORD_NOVELTY_DIVISOR)
    }
}

/// Adjacent pairs joined with `+`, then the fixed skip pairs joined with `*`.
/// Skip pairs whose indices fall outside the sentence are left out.
pub fn context_queries(tokens: &[String]) -> Vec<ContextQuery> {
    let adjacent = tokens
        .windows(2)
        .map(|pair| ContextQuery::new(&pair[0], &pair[1], JoinOperator::And));
    let skips = SKIP_PAIRS.iter().filter_map(|&(a, b)| {
        Some(ContextQuery::new(tokens.get(a)?, tokens.get(b)?, JoinOperator::Or))
    });
    adjacent.chain(skips).collect()
}

/// Scores word combinations by how rarely they appear on the web
pub struct ContextNoveltyScorer {
    service: Arc<dyn SearchService>,
}

impl ContextNoveltyScorer {
    pub fn new(service: Arc<dyn SearchService>) -> Self {
        Self { service }
    }

    pub async fn query_score(&self, query: &ContextQuery) -> u32 {
        match self.service.result_count(query).await {
            LookupOutcome::Found(SearchHits::Counted(count)) => {
                novelty_class(count, NOVELTY_CLASSES, NOVELTY_UPPER_BOUND)
            }
            LookupOutcome::Found(SearchHits::Uncounted) => NOVELTY_CLASSES,
            LookupOutcome::NotFound => {
                debug!("Search for {} was unsuccessful", query.phrase());
                0
            }
            LookupOutcome::Failed(reason) => {
                warn!("Search for {} failed: {}", query.phrase(), reason);
                0
            }
        }
    }
}

#[async_trait]
impl SentenceScorer for ContextNoveltyScorer {
    fn kind(&self) -> ScoreKind {
        ScoreKind::ContextNovelty
    }

    async fn score(&self, input: &ScoringInput<'_>) -> i64 {
        let queries = context_queries(input.tokens);
        let scores = join_all(queries.iter().map(|q| self.query_score(q))).await;
        let sum: u32 = scores.iter().sum();
        debug!("Context novelty via {}: sum={} over {} queries", self.service.name(), sum, queries.len());
        bounded_score(sum as f64 / CONTEXT_NOVELTY_DIVISOR)
    }
}
