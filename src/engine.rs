//! Scoring engine: vocabulary snapshot + concurrent sub-scorers + weighted total

use crate::config::ScoringConfig;
use crate::corpus::Corpus;
use crate::frequency_client::HttpFrequencyService;
use crate::lookup::{FrequencyService, SearchService};
use crate::novelty::{ContextNoveltyScorer, LexicalNoveltyScorer};
use crate::phonetic_similarity::PhoneticSimilarityScorer;
use crate::rhythm::RhythmicScorer;
use crate::scoring::{AggregateWeights, ScoringInput, SentenceScorer};
use crate::search_client::HttpSearchService;
use crate::similarity::SimilarityScorer;
use crate::text::tokenize;
use crate::types::*;
use crate::vocabulary::Vocabulary;
use anyhow::Result;
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// Main scoring engine (thread-safe via Arc)
pub struct ScoringEngine {
    pub scorers: Vec<Box<dyn SentenceScorer>>,
    pub weights: AggregateWeights,
    pub variant: ScoringVariant,
    pub max_concurrent_samples: usize,
}

pub type SharedScoringEngine = Arc<ScoringEngine>;

impl ScoringEngine {
    /// Create an engine from an explicit scorer set
    pub fn new(
        scorers: Vec<Box<dyn SentenceScorer>>,
        weights: AggregateWeights,
        variant: ScoringVariant,
        max_concurrent_samples: usize,
    ) -> SharedScoringEngine {
        Arc::new(Self {
            scorers,
            weights,
            variant,
            max_concurrent_samples: max_concurrent_samples.max(1),
        })
    }

    /// Standard scorer set for `variant`, using the given lookup services
    pub fn with_services(
        frequency: Arc<dyn FrequencyService>,
        search: Arc<dyn SearchService>,
        variant: ScoringVariant,
        max_concurrent_samples: usize,
    ) -> SharedScoringEngine {
        let mut scorers: Vec<Box<dyn SentenceScorer>> = vec![
            Box::new(LexicalNoveltyScorer::new(frequency)),
            Box::new(ContextNoveltyScorer::new(search)),
            Box::new(SimilarityScorer::participant()),
            Box::new(SimilarityScorer::sentence()),
        ];
        if variant == ScoringVariant::Extended {
            scorers.push(Box::new(RhythmicScorer));
            scorers.push(Box::new(PhoneticSimilarityScorer));
        }
        Self::new(scorers, AggregateWeights::default(), variant, max_concurrent_samples)
    }

    /// Engine backed by the HTTP lookup services
    pub fn from_config(config: &ScoringConfig) -> Result<SharedScoringEngine> {
        let frequency = Arc::new(HttpFrequencyService::from_config(config)?);
        let search = Arc::new(HttpSearchService::from_config(config)?);
        if config.search_api_key.is_none() {
            tracing::warn!("No context-search API key configured; context novelty lookups will likely fail");
        }
        Ok(Self::with_services(
            frequency,
            search,
            config.variant,
            config.sample_concurrency(),
        ))
    }

    /// Score kinds this engine produces, in output order
    pub fn kinds(&self) -> Vec<ScoreKind> {
        let mut kinds: Vec<ScoreKind> = self.scorers.iter().map(|s| s.kind()).collect();
        kinds.sort();
        kinds.dedup();
        kinds
    }

    /// Main entry point: build the vocabulary and score every sample
    pub async fn score_corpus(&self, corpus: &Corpus) -> Result<ScoreReport> {
        let start = Instant::now();

        info!(
            "Scoring {} samples with {} scorers ({:?} variant)",
            corpus.len(),
            self.scorers.len(),
            self.variant
        );

        // Step 1: Freeze the vocabulary
        let vocabulary = Arc::new(Vocabulary::build(corpus));

        // Step 2: Score samples, preserving corpus order
        let samples: Vec<ScoredSample> = stream::iter(corpus.samples())
            .map(|sample| {
                let vocabulary = Arc::clone(&vocabulary);
                async move {
                    let record = self.score_sample(&sample, &vocabulary).await;
                    ScoredSample {
                        subject: sample.subject,
                        variable: sample.variable,
                        sentence: sample.sentence,
                        record,
                    }
                }
            })
            .buffered(self.max_concurrent_samples)
            .collect()
            .await;

        let stats = ScoreStats {
            samples_scored: samples.len(),
            subjects: vocabulary.subject_count(),
            variables: vocabulary.variable_count(),
            scoring_time_ms: start.elapsed().as_millis() as u64,
        };

        info!(
            "Scoring complete: {} samples in {}ms",
            stats.samples_scored, stats.scoring_time_ms
        );

        Ok(ScoreReport {
            variant: self.variant,
            samples,
            stats,
        })
    }

    /// Run every scorer on one sample and aggregate
    pub async fn score_sample(&self, sample: &Sample, vocabulary: &Vocabulary) -> ScoreRecord {
        let tokens = tokenize(&sample.sentence);
        let input = ScoringInput {
            subject: &sample.subject,
            variable: &sample.variable,
            tokens: &tokens,
            vocabulary,
        };

        let results = futures::future::join_all(
            self.scorers
                .iter()
                .map(|scorer| async move { (scorer.kind(), scorer.score(&input).await) }),
        )
        .await;

        let mut record = ScoreRecord {
            scores: results.into_iter().collect(),
            total: 0,
        };
        record.total = self.weights.total(&record);

        debug!(
            "Scored {}/{}: {:?} total={}",
            sample.subject, sample.variable, record.scores, record.total
        );

        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup::{MockFrequencyService, MockSearchService};

    fn engine(variant: ScoringVariant) -> SharedScoringEngine {
        ScoringEngine::with_services(
            Arc::new(MockFrequencyService::default()),
            Arc::new(MockSearchService::new()),
            variant,
            2,
        )
    }

    #[test]
    fn test_kinds_per_variant() {
        assert_eq!(engine(ScoringVariant::Basic).kinds(), ScoreKind::ALL[..4].to_vec());
        assert_eq!(engine(ScoringVariant::Extended).kinds(), ScoreKind::ALL.to_vec());
    }

    #[tokio::test]
    async fn test_score_corpus_preserves_order() {
        let corpus = Corpus::from_samples(vec![
            Sample::new("P1", "Q1", "eins zwei"),
            Sample::new("P2", "Q1", "drei vier"),
            Sample::new("P1", "Q2", "fünf sechs"),
        ]);
        let report = engine(ScoringVariant::Basic).score_corpus(&corpus).await.unwrap();
        let keys: Vec<(&str, &str)> = report
            .samples
            .iter()
            .map(|s| (s.subject.as_str(), s.variable.as_str()))
            .collect();
        assert_eq!(keys, vec![("P1", "Q1"), ("P1", "Q2"), ("P2", "Q1")]);
        assert_eq!(report.stats.samples_scored, 3);
        assert_eq!(report.stats.subjects, 2);
        assert_eq!(report.stats.variables, 2);
    }

    #[tokio::test]
    async fn test_unreachable_services_score_zero_novelty() {
        let corpus = Corpus::from_samples(vec![Sample::new("P1", "Q1", "der hund rennt schnell")]);
        let report = engine(ScoringVariant::Extended).score_corpus(&corpus).await.unwrap();
        let record = &report.samples[0].record;
        assert_eq!(record.get(ScoreKind::WordNovelty), Some(0));
        assert_eq!(record.get(ScoreKind::ContextNovelty), Some(0));
        assert_eq!(record.scores.len(), 6);
    }
}
