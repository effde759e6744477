//! Participant and sentence similarity scorers.
//!
//! Both are inverse-familiarity measures: a sentence made of words its
//! subject (or its question) uses often scores low, one made of words that
//! are rare for the subject/question scores high.

use crate::scoring::{round_score, ScoringInput, SentenceScorer, MAX_SCORE};
use crate::types::ScoreKind;
use crate::vocabulary::{FrequencyBounds, VocabularyTable};
use async_trait::async_trait;
use tracing::debug;

/// Fixed divisor for the summed relative frequencies
pub const SIMILARITY_DIVISOR: f64 = 4.0;

/// Which vocabulary table a similarity score is computed against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimilarityScope {
    /// The answering subject's own vocabulary
    Participant,
    /// The vocabulary of all answers to the same question
    Sentence,
}

/// Inverse-familiarity score of `tokens` against one table.
///
/// Not clamped: sentences longer than the divisor assumes can fall outside
/// `[0, 20]`. Degenerate bounds yield 0.
pub fn inverse_familiarity(tokens: &[String], table: Option<&VocabularyTable>, bounds: FrequencyBounds) -> i64 {
    let sum: f64 = tokens
        .iter()
        .map(|word| table.and_then(|t| t.frequency(word)).unwrap_or(0.0))
        .sum();
    match bounds.inverse_normalize(sum / SIMILARITY_DIVISOR) {
        Some(normalized) => round_score(normalized * MAX_SCORE as f64),
        None => 0,
    }
}

pub struct SimilarityScorer {
    scope: SimilarityScope,
}

impl SimilarityScorer {
    pub fn new(scope: SimilarityScope) -> Self {
        Self { scope }
    }

    pub fn participant() -> Self {
        Self::new(SimilarityScope::Participant)
    }

    pub fn sentence() -> Self {
        Self::new(SimilarityScope::Sentence)
    }
}

#[async_trait]
impl SentenceScorer for SimilarityScorer {
    fn kind(&self) -> ScoreKind {
        match self.scope {
            SimilarityScope::Participant => ScoreKind::ParticipantSimilarity,
            SimilarityScope::Sentence => ScoreKind::SentenceSimilarity,
        }
    }

    async fn score(&self, input: &ScoringInput<'_>) -> i64 {
        let vocab = input.vocabulary;
        let (table, bounds) = match self.scope {
            SimilarityScope::Participant => (vocab.subject(input.subject), vocab.subject_bounds()),
            SimilarityScope::Sentence => (vocab.variable(input.variable), vocab.variable_bounds()),
        };
        let score = inverse_familiarity(input.tokens, table, bounds);
        debug!("{}: {}", self.kind(), score);
        score
    }
}
