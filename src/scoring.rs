//! Sub-score plumbing and the weighted total

use crate::types::*;
use crate::vocabulary::Vocabulary;
use async_trait::async_trait;

/// Upper bound of every sub-score and of the total
pub const MAX_SCORE: i64 = 20;

/// Everything a scorer may read for one sample
#[derive(Debug, Clone, Copy)]
pub struct ScoringInput<'a> {
    pub subject: &'a str,
    pub variable: &'a str,
    pub tokens: &'a [String],
    pub vocabulary: &'a Vocabulary,
}

/// Trait for pluggable sub-scorers
#[async_trait]
pub trait SentenceScorer: Send + Sync {
    fn kind(&self) -> ScoreKind;

    async fn score(&self, input: &ScoringInput<'_>) -> i64;
}

/// Round half to even, as the legacy scripts did
pub fn round_score(value: f64) -> i64 {
    if !value.is_finite() {
        return 0;
    }
    value.round_ties_even() as i64
}

/// Round and clamp into `[0, MAX_SCORE]`
pub fn bounded_score(value: f64) -> i64 {
    round_score(value).clamp(0, MAX_SCORE)
}

/// Weights for the total.
///
/// The primary group is rounded on its own, the supplementary group is rounded
/// separately and added, and only the sum is capped at `MAX_SCORE`. With both
/// groups present the nominal weights add up to 1.2, so the cap is what keeps
/// the total in range. There is no floor: negative similarity values pass
/// through.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateWeights {
    pub primary: Vec<(ScoreKind, f64)>,
    pub supplementary: Vec<(ScoreKind, f64)>,
}

impl Default for AggregateWeights {
    fn default() -> Self {
        Self {
            primary: vec![
                (ScoreKind::WordNovelty, 0.4),
                (ScoreKind::ContextNovelty, 0.4),
                (ScoreKind::ParticipantSimilarity, 0.1),
                (ScoreKind::SentenceSimilarity, 0.1),
            ],
            supplementary: vec![(ScoreKind::Rhythmic, 0.1), (ScoreKind::Phonetic, 0.1)],
        }
    }
}

impl AggregateWeights {
    /// Combine the sub-scores present in `record`; missing kinds contribute 0
    pub fn total(&self, record: &ScoreRecord) -> i64 {
        let primary = round_score(weighted_sum(&self.primary, record));
        let supplementary = if self
            .supplementary
            .iter()
            .any(|(kind, _)| record.get(*kind).is_some())
        {
            round_score(weighted_sum(&self.supplementary, record))
        } else {
            0
        };

        (primary + supplementary).min(MAX_SCORE)
    }
}

fn weighted_sum(group: &[(ScoreKind, f64)], record: &ScoreRecord) -> f64 {
    group
        .iter()
        .map(|(kind, weight)| weight * record.get(*kind).unwrap_or(0) as f64)
        .sum()
}
