//! Core type definitions for survey sentence scoring

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Identifies one sample: a subject's answer to a variable (question)
#[derive(Debug, Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub struct SampleKey {
    pub subject: String,
    pub variable: String,
}

impl SampleKey {
    pub fn new(subject: impl Into<String>, variable: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            variable: variable.into(),
        }
    }
}

/// One raw survey answer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub subject: String,
    pub variable: String,
    pub sentence: String,
}

impl Sample {
    pub fn new(
        subject: impl Into<String>,
        variable: impl Into<String>,
        sentence: impl Into<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            variable: variable.into(),
            sentence: sentence.into(),
        }
    }

    pub fn key(&self) -> SampleKey {
        SampleKey::new(self.subject.clone(), self.variable.clone())
    }
}

/// Kinds of sub-scores, in output column order
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreKind {
    WordNovelty,
    ContextNovelty,
    ParticipantSimilarity,
    SentenceSimilarity,
    Rhythmic,
    Phonetic,
}

impl ScoreKind {
    pub const ALL: [ScoreKind; 6] = [
        ScoreKind::WordNovelty,
        ScoreKind::ContextNovelty,
        ScoreKind::ParticipantSimilarity,
        ScoreKind::SentenceSimilarity,
        ScoreKind::Rhythmic,
        ScoreKind::Phonetic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreKind::WordNovelty => "word_novelty",
            ScoreKind::ContextNovelty => "context_novelty",
            ScoreKind::ParticipantSimilarity => "participant_similarity",
            ScoreKind::SentenceSimilarity => "sentence_similarity",
            ScoreKind::Rhythmic => "rhythmic",
            ScoreKind::Phonetic => "phonetic",
        }
    }
}

impl fmt::Display for ScoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which scorers take part in a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ScoringVariant {
    /// Word/context novelty plus participant/sentence similarity
    Basic,
    /// Basic plus rhythmic and phonetic scores
    #[default]
    Extended,
}

impl ScoringVariant {
    pub fn kinds(&self) -> &'static [ScoreKind] {
        match self {
            ScoringVariant::Basic => &[
                ScoreKind::WordNovelty,
                ScoreKind::ContextNovelty,
                ScoreKind::ParticipantSimilarity,
                ScoreKind::SentenceSimilarity,
            ],
            ScoringVariant::Extended => &ScoreKind::ALL,
        }
    }
}

/// Sub-scores and total for one sample
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScoreRecord {
    pub scores: BTreeMap<ScoreKind, i64>,
    pub total: i64,
}

impl ScoreRecord {
    pub fn get(&self, kind: ScoreKind) -> Option<i64> {
        self.scores.get(&kind).copied()
    }
}

/// A sample together with its scores
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredSample {
    pub subject: String,
    pub variable: String,
    pub sentence: String,
    #[serde(flatten)]
    pub record: ScoreRecord,
}

/// Result of scoring a whole corpus
#[derive(Debug, Clone, Serialize)]
pub struct ScoreReport {
    pub variant: ScoringVariant,
    pub samples: Vec<ScoredSample>,
    pub stats: ScoreStats,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScoreStats {
    pub samples_scored: usize,
    pub subjects: usize,
    pub variables: usize,
    pub scoring_time_ms: u64,
}
