//! novelscore - survey sentence quality scoring
//!
//! Scores free-text survey answers along several linguistic dimensions and
//! combines them into one bounded score per sentence:
//! - Lexical novelty (word-frequency classes)
//! - Contextual novelty (web result counts for word pairs)
//! - Participant / sentence similarity (inverse familiarity against the corpus)
//! - Rhyme chains and phonetic similarity (Cologne phonetics)

pub mod types;
pub mod error;
pub mod config;
pub mod corpus;
pub mod text;
pub mod vocabulary;
pub mod lookup;
pub mod frequency_client;
pub mod search_client;
pub mod scoring;
pub mod novelty;
pub mod similarity;
pub mod phonetics;
pub mod rhythm;
pub mod phonetic_similarity;
pub mod engine;
pub mod output;
pub mod server;

pub use types::*;
pub use error::{CorpusError, CorpusResult};
pub use config::ScoringConfig;
pub use corpus::Corpus;
pub use vocabulary::{FrequencyBounds, Vocabulary, VocabularyTable};
pub use lookup::{
    ContextQuery, FrequencyService, JoinOperator, LookupOutcome, MockFrequencyService,
    MockSearchService, SearchHits, SearchService,
};
pub use frequency_client::HttpFrequencyService;
pub use search_client::HttpSearchService;
pub use scoring::{AggregateWeights, ScoringInput, SentenceScorer};
pub use engine::{ScoringEngine, SharedScoringEngine};
pub use output::OutputFormat;

#[cfg(test)]
mod tests;
