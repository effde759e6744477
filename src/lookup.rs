//! Narrow interfaces to the remote lookup services

use async_trait::async_trait;
use std::collections::HashMap;

/// Outcome of a single remote query.
///
/// Only `Found` contributes to a score; `NotFound` and `Failed` both
/// contribute 0 but are kept apart so callers can log them differently.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupOutcome<T> {
    Found(T),
    NotFound,
    Failed(String),
}

/// Result count reported by the search service for a successful query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchHits {
    Counted(u64),
    /// The search succeeded but reported no total
    Uncounted,
}

/// How two words are combined inside a context query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JoinOperator {
    /// Adjacent words
    And,
    /// Words with a gap between them
    Or,
}

impl JoinOperator {
    pub fn symbol(&self) -> char {
        match self {
            JoinOperator::And => '+',
            JoinOperator::Or => '*',
        }
    }
}

/// Two-word phrase query sent to the search service
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContextQuery {
    pub first: String,
    pub second: String,
    pub operator: JoinOperator,
}

impl ContextQuery {
    pub fn new(first: impl Into<String>, second: impl Into<String>, operator: JoinOperator) -> Self {
        Self {
            first: first.into(),
            second: second.into(),
            operator,
        }
    }

    /// Quoted phrase, e.g. `"der + hund"`
    pub fn phrase(&self) -> String {
        format!("\"{} {} {}\"", self.first, self.operator.symbol(), self.second)
    }
}

/// Word-frequency lookup (frequency class of a word form)
#[async_trait]
pub trait FrequencyService: Send + Sync {
    fn name(&self) -> &'static str;

    async fn frequency_class(&self, word: &str) -> LookupOutcome<u32>;
}

/// Web-search result-count lookup
#[async_trait]
pub trait SearchService: Send + Sync {
    fn name(&self) -> &'static str;

    async fn result_count(&self, query: &ContextQuery) -> LookupOutcome<SearchHits>;
}

/// In-memory frequency service for testing
#[derive(Debug, Clone, Default)]
pub struct MockFrequencyService {
    classes: HashMap<String, u32>,
    failing: Vec<String>,
}

impl MockFrequencyService {
    pub fn new<I, W>(classes: I) -> Self
    where
        I: IntoIterator<Item = (W, u32)>,
        W: Into<String>,
    {
        Self {
            classes: classes.into_iter().map(|(w, c)| (w.into(), c)).collect(),
            failing: Vec::new(),
        }
    }

    /// Make lookups of `word` fail as if the request errored
    pub fn with_failure(mut self, word: impl Into<String>) -> Self {
        self.failing.push(word.into());
        self
    }
}

#[async_trait]
impl FrequencyService for MockFrequencyService {
    fn name(&self) -> &'static str {
        "mock_frequency"
    }

    async fn frequency_class(&self, word: &str) -> LookupOutcome<u32> {
        if self.failing.iter().any(|w| w == word) {
            return LookupOutcome::Failed(format!("mock failure for {word}"));
        }
        match self.classes.get(word) {
            Some(&class) => LookupOutcome::Found(class),
            None => LookupOutcome::NotFound,
        }
    }
}

/// In-memory search service for testing, keyed by the quoted phrase
#[derive(Debug, Clone, Default)]
pub struct MockSearchService {
    responses: HashMap<String, LookupOutcome<SearchHits>>,
}

impl MockSearchService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_count(mut self, phrase: impl Into<String>, count: u64) -> Self {
        self.responses
            .insert(phrase.into(), LookupOutcome::Found(SearchHits::Counted(count)));
        self
    }

    pub fn with_response(
        mut self,
        phrase: impl Into<String>,
        outcome: LookupOutcome<SearchHits>,
    ) -> Self {
        self.responses.insert(phrase.into(), outcome);
        self
    }
}

#[async_trait]
impl SearchService for MockSearchService {
    fn name(&self) -> &'static str {
        "mock_search"
    }

    async fn result_count(&self, query: &ContextQuery) -> LookupOutcome<SearchHits> {
        self.responses
            .get(&query.phrase())
            .cloned()
            .unwrap_or_else(|| LookupOutcome::Failed(format!("no mock response for {}", query.phrase())))
    }
}
