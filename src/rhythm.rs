//! Rhythmic scorer: rhyme chains from shared phonetic suffixes

use crate::phonetics::{encode_tokens, PhoneticWord};
use crate::scoring::{ScoringInput, SentenceScorer, MAX_SCORE};
use crate::types::ScoreKind;
use async_trait::async_trait;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Words that share a validated phonetic suffix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RhymeChain {
    pub words: BTreeSet<String>,
    /// Length of the longest phonetic suffix seen for exactly this word set
    pub rhyme_length: usize,
}

impl RhymeChain {
    pub fn score(&self) -> i64 {
        let length = (self.rhyme_length as i64 * 5 - 5).min(MAX_SCORE);
        let size = ((self.words.len() as i64 - 1) * 5).min(MAX_SCORE);
        length + size
    }
}

/// Final-consonant devoicing on the surface form: trailing `d`→`t`, `s`→`z`
pub fn devoice(word: &str) -> String {
    let mut out = word.to_string();
    match out.pop() {
        Some('d') => out.push('t'),
        Some('s') => out.push('z'),
        Some(other) => out.push(other),
        None => {}
    }
    out
}

/// The surface character right before the last `len` characters must match
fn surface_supports(a: &str, b: &str, len: usize) -> bool {
    match (a.chars().rev().nth(len), b.chars().rev().nth(len)) {
        (Some(x), Some(y)) => x == y,
        _ => false,
    }
}

/// Phonetic suffixes shared by `a` and `b` that the surface forms support.
///
/// Suffix lengths are scanned from 1 upward and the scan stops at the first
/// length where the codes diverge. A length that fails the surface check is
/// not recorded, but the scan continues past it.
pub fn shared_suffixes(a: &PhoneticWord, b: &PhoneticWord) -> Vec<String> {
    let ac: Vec<char> = a.code.chars().collect();
    let bc: Vec<char> = b.code.chars().collect();
    let surface_a = devoice(&a.word);
    let surface_b = devoice(&b.word);

    let mut accepted = Vec::new();
    for len in 1..=ac.len().min(bc.len()) {
        let suffix = &ac[ac.len() - len..];
        if suffix != &bc[bc.len() - len..] {
            break;
        }
        if surface_supports(&surface_a, &surface_b, len) {
            accepted.push(suffix.iter().collect());
        }
    }
    accepted
}

/// Group rhyming words into chains.
///
/// Associations are collected per suffix string across all word pairs; every
/// distinct word set becomes one chain carrying the longest suffix seen for it.
pub fn rhyme_chains(tokens: &[String]) -> Vec<RhymeChain> {
    let mut distinct: Vec<String> = Vec::new();
    for token in tokens {
        if !distinct.contains(token) {
            distinct.push(token.clone());
        }
    }
    let encoded = encode_tokens(&distinct);

    let mut by_suffix: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    for (i, a) in encoded.iter().enumerate() {
        for b in &encoded[i + 1..] {
            for suffix in shared_suffixes(a, b) {
                let words = by_suffix.entry(suffix).or_default();
                words.insert(a.word.clone());
                words.insert(b.word.clone());
            }
        }
    }

    let mut longest: BTreeMap<BTreeSet<String>, usize> = BTreeMap::new();
    for (suffix, words) in by_suffix {
        let length = suffix.chars().count();
        let entry = longest.entry(words).or_insert(0);
        *entry = (*entry).max(length);
    }

    longest
        .into_iter()
        .map(|(words, rhyme_length)| RhymeChain { words, rhyme_length })
        .collect()
}

/// Sum of chain scores, capped at 20
pub fn rhythmic_score(tokens: &[String]) -> i64 {
    let total: i64 = rhyme_chains(tokens).iter().map(RhymeChain::score).sum();
    total.min(MAX_SCORE)
}

pub struct RhythmicScorer;

#[async_trait]
impl SentenceScorer for RhythmicScorer {
    fn kind(&self) -> ScoreKind {
        ScoreKind::Rhythmic
    }

    async fn score(&self, input: &ScoringInput<'_>) -> i64 {
        let score = rhythmic_score(input.tokens);
        debug!("Rhythmic: {}", score);
        score
    }
}
