//! Phonetic similarity scorer: pairwise edit distance and longest common
//! substring over the Cologne codes of all tokens

use crate::phonetics::encode_tokens;
use crate::scoring::{bounded_score, ScoringInput, SentenceScorer, MAX_SCORE};
use crate::types::ScoreKind;
use async_trait::async_trait;
use tracing::debug;

/// Levenshtein distance over chars
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev_row: Vec<usize> = (0..=b.len()).collect();
    let mut curr_row = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr_row[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = if ca == cb { 0 } else { 1 };
            curr_row[j + 1] = (prev_row[j + 1] + 1)
                .min(curr_row[j] + 1)
                .min(prev_row[j] + cost);
        }
        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[b.len()]
}

/// Length of the longest common substring
pub fn longest_common_substring(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let mut prev = vec![0usize; b.len() + 1];
    let mut best = 0;

    for ca in &a {
        let mut curr = vec![0usize; b.len() + 1];
        for (j, cb) in b.iter().enumerate() {
            if ca == cb {
                curr[j + 1] = prev[j] + 1;
                best = best.max(curr[j + 1]);
            }
        }
        prev = curr;
    }
    best
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

/// `0.5 * (1 - avg distance ratio) * 20 + 0.5 * avg substring ratio * 20`.
///
/// Distances are normalized by the longer code, substrings by the shorter.
/// Sentences with fewer than two tokens score 0; a pair whose codes are
/// empty contributes 0 to the ratio it cannot normalize.
pub fn phonetic_similarity(tokens: &[String]) -> i64 {
    let encoded = encode_tokens(tokens);
    let mut pairs = 0usize;
    let mut distance_sum = 0.0;
    let mut substring_sum = 0.0;

    for (i, a) in encoded.iter().enumerate() {
        for b in &encoded[i + 1..] {
            let len_a = a.code.chars().count();
            let len_b = b.code.chars().count();
            distance_sum += ratio(levenshtein(&a.code, &b.code), len_a.max(len_b));
            substring_sum += ratio(longest_common_substring(&a.code, &b.code), len_a.min(len_b));
            pairs += 1;
        }
    }

    if pairs == 0 {
        return 0;
    }

    let avg_distance = distance_sum / pairs as f64;
    let avg_substring = substring_sum / pairs as f64;
    let max = MAX_SCORE as f64;
    bounded_score(0.5 * (1.0 - avg_distance) * max + 0.5 * avg_substring * max)
}

pub struct PhoneticSimilarityScorer;

#[async_trait]
impl SentenceScorer for PhoneticSimilarityScorer {
    fn kind(&self) -> ScoreKind {
        ScoreKind::Phonetic
    }

    async fn score(&self, input: &ScoringInput<'_>) -> i64 {
        let score = phonetic_similarity(input.tokens);
        debug!("Phonetic similarity: {}", score);
        score
    }
}
