//! Per-subject and per-variable vocabulary tables with global bounds

use crate::corpus::Corpus;
use crate::text::tokenize;
use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

/// Word → relative frequency for one subject or one variable.
///
/// Values are raw counts divided by the table's vocabulary size (number of
/// distinct words), so they are only meaningful relative to the global bounds.
#[derive(Debug, Clone, Default, Serialize)]
pub struct VocabularyTable {
    frequencies: HashMap<String, f64>,
}

impl VocabularyTable {
    pub fn frequency(&self, word: &str) -> Option<f64> {
        self.frequencies.get(word).copied()
    }

    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }

    fn from_counts(counts: HashMap<String, usize>) -> Self {
        let size = counts.len() as f64;
        let frequencies = counts
            .into_iter()
            .map(|(word, count)| (word, count as f64 / size))
            .collect();
        Self { frequencies }
    }

    fn min(&self) -> Option<f64> {
        self.frequencies.values().copied().reduce(f64::min)
    }

    fn max(&self) -> Option<f64> {
        self.frequencies.values().copied().reduce(f64::max)
    }
}

/// Min/max frequency over every entry of every table of one kind
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FrequencyBounds {
    pub min: f64,
    pub max: f64,
}

impl FrequencyBounds {
    fn over<'a>(tables: impl Iterator<Item = &'a VocabularyTable>) -> Self {
        tables.fold(
            Self {
                min: f64::INFINITY,
                max: f64::NEG_INFINITY,
            },
            |bounds, table| Self {
                min: table.min().map_or(bounds.min, |m| bounds.min.min(m)),
                max: table.max().map_or(bounds.max, |m| bounds.max.max(m)),
            },
        )
    }

    /// Map `value` to `1 - (value - min) / (max - min)`.
    ///
    /// Returns `None` when the bounds are degenerate (no spread or no entries).
    pub fn inverse_normalize(&self, value: f64) -> Option<f64> {
        let spread = self.max - self.min;
        if !spread.is_finite() || spread <= f64::EPSILON {
            return None;
        }
        Some(1.0 - (value - self.min) / spread)
    }
}

/// Immutable vocabulary snapshot shared by all scorers
#[derive(Debug, Clone, Serialize)]
pub struct Vocabulary {
    subjects: HashMap<String, VocabularyTable>,
    variables: HashMap<String, VocabularyTable>,
    subject_bounds: FrequencyBounds,
    variable_bounds: FrequencyBounds,
}

impl Vocabulary {
    /// Count every token of every sample into its subject and variable table,
    /// normalize by vocabulary size, then compute bounds per table kind.
    pub fn build(corpus: &Corpus) -> Self {
        let mut subject_counts: HashMap<String, HashMap<String, usize>> = HashMap::new();
        let mut variable_counts: HashMap<String, HashMap<String, usize>> = HashMap::new();

        for sample in corpus.samples() {
            let subject = subject_counts.entry(sample.subject).or_default();
            let variable = variable_counts.entry(sample.variable).or_default();
            for word in tokenize(&sample.sentence) {
                *subject.entry(word.clone()).or_insert(0) += 1;
                *variable.entry(word).or_insert(0) += 1;
            }
        }

        let subjects: HashMap<String, VocabularyTable> = subject_counts
            .into_iter()
            .map(|(id, counts)| (id, VocabularyTable::from_counts(counts)))
            .collect();
        let variables: HashMap<String, VocabularyTable> = variable_counts
            .into_iter()
            .map(|(id, counts)| (id, VocabularyTable::from_counts(counts)))
            .collect();

        let subject_bounds = FrequencyBounds::over(subjects.values());
        let variable_bounds = FrequencyBounds::over(variables.values());

        debug!(
            "Vocabulary built: {} subject tables [{:.4}, {:.4}], {} variable tables [{:.4}, {:.4}]",
            subjects.len(),
            subject_bounds.min,
            subject_bounds.max,
            variables.len(),
            variable_bounds.min,
            variable_bounds.max
        );

        Self {
            subjects,
            variables,
            subject_bounds,
            variable_bounds,
        }
    }

    pub fn subject(&self, subject: &str) -> Option<&VocabularyTable> {
        self.subjects.get(subject)
    }

    pub fn variable(&self, variable: &str) -> Option<&VocabularyTable> {
        self.variables.get(variable)
    }

    pub fn subject_bounds(&self) -> FrequencyBounds {
        self.subject_bounds
    }

    pub fn variable_bounds(&self) -> FrequencyBounds {
        self.variable_bounds
    }

    pub fn subject_count(&self) -> usize {
        self.subjects.len()
    }

    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Sample;

    fn corpus() -> Corpus {
        Corpus::from_samples(vec![
            Sample::new("P1", "Q1", "der hund der katze"),
            Sample::new("P1", "Q2", "ein baum"),
            Sample::new("P2", "Q1", "die katze"),
        ])
    }

    #[test]
    fn test_frequencies_divide_by_vocabulary_size() {
        let vocab = Vocabulary::build(&corpus());

        // P1: der×2, hund, katze, ein, baum → 5 distinct words
        let p1 = vocab.subject("P1").unwrap();
        assert_eq!(p1.len(), 5);
        assert!((p1.frequency("der").unwrap() - 0.4).abs() < 1e-12);
        assert!((p1.frequency("baum").unwrap() - 0.2).abs() < 1e-12);

        // Q1: der×2, hund, katze×2, die → 4 distinct words
        let q1 = vocab.variable("Q1").unwrap();
        assert!((q1.frequency("katze").unwrap() - 0.5).abs() < 1e-12);
        assert!((q1.frequency("die").unwrap() - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_global_bounds_per_kind() {
        let vocab = Vocabulary::build(&corpus());

        // subject tables: P1 {0.4, 0.2}, P2 {0.5}
        let sb = vocab.subject_bounds();
        assert!((sb.min - 0.2).abs() < 1e-12);
        assert!((sb.max - 0.5).abs() < 1e-12);

        // variable tables: Q1 {0.5, 0.25}, Q2 {0.5}
        let vb = vocab.variable_bounds();
        assert!((vb.min - 0.25).abs() < 1e-12);
        assert!((vb.max - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_frequency_monotonic_in_count() {
        let vocab = Vocabulary::build(&Corpus::from_samples(vec![Sample::new(
            "P1",
            "Q1",
            "a a a b b c d e f g",
        )]));
        let table = vocab.subject("P1").unwrap();
        let a = table.frequency("a").unwrap();
        let b = table.frequency("b").unwrap();
        let c = table.frequency("c").unwrap();
        assert!(a > b && b > c);
        assert!(a <= 1.0);
    }

    #[test]
    fn test_degenerate_bounds() {
        let vocab = Vocabulary::build(&Corpus::from_samples(vec![Sample::new(
            "P1",
            "Q1",
            "eins zwei drei",
        )]));
        assert_eq!(vocab.subject_bounds().inverse_normalize(0.25), None);
    }

    #[test]
    fn test_inverse_normalize() {
        let bounds = FrequencyBounds { min: 0.2, max: 0.6 };
        assert!((bounds.inverse_normalize(0.2).unwrap() - 1.0).abs() < 1e-12);
        assert!((bounds.inverse_normalize(0.6).unwrap() - 0.0).abs() < 1e-12);
        assert!((bounds.inverse_normalize(0.4).unwrap() - 0.5).abs() < 1e-12);
    }
}
