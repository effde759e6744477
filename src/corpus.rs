//! Corpus loading: `subject;variable;sentence` rows into an in-memory sample table

use crate::error::{CorpusError, CorpusResult};
use crate::types::{Sample, SampleKey};
use std::collections::HashMap;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const CORPUS_DELIMITER: u8 = b';';
pub const CORPUS_EXTENSION: &str = "csv";
const COLUMNS: usize = 3;

/// Sample table keyed by (subject, variable).
///
/// Iteration is grouped by subject in first-seen order, then by variable in
/// first-seen order within that subject. Re-inserting an existing key
/// replaces the sentence but keeps its position.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    subjects: Vec<String>,
    rows: HashMap<String, Vec<(String, String)>>,
    index: HashMap<SampleKey, usize>,
}

impl Corpus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a corpus from samples, applying the overwrite rule in order
    pub fn from_samples(samples: impl IntoIterator<Item = Sample>) -> Self {
        let mut corpus = Self::new();
        for sample in samples {
            corpus.insert(sample);
        }
        corpus
    }

    /// Load `<base>.csv` (header row, `;`-delimited)
    pub fn load(base: impl AsRef<Path>) -> CorpusResult<Self> {
        let mut path = base.as_ref().as_os_str().to_owned();
        path.push(".");
        path.push(CORPUS_EXTENSION);
        let path = PathBuf::from(path);
        let file = std::fs::File::open(&path).map_err(|source| CorpusError::Open {
            path: path.clone(),
            source,
        })?;
        let corpus = Self::from_reader(file)?;
        info!(
            "Loaded {} samples ({} subjects) from {}",
            corpus.len(),
            corpus.subjects.len(),
            path.display()
        );
        Ok(corpus)
    }

    /// Parse delimited text. Any row without exactly three columns fails the load.
    pub fn from_reader<R: Read>(reader: R) -> CorpusResult<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(CORPUS_DELIMITER)
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let mut corpus = Self::new();
        for record in rdr.records() {
            let record = record?;
            if record.len() != COLUMNS {
                return Err(CorpusError::MalformedRow {
                    line: record.position().map(|p| p.line()).unwrap_or(0),
                    expected: COLUMNS,
                    found: record.len(),
                });
            }
            corpus.insert(Sample::new(&record[0], &record[1], &record[2]));
        }

        if corpus.is_empty() {
            return Err(CorpusError::Empty);
        }
        Ok(corpus)
    }

    pub fn insert(&mut self, sample: Sample) {
        let key = sample.key();
        if let Some(&pos) = self.index.get(&key) {
            debug!(
                "Duplicate sample for subject={} variable={}, keeping latest",
                key.subject, key.variable
            );
            if let Some(rows) = self.rows.get_mut(&sample.subject) {
                rows[pos].1 = sample.sentence;
            }
            return;
        }

        if !self.rows.contains_key(&sample.subject) {
            self.subjects.push(sample.subject.clone());
        }
        let rows = self.rows.entry(sample.subject.clone()).or_default();
        self.index.insert(key, rows.len());
        rows.push((sample.variable, sample.sentence));
    }

    pub fn get(&self, subject: &str, variable: &str) -> Option<&str> {
        let pos = *self.index.get(&SampleKey::new(subject, variable))?;
        self.rows
            .get(subject)
            .map(|rows| rows[pos].1.as_str())
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn subject_count(&self) -> usize {
        self.subjects.len()
    }

    /// Samples in scoring order
    pub fn samples(&self) -> impl Iterator<Item = Sample> + '_ {
        self.subjects.iter().flat_map(move |subject| {
            self.rows
                .get(subject)
                .into_iter()
                .flatten()
                .map(move |(variable, sentence)| Sample::new(subject, variable, sentence))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DATA: &str = "subject;variable;sentence\n\
                        P1;Q1;Der Hund rennt schnell.\n\
                        P2;Q1;Die Katze schläft\n\
                        P1;Q2;Ein Baum wächst\n";

    #[test]
    fn test_from_reader_groups_by_subject() {
        let corpus = Corpus::from_reader(DATA.as_bytes()).unwrap();
        assert_eq!(corpus.len(), 3);
        assert_eq!(corpus.subject_count(), 2);

        let order: Vec<(String, String)> = corpus
            .samples()
            .map(|s| (s.subject, s.variable))
            .collect();
        assert_eq!(
            order,
            vec![
                ("P1".to_string(), "Q1".to_string()),
                ("P1".to_string(), "Q2".to_string()),
                ("P2".to_string(), "Q1".to_string()),
            ]
        );
    }

    #[test]
    fn test_duplicate_key_overwrites_in_place() {
        let data = "s;v;t\nP1;Q1;first\nP1;Q2;other\nP1;Q1;second\n";
        let corpus = Corpus::from_reader(data.as_bytes()).unwrap();
        assert_eq!(corpus.len(), 2);
        assert_eq!(corpus.get("P1", "Q1"), Some("second"));
        let first = corpus.samples().next().unwrap();
        assert_eq!(first.sentence, "second");
    }

    #[test]
    fn test_malformed_row_fails_fast() {
        let data = "s;v;t\nP1;Q1;fine\nP2;Q1\n";
        let err = Corpus::from_reader(data.as_bytes()).unwrap_err();
        match err {
            CorpusError::MalformedRow { line, expected, found } => {
                assert_eq!(line, 3);
                assert_eq!(expected, 3);
                assert_eq!(found, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_header_only_is_empty() {
        let err = Corpus::from_reader("s;v;t\n".as_bytes()).unwrap_err();
        assert!(matches!(err, CorpusError::Empty));
    }

    #[test]
    fn test_quoted_sentence_with_delimiter() {
        let data = "s;v;t\nP1;Q1;\"Ja; nein, vielleicht\"\n";
        let corpus = Corpus::from_reader(data.as_bytes()).unwrap();
        assert_eq!(corpus.get("P1", "Q1"), Some("Ja; nein, vielleicht"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Corpus::load("/nonexistent/dir/data").unwrap_err();
        assert!(matches!(err, CorpusError::Open { .. }));
    }
}
