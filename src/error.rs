//! Error types for corpus ingestion

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CorpusError {
    #[error("Failed to open corpus file {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to read corpus: {0}")]
    Read(#[from] csv::Error),
    #[error("Malformed row at line {line}: expected {expected} columns, found {found}")]
    MalformedRow {
        line: u64,
        expected: usize,
        found: usize,
    },
    #[error("Corpus contains no samples")]
    Empty,
}

pub type CorpusResult<T> = Result<T, CorpusError>;
