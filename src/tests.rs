//! End-to-end tests for the scoring pipeline

use crate::output::{format_line, write_report};
use crate::*;
use std::sync::Arc;

/// Frequency classes for "Der Hund rennt schnell"
fn frequency_service() -> MockFrequencyService {
    MockFrequencyService::new([
        ("der", 0),
        ("Der", 1),
        ("Hund", 8),
        ("rennt", 12),
        ("schnell", 9),
        ("Schnell", 20),
    ])
}

/// Result counts for the six context queries of "Der Hund rennt schnell"
fn search_service() -> MockSearchService {
    MockSearchService::new()
        .with_count("\"der + hund\"", 600)
        .with_count("\"hund + rennt\"", 10)
        .with_count("\"rennt + schnell\"", 5_000)
        .with_response("\"der * rennt\"", LookupOutcome::Found(SearchHits::Uncounted))
        .with_response("\"der * schnell\"", LookupOutcome::Failed("timeout".to_string()))
        .with_count("\"hund * schnell\"", 100_000)
}

fn engine(variant: ScoringVariant) -> SharedScoringEngine {
    ScoringEngine::with_services(
        Arc::new(frequency_service()),
        Arc::new(search_service()),
        variant,
        4,
    )
}

fn single_sample() -> Corpus {
    Corpus::from_reader("subject;variable;sentence\nP1;Q1;Der Hund rennt schnell\n".as_bytes()).unwrap()
}

#[tokio::test]
async fn test_end_to_end_hand_computed() {
    let report = engine(ScoringVariant::Extended)
        .score_corpus(&single_sample())
        .await
        .unwrap();
    let record = &report.samples[0].record;

    // der 1, hund 9, rennt 13, schnell 10 → 33 / 4 = 8.25
    assert_eq!(record.get(ScoreKind::WordNovelty), Some(8));
    // 19 + 20 + 16 + 20 + 0 + 12 = 87 → 87 / 6 = 14.5, ties to even
    assert_eq!(record.get(ScoreKind::ContextNovelty), Some(14));
    // single-sentence vocabularies have no spread
    assert_eq!(record.get(ScoreKind::ParticipantSimilarity), Some(0));
    assert_eq!(record.get(ScoreKind::SentenceSimilarity), Some(0));
    // {hund, rennt} share "2": 0 + 5
    assert_eq!(record.get(ScoreKind::Rhythmic), Some(5));
    assert_eq!(record.get(ScoreKind::Phonetic), Some(6));
    // round(3.2 + 5.6) + round(0.5 + 0.6)
    assert_eq!(record.total, 10);

    assert_eq!(
        format_line(&report.samples[0]),
        "\"Der Hund rennt schnell\",8,14,0,0,5,6,10"
    );
}

#[tokio::test]
async fn test_end_to_end_basic_variant() {
    let report = engine(ScoringVariant::Basic)
        .score_corpus(&single_sample())
        .await
        .unwrap();
    let sample = &report.samples[0];
    assert_eq!(sample.record.scores.len(), 4);
    assert_eq!(sample.record.total, 9);
    assert_eq!(format_line(sample), "\"Der Hund rennt schnell\",8,14,0,0,9");
}

#[tokio::test]
async fn test_pipeline_is_idempotent() {
    let data = "subject;variable;sentence\n\
                P1;Q1;Der Hund rennt schnell.\n\
                P1;Q2;Die Katze schläft im Sand\n\
                P2;Q1;Ein Hund und eine Hand\n\
                P2;Q2;Der Wind weht\n";
    let corpus = Corpus::from_reader(data.as_bytes()).unwrap();
    let engine = engine(ScoringVariant::Extended);

    let mut first = Vec::new();
    let mut second = Vec::new();
    let report = engine.score_corpus(&corpus).await.unwrap();
    write_report(&report, OutputFormat::Text, &mut first).unwrap();
    let report = engine.score_corpus(&corpus).await.unwrap();
    write_report(&report, OutputFormat::Text, &mut second).unwrap();

    assert_eq!(first, second);
    assert_eq!(String::from_utf8(first).unwrap().lines().count(), 4);
}

#[tokio::test]
async fn test_scores_within_bounds() {
    let data = "subject;variable;sentence\n\
                P1;Q1;Der Hund rennt schnell\n\
                P1;Q2;Wand Sand Hand Land Band Rand\n\
                P2;Q1;ja\n\
                P2;Q2;!!!\n\
                P3;Q1;Der Hund der Hund der Hund\n";
    let corpus = Corpus::from_reader(data.as_bytes()).unwrap();
    let report = engine(ScoringVariant::Extended).score_corpus(&corpus).await.unwrap();

    for sample in &report.samples {
        for (kind, score) in &sample.record.scores {
            match kind {
                // inverse familiarity is not clamped
                ScoreKind::ParticipantSimilarity | ScoreKind::SentenceSimilarity => {}
                _ => assert!(
                    (0..=20).contains(score),
                    "{} out of range for '{}': {}",
                    kind,
                    sample.sentence,
                    score
                ),
            }
        }
        assert!(sample.record.total <= 20);
    }
}

#[test]
fn test_rhyme_sentence_scores_fifteen() {
    let corpus = Corpus::from_samples(vec![Sample::new("P1", "Q1", "Wand Sand Hand")]);
    let report = tokio_test::block_on(engine(ScoringVariant::Extended).score_corpus(&corpus)).unwrap();
    assert_eq!(report.samples[0].record.get(ScoreKind::Rhythmic), Some(15));
}

#[test]
fn test_empty_sentence_scores_zero() {
    let corpus = Corpus::from_samples(vec![
        Sample::new("P1", "Q1", "..."),
        Sample::new("P1", "Q2", "der hund"),
    ]);
    let report = tokio_test::block_on(engine(ScoringVariant::Extended).score_corpus(&corpus)).unwrap();
    let empty = &report.samples[0].record;
    assert_eq!(empty.scores.len(), 6);
    assert!(empty.scores.values().all(|&s| s == 0));
    assert_eq!(empty.total, 0);
}
