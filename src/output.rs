//! Rendering scored samples: legacy text lines plus structured exports

use crate::types::*;
use anyhow::{Context, Result};
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// One `"sentence",scores...,total` line per sample
    #[default]
    Text,
    /// Quoted delimited export with a header row
    Csv,
    /// Full report as JSON
    Json,
}

/// Legacy line: quoted sentence, sub-scores in kind order, total.
/// The sentence is not escaped.
pub fn format_line(sample: &ScoredSample) -> String {
    let mut line = format!("\"{}\"", sample.sentence);
    for score in sample.record.scores.values() {
        line.push_str(&format!(",{}", score));
    }
    line.push_str(&format!(",{}", sample.record.total));
    line
}

pub fn write_text<W: Write>(report: &ScoreReport, mut out: W) -> Result<()> {
    for sample in &report.samples {
        writeln!(out, "{}", format_line(sample)).context("Failed to write score line")?;
    }
    Ok(())
}

pub fn write_csv<W: Write>(report: &ScoreReport, out: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);

    let mut header = vec!["subject", "variable", "sentence"];
    header.extend(report.variant.kinds().iter().map(ScoreKind::as_str));
    header.push("total");
    writer.write_record(&header)?;

    for sample in &report.samples {
        let mut row = vec![
            sample.subject.clone(),
            sample.variable.clone(),
            sample.sentence.clone(),
        ];
        row.extend(report.variant.kinds().iter().map(|kind| {
            sample
                .record
                .get(*kind)
                .map(|s| s.to_string())
                .unwrap_or_default()
        }));
        row.push(sample.record.total.to_string());
        writer.write_record(&row)?;
    }

    writer.flush().context("Failed to flush CSV output")?;
    Ok(())
}

pub fn write_json<W: Write>(report: &ScoreReport, mut out: W) -> Result<()> {
    serde_json::to_writer_pretty(&mut out, report).context("Failed to serialize report")?;
    writeln!(out)?;
    Ok(())
}

pub fn write_report<W: Write>(report: &ScoreReport, format: OutputFormat, out: W) -> Result<()> {
    match format {
        OutputFormat::Text => write_text(report, out),
        OutputFormat::Csv => write_csv(report, out),
        OutputFormat::Json => write_json(report, out),
    }
}
