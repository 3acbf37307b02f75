use naf_core::query::{LongSentence, RankedItem};
use serde::Serialize;
use std::fmt::Write;
use std::path::PathBuf;

/// A scalar answer, always printed with a fractional part (`6.0`, not `6`).
pub fn number(value: f64) -> String {
    format!("{:?}\n", value)
}

pub fn files(paths: &[PathBuf]) -> String {
    let mut out = String::new();
    for path in paths {
        let _ = writeln!(out, "{}", path.display());
    }
    out
}

/// Tab-separated `Rank / <label> / Frequency` table.
pub fn ranked_table(label: &str, rows: &[RankedItem]) -> String {
    let mut out = format!("Rank\t{}\tFrequency\n", label);
    for row in rows {
        let _ = writeln!(out, "{}\t{}\t{}", row.rank, row.item, row.frequency);
    }
    out
}

/// One block per sentence: a header naming rank, length and source, then
/// the sentence text and a blank line.
pub fn longest_sentences(sentences: &[LongSentence]) -> String {
    let mut out = String::new();
    for s in sentences {
        let _ = writeln!(
            out,
            "Rank {}, {} words, from {}:",
            s.rank,
            s.length,
            s.source.display()
        );
        let _ = writeln!(out, "{}\n", s.text);
    }
    out
}

pub fn json<T: Serialize>(value: &T) -> anyhow::Result<String> {
    Ok(format!("{}\n", serde_json::to_string_pretty(value)?))
}
