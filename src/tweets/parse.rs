use anyhow::{Context, Result, anyhow};
use serde::Deserialize;
use serde_json::Value;

use super::records::TweetRecord;

/// Wire shape of one tweet entry. Field names follow the upstream dataset;
/// everything is optional so one bad entry never sinks the whole file.
#[derive(Clone, Debug, Deserialize)]
struct RawTweet {
    #[serde(default)]
    id: Option<Value>,
    #[serde(default, rename = "Month")]
    month: Option<String>,
    #[serde(default, rename = "Sentiment")]
    sentiment: Option<f32>,
    #[serde(default, rename = "Subjectivity")]
    subjectivity: Option<f32>,
    #[serde(default, rename = "Text", alias = "RawTweet")]
    text: Option<String>,
}

pub(super) fn parse_records(raw: &str) -> Result<(Vec<TweetRecord>, usize)> {
    let parsed: Value = serde_json::from_str(raw).context("invalid JSON in tweet dataset")?;
    let entries = parsed
        .as_array()
        .ok_or_else(|| anyhow!("expected a top-level JSON array of tweet entries"))?;

    let mut records = Vec::with_capacity(entries.len());
    let mut skipped = 0usize;

    for (position, entry) in entries.iter().enumerate() {
        match normalize_entry(entry, position) {
            Some(record) => records.push(record),
            None => skipped += 1,
        }
    }

    Ok((records, skipped))
}

/// Returns None when the entry is unusable for layout or coloring. A missing
/// `Text` keeps the record with an empty string; a missing id falls back to
/// a '#'-prefixed entry position, which is stable for a given input file.
fn normalize_entry(entry: &Value, position: usize) -> Option<TweetRecord> {
    let raw = RawTweet::deserialize(entry).ok()?;

    let month = raw
        .month
        .map(|month| month.trim().to_string())
        .filter(|month| !month.is_empty())?;
    let sentiment = raw.sentiment.filter(|value| value.is_finite())?;
    let subjectivity = raw.subjectivity.filter(|value| value.is_finite())?;

    Some(TweetRecord {
        id: record_identity(raw.id.as_ref(), position),
        month,
        sentiment,
        subjectivity,
        text: raw.text.unwrap_or_default(),
    })
}

fn record_identity(raw_id: Option<&Value>, position: usize) -> String {
    match raw_id {
        Some(Value::String(id)) if !id.is_empty() => id.clone(),
        Some(Value::Number(id)) => id.to_string(),
        // The '#' keeps a positional id distinct from any explicit numeric id
        // elsewhere in the file.
        _ => format!("#{position}"),
    }
}
