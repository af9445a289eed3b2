use std::fs;

use anyhow::{Context, Result};

use super::parse::parse_records;
use super::records::TweetDataset;

pub fn load_dataset(path: &str) -> Result<TweetDataset> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read tweet dataset at {path}"))?;

    let (records, skipped) = parse_records(&raw)
        .with_context(|| format!("failed to parse tweet dataset at {path}"))?;

    if skipped > 0 {
        log::warn!("{path}: skipped {skipped} entries with missing or unusable fields");
    }
    log::info!("{path}: loaded {} tweet records", records.len());

    Ok(TweetDataset {
        source: path.to_string(),
        records,
        skipped,
    })
}
