//! Track table loading
//!
//! Reads the lyrics table from CSV. Rows with an empty field, a label that is
//! not boolean-like, or that exactly duplicate an earlier row are dropped.
//! Survivors keep their relative order and are renumbered from zero.

use crate::config::DatasetConfig;
use crate::models::{Label, Track};
use anyhow::{Context, Result};
use csv::{ReaderBuilder, StringRecord};
use rustc_hash::FxHashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

/// Tracks that survived filtering, plus load bookkeeping
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub tracks: Vec<Track>,
    /// Data rows in the file (header excluded)
    pub rows_read: usize,
    /// Rows with an empty or unparsable field
    pub dropped_missing: usize,
    /// Exact repeats of an earlier row
    pub dropped_duplicate: usize,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn labels(&self) -> Vec<Label> {
        self.tracks.iter().map(Track::label).collect()
    }

    /// Number of tracks per class, in `Label::ALL` order
    pub fn class_counts(&self) -> [usize; 2] {
        let mut counts = [0usize; 2];
        for track in &self.tracks {
            counts[track.label().index()] += 1;
        }
        counts
    }
}

/// Load a track table from a CSV file on disk
pub fn load_tracks(path: &Path, columns: &DatasetConfig) -> Result<Dataset> {
    let file =
        File::open(path).with_context(|| format!("Failed to open file: {}", path.display()))?;
    let dataset = read_tracks(file, columns)
        .with_context(|| format!("Failed to read track table: {}", path.display()))?;

    info!(
        "Loaded {} tracks from {} ({} rows read, {} missing, {} duplicate)",
        dataset.len(),
        path.display(),
        dataset.rows_read,
        dataset.dropped_missing,
        dataset.dropped_duplicate
    );

    Ok(dataset)
}

/// Read a track table from any CSV source
pub fn read_tracks<R: Read>(reader: R, columns: &DatasetConfig) -> Result<Dataset> {
    let mut reader = ReaderBuilder::new().flexible(true).from_reader(reader);

    let headers = reader.headers().context("Failed to read CSV header")?.clone();
    let id_idx = column_index(&headers, &columns.id_column)?;
    let lyrics_idx = column_index(&headers, &columns.lyrics_column)?;
    let label_idx = column_index(&headers, &columns.label_column)?;

    let mut dataset = Dataset::default();
    let mut seen: FxHashSet<Vec<String>> = FxHashSet::default();

    for (row, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("Failed to parse CSV row {}", row + 1))?;
        dataset.rows_read += 1;

        if record.len() < headers.len() || record.iter().any(|field| field.trim().is_empty()) {
            dataset.dropped_missing += 1;
            continue;
        }

        let Some(explicit) = parse_flag(&record[label_idx]) else {
            debug!("row {}: unrecognised label {:?}", row + 1, &record[label_idx]);
            dataset.dropped_missing += 1;
            continue;
        };

        let key: Vec<String> = record.iter().map(str::to_string).collect();
        if !seen.insert(key) {
            dataset.dropped_duplicate += 1;
            continue;
        }

        dataset.tracks.push(Track::new(
            &record[id_idx],
            &record[lyrics_idx],
            explicit,
        ));
    }

    Ok(dataset)
}

fn column_index(headers: &StringRecord, name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h.trim() == name)
        .ok_or_else(|| {
            anyhow::anyhow!(
                "Column '{}' not found. Available columns: {}",
                name,
                headers.iter().collect::<Vec<_>>().join(", ")
            )
        })
}

/// Parse a boolean-like cell. Returns `None` for anything unrecognised.
pub fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "t" | "yes" | "y" | "1" => Some(true),
        "false" | "f" | "no" | "n" | "0" => Some(false),
        _ => None,
    }
}
