//! Stats command - describe a track table

use super::load_prepared;
use crate::config::ProjectConfig;
use crate::models::Label;
use anyhow::Result;
use console::style;
use std::path::Path;

/// Run the stats command
pub fn run(csv: &Path, config: &ProjectConfig) -> Result<()> {
    let (dataset, prepared) = load_prepared(csv, config)?;

    println!("\n{}", style(csv.display()).bold());
    println!("  Rows read:       {}", dataset.rows_read);
    println!("  Tracks kept:     {}", style(dataset.len()).green());
    println!("  Missing fields:  {}", dataset.dropped_missing);
    println!("  Duplicates:      {}", dataset.dropped_duplicate);

    let counts = dataset.class_counts();
    println!("\n{}", style("Class balance").bold());
    for label in Label::ALL {
        let count = counts[label.index()];
        let share = if dataset.is_empty() {
            0.0
        } else {
            100.0 * count as f64 / dataset.len() as f64
        };
        println!("  {:<14} {:>8}  ({:.1}%)", label.to_string(), count, share);
    }

    let tokens: usize = prepared
        .normalized
        .iter()
        .map(|text| text.split_whitespace().count())
        .sum();
    let empty = prepared.normalized.iter().filter(|t| t.is_empty()).count();
    println!("\n{}", style("Vocabulary").bold());
    println!("  Distinct tokens: {}", prepared.vocabulary.len());
    println!("  Total tokens:    {}", tokens);
    if empty > 0 {
        println!(
            "  {} {} track(s) have no tokens after normalization",
            style("!").yellow(),
            empty
        );
    }
    Ok(())
}
