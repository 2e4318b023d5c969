//! Run reports written next to the session log.
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use runtime::RunSummary;

/// File name of the JSON summary inside the session directory.
pub const SUMMARY_FILE: &str = "summary.json";

/// Writes the run summary as pretty-printed JSON.
pub fn write_summary(path: &Path, summary: &RunSummary) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create summary file {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, summary)
        .with_context(|| format!("Failed to write summary to {}", path.display()))?;
    writer
        .flush()
        .with_context(|| format!("Failed to flush summary to {}", path.display()))
}
