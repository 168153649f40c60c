use std::{
    fs::File,
    io::{BufReader, BufWriter},
    path::Path,
};

use anyhow::Context as _;

use crate::{
    foundation::error::{SynthError, SynthResult},
    labels::record::SequenceLabels,
};

/// Write a sequence's labels as pretty-printed JSON.
pub fn write_labels(path: &Path, labels: &SequenceLabels) -> SynthResult<()> {
    let f = File::create(path)
        .with_context(|| format!("create labels file '{}'", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(f), labels)
        .map_err(|e| SynthError::serde(format!("write labels '{}': {e}", path.display())))
}

pub fn read_labels(path: &Path) -> SynthResult<SequenceLabels> {
    let f = File::open(path).with_context(|| format!("open labels file '{}'", path.display()))?;
    serde_json::from_reader(BufReader::new(f))
        .map_err(|e| SynthError::serde(format!("parse labels '{}': {e}", path.display())))
}

#[cfg(test)]
#[path = "../../tests/unit/labels/io.rs"]
mod tests;
