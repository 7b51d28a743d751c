//! Row extraction: header-delimited UTF-8 input into ordered records.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};

/// One input row, keyed by header name.
///
/// Row order follows file order; a cell missing from a short row is
/// simply absent and surfaces as a missing-field error during mapping.
#[derive(Debug, Clone, Default)]
pub struct SourceRecord {
    values: HashMap<String, String>,
}

impl SourceRecord {
    pub fn get(&self, column: &str) -> Option<&str> {
        self.values.get(column).map(String::as_str)
    }
}

impl FromIterator<(String, String)> for SourceRecord {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

/// Read the whole input file into memory as ordered records.
///
/// The first line is the header. Parsing is flexible-width: ragged rows
/// are kept rather than rejected, so the write loop can classify them
/// per-row. The full row set is materialized before the loop starts;
/// inputs larger than memory are out of scope.
pub fn read_records(path: &Path) -> Result<Vec<SourceRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Failed to open input file: {}", path.display()))?;

    let headers = reader
        .headers()
        .with_context(|| format!("Failed to read header row: {}", path.display()))?
        .clone();

    let mut records = Vec::new();
    for (index, row) in reader.records().enumerate() {
        let row = row.with_context(|| {
            format!("Failed to parse row {} of {}", index + 1, path.display())
        })?;
        records.push(
            headers
                .iter()
                .zip(row.iter())
                .map(|(header, value)| (header.to_string(), value.to_string()))
                .collect(),
        );
    }

    tracing::debug!(rows = records.len(), path = %path.display(), "input materialized");
    Ok(records)
}
