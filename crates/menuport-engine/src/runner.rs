//! Sequential import loop: map, derive the key, upsert, count, report.

use menuport_types::{KeyMode, MenuItem, RowError, RunSummary};

use crate::source::SourceRecord;
use crate::store::DocumentStore;
use crate::transform::map_record;

/// Options controlling one import run.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImportOptions {
    pub key_mode: KeyMode,
    /// Map and count rows without writing to the store.
    pub dry_run: bool,
}

/// Run the import loop over `records`, writing through `store`.
///
/// Rows are processed strictly in file order, one blocking write at a
/// time; row N+1 never starts before row N's write has returned.
/// Row-level failures are counted and reported, never fatal: the loop
/// always runs to completion once extraction succeeded.
pub fn run_import(
    records: &[SourceRecord],
    store: &mut dyn DocumentStore,
    options: &ImportOptions,
) -> RunSummary {
    let total = records.len();
    let mut summary = RunSummary::default();

    for (index, record) in records.iter().enumerate() {
        let position = index + 1;
        match import_row(record, store, options) {
            Ok(item) => {
                summary.record_success();
                println!(
                    "✓ [{position}/{total}] {} - {}",
                    item.category, item.dish_name
                );
            }
            Err(err) => {
                summary.record_failure();
                tracing::debug!(row = position, error = %err, "row import failed");
                println!("✗ [{position}/{total}] {err}");
            }
        }
    }

    summary
}

fn import_row(
    record: &SourceRecord,
    store: &mut dyn DocumentStore,
    options: &ImportOptions,
) -> Result<MenuItem, RowError> {
    let item = map_record(record)?;
    if !options.dry_run {
        let doc_id = item.document_id(options.key_mode);
        store.upsert(&doc_id, &item)?;
    }
    Ok(item)
}
