use std::path::Path;

use anyhow::{Context, Result};

use menuport_engine::firestore::FirestoreStore;
use menuport_engine::{credentials, runner, source};
use menuport_types::KeyMode;

/// Execute the `import` command: resolve credentials, extract rows, and
/// run the sequential write loop.
///
/// Row-level failures never change the exit code; only the pre-loop
/// stages (credentials, input file) are fatal.
pub fn execute(
    input: &Path,
    collection: &str,
    credentials_path: Option<&Path>,
    key_mode: KeyMode,
    dry_run: bool,
) -> Result<()> {
    let key_file = super::resolve_key_file(credentials_path)?;
    println!("Using service-account key '{}'.", key_file.display());

    let key = credentials::load_key(&key_file)?;
    tracing::info!(
        project = key.project_id,
        collection = collection,
        input = %input.display(),
        dry_run = dry_run,
        "Import configured"
    );
    let mut store = FirestoreStore::connect(key, collection)
        .context("Failed to build an authenticated Firestore client")?;

    println!(
        "Reading '{}' into collection '{}'...",
        input.display(),
        collection
    );
    let records = source::read_records(input)?;
    println!("Processing {} rows...\n", records.len());

    let options = runner::ImportOptions { key_mode, dry_run };
    let summary = runner::run_import(&records, &mut store, &options);

    println!();
    println!("{}", "=".repeat(50));
    if dry_run {
        println!("Dry run complete. No documents were written.");
    } else {
        println!("Import complete.");
    }
    println!("  Succeeded: {}", summary.succeeded);
    println!("  Failed:    {}", summary.failed);
    println!("{}", "=".repeat(50));

    Ok(())
}
