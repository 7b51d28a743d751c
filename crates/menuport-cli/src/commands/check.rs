use std::path::Path;

use anyhow::Result;

use menuport_engine::firestore::FirestoreStore;
use menuport_engine::store::DocumentStore;
use menuport_engine::{credentials, source};

/// Execute the `check` command: validate the credential file, the input
/// file, and collection connectivity, without writing anything.
pub fn execute(input: &Path, collection: &str, credentials_path: Option<&Path>) -> Result<()> {
    let key_file = super::resolve_key_file(credentials_path)?;
    let mut ok = true;

    let key = credentials::load_key(&key_file);
    match &key {
        Ok(key) => println!("Credentials:  OK ({})", key.client_email),
        Err(e) => {
            ok = false;
            println!("Credentials:  FAILED");
            println!("  {e:#}");
        }
    }

    match source::read_records(input) {
        Ok(records) => println!("Input file:   OK ({} rows)", records.len()),
        Err(e) => {
            ok = false;
            println!("Input file:   FAILED");
            println!("  {e:#}");
        }
    }

    if let Ok(key) = key {
        let probe = FirestoreStore::connect(key, collection).and_then(|mut s| s.healthcheck());
        match probe {
            Ok(()) => println!("Collection:   OK ('{collection}')"),
            Err(e) => {
                ok = false;
                println!("Collection:   FAILED");
                println!("  {e}");
            }
        }
    }

    if ok {
        println!("\nAll checks passed.");
        Ok(())
    } else {
        anyhow::bail!("One or more checks failed")
    }
}
