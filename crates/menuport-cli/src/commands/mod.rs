pub mod check;
pub mod import;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use menuport_engine::credentials;

/// Locate the service-account key: the explicit path when given,
/// otherwise marker-based discovery in the current directory.
///
/// When nothing is found, operator guidance is printed and the process
/// exits with status 1 before any row processing.
pub(crate) fn resolve_key_file(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }

    let cwd = std::env::current_dir().context("Failed to resolve current directory")?;
    match credentials::discover_key_file(&cwd)? {
        Some(path) => Ok(path),
        None => {
            eprintln!("Error: no service-account key file (JSON) found in the current directory.");
            eprintln!(
                "Download a private key from the Firebase console and place it in this directory."
            );
            eprintln!(
                "Steps: Firebase Console > Project settings > Service accounts > Generate new private key"
            );
            std::process::exit(1);
        }
    }
}
