//! Import pipeline for menuport: credential resolution, row extraction,
//! record transformation, and the sequential document write loop.
//!
//! The stages only depend on each other in pipeline order: resolve a
//! service-account key, materialize the input rows, then map and upsert
//! one row at a time through the [`store::DocumentStore`] seam.

pub mod credentials;
pub mod firestore;
pub mod runner;
pub mod source;
pub mod store;
pub mod transform;

pub use credentials::{discover_key_file, load_key, ServiceAccountKey};
pub use firestore::FirestoreStore;
pub use runner::{run_import, ImportOptions};
pub use source::{read_records, SourceRecord};
pub use store::DocumentStore;
pub use transform::map_record;
