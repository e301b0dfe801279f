//! Contrato Storage Library
//!
//! Storage abstraction for attached documents and its local filesystem backend.
//!
//! # Stored name format
//!
//! Every accepted file is written as `<fieldname>-<epoch-ms>-<random>.<ext>`,
//! where the extension is taken from the original file name. Name generation is
//! centralized in the `keys` module.

pub mod keys;
pub mod local;
pub mod traits;

// Re-export commonly used types
pub use keys::generate_stored_name;
pub use local::LocalStorage;
pub use traits::{Storage, StorageError, StorageResult};
