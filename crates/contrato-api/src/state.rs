//! Shared application state.

use crate::journal::SubmissionJournal;
use contrato_core::{Config, FileValidator};
use contrato_storage::Storage;
use std::sync::Arc;

/// Everything a request handler needs, shared behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub storage: Arc<dyn Storage>,
    pub validator: FileValidator,
    pub journal: Arc<dyn SubmissionJournal>,
}

impl AppState {
    pub fn new(
        config: Config,
        storage: Arc<dyn Storage>,
        journal: Arc<dyn SubmissionJournal>,
    ) -> Self {
        let validator = config.file_validator();
        Self {
            config,
            storage,
            validator,
            journal,
        }
    }
}
