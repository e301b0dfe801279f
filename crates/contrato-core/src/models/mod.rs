//! Domain models for contract requests.

pub mod form;
pub mod submission;

pub use form::{FormField, DOCUMENTS_FIELD, TERMS_FIELD};
pub use submission::{Address, ContractSubmission, StoredFile, SubmissionResponse};
