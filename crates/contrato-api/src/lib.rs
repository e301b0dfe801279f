//! Contrato API Library
//!
//! This crate provides the submission server: HTTP handlers, middleware, the
//! submission journal and application setup.

mod api_doc;
mod handlers;
mod middleware;
mod telemetry;

pub mod error;
pub mod journal;
pub mod setup;
pub mod state;

pub use error::HttpAppError;
pub use journal::{ConsoleJournal, SubmissionJournal, SubmissionReport};
pub use state::AppState;
