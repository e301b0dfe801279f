//! Event-driven controller owning the whole client state.

use crate::address::AddressLookup;
use crate::api::SubmissionTransport;
use crate::feedback::{FeedbackKind, FeedbackRegion};
use crate::files::{FileListItem, FileListView, StagedFile, StagedFiles};
use crate::form::FormValues;
use crate::validation::{validate, ValidationFailure};
use contrato_core::FormField;
use std::sync::Arc;

pub const SUCCESS_MESSAGE: &str =
    "Solicitação enviada com sucesso! Entraremos em contato em breve.";
pub const FALLBACK_ERROR_MESSAGE: &str = "Erro ao enviar solicitação. Tente novamente.";
pub const CONNECTION_ERROR_MESSAGE: &str =
    "Erro de conexão. Verifique sua internet e tente novamente.";

const POSTAL_CODE_DIGITS: usize = 8;

/// User interactions the form reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    FieldInput { field: FormField, value: String },
    PostalCodeBlur,
    FilesSelected(Vec<StagedFile>),
    RemoveFile(usize),
    TermsToggled(bool),
    Submit,
}

/// Submit button: disabled with its loading label while a request is in flight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubmitControl {
    in_flight: bool,
}

impl SubmitControl {
    pub fn is_disabled(&self) -> bool {
        self.in_flight
    }

    pub fn idle_visible(&self) -> bool {
        !self.in_flight
    }

    pub fn loading_visible(&self) -> bool {
        self.in_flight
    }

    fn begin(&mut self) {
        self.in_flight = true;
    }

    fn finish(&mut self) {
        self.in_flight = false;
    }
}

/// How a submit event ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The control was disabled; nothing happened.
    Ignored,
    /// The gate stopped the submission; nothing was sent.
    Invalid(ValidationFailure),
    Accepted,
    Rejected(String),
    /// Transport failure; state is preserved.
    Failed,
}

pub struct FormController {
    transport: Arc<dyn SubmissionTransport>,
    lookup: Arc<dyn AddressLookup>,
    form: FormValues,
    files: StagedFiles,
    submit_control: SubmitControl,
    feedback: FeedbackRegion,
    focused: Option<FormField>,
}

impl FormController {
    pub fn new(
        transport: Arc<dyn SubmissionTransport>,
        lookup: Arc<dyn AddressLookup>,
        feedback: FeedbackRegion,
    ) -> Self {
        Self {
            transport,
            lookup,
            form: FormValues::new(),
            files: StagedFiles::new(),
            submit_control: SubmitControl::default(),
            feedback,
            focused: None,
        }
    }

    pub fn form(&self) -> &FormValues {
        &self.form
    }

    pub fn files(&self) -> &StagedFiles {
        &self.files
    }

    pub fn file_list(&self) -> Vec<FileListItem> {
        FileListView::render(&self.files)
    }

    pub fn submit_control(&self) -> SubmitControl {
        self.submit_control
    }

    pub fn feedback(&self) -> &FeedbackRegion {
        &self.feedback
    }

    /// Field the last failed validation asked to focus.
    pub fn focused_field(&self) -> Option<FormField> {
        self.focused
    }

    /// Process one event. Returns the outcome for `Submit`, `None` otherwise.
    pub async fn handle(&mut self, event: FormEvent) -> Option<SubmitOutcome> {
        match event {
            FormEvent::FieldInput { field, value } => self.form.input(field, &value),
            FormEvent::PostalCodeBlur => self.fill_address().await,
            FormEvent::FilesSelected(files) => self.files.append(files),
            FormEvent::RemoveFile(index) => {
                self.files.remove(index);
            }
            FormEvent::TermsToggled(accepted) => self.form.set_terms_accepted(accepted),
            FormEvent::Submit => return Some(self.submit().await),
        }
        None
    }

    /// Look the postal code up and pre-fill the address. Failures only get logged.
    async fn fill_address(&mut self) {
        let postal_code = self.form.digits(FormField::Cep);
        if postal_code.len() != POSTAL_CODE_DIGITS {
            return;
        }

        match self.lookup.lookup(&postal_code).await {
            Ok(address) => self.form.apply_address(&address),
            Err(e) => {
                tracing::warn!(postal_code = %postal_code, error = %e, "Address lookup failed")
            }
        }
    }

    pub async fn submit(&mut self) -> SubmitOutcome {
        if self.submit_control.is_disabled() {
            return SubmitOutcome::Ignored;
        }

        if let Err(failure) = validate(&self.form, &self.files) {
            self.feedback.show(failure.message(), FeedbackKind::Error);
            self.focused = failure.focus_field();
            return SubmitOutcome::Invalid(failure);
        }
        self.focused = None;

        self.submit_control.begin();
        let result = self.transport.submit(&self.form, &self.files).await;

        let outcome = match result {
            Ok(response) if response.success => {
                self.feedback.show(SUCCESS_MESSAGE, FeedbackKind::Success);
                self.form.clear();
                self.files.clear();
                SubmitOutcome::Accepted
            }
            Ok(response) => {
                let message = response
                    .message
                    .unwrap_or_else(|| FALLBACK_ERROR_MESSAGE.to_string());
                self.feedback.show(message.clone(), FeedbackKind::Error);
                SubmitOutcome::Rejected(message)
            }
            Err(e) => {
                tracing::error!(error = %e, "Submission failed");
                self.feedback
                    .show(CONNECTION_ERROR_MESSAGE, FeedbackKind::Error);
                SubmitOutcome::Failed
            }
        };

        self.submit_control.finish();
        outcome
    }
}
