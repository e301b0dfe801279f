use anyhow::{bail, Context};
use contrato_api_client::{FormEvent, FormValues, SubmitOutcome};
use contrato_core::models::TERMS_FIELD;
use contrato_core::FormField;
use serde::Serialize;
use serde_json::Value;

/// Field values read from a JSON form file.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct FormFile {
    pub events: Vec<FormEvent>,
    /// `termos` as found in the file, if present.
    pub terms: Option<bool>,
    /// Keys that matched no form field.
    pub unknown: Vec<String>,
}

/// Parse a flat JSON object of wire names (`razaoSocial`, `cnpj`, ...) into
/// input events. Numbers are accepted as text; nested values are not.
pub fn parse_form_file(json: &str) -> anyhow::Result<FormFile> {
    let value: Value = serde_json::from_str(json).context("Form file is not valid JSON")?;
    let Value::Object(map) = value else {
        bail!("Form file must contain a JSON object");
    };

    let mut form = FormFile::default();
    for (key, value) in map {
        if key == TERMS_FIELD {
            form.terms = Some(match value {
                Value::Bool(flag) => flag,
                Value::String(s) => s == "true",
                _ => bail!("\"{}\" must be a boolean", TERMS_FIELD),
            });
            continue;
        }

        let text = match value {
            Value::String(s) => s,
            Value::Number(n) => n.to_string(),
            Value::Null => String::new(),
            _ => bail!("\"{}\" must be a string", key),
        };

        match FormField::from_name(&key) {
            Some(field) => form.events.push(FormEvent::FieldInput { field, value: text }),
            None => form.unknown.push(key),
        }
    }
    Ok(form)
}

/// Machine-readable summary of a submit attempt.
#[derive(Debug, Serialize)]
pub struct SubmitReport {
    pub success: bool,
    pub outcome: &'static str,
    pub message: String,
}

impl SubmitReport {
    pub fn new(outcome: &SubmitOutcome, feedback: &str) -> Self {
        let (success, label) = match outcome {
            SubmitOutcome::Accepted => (true, "accepted"),
            SubmitOutcome::Ignored => (false, "ignored"),
            SubmitOutcome::Invalid(_) => (false, "invalid"),
            SubmitOutcome::Rejected(_) => (false, "rejected"),
            SubmitOutcome::Failed => (false, "failed"),
        };
        Self {
            success,
            outcome: label,
            message: feedback.to_string(),
        }
    }
}

/// Wire view of a form, handy for dry runs.
pub fn form_as_json(form: &FormValues) -> Value {
    let map = form
        .to_pairs()
        .into_iter()
        .map(|(name, value)| (name.to_string(), Value::String(value)))
        .collect();
    Value::Object(map)
}

pub fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize output")?;
    println!("{}", out);
    Ok(())
}

/// Initialize tracing for CLI binaries.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}
