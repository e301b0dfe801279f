//! Submission gate: ordered rules, first violation wins.

use crate::files::StagedFiles;
use crate::form::FormValues;
use contrato_core::FormField;
use std::fmt;

const CNPJ_DIGITS: usize = 14;
const CPF_DIGITS: usize = 11;

/// Why a form may not be submitted yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationFailure {
    RequiredField(FormField),
    TermsNotAccepted,
    NoDocuments,
    InvalidCnpj,
    InvalidCpf,
}

impl ValidationFailure {
    pub fn message(&self) -> String {
        match self {
            ValidationFailure::RequiredField(field) => {
                format!("O campo \"{}\" é obrigatório!", field.label())
            }
            ValidationFailure::TermsNotAccepted => {
                "Você deve aceitar os termos para continuar!".to_string()
            }
            ValidationFailure::NoDocuments => {
                "É obrigatório anexar pelo menos um documento!".to_string()
            }
            ValidationFailure::InvalidCnpj => "CNPJ deve ter 14 dígitos!".to_string(),
            ValidationFailure::InvalidCpf => "CPF deve ter 11 dígitos!".to_string(),
        }
    }

    /// Control the UI should focus, if the failure belongs to one.
    pub fn focus_field(&self) -> Option<FormField> {
        match self {
            ValidationFailure::RequiredField(field) => Some(*field),
            _ => None,
        }
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

impl std::error::Error for ValidationFailure {}

type Check = fn(&FormValues, &StagedFiles) -> Result<(), ValidationFailure>;

/// A named predicate over the form.
pub struct Rule {
    pub name: &'static str,
    check: Check,
}

fn required_fields(form: &FormValues, _: &StagedFiles) -> Result<(), ValidationFailure> {
    match FormField::REQUIRED
        .iter()
        .find(|field| form.get(**field).trim().is_empty())
    {
        Some(field) => Err(ValidationFailure::RequiredField(*field)),
        None => Ok(()),
    }
}

fn terms_accepted(form: &FormValues, _: &StagedFiles) -> Result<(), ValidationFailure> {
    if form.terms_accepted() {
        Ok(())
    } else {
        Err(ValidationFailure::TermsNotAccepted)
    }
}

fn has_documents(_: &FormValues, files: &StagedFiles) -> Result<(), ValidationFailure> {
    if files.is_empty() {
        Err(ValidationFailure::NoDocuments)
    } else {
        Ok(())
    }
}

fn cnpj_length(form: &FormValues, _: &StagedFiles) -> Result<(), ValidationFailure> {
    if form.digits(FormField::Cnpj).len() == CNPJ_DIGITS {
        Ok(())
    } else {
        Err(ValidationFailure::InvalidCnpj)
    }
}

fn cpf_length(form: &FormValues, _: &StagedFiles) -> Result<(), ValidationFailure> {
    if form.digits(FormField::Cpf).len() == CPF_DIGITS {
        Ok(())
    } else {
        Err(ValidationFailure::InvalidCpf)
    }
}

pub const RULES: [Rule; 5] = [
    Rule {
        name: "required_fields",
        check: required_fields,
    },
    Rule {
        name: "terms_accepted",
        check: terms_accepted,
    },
    Rule {
        name: "has_documents",
        check: has_documents,
    },
    Rule {
        name: "cnpj_length",
        check: cnpj_length,
    },
    Rule {
        name: "cpf_length",
        check: cpf_length,
    },
];

/// Run every rule in order and return the first violation.
pub fn validate(form: &FormValues, files: &StagedFiles) -> Result<(), ValidationFailure> {
    for rule in RULES.iter() {
        if let Err(failure) = (rule.check)(form, files) {
            tracing::debug!(rule = rule.name, "Form validation failed");
            return Err(failure);
        }
    }
    Ok(())
}
