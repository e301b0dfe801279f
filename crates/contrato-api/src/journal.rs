//! Submission journal
//!
//! Every accepted submission is recorded for the operator. The console journal
//! renders a human-readable report and emits it through `tracing` under the
//! `contrato::submission` target.

use async_trait::async_trait;
use contrato_core::format::format_kilobytes;
use contrato_core::models::ContractSubmission;
use contrato_core::FormField;
use std::fmt;

const RULE_WIDTH: usize = 60;
const NOT_INFORMED: &str = "Não informado";
const NOT_SPECIFIED: &str = "Não especificada";

/// Destination for accepted submissions.
#[async_trait]
pub trait SubmissionJournal: Send + Sync {
    async fn record(&self, submission: &ContractSubmission) -> anyhow::Result<()>;
}

/// Operator report for one submission.
pub struct SubmissionReport<'a>(pub &'a ContractSubmission);

impl fmt::Display for SubmissionReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.0;
        let rule = "=".repeat(RULE_WIDTH);

        writeln!(f, "{}", rule)?;
        writeln!(f, "📋 NOVA SOLICITAÇÃO DE CONTRATO RECEBIDA")?;
        writeln!(f, "{}", rule)?;

        writeln!(f)?;
        writeln!(f, "🏢 DADOS DA EMPRESA:")?;
        writeln!(f, "Razão Social: {}", s.value(FormField::RazaoSocial))?;
        writeln!(
            f,
            "Nome Fantasia: {}",
            s.field(FormField::NomeFantasia).unwrap_or(NOT_INFORMED)
        )?;
        writeln!(f, "CNPJ: {}", s.value(FormField::Cnpj))?;
        writeln!(
            f,
            "Inscrição Estadual: {}",
            s.field(FormField::InscricaoEstadual).unwrap_or(NOT_INFORMED)
        )?;
        writeln!(f, "Ramo: {}", s.value(FormField::Ramo))?;
        writeln!(f, "Porte: {}", s.value(FormField::Porte))?;

        writeln!(f)?;
        writeln!(f, "📍 ENDEREÇO:")?;
        writeln!(
            f,
            "{}, {}",
            s.value(FormField::Endereco),
            s.value(FormField::Numero)
        )?;
        match s.field(FormField::Complemento) {
            Some(complemento) => {
                writeln!(f, "{}, {}", complemento, s.value(FormField::Bairro))?
            }
            None => writeln!(f, "{}", s.value(FormField::Bairro))?,
        }
        writeln!(
            f,
            "{} - {}",
            s.value(FormField::Cidade),
            s.value(FormField::Estado)
        )?;
        writeln!(f, "CEP: {}", s.value(FormField::Cep))?;

        writeln!(f)?;
        writeln!(f, "👤 REPRESENTANTE LEGAL:")?;
        writeln!(f, "Nome: {}", s.value(FormField::NomeRepresentante))?;
        writeln!(f, "Cargo: {}", s.value(FormField::Cargo))?;
        writeln!(f, "CPF: {}", s.value(FormField::Cpf))?;
        writeln!(f, "RG: {}", s.value(FormField::Rg))?;
        writeln!(f, "Email: {}", s.value(FormField::Email))?;
        writeln!(f, "Telefone: {}", s.value(FormField::Telefone))?;

        writeln!(f)?;
        writeln!(f, "📄 INFORMAÇÕES DO CONTRATO:")?;
        writeln!(f, "Tipo: {}", s.value(FormField::TipoContrato))?;
        writeln!(
            f,
            "Data de Início: {}",
            s.field(FormField::DataInicio).unwrap_or(NOT_SPECIFIED)
        )?;
        writeln!(f, "Descrição dos Serviços:")?;
        writeln!(f, "{}", s.value(FormField::DescricaoServicos))?;
        if let Some(observacoes) = s.field(FormField::Observacoes) {
            writeln!(f, "Observações: {}", observacoes)?;
        }

        if !s.files.is_empty() {
            writeln!(f)?;
            writeln!(f, "📎 DOCUMENTOS ANEXADOS:")?;
            for (index, file) in s.files.iter().enumerate() {
                writeln!(
                    f,
                    "{}. {} ({})",
                    index + 1,
                    file.original_name,
                    format_kilobytes(file.size)
                )?;
                writeln!(f, "   Salvo como: {}", file.stored_name)?;
            }
        }

        writeln!(f)?;
        writeln!(f, "{}", rule)?;
        writeln!(
            f,
            "⏰ Recebido em: {}",
            s.received_at.format("%d/%m/%Y, %H:%M:%S")
        )?;
        write!(f, "{}", rule)
    }
}

/// Journal that writes the report to the operator console.
#[derive(Debug, Clone, Default)]
pub struct ConsoleJournal;

#[async_trait]
impl SubmissionJournal for ConsoleJournal {
    async fn record(&self, submission: &ContractSubmission) -> anyhow::Result<()> {
        tracing::info!(
            target: "contrato::submission",
            company = %submission.value(FormField::RazaoSocial),
            cnpj = %submission.value(FormField::Cnpj),
            files = submission.files.len(),
            "\n{}\n",
            SubmissionReport(submission)
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};
    use contrato_core::StoredFile;
    use std::collections::BTreeMap;
    use std::path::PathBuf;

    fn submission(pairs: &[(&str, &str)], files: Vec<StoredFile>) -> ContractSubmission {
        let fields: BTreeMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let mut submission = ContractSubmission::new(fields, files);
        submission.received_at = Local
            .with_ymd_and_hms(2024, 3, 5, 14, 7, 9)
            .single()
            .expect("unambiguous local time");
        submission
    }

    #[test]
    fn report_marks_missing_optional_fields() {
        let report = SubmissionReport(&submission(
            &[("razaoSocial", "ACME Ltda"), ("cnpj", "12.345.678/0001-90")],
            Vec::new(),
        ))
        .to_string();

        assert!(report.contains("Razão Social: ACME Ltda"));
        assert!(report.contains("CNPJ: 12.345.678/0001-90"));
        assert!(report.contains("Nome Fantasia: Não informado"));
        assert!(report.contains("Inscrição Estadual: Não informado"));
        assert!(report.contains("Data de Início: Não especificada"));
        assert!(!report.contains("Observações"));
        assert!(!report.contains("DOCUMENTOS ANEXADOS"));
        assert!(report.contains("Recebido em: 05/03/2024, 14:07:09"));
    }

    #[test]
    fn report_includes_complement_and_observations_when_present() {
        let report = SubmissionReport(&submission(
            &[
                ("endereco", "Rua A"),
                ("numero", "10"),
                ("complemento", "Sala 2"),
                ("bairro", "Centro"),
                ("cidade", "São Paulo"),
                ("estado", "SP"),
                ("observacoes", "Urgente"),
            ],
            Vec::new(),
        ))
        .to_string();

        assert!(report.contains("Rua A, 10\nSala 2, Centro\nSão Paulo - SP"));
        assert!(report.contains("Observações: Urgente"));
    }

    #[test]
    fn report_lists_attachments_in_order() {
        let files = vec![
            StoredFile {
                original_name: "contrato.pdf".to_string(),
                stored_name: "documentos-1700000000000-42.pdf".to_string(),
                content_type: "application/pdf".to_string(),
                size: 2048,
                path: PathBuf::from("uploads/documentos-1700000000000-42.pdf"),
            },
            StoredFile {
                original_name: "rg.png".to_string(),
                stored_name: "documentos-1700000000001-7.png".to_string(),
                content_type: "image/png".to_string(),
                size: 1536,
                path: PathBuf::from("uploads/documentos-1700000000001-7.png"),
            },
        ];
        let report = SubmissionReport(&submission(&[], files)).to_string();

        assert!(report.contains("1. contrato.pdf (2.00 KB)"));
        assert!(report.contains("   Salvo como: documentos-1700000000000-42.pdf"));
        assert!(report.contains("2. rg.png (1.50 KB)"));
    }

    #[tokio::test]
    async fn console_journal_accepts_submissions() {
        let journal = ConsoleJournal;
        assert!(journal.record(&submission(&[], Vec::new())).await.is_ok());
    }
}
