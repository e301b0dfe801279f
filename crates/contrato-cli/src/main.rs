//! Contrato CLI: drives the form client from the command line.
//!
//! Set CONTRATO_API_URL and optionally ADDRESS_LOOKUP_URL.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use contrato_api_client::{
    AddressLookup, ApiClient, FeedbackRegion, FormController, FormEvent, StagedFile,
    ViaCepClient,
};
use contrato_cli::{form_as_json, init_tracing, parse_form_file, print_json, SubmitReport};
use contrato_core::format_file_size;
use contrato_core::mask::MaskKind;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "contrato", about = "Contract request form client")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit a contract request
    Submit {
        /// JSON object with the form fields, keyed by wire name
        form: PathBuf,
        /// Attach a document (repeatable)
        #[arg(long = "file", short = 'f')]
        files: Vec<PathBuf>,
        /// Tick the terms checkbox regardless of the form file
        #[arg(long)]
        accept_terms: bool,
        /// Pre-fill the address from the postal code before submitting
        #[arg(long)]
        fill_address: bool,
        /// Validate and print the payload without sending it
        #[arg(long)]
        dry_run: bool,
    },
    /// Look up an address by postal code (CEP)
    Lookup {
        postal_code: String,
    },
    /// Apply an input mask: cnpj, cpf, telefone or cep
    Mask {
        kind: MaskKind,
        value: String,
    },
    /// Format a byte count for display
    Size {
        bytes: u64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Submit {
            form,
            files,
            accept_terms,
            fill_address,
            dry_run,
        } => submit(form, files, accept_terms, fill_address, dry_run).await?,
        Commands::Lookup { postal_code } => {
            let client = ViaCepClient::from_env().context("Failed to create lookup client")?;
            let address = client.lookup(&postal_code).await?;
            print_json(&address)?;
        }
        Commands::Mask { kind, value } => {
            print_json(&serde_json::json!({ "value": kind.apply(&value) }))?;
        }
        Commands::Size { bytes } => {
            print_json(&serde_json::json!({ "size": format_file_size(bytes) }))?;
        }
    }

    Ok(())
}

async fn submit(
    form_path: PathBuf,
    file_paths: Vec<PathBuf>,
    accept_terms: bool,
    fill_address: bool,
    dry_run: bool,
) -> anyhow::Result<()> {
    let json = tokio::fs::read_to_string(&form_path)
        .await
        .with_context(|| format!("Failed to read form file {}", form_path.display()))?;
    let form_file = parse_form_file(&json)?;
    for key in &form_file.unknown {
        tracing::warn!(key = %key, "Ignoring unknown form field");
    }

    let mut staged = Vec::with_capacity(file_paths.len());
    for path in &file_paths {
        let file = StagedFile::from_path(path)
            .await
            .with_context(|| format!("Failed to read attachment {}", path.display()))?;
        staged.push(file);
    }

    let api = ApiClient::from_env().context("Failed to create API client. Set CONTRATO_API_URL")?;
    let lookup = ViaCepClient::from_env().context("Failed to create lookup client")?;
    let mut controller =
        FormController::new(Arc::new(api), Arc::new(lookup), FeedbackRegion::default());

    for event in form_file.events {
        controller.handle(event).await;
    }
    if fill_address {
        controller.handle(FormEvent::PostalCodeBlur).await;
    }
    controller.handle(FormEvent::FilesSelected(staged)).await;
    controller
        .handle(FormEvent::TermsToggled(
            accept_terms || form_file.terms.unwrap_or(false),
        ))
        .await;

    if dry_run {
        if let Err(failure) = contrato_api_client::validation::validate(
            controller.form(),
            controller.files(),
        ) {
            bail!(failure);
        }
        let labels: Vec<String> = controller
            .file_list()
            .into_iter()
            .map(|item| item.label)
            .collect();
        return print_json(&serde_json::json!({
            "fields": form_as_json(controller.form()),
            "documentos": labels,
        }));
    }

    let outcome = match controller.handle(FormEvent::Submit).await {
        Some(outcome) => outcome,
        None => bail!("Submit produced no outcome"),
    };
    let report = SubmitReport::new(&outcome, &controller.feedback().snapshot().text);
    print_json(&report)?;

    if !report.success {
        bail!(report.message);
    }
    Ok(())
}
