//! Test helpers: build the router over a temporary upload directory.
//!
//! Run from workspace root: `cargo test -p contrato-api`.

#![allow(dead_code)]

pub mod fixtures;

use async_trait::async_trait;
use axum_test::multipart::MultipartForm;
use axum_test::TestServer;
use contrato_api::journal::SubmissionReport;
use contrato_api::setup::routes;
use contrato_api::{AppState, SubmissionJournal};
use contrato_core::models::ContractSubmission;
use contrato_core::{Config, ServerConfig};
use contrato_storage::{LocalStorage, Storage};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// Journal that keeps every rendered report in memory.
#[derive(Default)]
pub struct RecordingJournal {
    reports: Mutex<Vec<String>>,
}

impl RecordingJournal {
    pub fn reports(&self) -> Vec<String> {
        self.reports.lock().expect("journal lock").clone()
    }
}

#[async_trait]
impl SubmissionJournal for RecordingJournal {
    async fn record(&self, submission: &ContractSubmission) -> anyhow::Result<()> {
        self.reports
            .lock()
            .expect("journal lock")
            .push(SubmissionReport(submission).to_string());
        Ok(())
    }
}

/// Test application: server plus the resources it writes to.
pub struct TestApp {
    pub server: TestServer,
    pub journal: Arc<RecordingJournal>,
    pub upload_dir: PathBuf,
    pub _temp_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    /// Names of the files currently in the upload directory.
    pub fn stored_files(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(&self.upload_dir)
            .map(|entries| {
                entries
                    .filter_map(|e| e.ok())
                    .map(|e| e.file_name().to_string_lossy().into_owned())
                    .collect()
            })
            .unwrap_or_default();
        names.sort();
        names
    }
}

/// Setup test app with default limits.
pub async fn setup_test_app() -> TestApp {
    setup_test_app_with(ServerConfig::default()).await
}

/// Setup test app with custom limits; directories are redirected to a temp dir.
pub async fn setup_test_app_with(server_config: ServerConfig) -> TestApp {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let upload_dir = temp_dir.path().join("uploads");

    let config = Config::from(ServerConfig {
        upload_dir: upload_dir.clone(),
        static_dir: temp_dir.path().join("public"),
        ..server_config
    });

    let storage: Arc<dyn Storage> = Arc::new(
        LocalStorage::new(&upload_dir)
            .await
            .expect("Failed to create local storage"),
    );
    let journal = Arc::new(RecordingJournal::default());

    let state = Arc::new(AppState::new(config.clone(), storage, journal.clone()));

    let app = routes::setup_routes(&config, state)
        .await
        .expect("Failed to setup routes");
    let server = TestServer::new(app.into_make_service()).expect("Failed to create test server");

    TestApp {
        server,
        journal,
        upload_dir,
        _temp_dir: temp_dir,
    }
}

/// Every required field filled with plausible values, terms accepted.
pub fn valid_form() -> MultipartForm {
    [
        ("razaoSocial", "ACME Comércio Ltda"),
        ("nomeFantasia", ""),
        ("cnpj", "12.345.678/0001-90"),
        ("inscricaoEstadual", ""),
        ("ramo", "Varejo"),
        ("porte", "ME"),
        ("cep", "01310-100"),
        ("endereco", "Avenida Paulista"),
        ("numero", "1000"),
        ("complemento", ""),
        ("bairro", "Bela Vista"),
        ("cidade", "São Paulo"),
        ("estado", "SP"),
        ("nomeRepresentante", "Maria Silva"),
        ("cargo", "Diretora"),
        ("cpf", "123.456.789-09"),
        ("rg", "12.345.678-9"),
        ("email", "maria@acme.com.br"),
        ("telefone", "(11) 98765-4321"),
        ("tipoContrato", "Mensal"),
        ("dataInicio", ""),
        ("descricaoServicos", "Gestão de estoque"),
        ("observacoes", ""),
        ("termos", "true"),
    ]
    .iter()
    .fold(MultipartForm::new(), |form, (name, value)| {
        form.add_text(*name, *value)
    })
}
