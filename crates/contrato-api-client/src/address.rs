//! Postal-code (CEP) address lookup.

use async_trait::async_trait;
use contrato_core::mask::digits_only;
use contrato_core::models::Address;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

const DEFAULT_LOOKUP_URL: &str = "https://viacep.com.br/ws";
const POSTAL_CODE_DIGITS: usize = 8;

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("Postal code must have 8 digits: {0}")]
    InvalidPostalCode(String),

    #[error("Postal code not found: {0}")]
    NotFound(String),

    #[error("Address lookup request failed: {0}")]
    Request(#[from] reqwest::Error),
}

/// Resolves a postal code to an address.
#[async_trait]
pub trait AddressLookup: Send + Sync {
    async fn lookup(&self, postal_code: &str) -> Result<Address, LookupError>;
}

/// Raw ViaCEP response. `erro` is `true` (or `"true"`) for unknown codes.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ViaCepResponse {
    erro: Option<serde_json::Value>,
    logradouro: String,
    bairro: String,
    localidade: String,
    uf: String,
}

impl ViaCepResponse {
    fn is_error(&self) -> bool {
        match &self.erro {
            Some(serde_json::Value::Bool(flag)) => *flag,
            Some(serde_json::Value::String(flag)) => flag == "true",
            _ => false,
        }
    }

    fn into_address(self, postal_code: &str) -> Result<Address, LookupError> {
        if self.is_error() {
            return Err(LookupError::NotFound(postal_code.to_string()));
        }
        Ok(Address {
            street: self.logradouro,
            neighborhood: self.bairro,
            city: self.localidade,
            state: self.uf,
        })
    }
}

/// Client for the ViaCEP service (`GET {base}/{cep}/json/`).
#[derive(Clone, Debug)]
pub struct ViaCepClient {
    client: Client,
    base_url: String,
}

impl ViaCepClient {
    pub fn new(base_url: String) -> Result<Self, LookupError> {
        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Create client from environment: ADDRESS_LOOKUP_URL (default https://viacep.com.br/ws).
    pub fn from_env() -> Result<Self, LookupError> {
        let base_url = std::env::var("ADDRESS_LOOKUP_URL")
            .unwrap_or_else(|_| DEFAULT_LOOKUP_URL.to_string());
        Self::new(base_url)
    }

    pub fn lookup_url(&self, digits: &str) -> String {
        format!("{}/{}/json/", self.base_url, digits)
    }
}

#[async_trait]
impl AddressLookup for ViaCepClient {
    async fn lookup(&self, postal_code: &str) -> Result<Address, LookupError> {
        let digits = digits_only(postal_code);
        if digits.len() != POSTAL_CODE_DIGITS {
            return Err(LookupError::InvalidPostalCode(postal_code.to_string()));
        }

        let response: ViaCepResponse = self
            .client
            .get(self.lookup_url(&digits))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        response.into_address(&digits)
    }
}
