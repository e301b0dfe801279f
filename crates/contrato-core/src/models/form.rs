//! Contract request form fields.
//!
//! Field names are the wire names used by the multipart payload; labels are the
//! human-readable captions shown in messages and in the operator report.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Multipart field name shared by every attached document.
pub const DOCUMENTS_FIELD: &str = "documentos";

/// Every named text control of the contract request form, in form order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FormField {
    // Company
    RazaoSocial,
    NomeFantasia,
    Cnpj,
    InscricaoEstadual,
    Ramo,
    Porte,
    // Address
    Cep,
    Endereco,
    Numero,
    Complemento,
    Bairro,
    Cidade,
    Estado,
    // Legal representative
    NomeRepresentante,
    Cargo,
    Cpf,
    Rg,
    Email,
    Telefone,
    // Contract
    TipoContrato,
    DataInicio,
    DescricaoServicos,
    Observacoes,
}

impl FormField {
    /// All text fields in the order they appear on the form.
    pub const ALL: [FormField; 23] = [
        FormField::RazaoSocial,
        FormField::NomeFantasia,
        FormField::Cnpj,
        FormField::InscricaoEstadual,
        FormField::Ramo,
        FormField::Porte,
        FormField::Cep,
        FormField::Endereco,
        FormField::Numero,
        FormField::Complemento,
        FormField::Bairro,
        FormField::Cidade,
        FormField::Estado,
        FormField::NomeRepresentante,
        FormField::Cargo,
        FormField::Cpf,
        FormField::Rg,
        FormField::Email,
        FormField::Telefone,
        FormField::TipoContrato,
        FormField::DataInicio,
        FormField::DescricaoServicos,
        FormField::Observacoes,
    ];

    /// Fields that must be filled, in the order the submission gate checks them.
    pub const REQUIRED: [FormField; 18] = [
        FormField::RazaoSocial,
        FormField::Cnpj,
        FormField::Ramo,
        FormField::Porte,
        FormField::Cep,
        FormField::Endereco,
        FormField::Numero,
        FormField::Bairro,
        FormField::Cidade,
        FormField::Estado,
        FormField::NomeRepresentante,
        FormField::Cargo,
        FormField::Cpf,
        FormField::Rg,
        FormField::Email,
        FormField::Telefone,
        FormField::TipoContrato,
        FormField::DescricaoServicos,
    ];

    /// Wire name of the field in the multipart payload.
    pub fn name(self) -> &'static str {
        match self {
            FormField::RazaoSocial => "razaoSocial",
            FormField::NomeFantasia => "nomeFantasia",
            FormField::Cnpj => "cnpj",
            FormField::InscricaoEstadual => "inscricaoEstadual",
            FormField::Ramo => "ramo",
            FormField::Porte => "porte",
            FormField::Cep => "cep",
            FormField::Endereco => "endereco",
            FormField::Numero => "numero",
            FormField::Complemento => "complemento",
            FormField::Bairro => "bairro",
            FormField::Cidade => "cidade",
            FormField::Estado => "estado",
            FormField::NomeRepresentante => "nomeRepresentante",
            FormField::Cargo => "cargo",
            FormField::Cpf => "cpf",
            FormField::Rg => "rg",
            FormField::Email => "email",
            FormField::Telefone => "telefone",
            FormField::TipoContrato => "tipoContrato",
            FormField::DataInicio => "dataInicio",
            FormField::DescricaoServicos => "descricaoServicos",
            FormField::Observacoes => "observacoes",
        }
    }

    /// Caption shown next to the control.
    pub fn label(self) -> &'static str {
        match self {
            FormField::RazaoSocial => "Razão Social",
            FormField::NomeFantasia => "Nome Fantasia",
            FormField::Cnpj => "CNPJ",
            FormField::InscricaoEstadual => "Inscrição Estadual",
            FormField::Ramo => "Ramo de Atividade",
            FormField::Porte => "Porte da Empresa",
            FormField::Cep => "CEP",
            FormField::Endereco => "Endereço",
            FormField::Numero => "Número",
            FormField::Complemento => "Complemento",
            FormField::Bairro => "Bairro",
            FormField::Cidade => "Cidade",
            FormField::Estado => "Estado",
            FormField::NomeRepresentante => "Nome Completo",
            FormField::Cargo => "Cargo",
            FormField::Cpf => "CPF",
            FormField::Rg => "RG",
            FormField::Email => "E-mail",
            FormField::Telefone => "Telefone",
            FormField::TipoContrato => "Tipo de Contrato",
            FormField::DataInicio => "Data de Início Desejada",
            FormField::DescricaoServicos => "Descrição dos Serviços",
            FormField::Observacoes => "Observações",
        }
    }

    pub fn is_required(self) -> bool {
        FormField::REQUIRED.contains(&self)
    }

    /// Look a field up by its wire name.
    pub fn from_name(name: &str) -> Option<FormField> {
        FormField::ALL.into_iter().find(|f| f.name() == name)
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Wire name of the terms-acceptance checkbox.
pub const TERMS_FIELD: &str = "termos";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_fields_are_a_subset_of_all_fields() {
        for field in FormField::REQUIRED {
            assert!(FormField::ALL.contains(&field), "{} missing", field);
        }
    }

    #[test]
    fn optional_fields_are_exactly_five() {
        let optional: Vec<&str> = FormField::ALL
            .into_iter()
            .filter(|f| !f.is_required())
            .map(FormField::name)
            .collect();
        assert_eq!(
            optional,
            vec![
                "nomeFantasia",
                "inscricaoEstadual",
                "complemento",
                "dataInicio",
                "observacoes"
            ]
        );
    }

    #[test]
    fn from_name_round_trips_every_field() {
        for field in FormField::ALL {
            assert_eq!(FormField::from_name(field.name()), Some(field));
        }
        assert_eq!(FormField::from_name("termos"), None);
    }

    #[test]
    fn serde_uses_wire_names() {
        let json = serde_json::to_string(&FormField::NomeRepresentante).unwrap();
        assert_eq!(json, "\"nomeRepresentante\"");
    }
}
