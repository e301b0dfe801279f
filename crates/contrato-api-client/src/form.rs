//! Text values of the contract request form.

use contrato_core::mask::{digits_only, MaskKind};
use contrato_core::models::Address;
use contrato_core::FormField;
use std::collections::BTreeMap;

/// Current value of every text control plus the terms checkbox.
///
/// Masked fields are formatted on every input, so stored values are always in
/// display form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues {
    values: BTreeMap<FormField, String>,
    terms_accepted: bool,
}

impl FormValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a form from wire names (`razaoSocial`, `cnpj`, ...).
    /// Returns the form and the names that matched no field.
    pub fn from_pairs<I, K, V>(pairs: I) -> (Self, Vec<String>)
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut form = Self::new();
        let mut unknown = Vec::new();
        for (name, value) in pairs {
            match FormField::from_name(name.as_ref()) {
                Some(field) => form.input(field, value.as_ref()),
                None => unknown.push(name.as_ref().to_string()),
            }
        }
        (form, unknown)
    }

    /// Record an input event, applying the field's mask if it has one.
    pub fn input(&mut self, field: FormField, raw: &str) {
        let value = match MaskKind::for_field(field) {
            Some(mask) => mask.apply(raw),
            None => raw.to_string(),
        };
        self.values.insert(field, value);
    }

    pub fn get(&self, field: FormField) -> &str {
        self.values.get(&field).map(|v| v.as_str()).unwrap_or("")
    }

    /// Raw digits of a field, as used by validation and the postal-code lookup.
    pub fn digits(&self, field: FormField) -> String {
        digits_only(self.get(field))
    }

    pub fn terms_accepted(&self) -> bool {
        self.terms_accepted
    }

    pub fn set_terms_accepted(&mut self, accepted: bool) {
        self.terms_accepted = accepted;
    }

    /// Pre-fill the address fields from a lookup result.
    pub fn apply_address(&mut self, address: &Address) {
        self.values
            .insert(FormField::Endereco, address.street.clone());
        self.values
            .insert(FormField::Bairro, address.neighborhood.clone());
        self.values.insert(FormField::Cidade, address.city.clone());
        self.values.insert(FormField::Estado, address.state.clone());
    }

    /// Reset every control, including the checkbox.
    pub fn clear(&mut self) {
        self.values.clear();
        self.terms_accepted = false;
    }

    /// Every named control in form order with its wire value.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs: Vec<(&'static str, String)> = FormField::ALL
            .iter()
            .map(|field| (field.name(), self.get(*field).to_string()))
            .collect();
        pairs.push((
            contrato_core::models::TERMS_FIELD,
            self.terms_accepted.to_string(),
        ));
        pairs
    }
}
