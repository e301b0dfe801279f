//! Input masks for document numbers, phone numbers and postal codes.
//!
//! A mask strips every non-digit character, truncates to the mask's digit
//! count and then applies an ordered list of first-match substitutions that
//! insert the separators. Output is always recomputed from the raw digits, so
//! masking an already masked value yields the same value.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use crate::models::FormField;

static NON_DIGIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^0-9]").expect("valid regex"));

type Steps = Vec<(Regex, &'static str)>;

fn steps(rules: &[(&str, &'static str)]) -> Steps {
    rules
        .iter()
        .map(|(pattern, replacement)| (Regex::new(pattern).expect("valid regex"), *replacement))
        .collect()
}

static CNPJ_STEPS: LazyLock<Steps> = LazyLock::new(|| {
    steps(&[
        (r"(\d{2})(\d)", "${1}.${2}"),
        (r"(\d{3})(\d)", "${1}.${2}"),
        (r"(\d{3})(\d)", "${1}/${2}"),
        (r"(\d{4})(\d)", "${1}-${2}"),
    ])
});

static CPF_STEPS: LazyLock<Steps> = LazyLock::new(|| {
    steps(&[
        (r"(\d{3})(\d)", "${1}.${2}"),
        (r"(\d{3})(\d)", "${1}.${2}"),
        (r"(\d{3})(\d{1,2})", "${1}-${2}"),
    ])
});

static LANDLINE_STEPS: LazyLock<Steps> = LazyLock::new(|| {
    steps(&[
        (r"(\d{2})(\d)", "(${1}) ${2}"),
        (r"(\d{4})(\d)", "${1}-${2}"),
    ])
});

static MOBILE_STEPS: LazyLock<Steps> = LazyLock::new(|| {
    steps(&[
        (r"(\d{2})(\d)", "(${1}) ${2}"),
        (r"(\d{5})(\d)", "${1}-${2}"),
    ])
});

static CEP_STEPS: LazyLock<Steps> = LazyLock::new(|| steps(&[(r"(\d{5})(\d)", "${1}-${2}")]));

/// Digits a landline number has; one more selects the mobile layout.
const LANDLINE_DIGITS: usize = 10;

/// Kind of mask attached to a form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaskKind {
    /// Company tax ID (CNPJ), `NN.NNN.NNN/NNNN-NN`
    TaxId,
    /// Personal ID (CPF), `NNN.NNN.NNN-NN`
    PersonalId,
    /// Phone, `(NN) NNNN-NNNN` or `(NN) NNNNN-NNNN`
    Phone,
    /// Postal code (CEP), `NNNNN-NNN`
    PostalCode,
}

impl MaskKind {
    /// Mask used by a form field, if any.
    pub fn for_field(field: FormField) -> Option<MaskKind> {
        match field {
            FormField::Cnpj => Some(MaskKind::TaxId),
            FormField::Cpf => Some(MaskKind::PersonalId),
            FormField::Telefone => Some(MaskKind::Phone),
            FormField::Cep => Some(MaskKind::PostalCode),
            _ => None,
        }
    }

    /// Maximum number of digits the mask keeps.
    pub fn max_digits(self) -> usize {
        match self {
            MaskKind::TaxId => 14,
            MaskKind::PersonalId => 11,
            MaskKind::Phone => 11,
            MaskKind::PostalCode => 8,
        }
    }

    /// Format raw input.
    pub fn apply(self, input: &str) -> String {
        let mut digits = digits_only(input);
        digits.truncate(self.max_digits());

        let rules: &Steps = match self {
            MaskKind::TaxId => &CNPJ_STEPS,
            MaskKind::PersonalId => &CPF_STEPS,
            MaskKind::Phone if digits.len() <= LANDLINE_DIGITS => &LANDLINE_STEPS,
            MaskKind::Phone => &MOBILE_STEPS,
            MaskKind::PostalCode => &CEP_STEPS,
        };

        rules.iter().fold(digits, |value, (pattern, replacement)| {
            pattern.replacen(&value, 1, *replacement).into_owned()
        })
    }
}

impl std::str::FromStr for MaskKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cnpj" | "tax_id" | "tax-id" => Ok(MaskKind::TaxId),
            "cpf" | "personal_id" | "personal-id" => Ok(MaskKind::PersonalId),
            "telefone" | "phone" => Ok(MaskKind::Phone),
            "cep" | "postal_code" | "postal-code" => Ok(MaskKind::PostalCode),
            other => Err(format!(
                "Unknown mask '{}'. Expected one of: cnpj, cpf, telefone, cep",
                other
            )),
        }
    }
}

/// Strip every character that is not an ASCII digit, so the byte length is
/// the digit count.
pub fn digits_only(input: &str) -> String {
    NON_DIGIT.replace_all(input, "").into_owned()
}

pub fn mask_cnpj(input: &str) -> String {
    MaskKind::TaxId.apply(input)
}

pub fn mask_cpf(input: &str) -> String {
    MaskKind::PersonalId.apply(input)
}

pub fn mask_phone(input: &str) -> String {
    MaskKind::Phone.apply(input)
}

pub fn mask_cep(input: &str) -> String {
    MaskKind::PostalCode.apply(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Deterministic digit strings of the given length.
    fn digit_strings(len: usize) -> Vec<String> {
        (0..25u64)
            .map(|seed| {
                (0..len)
                    .map(|i| {
                        let d = (seed * 7 + i as u64 * 13 + (seed ^ i as u64)) % 10;
                        char::from(b'0' + d as u8)
                    })
                    .collect()
            })
            .collect()
    }

    fn matches_layout(value: &str, layout: &str) -> bool {
        value.len() == layout.len()
            && value.chars().zip(layout.chars()).all(|(v, l)| match l {
                'N' => v.is_ascii_digit(),
                other => v == other,
            })
    }

    #[test]
    fn cnpj_mask_keeps_fourteen_digits_in_layout() {
        for len in [14, 15, 20] {
            for digits in digit_strings(len) {
                let masked = mask_cnpj(&digits);
                assert_eq!(digits_only(&masked).len(), 14);
                assert_eq!(digits_only(&masked), digits[..14]);
                assert!(
                    matches_layout(&masked, "NN.NNN.NNN/NNNN-NN"),
                    "unexpected layout: {}",
                    masked
                );
            }
        }
    }

    #[test]
    fn cpf_mask_keeps_eleven_digits_in_layout() {
        for len in [11, 12, 18] {
            for digits in digit_strings(len) {
                let masked = mask_cpf(&digits);
                assert!(
                    matches_layout(&masked, "NNN.NNN.NNN-NN"),
                    "unexpected layout: {}",
                    masked
                );
            }
        }
    }

    #[test]
    fn phone_mask_picks_layout_by_digit_count() {
        assert_eq!(mask_phone("1133334444"), "(11) 3333-4444");
        assert_eq!(mask_phone("11987654321"), "(11) 98765-4321");
        assert_eq!(mask_phone("119876543210000"), "(11) 98765-4321");
    }

    #[test]
    fn cep_mask_truncates_to_eight_digits() {
        assert_eq!(mask_cep("01310100"), "01310-100");
        assert_eq!(mask_cep("0131010099"), "01310-100");
        assert_eq!(mask_cep("01310"), "01310");
    }

    #[test]
    fn partial_input_is_formatted_progressively() {
        assert_eq!(mask_cnpj("1"), "1");
        assert_eq!(mask_cnpj("123"), "12.3");
        assert_eq!(mask_cnpj("123456"), "12.345.6");
        assert_eq!(mask_cnpj("123456789"), "12.345.678/9");
        assert_eq!(mask_cpf("1234"), "123.4");
        assert_eq!(mask_cpf("1234567890"), "123.456.789-0");
        assert_eq!(mask_phone("11"), "11");
        assert_eq!(mask_phone("113"), "(11) 3");
        assert_eq!(mask_phone("1133334"), "(11) 3333-4");
    }

    #[test]
    fn masking_is_idempotent() {
        for (kind, raw) in [
            (MaskKind::TaxId, "11222333000181"),
            (MaskKind::PersonalId, "52998224725"),
            (MaskKind::Phone, "11987654321"),
            (MaskKind::Phone, "1133334444"),
            (MaskKind::PostalCode, "01310100"),
        ] {
            let once = kind.apply(raw);
            assert_eq!(kind.apply(&once), once);
        }
    }

    #[test]
    fn non_digits_are_discarded() {
        assert_eq!(mask_cnpj("11.222.333/0001-81"), "11.222.333/0001-81");
        assert_eq!(mask_cpf("abc529.982.247-25xyz"), "529.982.247-25");
        assert_eq!(digits_only("(11) 98765-4321"), "11987654321");
        assert_eq!(mask_cep(""), "");
    }

    #[test]
    fn non_ascii_digits_are_discarded() {
        assert_eq!(digits_only("١٢٣٤٥٦٧"), "");
        assert_eq!(mask_cep("१२३४५६७८"), "");
        assert_eq!(mask_cep("0131०0100"), "01310-100");
        assert_eq!(mask_cnpj("١٢٣٤٥٦٧٨٩٠١٢٣٤"), "");
        assert_eq!(mask_phone("(11) ٩8765-4321"), "(11) 8765-4321");
    }

    #[test]
    fn mask_for_field() {
        assert_eq!(MaskKind::for_field(FormField::Cnpj), Some(MaskKind::TaxId));
        assert_eq!(MaskKind::for_field(FormField::Telefone), Some(MaskKind::Phone));
        assert_eq!(MaskKind::for_field(FormField::Email), None);
    }

    #[test]
    fn parse_mask_kind() {
        assert_eq!("CNPJ".parse::<MaskKind>(), Ok(MaskKind::TaxId));
        assert_eq!("cep".parse::<MaskKind>(), Ok(MaskKind::PostalCode));
        assert!("iban".parse::<MaskKind>().is_err());
    }
}
