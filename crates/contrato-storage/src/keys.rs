//! Stored name generation.
//!
//! Format: `<fieldname>-<epoch-ms>-<random>.<ext>`. The random part is drawn from
//! `0..=1_000_000_000`, so two files stored in the same millisecond collide only
//! by chance.

use chrono::Utc;
use rand::Rng;
use std::path::Path;

const RANDOM_SUFFIX_MAX: u32 = 1_000_000_000;

fn keep_safe(value: &str, extra: &[char]) -> String {
    value
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || extra.contains(c))
        .collect()
}

/// Extension of the original file name including the dot, or an empty string.
fn original_extension(original_name: &str) -> String {
    Path::new(original_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| keep_safe(e, &[]))
        .filter(|e| !e.is_empty())
        .map(|e| format!(".{}", e))
        .unwrap_or_default()
}

/// Generate the on-disk name for a file received under `field_name`.
pub fn generate_stored_name(field_name: &str, original_name: &str) -> String {
    let field = keep_safe(field_name, &['-', '_']);
    let field = if field.is_empty() { "file".to_string() } else { field };
    let timestamp = Utc::now().timestamp_millis();
    let random = rand::rng().random_range(0..=RANDOM_SUFFIX_MAX);

    format!(
        "{}-{}-{}{}",
        field,
        timestamp,
        random,
        original_extension(original_name)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_has_field_timestamp_random_and_extension() {
        let name = generate_stored_name("documentos", "Contrato Social.PDF");
        assert!(name.starts_with("documentos-"));
        assert!(name.ends_with(".PDF"));

        let stem = name.trim_end_matches(".PDF");
        let parts: Vec<&str> = stem.split('-').collect();
        assert_eq!(parts.len(), 3);
        assert!(parts[1].parse::<i64>().is_ok());
        assert!(parts[2].parse::<u32>().unwrap() <= RANDOM_SUFFIX_MAX);
    }

    #[test]
    fn extension_is_optional() {
        let name = generate_stored_name("documentos", "LEIAME");
        assert!(!name.contains('.'));
    }

    #[test]
    fn path_characters_are_stripped() {
        let name = generate_stored_name("../docs", "a.p/df");
        assert!(!name.contains('/'));
        assert!(!name.contains(".."));
        assert!(name.starts_with("docs-"));
    }

    #[test]
    fn consecutive_names_differ() {
        let a = generate_stored_name("documentos", "a.pdf");
        let b = generate_stored_name("documentos", "a.pdf");
        assert_ne!(a, b);
    }
}
