//! # Payload Canonicalization
//!
//! Decodes the opaque URL-encoded launch payload and renders the
//! deterministic data-check string that feeds the MAC. Ordering is byte-wise
//! ordinal (not locale-aware) so the serialization is platform-invariant.
//!
//! Pure functions of their input; no I/O.

use std::borrow::Cow;
use std::collections::BTreeMap;

use super::errors::ValidationError;

/// Result of canonicalization: the MAC input plus the claimed signature that
/// was stripped out of the field set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalPayload {
    /// Sorted `key=value` pairs joined by `\n`, no trailing newline
    pub data_check_string: String,
    /// Hex signature claimed by the client, removed from the field set
    pub claimed_hash: String,
    /// Decoded fields, `hash` excluded
    pub fields: BTreeMap<String, String>,
}

/// Decode the raw payload and produce its canonical serialization.
///
/// # Errors
/// * `ValidationError::MissingHash` - the payload carries no `hash` field
pub fn canonicalize(raw: &str) -> Result<CanonicalPayload, ValidationError> {
    let mut fields = parse_fields(raw);

    let claimed_hash = fields.remove("hash").ok_or(ValidationError::MissingHash)?;

    let data_check_string = fields
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("\n");

    Ok(CanonicalPayload {
        data_check_string,
        claimed_hash,
        fields,
    })
}

/// Split the payload into percent-decoded key/value pairs.
///
/// A pair without `=` decodes to an empty value, and a repeated key keeps
/// its last occurrence. The `BTreeMap` key order is the byte-wise ascending
/// order the canonical string requires.
fn parse_fields(raw: &str) -> BTreeMap<String, String> {
    let mut fields = BTreeMap::new();

    for pair in raw.split('&') {
        if pair.is_empty() {
            continue;
        }
        let (key, value) = match pair.split_once('=') {
            Some((key, value)) => (key, value),
            None => (pair, ""),
        };
        fields.insert(decode_component(key), decode_component(value));
    }

    fields
}

/// Percent-decode one component. `+` is a space in this encoding; a literal
/// plus arrives as `%2B` and survives the replacement.
fn decode_component(component: &str) -> String {
    let unplussed = component.replace('+', " ");
    urlencoding::decode(&unplussed)
        .map(Cow::into_owned)
        // Undecodable bytes: keep the raw component rather than guessing
        .unwrap_or_else(|_| unplussed.clone())
}
