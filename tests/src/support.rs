//! # Test Fixtures
//!
//! Builds launch payloads signed the way the platform client signs them.
//! The HMAC chain here is written against `hmac`/`sha2` directly, on
//! purpose: the suite must not borrow the code it is testing.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Token used across the suite.
pub const TEST_TOKEN: &str = "123456:ABC-DEF";

/// Sign a canonical data-check string with the two-stage chain:
/// `HMAC-SHA256(HMAC-SHA256("WebAppData", token), canonical)`, lowercase hex.
pub fn sign_canonical(token: &str, canonical: &str) -> String {
    let mut derive = HmacSha256::new_from_slice(b"WebAppData").unwrap();
    derive.update(token.as_bytes());
    let secret_key = derive.finalize().into_bytes();

    let mut mac = HmacSha256::new_from_slice(&secret_key).unwrap();
    mac.update(canonical.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Assemble a signed, URL-encoded payload from decoded field pairs.
///
/// The canonical string sorts the pairs byte-wise and joins them with
/// newlines; the wire form percent-encodes the values and appends the
/// computed `hash`.
pub fn build_payload(token: &str, pairs: &[(&str, &str)]) -> String {
    let mut sorted: Vec<&(&str, &str)> = pairs.iter().collect();
    sorted.sort_by(|a, b| a.0.cmp(b.0));
    let canonical = sorted
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("\n");

    let hash = sign_canonical(token, &canonical);

    let mut encoded: Vec<String> = pairs
        .iter()
        .map(|(k, v)| format!("{k}={}", urlencoding::encode(v)))
        .collect();
    encoded.push(format!("hash={hash}"));
    encoded.join("&")
}

/// A payload for `user_json` declared `age_secs` before now.
pub fn payload_aged(token: &str, user_json: &str, age_secs: i64) -> String {
    let now = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_secs() as i64;
    let auth_date = (now - age_secs).to_string();
    build_payload(
        token,
        &[
            ("auth_date", auth_date.as_str()),
            ("query_id", "AAAA"),
            ("user", user_json),
        ],
    )
}
