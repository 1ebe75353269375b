//! # Signature Verification
//!
//! Two-stage HMAC-SHA256 chain over the canonical data-check string:
//!
//! 1. `secret_key = HMAC-SHA256(key = "WebAppData", message = bot_token)`
//! 2. `mac = HMAC-SHA256(key = secret_key, message = data_check_string)`
//!
//! The derived key is a fixed 32-byte value, never the raw token. Claimed
//! and computed MACs compare in constant time.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use super::errors::ValidationError;

type HmacSha256 = Hmac<Sha256>;

/// Fixed label keying the first stage of the derivation chain.
const KEY_DERIVATION_LABEL: &[u8] = b"WebAppData";

/// Outcome of a MAC comparison.
///
/// Deliberately not `Debug`: the computed MAC is the valid signature for the
/// payload under inspection and is only surfaced through
/// [`MacVerdict::computed_hex`] for the diagnostics switch.
pub struct MacVerdict {
    /// Whether the claimed hash matched the computed MAC
    pub is_match: bool,
    computed: [u8; 32],
}

impl MacVerdict {
    /// Lowercase hex rendering of the computed MAC, for diagnostics only.
    pub fn computed_hex(&self) -> String {
        hex::encode(self.computed)
    }
}

// Redacting `Debug` so the type can appear in `Result::unwrap`/`unwrap_err`
// bounds without leaking the computed MAC (which is the valid signature).
impl core::fmt::Debug for MacVerdict {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MacVerdict")
            .field("is_match", &self.is_match)
            .field("computed", &"<redacted>")
            .finish()
    }
}

/// Derive the 32-byte MAC key from the shared bot token.
pub fn derive_secret_key(token: &str) -> [u8; 32] {
    let mut mac =
        HmacSha256::new_from_slice(KEY_DERIVATION_LABEL).expect("HMAC can take key of any size");
    mac.update(token.as_bytes());

    let mut key = [0u8; 32];
    key.copy_from_slice(&mac.finalize().into_bytes());
    key
}

/// Compute the second-stage MAC over the canonical string.
pub fn compute_mac(secret_key: &[u8; 32], data_check_string: &str) -> [u8; 32] {
    let mut mac =
        HmacSha256::new_from_slice(secret_key).expect("HMAC can take key of any size");
    mac.update(data_check_string.as_bytes());

    let mut out = [0u8; 32];
    out.copy_from_slice(&mac.finalize().into_bytes());
    out
}

/// Verify a claimed hex MAC against the canonical string.
///
/// Buffers of differing length cannot match; equal-length buffers compare
/// byte-wise in constant time, no early exit on the first differing byte.
///
/// # Errors
/// * `ValidationError::MalformedHash` - the claimed hash has an odd number
///   of characters or non-hex characters
pub fn verify(
    token: &str,
    data_check_string: &str,
    claimed_hash_hex: &str,
) -> Result<MacVerdict, ValidationError> {
    let claimed =
        hex::decode(claimed_hash_hex).map_err(|_| ValidationError::MalformedHash)?;

    let secret_key = derive_secret_key(token);
    let computed = compute_mac(&secret_key, data_check_string);

    let is_match =
        claimed.len() == computed.len() && bool::from(computed.as_slice().ct_eq(&claimed));

    Ok(MacVerdict { is_match, computed })
}
