use regex::Regex;
use sha2::{Digest, Sha256};
use std::sync::OnceLock;

/// Compute the lowercase hex SHA-256 digest of `data`.
///
/// Pure and deterministic: the same bytes always yield the same 64-char
/// string. Input is hashed exactly as given — no whitespace or encoding
/// normalization.
pub fn sha256_hex(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

static HEX_DIGEST_RE: OnceLock<Regex> = OnceLock::new();

fn hex_digest_re() -> &'static Regex {
    HEX_DIGEST_RE.get_or_init(|| Regex::new(r"^[0-9a-f]{64}$").unwrap())
}

/// Whether `s` has the shape of a literal SHA-256 digest.
///
/// Anything else — uppercase hex, truncated values, templates, or
/// expression-looking strings like `sha256(...)` — is rejected. This is the
/// gate's literal-vs-computed pin check: a pin that is not a plain hex
/// literal cannot be trusted to be a reviewed constant.
pub fn is_hex_digest(s: &str) -> bool {
    hex_digest_re().is_match(s)
}
