//! The opaque hash primitive `H(word, salt) -> ciphertext` (spec.md §3).
//!
//! The original server uses the platform's re-entrant `crypt_r`, which this
//! pack cannot depend on as a crate. We stand in a concrete, deterministic
//! primitive built from `md-5` (already on the teacher's dependency list)
//! with the same externally observable shape: a 13-byte ASCII ciphertext
//! whose first two bytes are the salt that produced it, and bytes beyond
//! the eighth of the plaintext ignored. `Md5::new()` allocates independent
//! state per call, so distinct workers calling this concurrently need no
//! shared-state mutex (see DESIGN.md Open Question 3).

use md5::{Digest, Md5};
use once_cell::sync::Lazy;
use regex::Regex;

/// Length of a salt string.
pub const SALT_LEN: usize = 2;
/// Length of a ciphertext string.
pub const CIPHERTEXT_LEN: usize = 13;
/// Bytes of plaintext the primitive actually consumes.
const MAX_WORD_LEN: usize = 8;

/// `[A-Za-z0-9./]`, ordered to match the original's `PLAINTEXT_CHARS`.
const SALT_ALPHABET: &[u8] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789./";

static SALT_RE: Lazy<Regex> = Lazy::new(|| Regex::new("^[A-Za-z0-9./]{2}$").unwrap());

/// Is `salt` exactly two bytes, all drawn from the salt alphabet?
pub fn is_valid_salt(salt: &str) -> bool {
    salt.len() == SALT_LEN && SALT_RE.is_match(salt)
}

/// Compute `H(word, salt)`. Callers must have validated `salt` with
/// [`is_valid_salt`] first; this function trusts its caller the way the
/// original's `crypt_r` trusts a pre-validated salt buffer.
pub fn hash(word: &str, salt: &str) -> String {
    debug_assert!(is_valid_salt(salt), "hash() called with an unvalidated salt");

    let truncated = &word.as_bytes()[..word.len().min(MAX_WORD_LEN)];

    let mut hasher = Md5::new();
    hasher.update(truncated);
    hasher.update(salt.as_bytes());
    let digest = hasher.finalize();

    let mut ciphertext = String::with_capacity(CIPHERTEXT_LEN);
    ciphertext.push_str(salt);
    for i in 0..(CIPHERTEXT_LEN - SALT_LEN) {
        let byte = digest[i % digest.len()];
        ciphertext.push(SALT_ALPHABET[byte as usize % SALT_ALPHABET.len()] as char);
    }
    ciphertext
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_deterministic() {
        assert_eq!(hash("hello", "ab"), hash("hello", "ab"));
    }

    #[test]
    fn hash_output_shape() {
        let c = hash("hello", "ab");
        assert_eq!(c.len(), CIPHERTEXT_LEN);
        assert!(c.starts_with("ab"));
        assert!(c.is_ascii());
    }

    #[test]
    fn hash_ignores_bytes_past_eight() {
        assert_eq!(hash("abcdefgh", "zz"), hash("abcdefghIGNOREDTAIL", "zz"));
    }

    #[test]
    fn different_salts_change_output() {
        assert_ne!(hash("hello", "ab"), hash("hello", "cd"));
    }

    #[test]
    fn salt_validation() {
        assert!(is_valid_salt("ab"));
        assert!(is_valid_salt("A9"));
        assert!(is_valid_salt("./"));
        assert!(!is_valid_salt("a!"));
        assert!(!is_valid_salt("a"));
        assert!(!is_valid_salt("abc"));
    }
}
