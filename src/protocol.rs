//! Command processor (spec.md §4.5): parses one request line into a verb
//! and two arguments, validates it, and dispatches to `crypt` or `crack`.

use crate::crack;
use crate::dictionary::Dictionary;
use crate::hash;

/// Reserved response for any malformed request.
pub const INVALID: &str = ":invalid";
/// Reserved response when a `crack` exhausts the dictionary without a match.
pub const FAILED: &str = ":failed";

/// Maximum worker count a `crack` request may specify.
const MAX_THREADS: u32 = 50;
/// Decimal digit width of `MAX_THREADS`, used to reject overlong thread
/// counts before they are even parsed (matches the original's
/// `num_places(MAX_THREADS)` pre-check; see SPEC_FULL.md §B.2).
const MAX_THREADS_DIGITS: usize = 2;

/// Process one request line against `dictionary`, returning the response
/// text (without a trailing newline — the caller appends it).
pub async fn process(line: &str, dictionary: &Dictionary) -> String {
    let tokens: Vec<&str> = line.splitn(3, ' ').collect();
    if tokens.len() != 3 {
        return INVALID.to_string();
    }
    let (verb, arg1, arg2) = (tokens[0], tokens[1], tokens[2]);

    match verb {
        "crypt" => process_crypt(arg1, arg2),
        "crack" => process_crack(arg1, arg2, dictionary).await,
        _ => INVALID.to_string(),
    }
}

fn process_crypt(plaintext: &str, salt: &str) -> String {
    if !hash::is_valid_salt(salt) {
        return INVALID.to_string();
    }
    hash::hash(plaintext, salt)
}

async fn process_crack(ciphertext: &str, thread_count: &str, dictionary: &Dictionary) -> String {
    // `len()` counts bytes, not chars, so a multi-byte-per-char ciphertext
    // can pass the length check and still have no valid byte offset at
    // `SALT_LEN` to slice on. Ciphertexts are ASCII by definition (spec.md
    // §3); reject anything else before indexing into it.
    if ciphertext.len() != hash::CIPHERTEXT_LEN || !ciphertext.is_ascii() {
        return INVALID.to_string();
    }
    let salt = &ciphertext[..hash::SALT_LEN];
    if !hash::is_valid_salt(salt) {
        return INVALID.to_string();
    }

    if thread_count.len() > MAX_THREADS_DIGITS || !is_digits(thread_count) {
        return INVALID.to_string();
    }
    let n: u32 = match thread_count.parse() {
        Ok(n) => n,
        Err(_) => return INVALID.to_string(),
    };
    if n == 0 || n > MAX_THREADS {
        return INVALID.to_string();
    }

    match crack::crack(ciphertext, salt, n as usize, dictionary).await {
        Some(plaintext) => plaintext,
        None => FAILED.to_string(),
    }
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}
