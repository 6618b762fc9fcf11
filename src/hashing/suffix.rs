//! Name suffix derivation.
//!
//! A suffix is the first [`SUFFIX_LENGTH`] hex characters of a SHA-256 digest
//! with the characters that read as vowels (`0`, `1`, `3`, `a`, `e`) replaced
//! by consonants. Without vowels it is very hard for a suffix to spell out an
//! offensive word. The replacement consonants come from the alphabet
//! Kubernetes uses for `generateName`, so a suffix is always a valid part of a
//! DNS label.

use super::sha256_hex;
use crate::constants::SUFFIX_LENGTH;
use crate::core::{KujoError, Result};

/// Map one hex character to its suffix character.
const fn substitute(c: char) -> char {
    match c {
        '0' => 'g',
        '1' => 'h',
        '3' => 'k',
        'a' => 'm',
        'e' => 't',
        other => other,
    }
}

/// Encode the first 40 bits of a hex digest as a name suffix.
///
/// Fails with [`KujoError::Encoding`] when `hex` is shorter than
/// [`SUFFIX_LENGTH`] characters.
pub fn encode_hash(hex: &str) -> Result<String> {
    let available = hex.chars().count();
    if available < SUFFIX_LENGTH {
        return Err(KujoError::Encoding {
            required: SUFFIX_LENGTH,
            actual: available,
        });
    }

    Ok(hex.chars().take(SUFFIX_LENGTH).map(substitute).collect())
}

/// Concatenate `hashes` in order, hash the result once more and encode it.
pub fn encode_hash_slice<S: AsRef<str>>(hashes: &[S]) -> Result<String> {
    let joined: String = hashes.iter().map(AsRef::as_ref).collect();
    encode_hash(&sha256_hex(joined))
}
