// RSA Decryption Implementation
// Inverse of the textbook encryption in `encrypt.rs`

use super::bigint::{check_modulus, mod_pow, parse_decimal, to_bytes, RsaBigInt};
use super::error::Result;

/// Decrypt a decimal ciphertext with the private key `(n, d)`.
///
/// A mismatched key is not detected: it yields different bytes, and fails
/// only if those bytes happen not to be UTF-8.
pub fn decrypt(n: &RsaBigInt, d: &RsaBigInt, ciphertext: &str) -> Result<String> {
    let plaintext = decrypt_to_bytes(n, d, ciphertext)?;
    Ok(String::from_utf8(plaintext)?)
}

/// Decrypt to the raw message bytes without any text decoding
pub fn decrypt_to_bytes(n: &RsaBigInt, d: &RsaBigInt, ciphertext: &str) -> Result<Vec<u8>> {
    check_modulus(n)?;
    let c = parse_decimal(ciphertext)?;

    // Compute m = c^d mod n
    let m = mod_pow(&c, d, n);

    Ok(to_bytes(&m))
}
