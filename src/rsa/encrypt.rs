// RSA Encryption Implementation
// Textbook RSA: no padding, the whole message is one integer

use tracing::warn;

use super::bigint::{check_modulus, from_bytes, mod_pow, RsaBigInt};
use super::error::Result;

/// Encrypt text with the public key `(n, e)`.
///
/// The UTF-8 bytes of `plaintext` are read as one unsigned big-endian
/// integer `m` and the result is `m^e mod n` in decimal. Nothing checks
/// that `m < n`; a longer message wraps around the modulus and will not
/// decrypt to the original text.
pub fn encrypt(n: &RsaBigInt, e: &RsaBigInt, plaintext: &str) -> Result<String> {
    let c = encrypt_bytes(plaintext.as_bytes(), n, e)?;
    Ok(c.to_str_radix(10))
}

/// Encrypt raw bytes, returning the ciphertext integer
pub fn encrypt_bytes(plaintext: &[u8], n: &RsaBigInt, e: &RsaBigInt) -> Result<RsaBigInt> {
    check_modulus(n)?;

    let m = from_bytes(plaintext);
    if &m >= n {
        warn!(
            message_bits = m.bits(),
            modulus_bits = n.bits(),
            "message does not fit below the modulus, ciphertext will not round-trip"
        );
    }

    // Compute c = m^e mod n
    Ok(mod_pow(&m, e, n))
}
