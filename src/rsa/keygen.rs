// RSA Key Generation
// Implements textbook RSA key pair generation (public and private keys)
//
// The random source is a general-purpose RNG and the keys carry no padding
// or hardening. These keys are for recreational or educational use only.

use std::fmt;

use num_traits::One;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use super::bigint::{gcd, mod_inverse, random_prime, RsaBigInt};
use super::error::{ArithmeticError, Result, RsaError};

/// Smallest accepted modulus size; each prime gets half of it
pub const MIN_BIT_LENGTH: u32 = 16;

/// Bit length of the public exponent, which lands in 128..=255
pub const EXPONENT_BITS: u64 = 8;

/// RSA Public Key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsaPublicKey {
    pub n: RsaBigInt, // Modulus
    pub e: RsaBigInt, // Public exponent
}

/// RSA Private Key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsaPrivateKey {
    pub n: RsaBigInt, // Modulus (same as public)
    pub d: RsaBigInt, // Private exponent
}

/// RSA Key Pair (both public and private keys)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsaKeyPair {
    pub public_key: RsaPublicKey,
    pub private_key: RsaPrivateKey,
    /// The requested strength, not necessarily the exact modulus size
    pub bit_length: u32,
}

impl RsaPublicKey {
    pub fn new(n: RsaBigInt, e: RsaBigInt) -> Self {
        Self { n, e }
    }

    /// Get the bit length of the modulus
    pub fn bit_length(&self) -> u64 {
        self.n.bits()
    }

    /// Encrypt text, returning the ciphertext as decimal digits
    pub fn encrypt(&self, plaintext: &str) -> Result<String> {
        super::encrypt::encrypt(&self.n, &self.e, plaintext)
    }
}

impl RsaPrivateKey {
    pub fn new(n: RsaBigInt, d: RsaBigInt) -> Self {
        Self { n, d }
    }

    /// Get the bit length of the modulus
    pub fn bit_length(&self) -> u64 {
        self.n.bits()
    }

    /// Decrypt a decimal ciphertext back into text
    pub fn decrypt(&self, ciphertext: &str) -> Result<String> {
        super::decrypt::decrypt(&self.n, &self.d, ciphertext)
    }
}

impl RsaKeyPair {
    /// The `(n, e, d)` triple
    pub fn into_parts(self) -> (RsaBigInt, RsaBigInt, RsaBigInt) {
        (self.public_key.n, self.public_key.e, self.private_key.d)
    }
}

/// Preset key strengths offered by the tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyStrength {
    Bits256,
    Bits512,
    #[default]
    Bits1024,
    Bits2048,
}

impl KeyStrength {
    pub const ALL: [KeyStrength; 4] = [
        KeyStrength::Bits256,
        KeyStrength::Bits512,
        KeyStrength::Bits1024,
        KeyStrength::Bits2048,
    ];

    pub fn bits(self) -> u32 {
        match self {
            KeyStrength::Bits256 => 256,
            KeyStrength::Bits512 => 512,
            KeyStrength::Bits1024 => 1024,
            KeyStrength::Bits2048 => 2048,
        }
    }

    pub fn from_bits(bits: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.bits() == bits)
    }

    /// 256 and 512 bit moduli are factorable on commodity hardware
    pub fn is_insecure(self) -> bool {
        self.bits() < 1024
    }
}

impl fmt::Display for KeyStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-bit", self.bits())
    }
}

/// Every intermediate of one generation run
#[derive(Debug, Clone)]
#[cfg_attr(not(test), allow(dead_code))]
pub(crate) struct KeyComponents {
    pub p: RsaBigInt,
    pub q: RsaBigInt,
    pub n: RsaBigInt,
    pub phi: RsaBigInt,
    pub e: RsaBigInt,
    pub d: RsaBigInt,
    pub bit_length: u32,
}

impl KeyComponents {
    fn into_keypair(self) -> RsaKeyPair {
        RsaKeyPair {
            public_key: RsaPublicKey::new(self.n.clone(), self.e),
            private_key: RsaPrivateKey::new(self.n, self.d),
            bit_length: self.bit_length,
        }
    }
}

/// Generate an RSA key pair whose modulus is the product of two
/// `bit_length / 2`-bit probable primes.
///
/// Uses a freshly seeded general-purpose RNG per call. No claim of
/// cryptographic strength is made for the result.
pub fn generate_keypair(bit_length: u32) -> Result<RsaKeyPair> {
    let mut rng = StdRng::from_entropy();
    generate_keypair_with_rng(bit_length, &mut rng)
}

/// [`generate_keypair`] drawing from a caller-supplied random source
pub fn generate_keypair_with_rng<R: Rng + ?Sized>(
    bit_length: u32,
    rng: &mut R,
) -> Result<RsaKeyPair> {
    generate_components(bit_length, rng).map(KeyComponents::into_keypair)
}

/// Generate a key pair for one of the preset strengths
pub fn generate_preset(strength: KeyStrength) -> Result<RsaKeyPair> {
    generate_keypair(strength.bits())
}

fn validate_bit_length(bit_length: u32) -> Result<()> {
    if bit_length % 2 != 0 {
        return Err(RsaError::invalid_input(format!(
            "bit length must be even, got {}",
            bit_length
        )));
    }
    if bit_length < MIN_BIT_LENGTH {
        return Err(RsaError::invalid_input(format!(
            "bit length must be at least {}, got {}",
            MIN_BIT_LENGTH, bit_length
        )));
    }
    Ok(())
}

pub(crate) fn generate_components<R: Rng + ?Sized>(
    bit_length: u32,
    rng: &mut R,
) -> Result<KeyComponents> {
    validate_bit_length(bit_length)?;

    let half_bits = u64::from(bit_length / 2);
    debug!(bit_length, "searching for prime factors");

    // Step 1: Generate two random primes p and q
    let p = random_prime(half_bits, rng);
    let mut q = random_prime(half_bits, rng);

    // n = p^2 would break decryption
    while q == p {
        debug!("second prime repeated the first, drawing again");
        q = random_prime(half_bits, rng);
    }

    derive_components(p, q, bit_length, rng)
}

/// Steps 2-5 of key generation for fixed prime factors
pub(crate) fn derive_components<R: Rng + ?Sized>(
    p: RsaBigInt,
    q: RsaBigInt,
    bit_length: u32,
    rng: &mut R,
) -> Result<KeyComponents> {
    // Step 2: Compute n = p * q
    let n = &p * &q;

    // Step 3: Compute φ(n) = (p-1)(q-1)
    let phi = (&p - 1u8) * (&q - 1u8);

    // Step 4: Pick a small prime exponent coprime to φ(n)
    let e = choose_exponent(&phi, rng);

    // Step 5: Compute d = e^(-1) mod φ(n)
    let d = mod_inverse(&e, &phi).ok_or(ArithmeticError::NoInverse)?;

    debug!(modulus_bits = n.bits(), exponent = %e, "key pair derived");

    Ok(KeyComponents {
        p,
        q,
        n,
        phi,
        e,
        d,
        bit_length,
    })
}

/// Draw 8-bit probable primes until one is coprime to `phi`.
///
/// There is no retry cap: a totient divisible by every 8-bit prime would
/// spin forever. No such totient arises from two primes of 8 bits or more.
fn choose_exponent<R: Rng + ?Sized>(phi: &RsaBigInt, rng: &mut R) -> RsaBigInt {
    loop {
        let e = random_prime(EXPONENT_BITS, rng);
        if gcd(&e, phi).is_one() {
            return e;
        }
        debug!(exponent = %e, "exponent divides the totient, drawing again");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rsa::bigint::from_u64;

    fn seeded(seed: u64) -> StdRng {
        StdRng::seed_from_u64(seed)
    }

    #[test]
    fn test_key_generation() {
        let keypair = generate_keypair(256).unwrap();

        assert_eq!(keypair.bit_length, 256);
        assert_eq!(keypair.public_key.n, keypair.private_key.n);
        assert!(keypair.public_key.bit_length() >= 255);
        assert!(keypair.public_key.e >= from_u64(128) && keypair.public_key.e <= from_u64(255));
    }

    #[test]
    fn test_key_properties() {
        let mut rng = seeded(1);
        for _ in 0..20 {
            let parts = generate_components(16, &mut rng).unwrap();

            // Verify n = p * q
            assert_eq!(parts.n, &parts.p * &parts.q);
            assert_eq!(parts.p.bits(), 8);
            assert_eq!(parts.q.bits(), 8);
            assert_ne!(parts.p, parts.q);

            // Verify e * d ≡ 1 (mod φ(n))
            assert_eq!(parts.phi, (&parts.p - 1u8) * (&parts.q - 1u8));
            assert!((&parts.e * &parts.d % &parts.phi).is_one());
        }
    }

    #[test]
    fn test_fixed_primes() {
        let parts = derive_components(from_u64(61), from_u64(53), 12, &mut seeded(3)).unwrap();
        assert_eq!(parts.n, from_u64(3233));
        assert_eq!(parts.phi, from_u64(3120));
        assert!((&parts.e * &parts.d % from_u64(3120)).is_one());
    }

    #[test]
    fn test_repeated_calls_each_search_exponent() {
        let mut rng = seeded(9);
        let first = generate_keypair_with_rng(32, &mut rng).unwrap();
        let second = generate_keypair_with_rng(32, &mut rng).unwrap();

        for keypair in [first, second] {
            let (n, e, d) = keypair.into_parts();
            let m = from_u64(42);
            let c = m.modpow(&e, &n);
            assert_eq!(c.modpow(&d, &n), m);
        }
    }

    #[test]
    fn test_invalid_bit_lengths() {
        for bits in [0, 1, 15, 17, 14, 2] {
            assert!(
                matches!(generate_keypair(bits), Err(RsaError::InvalidInput(_))),
                "{} bits should be rejected",
                bits
            );
        }
    }

    #[test]
    fn test_key_strength_presets() {
        assert_eq!(KeyStrength::default(), KeyStrength::Bits1024);
        assert_eq!(KeyStrength::from_bits(512), Some(KeyStrength::Bits512));
        assert_eq!(KeyStrength::from_bits(768), None);
        assert!(KeyStrength::Bits256.is_insecure());
        assert!(!KeyStrength::Bits2048.is_insecure());
        assert_eq!(KeyStrength::Bits2048.to_string(), "2048-bit");
    }
}
