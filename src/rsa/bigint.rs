// RSA Big Integer Operations
// Wrapper around num-bigint for the textbook RSA pipeline

use num_bigint::{BigInt, BigUint, RandBigInt, Sign};
use num_integer::Integer;
use num_traits::{One, Zero};
use rand::Rng;

use super::error::{Result, RsaError};

/// RSA Big Integer type alias
pub type RsaBigInt = BigUint;

/// Miller-Rabin rounds used when searching for primes
pub const MILLER_RABIN_ROUNDS: u32 = 20;

const SMALL_PRIMES: [u32; 15] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47];

/// Create a big integer from u64
pub fn from_u64(n: u64) -> RsaBigInt {
    RsaBigInt::from(n)
}

/// Unsigned big-endian bytes to integer.
///
/// The high bit of the first byte is a magnitude bit, never a sign bit.
/// Leading zero bytes carry no value.
pub fn from_bytes(bytes: &[u8]) -> RsaBigInt {
    RsaBigInt::from_bytes_be(bytes)
}

/// Inverse of [`from_bytes`]: minimal big-endian bytes without a leading
/// zero byte. Zero maps to the empty byte string.
pub fn to_bytes(n: &RsaBigInt) -> Vec<u8> {
    if n.is_zero() {
        return Vec::new();
    }
    n.to_bytes_be()
}

/// Parse a base-10 digit string, ignoring surrounding whitespace.
///
/// Signs, separators and any other non-digit characters are rejected.
pub fn parse_decimal(input: &str) -> Result<RsaBigInt> {
    let digits = input.trim();
    if digits.is_empty() {
        return Err(RsaError::invalid_input("expected a decimal integer, got nothing"));
    }
    if let Some(bad) = digits.chars().find(|c| !c.is_ascii_digit()) {
        return Err(RsaError::invalid_input(format!(
            "expected a decimal integer, found {:?}",
            bad
        )));
    }
    RsaBigInt::parse_bytes(digits.as_bytes(), 10)
        .ok_or_else(|| RsaError::invalid_input("expected a decimal integer"))
}

/// Reject moduli that make `x mod n` meaningless
pub(crate) fn check_modulus(n: &RsaBigInt) -> Result<()> {
    if n <= &RsaBigInt::one() {
        return Err(RsaError::invalid_input(format!(
            "modulus must be greater than 1, got {}",
            n
        )));
    }
    Ok(())
}

/// Modular exponentiation: base^exp mod modulus
/// Uses square-and-multiply algorithm
pub fn mod_pow(base: &RsaBigInt, exp: &RsaBigInt, modulus: &RsaBigInt) -> RsaBigInt {
    if modulus.is_one() {
        return RsaBigInt::zero();
    }

    let mut result = RsaBigInt::one();
    let mut base = base % modulus;
    let mut exp = exp.clone();

    while !exp.is_zero() {
        if exp.is_odd() {
            result = (&result * &base) % modulus;
        }
        base = (&base * &base) % modulus;
        exp >>= 1;
    }

    result
}

/// Compute modular inverse: a^(-1) mod m
/// Returns None if inverse doesn't exist
pub fn mod_inverse(a: &RsaBigInt, m: &RsaBigInt) -> Option<RsaBigInt> {
    if m.is_zero() {
        return None;
    }

    // Bezout coefficients go negative, so run the extended Euclid signed
    let a = BigInt::from_biguint(Sign::Plus, a.clone());
    let m = BigInt::from_biguint(Sign::Plus, m.clone());
    let egcd = a.extended_gcd(&m);

    if !egcd.gcd.is_one() {
        return None;
    }

    egcd.x.mod_floor(&m).to_biguint()
}

/// Greatest common divisor
pub fn gcd(a: &RsaBigInt, b: &RsaBigInt) -> RsaBigInt {
    a.gcd(b)
}

/// Miller-Rabin primality test
/// Returns true if n is probably prime
pub fn is_probable_prime<R: Rng + ?Sized>(n: &RsaBigInt, iterations: u32, rng: &mut R) -> bool {
    if n < &RsaBigInt::from(2u8) {
        return false;
    }

    // Trial division settles small inputs and weeds out most candidates
    for &p in SMALL_PRIMES.iter() {
        let p = RsaBigInt::from(p);
        if n == &p {
            return true;
        }
        if (n % &p).is_zero() {
            return false;
        }
    }

    // Write n-1 as d * 2^s with d odd
    let n_minus_one = n - 1u8;
    let mut d = n_minus_one.clone();
    let mut s = 0u32;
    while d.is_even() {
        d >>= 1;
        s += 1;
    }

    let two = RsaBigInt::from(2u8);

    'witness: for _ in 0..iterations {
        // Pick random witness a in [2, n-2]
        let a = rng.gen_biguint_range(&two, &n_minus_one);

        let mut x = mod_pow(&a, &d, n);
        if x.is_one() || x == n_minus_one {
            continue;
        }

        for _ in 1..s {
            x = (&x * &x) % n;
            if x == n_minus_one {
                continue 'witness;
            }
        }

        // Composite
        return false;
    }

    // Probably prime
    true
}

/// Generate a probable prime of exactly `bit_length` bits.
///
/// `bit_length` must be at least 2.
pub fn random_prime<R: Rng + ?Sized>(bit_length: u64, rng: &mut R) -> RsaBigInt {
    let lower = RsaBigInt::one() << (bit_length - 1);
    let upper = RsaBigInt::one() << bit_length;

    loop {
        let mut candidate = rng.gen_biguint_range(&lower, &upper);

        // Make it odd; the top value of the range is already odd
        if candidate.is_even() {
            candidate += 1u8;
        }

        if is_probable_prime(&candidate, MILLER_RABIN_ROUNDS, rng) {
            return candidate;
        }
    }
}
