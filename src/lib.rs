//! Textbook RSA keypair generation and text encryption.
//!
//! Keys are built from two random probable primes and a small prime
//! exponent; text is encrypted as a single unpadded integer. This is a
//! recreational tool, not a secure cryptosystem.

pub mod rsa;
pub mod ui;
pub mod util;
