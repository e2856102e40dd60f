// RSA Module - Main module file
// Exports all RSA-related functionality

pub mod bigint;
pub mod decrypt;
pub mod encrypt;
pub mod error;
pub mod keygen;

pub use bigint::{parse_decimal, RsaBigInt};
pub use decrypt::{decrypt, decrypt_to_bytes};
pub use encrypt::{encrypt, encrypt_bytes};
pub use error::{ArithmeticError, Result, RsaError};
pub use keygen::{
    generate_keypair, generate_keypair_with_rng, generate_preset, KeyStrength, RsaKeyPair,
    RsaPrivateKey, RsaPublicKey,
};
