// RSA Error Types
// Failure taxonomy shared by key generation, encryption and decryption

use std::string::FromUtf8Error;

use thiserror::Error;

/// Failures of the modular arithmetic during key derivation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ArithmeticError {
    /// The public exponent shares a factor with the totient
    #[error("public exponent has no inverse modulo the totient")]
    NoInverse,
}

#[derive(Debug, Error)]
pub enum RsaError {
    /// Bad bit length, non-numeric integer text, or an unusable modulus
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("arithmetic error: {0}")]
    Arithmetic(#[from] ArithmeticError),

    /// Decrypted bytes are not UTF-8. The bytes are kept in the source error.
    #[error("decrypted message is not valid UTF-8 (raw bytes: {})", hex::encode(.0.as_bytes()))]
    Decode(#[from] FromUtf8Error),
}

impl RsaError {
    pub(crate) fn invalid_input(reason: impl Into<String>) -> Self {
        RsaError::InvalidInput(reason.into())
    }

    /// Raw plaintext bytes of a failed UTF-8 decode, for inspection
    pub fn raw_bytes(&self) -> Option<&[u8]> {
        match self {
            RsaError::Decode(e) => Some(e.as_bytes()),
            _ => None,
        }
    }
}

/// Result type for RSA operations
pub type Result<T> = std::result::Result<T, RsaError>;
