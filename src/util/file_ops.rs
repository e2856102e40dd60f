// File Operations for RSA Keys and Messages
// Renders and parses the bracketed text artifacts and moves them on and off disk

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::config::FileConfig;
use crate::rsa::{parse_decimal, RsaBigInt, RsaError, RsaKeyPair, RsaPrivateKey, RsaPublicKey};

/// Errors that can occur during file operations
#[derive(Debug, Error)]
pub enum FileError {
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed {kind} file: {reason}")]
    Malformed { kind: &'static str, reason: String },

    #[error(transparent)]
    Rsa(#[from] RsaError),
}

/// Result type for file operations
pub type FileResult<T> = Result<T, FileError>;

/// Single-value artifacts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Ciphertext,
    Plaintext,
}

impl BlockKind {
    fn label(self) -> &'static str {
        match self {
            BlockKind::Ciphertext => "CIPHERTEXT",
            BlockKind::Plaintext => "PLAINTEXT",
        }
    }
}

/// The persisted form of a generated key pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyFile {
    pub bit_length: u32,
    pub n: RsaBigInt,
    pub e: RsaBigInt,
    pub d: RsaBigInt,
}

impl From<RsaKeyPair> for KeyFile {
    fn from(keypair: RsaKeyPair) -> Self {
        let bit_length = keypair.bit_length;
        let (n, e, d) = keypair.into_parts();
        Self { bit_length, n, e, d }
    }
}

impl KeyFile {
    pub fn public_key(&self) -> RsaPublicKey {
        RsaPublicKey::new(self.n.clone(), self.e.clone())
    }

    pub fn private_key(&self) -> RsaPrivateKey {
        RsaPrivateKey::new(self.n.clone(), self.d.clone())
    }

    pub fn render(&self, config: &FileConfig) -> Vec<String> {
        let m = config.comment_marker;
        vec![
            format!("{}START OF {}-BIT RSA KEYPAIR", m, self.bit_length),
            format!("{}---PUBLIC KEY:", m),
            self.n.to_string(),
            format!("{}---EXPONENT:", m),
            self.e.to_string(),
            format!("{}---PRIVATE KEY:", m),
            self.d.to_string(),
            format!("{}END OF {}-BIT RSA KEYPAIR", m, self.bit_length),
        ]
    }

    /// Parse a key file: the first three value lines are n, e and d.
    ///
    /// The bit length comes from the `START OF <bits>-BIT` header, or from
    /// the modulus when the header is missing.
    pub fn parse(contents: &str, config: &FileConfig) -> FileResult<Self> {
        let mut values = value_lines(contents, config)
            .map(str::trim)
            .filter(|line| !line.is_empty());

        let mut next = |name: &str| -> FileResult<RsaBigInt> {
            let line = values.next().ok_or_else(|| FileError::Malformed {
                kind: "key",
                reason: format!("missing {}", name),
            })?;
            Ok(parse_decimal(line)?)
        };

        let n = next("public key")?;
        let e = next("exponent")?;
        let d = next("private key")?;

        let bit_length = contents
            .lines()
            .filter(|line| config.is_comment(line))
            .find_map(|line| header_bits(&line[config.comment_marker.len_utf8()..]))
            .unwrap_or_else(|| u32::try_from(n.bits()).unwrap_or(u32::MAX));

        Ok(Self { bit_length, n, e, d })
    }
}

fn header_bits(comment: &str) -> Option<u32> {
    comment
        .trim()
        .strip_prefix("START OF ")?
        .strip_suffix("-BIT RSA KEYPAIR")?
        .parse()
        .ok()
}

/// Lines of `contents` that are not comments
pub fn value_lines<'a>(
    contents: &'a str,
    config: &'a FileConfig,
) -> impl Iterator<Item = &'a str> + 'a {
    contents.lines().filter(move |line| !config.is_comment(line))
}

/// Render a ciphertext or plaintext block
pub fn render_block(kind: BlockKind, value: &str, config: &FileConfig) -> Vec<String> {
    let m = config.comment_marker;
    // read_text gives every line a newline; drop the last one so the block
    // reads back to the same text
    let value = value.strip_suffix('\n').unwrap_or(value);
    vec![
        format!("{}START OF {}", m, kind.label()),
        value.to_string(),
        format!("{}END OF {}", m, kind.label()),
    ]
}

/// Reassemble an integer spread over the value lines of a file
pub fn read_integer(contents: &str, config: &FileConfig) -> FileResult<RsaBigInt> {
    let digits: String = value_lines(contents, config).map(str::trim).collect();
    Ok(parse_decimal(&digits)?)
}

/// Reassemble text from the value lines of a file, each ending in a newline
pub fn read_text(contents: &str, config: &FileConfig) -> String {
    value_lines(contents, config).fold(String::new(), |mut text, line| {
        text.push_str(line);
        text.push('\n');
        text
    })
}

/// Read entire file into memory
pub fn read_file(path: &Path) -> FileResult<String> {
    fs::read_to_string(path).map_err(|source| FileError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Write lines to file, one per line
pub fn write_lines(path: &Path, lines: &[String]) -> FileResult<()> {
    let mut data = lines.join("\n");
    data.push('\n');
    fs::write(path, data).map_err(|source| FileError::Io {
        path: path.to_path_buf(),
        source,
    })
}
