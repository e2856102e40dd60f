// Command line front end
// Non-interactive keygen / encrypt / decrypt commands over the text artifacts

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::{info, warn};

use crate::rsa::{self, parse_decimal, KeyStrength, RsaBigInt};
use crate::util::{
    read_file, read_integer, read_text, render_block, write_lines, BlockKind, FileConfig, KeyFile,
};

#[derive(Debug, Parser)]
#[command(
    name = "rsa-tool",
    version,
    about = "Textbook RSA keypair generator and text encrypt/decrypt tool",
    long_about = "Textbook RSA keypair generator and text encrypt/decrypt tool.

No padding, no constant-time arithmetic and a general-purpose random source:
recreational or educational use only. Text whose bytes form an integer at
least as large as the public key will not decrypt correctly."
)]
pub struct Cli {
    /// Log prime and exponent search details
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Lines starting with this character are ignored when reading files
    #[arg(long, global = true, default_value_t = crate::util::config::DEFAULT_COMMENT_MARKER)]
    pub comment_marker: char,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a keypair and save it to a file
    Keygen {
        /// Preset strength: 256, 512, 1024 (default) or 2048
        #[arg(long, value_parser = parse_strength, conflicts_with = "bits")]
        strength: Option<KeyStrength>,

        /// Any even bit length of at least 16
        #[arg(long)]
        bits: Option<u32>,

        /// File to save the keypair to
        #[arg(short, long)]
        out: PathBuf,
    },

    /// Encrypt the text in a file with a public key and exponent
    Encrypt {
        #[command(flatten)]
        key: KeySource,

        /// File holding the plaintext
        #[arg(short, long)]
        input: PathBuf,

        /// File to save the ciphertext to
        #[arg(short, long)]
        out: PathBuf,
    },

    /// Decrypt a ciphertext file with a public key and private key
    Decrypt {
        #[command(flatten)]
        key: KeySource,

        /// File holding the ciphertext
        #[arg(short, long)]
        input: PathBuf,

        /// File to save the plaintext to
        #[arg(short, long)]
        out: PathBuf,
    },
}

/// Where the modulus and exponent come from
#[derive(Debug, Args)]
pub struct KeySource {
    /// Keypair file written by `keygen`
    #[arg(long, conflicts_with_all = ["modulus", "exponent"])]
    pub key: Option<PathBuf>,

    /// Public key (modulus) in decimal
    #[arg(long, requires = "exponent")]
    pub modulus: Option<String>,

    /// Exponent for encryption, private key for decryption, in decimal
    #[arg(long, visible_alias = "private-key", requires = "modulus")]
    pub exponent: Option<String>,
}

#[derive(Debug, Clone, Copy)]
enum Exponent {
    Public,
    Private,
}

impl KeySource {
    fn resolve(&self, config: &FileConfig, which: Exponent) -> Result<(RsaBigInt, RsaBigInt)> {
        if let Some(path) = &self.key {
            let key = KeyFile::parse(&read_file(path)?, config)
                .with_context(|| format!("reading key file {}", path.display()))?;
            let exponent = match which {
                Exponent::Public => key.e,
                Exponent::Private => key.d,
            };
            return Ok((key.n, exponent));
        }

        match (&self.modulus, &self.exponent) {
            (Some(n), Some(x)) => Ok((
                parse_decimal(n).context("public key")?,
                parse_decimal(x).context("exponent")?,
            )),
            _ => bail!("either --key or both --modulus and --exponent are required"),
        }
    }
}

fn parse_strength(value: &str) -> std::result::Result<KeyStrength, String> {
    value
        .trim_end_matches("-bit")
        .parse::<u32>()
        .ok()
        .and_then(KeyStrength::from_bits)
        .ok_or_else(|| format!("expected one of 256, 512, 1024, 2048, got {:?}", value))
}

/// Run one command to completion
pub fn run(cli: Cli) -> Result<()> {
    let config = FileConfig::default().with_comment_marker(cli.comment_marker);

    match cli.command {
        Command::Keygen { strength, bits, out } => {
            let bits = bits.unwrap_or_else(|| strength.unwrap_or(config.default_strength).bits());
            generate_keys(&config, bits, &out)
        }
        Command::Encrypt { key, input, out } => encrypt_file(&config, &key, &input, &out),
        Command::Decrypt { key, input, out } => decrypt_file(&config, &key, &input, &out),
    }
}

fn generate_keys(config: &FileConfig, bits: u32, out: &Path) -> Result<()> {
    if KeyStrength::from_bits(bits).map_or(bits < 1024, KeyStrength::is_insecure) {
        warn!("Attention: {}-bit RSA keypairs are not secure!", bits);
    }

    info!(bits, "generating keys");
    let keypair = rsa::generate_keypair(bits).context("key generation failed")?;

    write_lines(out, &KeyFile::from(keypair).render(config))?;
    info!(path = %out.display(), "key generation complete");
    Ok(())
}

fn encrypt_file(config: &FileConfig, key: &KeySource, input: &Path, out: &Path) -> Result<()> {
    let (n, e) = key.resolve(config, Exponent::Public)?;
    let plaintext = read_text(&read_file(input)?, config);

    let ciphertext = rsa::encrypt(&n, &e, &plaintext)?;

    write_lines(out, &render_block(BlockKind::Ciphertext, &ciphertext, config))?;
    info!(path = %out.display(), "encryption complete");
    Ok(())
}

fn decrypt_file(config: &FileConfig, key: &KeySource, input: &Path, out: &Path) -> Result<()> {
    let (n, d) = key.resolve(config, Exponent::Private)?;
    let ciphertext = read_integer(&read_file(input)?, config)
        .with_context(|| format!("reading ciphertext file {}", input.display()))?;

    let plaintext = rsa::decrypt(&n, &d, &ciphertext.to_string())?;

    write_lines(out, &render_block(BlockKind::Plaintext, &plaintext, config))?;
    info!(path = %out.display(), "decryption complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_strength() {
        assert_eq!(parse_strength("512").unwrap(), KeyStrength::Bits512);
        assert_eq!(parse_strength("2048-bit").unwrap(), KeyStrength::Bits2048);
        assert!(parse_strength("768").is_err());
        assert!(parse_strength("big").is_err());
    }

    #[test]
    fn test_keygen_args() {
        let cli = Cli::parse_from(["rsa-tool", "keygen", "--strength", "256", "--out", "k.txt"]);
        assert!(matches!(
            cli.command,
            Command::Keygen { strength: Some(KeyStrength::Bits256), bits: None, .. }
        ));
        assert!(Cli::try_parse_from([
            "rsa-tool", "keygen", "--strength", "256", "--bits", "64", "--out", "k.txt"
        ])
        .is_err());
    }

    #[test]
    fn test_key_source_requires_pair() {
        assert!(Cli::try_parse_from([
            "rsa-tool", "encrypt", "--modulus", "3233", "-i", "p.txt", "-o", "c.txt"
        ])
        .is_err());
        let cli = Cli::try_parse_from([
            "rsa-tool", "decrypt", "--modulus", "3233", "--private-key", "2753", "-i", "c.txt",
            "-o", "p.txt",
        ])
        .unwrap();
        let Command::Decrypt { key, .. } = cli.command else {
            panic!("expected decrypt");
        };
        let (n, d) = key.resolve(&FileConfig::default(), Exponent::Private).unwrap();
        assert_eq!(n, RsaBigInt::from(3233u32));
        assert_eq!(d, RsaBigInt::from(2753u32));
    }
}
