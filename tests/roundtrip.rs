//! Property-based round-trip tests for textbook RSA

use num_bigint::BigUint;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rsa_tool::rsa::{decrypt, encrypt, generate_keypair, generate_keypair_with_rng, RsaError};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn text_roundtrip(seed in any::<u64>(), message in "\\PC{0,6}") {
        // 256-bit modulus holds any 24-byte message
        let mut rng = StdRng::seed_from_u64(seed);
        let keypair = generate_keypair_with_rng(256, &mut rng).unwrap();
        let (n, e, d) = keypair.into_parts();

        let ciphertext = encrypt(&n, &e, &message).unwrap();
        prop_assert!(ciphertext.chars().all(|c| c.is_ascii_digit()));
        prop_assert_eq!(decrypt(&n, &d, &ciphertext).unwrap(), message);
    }

    #[test]
    fn ciphertext_is_below_modulus(seed in any::<u64>(), bytes in prop::collection::vec(any::<u8>(), 0..4)) {
        let mut rng = StdRng::seed_from_u64(seed);
        let (n, e, _) = generate_keypair_with_rng(64, &mut rng).unwrap().into_parts();

        let c = rsa_tool::rsa::encrypt_bytes(&bytes, &n, &e).unwrap();
        prop_assert!(c < n);
    }

    #[test]
    fn odd_bit_lengths_rejected(half in 8u32..512) {
        let bits = half * 2 + 1;
        prop_assert!(matches!(generate_keypair(bits), Err(RsaError::InvalidInput(_))));
    }
}

#[test]
fn sixteen_bit_single_character() {
    let (n, e, d) = generate_keypair(16).unwrap().into_parts();
    let c = encrypt(&n, &e, "A").unwrap();
    assert_eq!(decrypt(&n, &d, &c).unwrap(), "A");
}

#[test]
fn oversized_message_wraps_silently() {
    let (n, e, d) = generate_keypair(16).unwrap().into_parts();
    let message = "this is much longer than sixteen bits";
    assert!(BigUint::from_bytes_be(message.as_bytes()) >= n);

    let c = encrypt(&n, &e, message).unwrap();
    match decrypt(&n, &d, &c) {
        Ok(text) => assert_ne!(text, message),
        Err(err) => assert!(matches!(err, RsaError::Decode(_))),
    }
}

#[test]
fn zero_bit_length_rejected() {
    assert!(matches!(generate_keypair(0), Err(RsaError::InvalidInput(_))));
}
