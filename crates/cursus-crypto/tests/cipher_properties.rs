//! Property tests for the sealed token codec

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use cursus_crypto::{DecryptError, TokenCipher, NONCE_LEN};
use proptest::prelude::*;
use std::collections::HashSet;

fn cipher() -> TokenCipher {
    TokenCipher::from_secret("property-test-secret-0123456789ab")
}

proptest! {
    /// Round-trip: open(seal(s)) == s for any string
    #[test]
    fn prop_open_inverts_seal(plaintext in any::<String>()) {
        let cipher = cipher();
        let sealed = cipher.seal(&plaintext).unwrap();
        prop_assert_eq!(cipher.open(&sealed).unwrap(), plaintext);
    }

    /// Tamper detection: flipping any single byte breaks the seal
    #[test]
    fn prop_single_byte_flip_is_detected(
        plaintext in "[ -~]{0,64}",
        position in any::<prop::sample::Index>(),
        flip in 1u8..=255,
    ) {
        let cipher = cipher();
        let sealed = cipher.seal(&plaintext).unwrap();
        let mut raw = URL_SAFE_NO_PAD.decode(&sealed).unwrap();
        let index = position.index(raw.len());
        raw[index] ^= flip;
        let tampered = URL_SAFE_NO_PAD.encode(&raw);

        prop_assert_eq!(cipher.open(&tampered), Err(DecryptError));
        prop_assert!(!cipher.can_open(&tampered));
    }

    /// Arbitrary text never opens and never panics
    #[test]
    fn prop_garbage_never_opens(garbage in any::<String>()) {
        prop_assert!(!cipher().can_open(&garbage));
    }
}

#[test]
fn nonces_are_unique_across_ten_thousand_seals() {
    let cipher = cipher();
    // 12 nonce bytes encode to exactly 16 unpadded base64 characters
    let prefix_len = NONCE_LEN / 3 * 4;
    let mut prefixes = HashSet::with_capacity(10_000);
    for _ in 0..10_000 {
        let sealed = cipher.seal("same plaintext").unwrap();
        prefixes.insert(sealed[..prefix_len].to_string());
    }
    assert_eq!(prefixes.len(), 10_000);
}

#[test]
fn nonces_are_unique_across_concurrent_seals() {
    let cipher = cipher();
    let prefix_len = NONCE_LEN / 3 * 4;
    let per_thread = 2_500;

    let prefixes: Vec<String> = std::thread::scope(|scope| {
        let workers: Vec<_> = (0..4)
            .map(|_| {
                let cipher = &cipher;
                scope.spawn(move || {
                    (0..per_thread)
                        .map(|_| cipher.seal("same plaintext").unwrap()[..prefix_len].to_string())
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        workers
            .into_iter()
            .flat_map(|worker| worker.join().unwrap())
            .collect()
    });

    assert_eq!(prefixes.len(), 4 * per_thread);
    let unique: HashSet<&String> = prefixes.iter().collect();
    assert_eq!(unique.len(), prefixes.len());
}

#[test]
fn not_base64_is_rejected_without_panicking() {
    let cipher = cipher();
    assert_eq!(cipher.open("not-base64!!"), Err(DecryptError));
    assert!(!cipher.can_open("not-base64!!"));
}
