//! Cryptographic Utilities
//!
//! Keyed-hash primitives (HMAC over MD5 / SHA-1 / SHA-2) with lowercase hex
//! output, and the rule-driven chain that feeds each digest into the next.

use hmac::digest::KeyInit;
use hmac::{Hmac, Mac};
use md5::Md5;
use sha1::Sha1;
use sha2::{Sha224, Sha256, Sha384, Sha512};

/// Keyed hash over text input, producing lowercase hex
pub type KeyedHash = fn(data: &str, key: &str) -> String;

/// Rule code → primitive. Index is the rule code.
const KEYED_HASHES: [KeyedHash; 6] = [
    hmac_hex::<Hmac<Md5>>,
    hmac_hex::<Hmac<Sha1>>,
    hmac_hex::<Hmac<Sha256>>,
    hmac_hex::<Hmac<Sha224>>,
    hmac_hex::<Hmac<Sha512>>,
    hmac_hex::<Hmac<Sha384>>,
];

/// Entry used for rule codes outside the table: input passes through unchanged
const PASSTHROUGH: KeyedHash = passthrough;

fn passthrough(data: &str, _key: &str) -> String {
    data.to_string()
}

fn hmac_hex<M: Mac + KeyInit>(data: &str, key: &str) -> String {
    let mut mac = <M as Mac>::new_from_slice(key.as_bytes())
        .expect("HMAC can take key of any size");
    mac.update(data.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Look up the keyed-hash primitive for a rule code
///
/// Codes `0..=5` select HMAC-MD5, HMAC-SHA1, HMAC-SHA256, HMAC-SHA224,
/// HMAC-SHA512 and HMAC-SHA384. Any other code yields the passthrough.
pub fn keyed_hash_for(rule: i64) -> KeyedHash {
    usize::try_from(rule)
        .ok()
        .and_then(|index| KEYED_HASHES.get(index).copied())
        .unwrap_or(PASSTHROUGH)
}

/// Whether a rule code selects a real primitive
pub fn is_known_rule(rule: i64) -> bool {
    (0..KEYED_HASHES.len() as i64).contains(&rule)
}

/// Apply `rules` in order, chaining each hex digest into the next step
///
/// An empty rule list returns `payload` unchanged. Unknown codes leave the
/// accumulator untouched.
pub fn chain_keyed_hash(payload: &str, key: &str, rules: &[i64]) -> String {
    rules
        .iter()
        .fold(payload.to_string(), |acc, &rule| keyed_hash_for(rule)(&acc, key))
}

#[cfg(test)]
mod tests {
    use super::*;

    const FOX: &str = "The quick brown fox jumps over the lazy dog";

    #[test]
    fn test_hmac_known_values() {
        assert_eq!(
            keyed_hash_for(0)(FOX, "key"),
            "80070713463e7749b90c2dc24911e275"
        );
        assert_eq!(
            keyed_hash_for(1)(FOX, "key"),
            "de7c9b85b8b78aa6bc8a7a36f70a90701c9db4d9"
        );
        assert_eq!(
            keyed_hash_for(2)(FOX, "key"),
            "f7bc83f430538424b13298e6aa6fb143ef4d59a14946175997479dbc2d1a3cd8"
        );
    }

    #[test]
    fn test_digest_lengths() {
        let lengths: Vec<usize> = (0..6).map(|rule| keyed_hash_for(rule)("x", "k").len()).collect();
        assert_eq!(lengths, vec![32, 40, 64, 56, 128, 96]);
    }

    #[test]
    fn test_hex_is_lowercase() {
        for rule in 0..6 {
            let digest = keyed_hash_for(rule)(FOX, "key");
            assert!(digest.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
        }
    }

    #[test]
    fn test_unknown_rule_passthrough() {
        assert_eq!(keyed_hash_for(6)("payload", "k"), "payload");
        assert_eq!(keyed_hash_for(-1)("payload", "k"), "payload");
        assert_eq!(keyed_hash_for(i64::MAX)("payload", "k"), "payload");
        assert!(!is_known_rule(6));
        assert!(is_known_rule(0));
        assert!(is_known_rule(5));
    }

    #[test]
    fn test_chain_empty_is_identity() {
        assert_eq!(chain_keyed_hash("{\"a\":1}", "key", &[]), "{\"a\":1}");
    }

    #[test]
    fn test_chain_feeds_output_forward() {
        let sha256 = keyed_hash_for(2);
        let once = sha256(FOX, "key");
        let twice = sha256(&once, "key");
        assert_eq!(chain_keyed_hash(FOX, "key", &[2]), once);
        assert_eq!(chain_keyed_hash(FOX, "key", &[2, 2]), twice);
    }

    #[test]
    fn test_chain_skips_unknown_codes() {
        let known = chain_keyed_hash(FOX, "key", &[0, 2]);
        assert_eq!(chain_keyed_hash(FOX, "key", &[0, 9, 2]), known);
        assert_eq!(chain_keyed_hash(FOX, "key", &[7, 0, 2, 42]), known);
    }

    #[test]
    fn test_chain_is_deterministic() {
        let rules = [3, 1, 5, 4, 0, 2];
        assert_eq!(
            chain_keyed_hash(FOX, "k1", &rules),
            chain_keyed_hash(FOX, "k1", &rules)
        );
        assert_ne!(
            chain_keyed_hash(FOX, "k1", &rules),
            chain_keyed_hash(FOX, "k2", &rules)
        );
    }
}
