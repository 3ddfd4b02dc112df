// SPDX-FileCopyrightText: 2026 SSH Vault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Vault fingerprints.
//!
//! A fingerprint is the lowercase hex SHA-256 of a key's PKCS8 encoding. It
//! is bound into every seal/open as associated data and never stored in the
//! vault file, so it must be re-derived from the key on every open.

use std::fmt;

use sha2::{Digest, Sha256};

/// Length of the hex rendering: 32 digest bytes, two characters each.
pub const FINGERPRINT_HEX_LEN: usize = 64;

/// Deterministic digest of a public key's PKCS8 bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Computes the fingerprint of `pkcs8`.
    pub fn of(pkcs8: &[u8]) -> Self {
        Self(hex::encode(Sha256::digest(pkcs8)))
    }

    /// The hex text, as used for associated data.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The associated-data bytes for seal/open.
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::to_pkcs8;
    use proptest::prelude::*;

    const RSA_KEY: &str = include_str!("../testdata/id_rsa.pub");
    const OTHER_RSA_KEY: &str = include_str!("../testdata/other_rsa.pub");

    #[test]
    fn matches_openssl_digest_of_spki() {
        // `ssh-keygen -e -m PKCS8 -f id_rsa.pub | openssl pkey -pubin -outform DER | sha256sum`
        let fp = Fingerprint::of(&to_pkcs8(RSA_KEY.as_bytes()).unwrap());
        assert_eq!(
            fp.as_str(),
            "740dd42e9f1e2603a33d7f31f09db4a0bb2f153b36ac7ffa790c969fac4fe882"
        );
    }

    #[test]
    fn fixed_length_lowercase_hex() {
        let fp = Fingerprint::of(&to_pkcs8(RSA_KEY.as_bytes()).unwrap());
        assert_eq!(fp.as_str().len(), FINGERPRINT_HEX_LEN);
        assert!(fp
            .as_str()
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
        assert_eq!(fp.to_string(), fp.as_str());
        assert_eq!(fp.as_bytes(), fp.as_str().as_bytes());
    }

    #[test]
    fn different_keys_have_different_fingerprints() {
        let a = Fingerprint::of(&to_pkcs8(RSA_KEY.as_bytes()).unwrap());
        let b = Fingerprint::of(&to_pkcs8(OTHER_RSA_KEY.as_bytes()).unwrap());
        assert_ne!(a, b);
    }

    proptest! {
        #[test]
        fn fingerprint_is_deterministic(bytes in proptest::collection::vec(any::<u8>(), 0..512)) {
            prop_assert_eq!(Fingerprint::of(&bytes), Fingerprint::of(&bytes));
        }

        #[test]
        fn single_byte_change_changes_fingerprint(
            bytes in proptest::collection::vec(any::<u8>(), 1..256),
            index in any::<prop::sample::Index>(),
        ) {
            let mut flipped = bytes.clone();
            let i = index.index(flipped.len());
            flipped[i] ^= 0x01;
            prop_assert_ne!(Fingerprint::of(&bytes), Fingerprint::of(&flipped));
        }
    }
}
