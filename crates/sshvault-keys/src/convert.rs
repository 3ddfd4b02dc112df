// SPDX-FileCopyrightText: 2026 SSH Vault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SSH public key to PKCS8 conversion.
//!
//! Parses an OpenSSH `ssh-rsa ...` line with `ssh-key`, rebuilds the RSA key
//! from its modulus and exponent with `rsa`, and re-encodes it as a DER
//! SubjectPublicKeyInfo. DER is canonical, so the same key always yields the
//! same bytes.

use std::fmt;

use rsa::pkcs8::{DecodePublicKey, EncodePublicKey};
use rsa::traits::PublicKeyParts;
use rsa::{BigUint, RsaPublicKey};
use ssh_key::public::KeyData;
use ssh_key::{HashAlg, PublicKey};
use sshvault_core::VaultError;

/// Largest modulus accepted, in bits.
const MAX_RSA_BITS: usize = 16384;

/// An SSH RSA key converted to its PKCS8 public-key encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertedKey {
    /// DER-encoded SubjectPublicKeyInfo.
    pub pkcs8: Vec<u8>,
    /// Comment field of the OpenSSH line (often `user@host`).
    pub comment: String,
    /// OpenSSH-style `SHA256:...` fingerprint, as `ssh-keygen -l` prints it.
    pub openssh_fingerprint: String,
}

/// Structured description of an RSA public key, for display only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKeyInfo {
    /// Modulus size in bits.
    pub bits: usize,
    /// Public exponent in decimal.
    pub exponent: String,
}

impl fmt::Display for PublicKeyInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RSA {} bits, e={}", self.bits, self.exponent)
    }
}

/// Converts raw OpenSSH public key bytes to PKCS8 DER.
pub fn to_pkcs8(raw: &[u8]) -> Result<Vec<u8>, VaultError> {
    convert(raw).map(|key| key.pkcs8)
}

/// Converts raw OpenSSH public key bytes, keeping the SSH-side metadata.
pub fn convert(raw: &[u8]) -> Result<ConvertedKey, VaultError> {
    let text = std::str::from_utf8(raw)
        .map_err(|_| VaultError::KeyFormat("public key is not valid UTF-8".to_string()))?
        .trim();
    if text.is_empty() {
        return Err(VaultError::KeyFormat("public key is empty".to_string()));
    }

    let ssh_key = PublicKey::from_openssh(text)
        .map_err(|e| VaultError::KeyFormat(format!("cannot parse OpenSSH public key: {e}")))?;

    let KeyData::Rsa(rsa_key) = ssh_key.key_data() else {
        return Err(VaultError::KeyFormat(format!(
            "unsupported key type {}; only ssh-rsa keys can protect a vault",
            ssh_key.algorithm()
        )));
    };

    let n = rsa_key
        .n
        .as_positive_bytes()
        .ok_or_else(|| VaultError::KeyFormat("RSA modulus is not positive".to_string()))?;
    let e = rsa_key
        .e
        .as_positive_bytes()
        .ok_or_else(|| VaultError::KeyFormat("RSA exponent is not positive".to_string()))?;

    let public = RsaPublicKey::new_with_max_size(
        BigUint::from_bytes_be(n),
        BigUint::from_bytes_be(e),
        MAX_RSA_BITS,
    )
    .map_err(|e| VaultError::KeyFormat(format!("invalid RSA public key: {e}")))?;

    let der = public
        .to_public_key_der()
        .map_err(|e| VaultError::Internal(format!("failed to encode PKCS8 public key: {e}")))?;

    Ok(ConvertedKey {
        pkcs8: der.as_bytes().to_vec(),
        comment: ssh_key.comment().to_string(),
        openssh_fingerprint: ssh_key.fingerprint(HashAlg::Sha256).to_string(),
    })
}

/// Recovers a key description from PKCS8 DER produced by [`to_pkcs8`].
pub fn parse_public_key(pkcs8: &[u8]) -> Result<PublicKeyInfo, VaultError> {
    let public = RsaPublicKey::from_public_key_der(pkcs8)
        .map_err(|e| VaultError::KeyFormat(format!("invalid PKCS8 public key: {e}")))?;
    Ok(PublicKeyInfo {
        bits: public.n().bits(),
        exponent: public.e().to_string(),
    })
}
