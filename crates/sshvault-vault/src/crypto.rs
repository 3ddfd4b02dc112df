// SPDX-FileCopyrightText: 2026 SSH Vault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Low-level AES-256-GCM seal/open operations.
//!
//! Every call to [`seal`] generates a fresh random 96-bit nonce via the system
//! CSPRNG and prepends it to the output, so a vault blob is
//! `nonce (12) || ciphertext || tag (16)`. Nonce reuse would be catastrophic
//! for GCM security.
//!
//! Every failure of [`open`] is the same [`VaultError::Authentication`]: a
//! wrong key, a wrong fingerprint and a flipped bit look identical.

use ring::aead::{Aad, LessSafeKey, Nonce, UnboundKey, AES_256_GCM, NONCE_LEN};
use ring::rand::{SecureRandom, SystemRandom};
use sshvault_core::VaultError;

/// Authentication tag length appended by AES-256-GCM.
pub const TAG_LEN: usize = 16;

/// Shortest blob [`open`] will consider: a nonce and a tag around empty plaintext.
pub const MIN_SEALED_LEN: usize = NONCE_LEN + TAG_LEN;

/// Encrypt `plaintext` under `key`, binding `associated_data` into the tag.
///
/// Returns `nonce || ciphertext || tag`.
pub fn seal(
    key: &[u8; 32],
    plaintext: &[u8],
    associated_data: &[u8],
) -> Result<Vec<u8>, VaultError> {
    let less_safe = aead_key(key)?;

    let rng = SystemRandom::new();
    let mut nonce_bytes = [0u8; NONCE_LEN];
    rng.fill(&mut nonce_bytes)
        .map_err(|_| VaultError::Entropy("failed to generate random nonce".to_string()))?;

    // Seal in place: the buffer is extended with the authentication tag.
    let mut in_out = plaintext.to_vec();
    less_safe
        .seal_in_place_append_tag(
            Nonce::assume_unique_for_key(nonce_bytes),
            Aad::from(associated_data),
            &mut in_out,
        )
        .map_err(|_| VaultError::Authentication)?;

    let mut sealed = Vec::with_capacity(NONCE_LEN + in_out.len());
    sealed.extend_from_slice(&nonce_bytes);
    sealed.extend_from_slice(&in_out);
    Ok(sealed)
}

/// Decrypt a blob produced by [`seal`] with the same key and associated data.
pub fn open(
    key: &[u8; 32],
    sealed: &[u8],
    associated_data: &[u8],
) -> Result<Vec<u8>, VaultError> {
    if sealed.len() < MIN_SEALED_LEN {
        return Err(VaultError::Authentication);
    }
    let less_safe = aead_key(key)?;

    let (nonce_bytes, ciphertext) = sealed.split_at(NONCE_LEN);
    let nonce =
        Nonce::try_assume_unique_for_key(nonce_bytes).map_err(|_| VaultError::Authentication)?;

    let mut in_out = ciphertext.to_vec();
    let plaintext = less_safe
        .open_in_place(nonce, Aad::from(associated_data), &mut in_out)
        .map_err(|_| VaultError::Authentication)?;

    Ok(plaintext.to_vec())
}

fn aead_key(key: &[u8; 32]) -> Result<LessSafeKey, VaultError> {
    let unbound = UnboundKey::new(&AES_256_GCM, key)
        .map_err(|_| VaultError::Internal("failed to create AES-256-GCM key".to_string()))?;
    Ok(LessSafeKey::new(unbound))
}
