// SPDX-FileCopyrightText: 2026 SSH Vault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Random vault passwords.
//!
//! A [`Password`] is 32 random bytes used directly as the AES-256-GCM key. It
//! is shown to the user once, as hex, and typed back in to open the vault.
//! It is never written to the vault file and never logged.

use std::fmt;

use ring::rand::{SecureRandom, SystemRandom};
use secrecy::SecretString;
use sshvault_core::VaultError;
use zeroize::Zeroizing;

/// Password length in bytes.
pub const PASSWORD_LEN: usize = 32;

/// Fill `n` bytes from the system CSPRNG.
pub fn generate_bytes(n: usize) -> Result<Zeroizing<Vec<u8>>, VaultError> {
    let mut bytes = Zeroizing::new(vec![0u8; n]);
    SystemRandom::new()
        .fill(&mut bytes[..])
        .map_err(|_| VaultError::Entropy("system random source failed".to_string()))?;
    Ok(bytes)
}

/// The symmetric key protecting one vault.
///
/// Zeroed on drop. Debug output intentionally omits the key material.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(Zeroizing<[u8; PASSWORD_LEN]>);

impl Password {
    /// Draws a fresh password from the system CSPRNG.
    pub fn generate() -> Result<Self, VaultError> {
        let bytes = generate_bytes(PASSWORD_LEN)?;
        let mut key = Zeroizing::new([0u8; PASSWORD_LEN]);
        key.copy_from_slice(&bytes);
        Ok(Self(key))
    }

    /// Parses the hex form shown by [`Password::to_hex`].
    ///
    /// Surrounding whitespace is ignored; case is not significant.
    pub fn from_hex(text: &str) -> Result<Self, VaultError> {
        let mut key = Zeroizing::new([0u8; PASSWORD_LEN]);
        hex::decode_to_slice(text.trim(), &mut key[..]).map_err(|_| {
            VaultError::Prompt(format!(
                "a vault password is {} hexadecimal characters",
                PASSWORD_LEN * 2
            ))
        })?;
        Ok(Self(key))
    }

    /// The lowercase hex form handed to the user.
    pub fn to_hex(&self) -> SecretString {
        SecretString::from(hex::encode(&self.0[..]))
    }

    /// The raw AES key.
    pub fn expose(&self) -> &[u8; PASSWORD_LEN] {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Password").field(&"[REDACTED]").finish()
    }
}
