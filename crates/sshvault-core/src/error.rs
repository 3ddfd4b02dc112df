// SPDX-FileCopyrightText: 2026 SSH Vault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for ssh-vault.

use std::path::PathBuf;

use thiserror::Error;

/// The error type shared by every ssh-vault component.
///
/// Each component returns one of these variants and the controller surfaces
/// it unchanged; nothing in the workspace retries.
#[derive(Debug, Error)]
pub enum VaultError {
    /// Invalid or incomplete configuration (no key source, bad option combination).
    #[error("configuration error: {0}")]
    Config(String),

    /// No usable key bytes could be obtained from the local path or remote URL.
    #[error("key resolution failed: {0}")]
    KeyResolution(String),

    /// The key could not be parsed, is truncated, or is not an RSA key.
    #[error("invalid public key: {0}")]
    KeyFormat(String),

    /// `create` was pointed at a path that already holds a file.
    #[error("vault already exists: {}", path.display())]
    AlreadyExists { path: PathBuf },

    /// The vault file to open does not exist.
    #[error("vault not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// The vault file exists but could not be read.
    #[error("failed to read vault {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The ciphertext could not be written or renamed into place.
    #[error("failed to write vault {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Sealing or opening failed. Deliberately carries no detail: a wrong
    /// password, a wrong key and a tampered file are indistinguishable.
    #[error("authentication failed: wrong password, wrong key, or corrupted vault")]
    Authentication,

    /// The external editor failed or its temp file could not be handled.
    #[error("editor failed: {0}")]
    Edit(String),

    /// The system random source failed.
    #[error("entropy source failure: {0}")]
    Entropy(String),

    /// The password could not be read or is malformed.
    #[error("password prompt failed: {0}")]
    Prompt(String),

    /// There was nothing to encrypt.
    #[error("refusing to create an empty vault")]
    EmptyInput,

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl VaultError {
    /// Returns true for the single opaque authentication failure.
    pub fn is_authentication(&self) -> bool {
        matches!(self, VaultError::Authentication)
    }
}
