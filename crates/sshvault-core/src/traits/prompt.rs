// SPDX-FileCopyrightText: 2026 SSH Vault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Secret line input.

use secrecy::SecretString;

use crate::error::VaultError;

/// Reads one secret line, without its trailing line terminator.
pub trait SecretReader: Send {
    /// Shows `prompt` (where the source supports it) and reads one line.
    fn read_secret(&mut self, prompt: &str) -> Result<SecretString, VaultError>;
}
