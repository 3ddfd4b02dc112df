// SPDX-FileCopyrightText: 2026 SSH Vault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Interactive plaintext editing.

use async_trait::async_trait;

use crate::error::VaultError;

/// Lets the user edit a plaintext buffer and returns the result.
#[async_trait]
pub trait Editor: Send + Sync {
    /// Hands `plaintext` to the user and returns the edited bytes.
    async fn edit(&self, plaintext: &[u8]) -> Result<Vec<u8>, VaultError>;
}
