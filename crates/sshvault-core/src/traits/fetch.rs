// SPDX-FileCopyrightText: 2026 SSH Vault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Remote key retrieval.

use async_trait::async_trait;

use crate::error::VaultError;

/// Fetches raw public-key bytes from a URL.
///
/// Implementations make a single attempt. A missing resource must surface as
/// [`VaultError::KeyResolution`], never as an empty success.
#[async_trait]
pub trait KeyFetcher: Send + Sync {
    /// Returns the response body for `url`.
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, VaultError>;
}
