// SPDX-FileCopyrightText: 2026 SSH Vault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP key fetching.
//!
//! Provides [`HttpKeyFetcher`], a single-attempt `GET` that identifies itself
//! with the configured User-Agent and refuses to launder a missing key into
//! an empty success.

use std::time::Duration;

use async_trait::async_trait;
use sshvault_config::model::KeyConfig;
use sshvault_core::{KeyFetcher, VaultError};
use tracing::debug;

/// Fetches public keys over HTTP(S) with `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpKeyFetcher {
    client: reqwest::Client,
}

impl HttpKeyFetcher {
    /// Builds a client that sends `user_agent` and gives up after `timeout`.
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self, VaultError> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .map_err(|e| VaultError::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }

    /// Builds a client from the `[key]` config section.
    pub fn from_config(config: &KeyConfig) -> Result<Self, VaultError> {
        Self::new(&config.user_agent, Duration::from_secs(config.timeout_secs))
    }
}

#[async_trait]
impl KeyFetcher for HttpKeyFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, VaultError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| VaultError::KeyResolution(format!("failed to fetch {url}: {e}")))?;

        let status = response.status();
        debug!(%url, status = status.as_u16(), "key request completed");

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(VaultError::KeyResolution(format!("no key found at {url}")));
        }
        if !status.is_success() {
            return Err(VaultError::KeyResolution(format!(
                "fetching {url} returned HTTP {status}"
            )));
        }

        let body = response.bytes().await.map_err(|e| {
            VaultError::KeyResolution(format!("failed to read response from {url}: {e}"))
        })?;

        if body.iter().all(u8::is_ascii_whitespace) {
            return Err(VaultError::KeyResolution(format!("no key found at {url}")));
        }

        Ok(body.to_vec())
    }
}
