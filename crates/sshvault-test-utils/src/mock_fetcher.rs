// SPDX-FileCopyrightText: 2026 SSH Vault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock key fetcher for deterministic testing.
//!
//! `MockFetcher` implements `KeyFetcher` with canned bodies per URL, enabling
//! remote-key tests without a network.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use sshvault_core::{KeyFetcher, VaultError};

/// Canned outcome for one URL.
#[derive(Debug, Clone)]
enum Reply {
    Body(Vec<u8>),
    NotFound,
}

/// A key fetcher that answers from a fixed table and records every request.
///
/// URLs without an entry behave like a 404.
#[derive(Debug, Clone, Default)]
pub struct MockFetcher {
    replies: Arc<Mutex<HashMap<String, Reply>>>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `url` with `body`. An empty body is still rejected the way
    /// the HTTP fetcher rejects it.
    pub async fn respond(&self, url: impl Into<String>, body: impl Into<Vec<u8>>) {
        self.replies
            .lock()
            .await
            .insert(url.into(), Reply::Body(body.into()));
    }

    /// Answer `url` with "no key found".
    pub async fn not_found(&self, url: impl Into<String>) {
        self.replies.lock().await.insert(url.into(), Reply::NotFound);
    }

    /// URLs requested so far, in order.
    pub async fn requests(&self) -> Vec<String> {
        self.requests.lock().await.clone()
    }
}

#[async_trait]
impl KeyFetcher for MockFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, VaultError> {
        self.requests.lock().await.push(url.to_string());
        match self.replies.lock().await.get(url) {
            Some(Reply::Body(body)) if !body.iter().all(u8::is_ascii_whitespace) => {
                Ok(body.clone())
            }
            _ => Err(VaultError::KeyResolution(format!("no key found at {url}"))),
        }
    }
}
