// SPDX-FileCopyrightText: 2026 SSH Vault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Scripted editor for deterministic testing.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use sshvault_core::{Editor, VaultError};

#[derive(Debug, Clone)]
enum Script {
    Identity,
    Replace(Vec<u8>),
    Fail(String),
}

/// An editor that does the same thing every time it is invoked, and keeps
/// a copy of each plaintext it was handed.
#[derive(Debug, Clone)]
pub struct ScriptedEditor {
    script: Script,
    seen: Arc<Mutex<Vec<Vec<u8>>>>,
}

impl ScriptedEditor {
    fn with(script: Script) -> Self {
        Self {
            script,
            seen: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Saves the buffer without changing it.
    pub fn identity() -> Self {
        Self::with(Script::Identity)
    }

    /// Replaces the whole buffer with `contents`.
    pub fn replace(contents: impl Into<Vec<u8>>) -> Self {
        Self::with(Script::Replace(contents.into()))
    }

    /// Exits unsuccessfully.
    pub fn fail(message: impl Into<String>) -> Self {
        Self::with(Script::Fail(message.into()))
    }

    /// Plaintexts handed to the editor so far.
    pub async fn seen(&self) -> Vec<Vec<u8>> {
        self.seen.lock().await.clone()
    }
}

#[async_trait]
impl Editor for ScriptedEditor {
    async fn edit(&self, plaintext: &[u8]) -> Result<Vec<u8>, VaultError> {
        self.seen.lock().await.push(plaintext.to_vec());
        match &self.script {
            Script::Identity => Ok(plaintext.to_vec()),
            Script::Replace(contents) => Ok(contents.clone()),
            Script::Fail(message) => Err(VaultError::Edit(message.clone())),
        }
    }
}
