// SPDX-FileCopyrightText: 2026 SSH Vault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for end-to-end vault tests.
//!
//! `TestHarness` owns a temp directory holding the fixture keys, a
//! [`MockFetcher`], a [`ScriptedEditor`] and an in-memory stdout. Each call
//! to [`TestHarness::controller`] wires a fresh `VaultController` to them,
//! with the given text as everything the "user" will type.

use std::io::{self, Cursor, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use secrecy::ExposeSecret;
use sshvault_config::model::KeyConfig;
use sshvault_core::VaultError;
use sshvault_keys::{KeyRequest, KeyResolver};
use sshvault_vault::{LineReader, Password, VaultController, VaultTarget};

use crate::fixtures::{OTHER_RSA_PUBLIC_KEY, RSA_PUBLIC_KEY};
use crate::mock_editor::ScriptedEditor;
use crate::mock_fetcher::MockFetcher;

/// Base URL the harness uses for GitHub key lookups.
pub const GITHUB_URL: &str = "https://github.test";

/// Base URL the harness uses for fingerprint lookups.
pub const LOOKUP_URL: &str = "https://lookup.test/key";

/// A `Write` sink whose contents stay readable after it is boxed away.
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub fn contents(&self) -> Vec<u8> {
        self.0.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// An isolated vault environment.
pub struct TestHarness {
    dir: tempfile::TempDir,
    fetcher: Arc<MockFetcher>,
    editor: Arc<ScriptedEditor>,
    stdout: SharedBuffer,
    config: KeyConfig,
}

impl TestHarness {
    /// Creates the temp directory and writes both RSA fixture keys into it.
    pub fn new() -> Result<Self, VaultError> {
        let dir = tempfile::TempDir::new()
            .map_err(|e| VaultError::Internal(format!("failed to create temp dir: {e}")))?;
        for (name, key) in [("id_rsa.pub", RSA_PUBLIC_KEY), ("other_rsa.pub", OTHER_RSA_PUBLIC_KEY)] {
            let path = dir.path().join(name);
            std::fs::write(&path, key).map_err(|source| VaultError::Write { path, source })?;
        }

        let config = KeyConfig {
            default_path: None,
            github_url: GITHUB_URL.to_string(),
            lookup_url: LOOKUP_URL.to_string(),
            ..KeyConfig::default()
        };

        Ok(Self {
            dir,
            fetcher: Arc::new(MockFetcher::new()),
            editor: Arc::new(ScriptedEditor::identity()),
            stdout: SharedBuffer::default(),
            config,
        })
    }

    /// Uses `editor` for every controller built afterwards.
    pub fn with_editor(mut self, editor: ScriptedEditor) -> Self {
        self.editor = Arc::new(editor);
        self
    }

    /// Falls back to the fixture key when a request names no key.
    pub fn with_default_key(mut self) -> Self {
        self.config.default_path = Some(self.key_path().display().to_string());
        self
    }

    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    pub fn key_path(&self) -> PathBuf {
        self.dir.path().join("id_rsa.pub")
    }

    pub fn other_key_path(&self) -> PathBuf {
        self.dir.path().join("other_rsa.pub")
    }

    /// A path inside the temp directory; nothing is created.
    pub fn vault_path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// A request for the fixture RSA key file.
    pub fn key_request(&self) -> KeyRequest {
        KeyRequest::path(self.key_path())
    }

    pub fn fetcher(&self) -> &MockFetcher {
        &self.fetcher
    }

    pub fn editor(&self) -> &ScriptedEditor {
        &self.editor
    }

    /// Everything controllers have written to stdout.
    pub fn stdout(&self) -> Vec<u8> {
        self.stdout.contents()
    }

    /// A controller that reads `input` wherever it would prompt.
    pub fn controller(&self, input: &str) -> VaultController {
        VaultController::new(
            KeyResolver::new(&self.config, self.fetcher.clone()),
            Box::new(LineReader::new(Cursor::new(input.as_bytes().to_vec()))),
            self.editor.clone(),
            Box::new(self.stdout.clone()),
        )
    }

    /// A controller that answers the password prompt with `password`.
    pub fn controller_for(&self, password: &Password) -> VaultController {
        self.controller(&password_line(password))
    }

    /// Creates `name` with the fixture key and returns its password.
    pub async fn create_vault(&self, name: &str, plaintext: &[u8]) -> Result<Password, VaultError> {
        self.controller("")
            .create(
                &self.key_request(),
                VaultTarget::File(self.vault_path(name)),
                plaintext,
            )
            .await
    }
}

/// The line a user would type for `password`.
pub fn password_line(password: &Password) -> String {
    format!("{}\n", password.to_hex().expose_secret())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn harness_writes_fixture_keys() {
        let harness = TestHarness::new().unwrap();
        assert!(harness.key_path().is_file());
        assert!(harness.other_key_path().is_file());
        assert!(!harness.vault_path("v").exists());
    }

    #[tokio::test]
    #[serial]
    async fn harness_create_and_view() {
        let harness = TestHarness::new().unwrap();
        let password = harness.create_vault("v", b"hello").await.unwrap();
        let opened = harness
            .controller_for(&password)
            .view(&harness.key_request(), &harness.vault_path("v"))
            .await
            .unwrap();
        assert_eq!(opened.plaintext.as_slice(), b"hello");
    }
}
