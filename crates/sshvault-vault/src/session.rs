// SPDX-FileCopyrightText: 2026 SSH Vault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-invocation vault session.
//!
//! A [`Session`] is assembled once with [`SessionBuilder`] after the key has
//! been resolved and converted, then frozen. Nothing in it changes while the
//! controller seals or opens. The password is deliberately not part of it.

use sshvault_core::{Action, VaultError};
use sshvault_keys::{parse_public_key, ConvertedKey, Fingerprint, KeySource, PublicKeyInfo};

use crate::store::VaultTarget;

/// Everything an operation needs to know about the key and the vault location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    action: Action,
    target: VaultTarget,
    key_source: String,
    key_info: PublicKeyInfo,
    comment: String,
    openssh_fingerprint: String,
    fingerprint: Fingerprint,
}

impl Session {
    pub fn builder(action: Action) -> SessionBuilder {
        SessionBuilder::new(action)
    }

    pub fn action(&self) -> Action {
        self.action
    }

    pub fn target(&self) -> &VaultTarget {
        &self.target
    }

    /// Path or URL the key was read from.
    pub fn key_source(&self) -> &str {
        &self.key_source
    }

    pub fn key_info(&self) -> &PublicKeyInfo {
        &self.key_info
    }

    /// Comment of the OpenSSH key line.
    pub fn comment(&self) -> &str {
        &self.comment
    }

    /// `SHA256:...` as printed by `ssh-keygen -l`.
    pub fn openssh_fingerprint(&self) -> &str {
        &self.openssh_fingerprint
    }

    /// The associated data bound into every seal/open of this session.
    pub fn fingerprint(&self) -> &Fingerprint {
        &self.fingerprint
    }
}

/// Collects the parts of a [`Session`].
#[derive(Debug)]
pub struct SessionBuilder {
    action: Action,
    target: VaultTarget,
    key_source: Option<KeySource>,
    key: Option<ConvertedKey>,
}

impl SessionBuilder {
    pub fn new(action: Action) -> Self {
        Self {
            action,
            target: VaultTarget::Stdout,
            key_source: None,
            key: None,
        }
    }

    pub fn target(mut self, target: VaultTarget) -> Self {
        self.target = target;
        self
    }

    pub fn key_source(mut self, source: KeySource) -> Self {
        self.key_source = Some(source);
        self
    }

    pub fn key(mut self, key: ConvertedKey) -> Self {
        self.key = Some(key);
        self
    }

    /// Derives the fingerprint and key description and freezes the session.
    pub fn build(self) -> Result<Session, VaultError> {
        let source = self
            .key_source
            .ok_or_else(|| VaultError::Internal("session built without a key source".to_string()))?;
        let key = self
            .key
            .ok_or_else(|| VaultError::Internal("session built without a key".to_string()))?;

        let key_info = parse_public_key(&key.pkcs8)?;
        let fingerprint = Fingerprint::of(&key.pkcs8);

        Ok(Session {
            action: self.action,
            target: self.target,
            key_source: source.to_string(),
            key_info,
            comment: key.comment,
            openssh_fingerprint: key.openssh_fingerprint,
            fingerprint,
        })
    }
}
