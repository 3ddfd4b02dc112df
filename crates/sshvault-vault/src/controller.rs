// SPDX-FileCopyrightText: 2026 SSH Vault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Vault lifecycle orchestration.
//!
//! [`VaultController`] sequences key resolution, conversion, fingerprinting,
//! sealing/opening and storage for the `create`, `view` and `edit` operations.
//! The key fetcher, password reader, editor and stdout sink are injected, so
//! the whole lifecycle runs in tests without a terminal, network or real editor.
//!
//! Phases: `Resolving → KeyReady [→ Editing] → Sealing → Done` for a create,
//! `Resolving → KeyReady → Opening [→ Editing → Sealing] → Done` for view and edit,
//! with `Failed` entered from any phase when an operation returns an error.

use std::fmt;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use sshvault_core::{Action, Editor, Phase, SecretReader, VaultError};
use sshvault_keys::convert::convert;
use sshvault_keys::{KeyRequest, KeyResolver};
use tracing::{debug, info};
use zeroize::Zeroizing;

use crate::crypto;
use crate::prompt::read_password;
use crate::secret::Password;
use crate::session::Session;
use crate::store::{self, VaultTarget};

/// Plaintext recovered by [`VaultController::view`], with the password that
/// opened it.
pub struct OpenedVault {
    pub session: Session,
    pub plaintext: Zeroizing<Vec<u8>>,
    pub password: Password,
}

impl fmt::Debug for OpenedVault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenedVault")
            .field("session", &self.session)
            .field("plaintext", &"[REDACTED]")
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Drives one vault operation per call.
pub struct VaultController {
    resolver: KeyResolver,
    reader: Box<dyn SecretReader>,
    editor: Arc<dyn Editor>,
    stdout: Box<dyn Write + Send>,
    phase: Phase,
}

impl VaultController {
    pub fn new(
        resolver: KeyResolver,
        reader: Box<dyn SecretReader>,
        editor: Arc<dyn Editor>,
        stdout: Box<dyn Write + Send>,
    ) -> Self {
        Self {
            resolver,
            reader,
            editor,
            stdout,
            phase: Phase::Resolving,
        }
    }

    /// Where the last operation stopped.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Encrypts `plaintext` under a fresh password into a new vault at `target`.
    ///
    /// Returns the generated password; it exists nowhere else.
    pub async fn create(
        &mut self,
        request: &KeyRequest,
        target: VaultTarget,
        plaintext: &[u8],
    ) -> Result<Password, VaultError> {
        let result = self.create_inner(request, target, plaintext).await;
        self.finish(result)
    }

    async fn create_inner(
        &mut self,
        request: &KeyRequest,
        target: VaultTarget,
        plaintext: &[u8],
    ) -> Result<Password, VaultError> {
        let session = self.prepare_create_inner(request, target).await?;
        self.seal_new_inner(&session, plaintext)
    }

    /// Like [`create`](Self::create), but the plaintext is typed into the
    /// editor, which only opens once the key is ready.
    pub async fn compose(
        &mut self,
        request: &KeyRequest,
        target: VaultTarget,
    ) -> Result<Password, VaultError> {
        let result = self.compose_inner(request, target).await;
        self.finish(result)
    }

    async fn compose_inner(
        &mut self,
        request: &KeyRequest,
        target: VaultTarget,
    ) -> Result<Password, VaultError> {
        let session = self.prepare_create_inner(request, target).await?;

        self.enter(Phase::Editing);
        let plaintext = Zeroizing::new(self.editor.edit(b"").await?);
        self.seal_new_inner(&session, &plaintext)
    }

    /// First half of a create: claims `target` and resolves the key.
    ///
    /// Leaves the controller in `KeyReady` so the caller can gather the
    /// plaintext and finish with [`seal_new`](Self::seal_new).
    pub async fn prepare_create(
        &mut self,
        request: &KeyRequest,
        target: VaultTarget,
    ) -> Result<Session, VaultError> {
        match self.prepare_create_inner(request, target).await {
            Ok(session) => Ok(session),
            Err(e) => self.finish(Err(e)),
        }
    }

    async fn prepare_create_inner(
        &mut self,
        request: &KeyRequest,
        target: VaultTarget,
    ) -> Result<Session, VaultError> {
        // Refuse an occupied target before touching the key.
        store::create_new(&target)?;
        self.prepare(Action::Create, request, target).await
    }

    /// Second half of a create: seals `plaintext` under a fresh password
    /// into the target the session claimed.
    pub fn seal_new(
        &mut self,
        session: &Session,
        plaintext: &[u8],
    ) -> Result<Password, VaultError> {
        let result = self.seal_new_inner(session, plaintext);
        self.finish(result)
    }

    fn seal_new_inner(
        &mut self,
        session: &Session,
        plaintext: &[u8],
    ) -> Result<Password, VaultError> {
        if plaintext.is_empty() {
            return Err(VaultError::EmptyInput);
        }
        let handle = store::create_new(session.target())?;

        self.enter(Phase::Sealing);
        let password = Password::generate()?;
        let sealed = crypto::seal(password.expose(), plaintext, session.fingerprint().as_bytes())?;
        handle.write(&sealed, &mut self.stdout)?;

        info!(
            vault = %session.target(),
            fingerprint = %session.fingerprint(),
            bytes = sealed.len(),
            "vault created"
        );
        Ok(password)
    }

    /// Reads the vault at `path`, asks for its password and decrypts it.
    pub async fn view(
        &mut self,
        request: &KeyRequest,
        path: &Path,
    ) -> Result<OpenedVault, VaultError> {
        let result = self.view_inner(Action::View, request, path).await;
        self.finish(result)
    }

    async fn view_inner(
        &mut self,
        action: Action,
        request: &KeyRequest,
        path: &Path,
    ) -> Result<OpenedVault, VaultError> {
        // A missing vault is reported before the user is asked for anything.
        let sealed = store::read(path)?;
        let session = self
            .prepare(action, request, VaultTarget::File(path.to_path_buf()))
            .await?;

        let password = read_password(self.reader.as_mut())?;

        self.enter(Phase::Opening);
        let plaintext = Zeroizing::new(crypto::open(
            password.expose(),
            &sealed,
            session.fingerprint().as_bytes(),
        )?);

        info!(vault = %session.target(), bytes = plaintext.len(), "vault opened");
        Ok(OpenedVault {
            session,
            plaintext,
            password,
        })
    }

    /// Opens the vault at `path`, hands its plaintext to the editor and
    /// reseals the result under the same password.
    pub async fn edit(&mut self, request: &KeyRequest, path: &Path) -> Result<(), VaultError> {
        let result = self.edit_inner(request, path).await;
        self.finish(result)
    }

    async fn edit_inner(&mut self, request: &KeyRequest, path: &Path) -> Result<(), VaultError> {
        let opened = self.view_inner(Action::Edit, request, path).await?;

        self.enter(Phase::Editing);
        let edited = Zeroizing::new(self.editor.edit(&opened.plaintext).await?);
        if edited.is_empty() {
            return Err(VaultError::EmptyInput);
        }
        if edited.as_slice() == opened.plaintext.as_slice() {
            debug!("plaintext unchanged by editor");
        }

        self.reseal_inner(&opened.session, &opened.password, &edited)
    }

    /// Seals `plaintext` with an existing password and replaces the vault
    /// the session points at.
    pub fn reseal(
        &mut self,
        session: &Session,
        password: &Password,
        plaintext: &[u8],
    ) -> Result<(), VaultError> {
        let result = self.reseal_inner(session, password, plaintext);
        self.finish(result)
    }

    fn reseal_inner(
        &mut self,
        session: &Session,
        password: &Password,
        plaintext: &[u8],
    ) -> Result<(), VaultError> {
        self.enter(Phase::Sealing);
        let sealed = crypto::seal(password.expose(), plaintext, session.fingerprint().as_bytes())?;
        store::overwrite(session.target()).write(&sealed, &mut self.stdout)?;
        info!(vault = %session.target(), bytes = sealed.len(), "vault resealed");
        Ok(())
    }

    /// Resolves and converts the key without touching any vault.
    pub async fn fingerprint(&mut self, request: &KeyRequest) -> Result<Session, VaultError> {
        let result = self
            .prepare(Action::Fingerprint, request, VaultTarget::Stdout)
            .await;
        self.finish(result)
    }

    async fn prepare(
        &mut self,
        action: Action,
        request: &KeyRequest,
        target: VaultTarget,
    ) -> Result<Session, VaultError> {
        self.enter(Phase::Resolving);
        let resolved = self.resolver.resolve(request).await?;
        let key = convert(&resolved.bytes)?;

        let session = Session::builder(action)
            .target(target)
            .key_source(resolved.source)
            .key(key)
            .build()?;

        self.enter(Phase::KeyReady);
        debug!(
            %action,
            fingerprint = %session.fingerprint(),
            key = %session.key_info(),
            "session ready"
        );
        Ok(session)
    }

    fn enter(&mut self, phase: Phase) {
        debug!(from = %self.phase, to = %phase, "phase transition");
        self.phase = phase;
    }

    fn finish<T>(&mut self, result: Result<T, VaultError>) -> Result<T, VaultError> {
        match &result {
            Ok(_) => self.enter(Phase::Done),
            Err(e) => {
                debug!(phase = %self.phase, error = %e, "operation failed");
                self.enter(Phase::Failed);
            }
        }
        result
    }
}
