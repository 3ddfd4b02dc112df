// SPDX-FileCopyrightText: 2026 SSH Vault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! External editor bridge.
//!
//! Plaintext is written to a 0600 file inside a private 0700 temp directory,
//! the editor is run against that path, and the file is read back once the
//! editor exits with status 0. The directory is removed when the guard drops,
//! on success and on every error path.

use std::io::Write;
use std::path::Path;

use async_trait::async_trait;
use sshvault_core::{Editor, VaultError};
use tracing::{debug, warn};
use zeroize::Zeroizing;

/// Environment variable naming the editor command line.
pub const EDITOR_ENV_VAR: &str = "EDITOR";

const TEMP_FILE_NAME: &str = "vault.txt";

/// Runs a user-chosen program to edit plaintext.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalEditor {
    program: String,
    args: Vec<String>,
}

impl ExternalEditor {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Splits a command line such as `code --wait` on whitespace.
    pub fn from_command_line(command: &str) -> Result<Self, VaultError> {
        let mut words = command.split_whitespace().map(str::to_string);
        let program = words
            .next()
            .ok_or_else(|| VaultError::Config("editor command is empty".to_string()))?;
        Ok(Self::new(program, words.collect()))
    }

    /// Uses `$EDITOR` when set and non-empty, else `fallback`.
    pub fn from_env(fallback: &str) -> Result<Self, VaultError> {
        match std::env::var(EDITOR_ENV_VAR) {
            Ok(command) if !command.trim().is_empty() => Self::from_command_line(&command),
            _ => Self::from_command_line(fallback),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    async fn run(&self, path: &Path) -> Result<(), VaultError> {
        debug!(program = %self.program, "launching editor");
        let status = tokio::process::Command::new(&self.program)
            .args(&self.args)
            .arg(path)
            .status()
            .await
            .map_err(|e| VaultError::Edit(format!("failed to start {}: {e}", self.program)))?;

        debug!(program = %self.program, %status, "editor exited");
        if !status.success() {
            return Err(VaultError::Edit(format!("{} exited with {status}", self.program)));
        }
        Ok(())
    }
}

#[async_trait]
impl Editor for ExternalEditor {
    async fn edit(&self, plaintext: &[u8]) -> Result<Vec<u8>, VaultError> {
        let dir = tempfile::Builder::new()
            .prefix("sshvault-")
            .tempdir()
            .map_err(|e| VaultError::Edit(format!("failed to create temp directory: {e}")))?;
        restrict(dir.path(), 0o700)?;

        let path = dir.path().join(TEMP_FILE_NAME);
        write_private(&path, plaintext)?;

        self.run(&path).await?;

        let edited = Zeroizing::new(
            std::fs::read(&path)
                .map_err(|e| VaultError::Edit(format!("failed to read edited file: {e}")))?,
        );

        if let Err(e) = dir.close() {
            warn!(error = %e, "failed to remove editor temp directory");
        }
        Ok(edited.to_vec())
    }
}

fn write_private(path: &Path, contents: &[u8]) -> Result<(), VaultError> {
    let mut options = std::fs::OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let mut file = options
        .open(path)
        .map_err(|e| VaultError::Edit(format!("failed to create temp file: {e}")))?;
    file.write_all(contents)
        .and_then(|()| file.sync_all())
        .map_err(|e| VaultError::Edit(format!("failed to write temp file: {e}")))
}

#[cfg(unix)]
fn restrict(path: &Path, mode: u32) -> Result<(), VaultError> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(mode))
        .map_err(|e| VaultError::Edit(format!("failed to restrict temp directory: {e}")))
}

#[cfg(not(unix))]
fn restrict(_path: &Path, _mode: u32) -> Result<(), VaultError> {
    Ok(())
}
