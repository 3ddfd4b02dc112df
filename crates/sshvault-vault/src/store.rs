// SPDX-FileCopyrightText: 2026 SSH Vault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Vault file storage.
//!
//! A vault is a single opaque blob at a path, or on standard output when no
//! path is given. Writes go to a temp file in the destination directory that
//! is then renamed over the target, so an interrupted write never leaves a
//! half-written vault behind. Creation never replaces an existing file.

use std::fmt;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use sshvault_core::VaultError;
use tempfile::NamedTempFile;
use tracing::debug;

/// Where a vault blob lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VaultTarget {
    File(PathBuf),
    Stdout,
}

impl VaultTarget {
    /// `None` or an empty path means standard output.
    pub fn from_path(path: Option<PathBuf>) -> Self {
        match path {
            Some(path) if !path.as_os_str().is_empty() => VaultTarget::File(path),
            _ => VaultTarget::Stdout,
        }
    }

    /// The file path, if the target is a file.
    pub fn path(&self) -> Option<&Path> {
        match self {
            VaultTarget::File(path) => Some(path),
            VaultTarget::Stdout => None,
        }
    }
}

impl fmt::Display for VaultTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VaultTarget::File(path) => write!(f, "{}", path.display()),
            VaultTarget::Stdout => f.write_str("<stdout>"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WriteMode {
    CreateNew,
    Overwrite,
}

/// Permission to write one vault target.
///
/// Obtained from [`create_new`] (refuses existing files) or [`overwrite`].
#[derive(Debug)]
pub struct VaultHandle {
    target: VaultTarget,
    mode: WriteMode,
}

/// Claims `target` for a new vault.
///
/// Fails with [`VaultError::AlreadyExists`] if anything already exists at the
/// path. Standard output can always be claimed.
pub fn create_new(target: &VaultTarget) -> Result<VaultHandle, VaultError> {
    if let VaultTarget::File(path) = target
        && std::fs::symlink_metadata(path).is_ok()
    {
        return Err(VaultError::AlreadyExists { path: path.clone() });
    }
    Ok(VaultHandle {
        target: target.clone(),
        mode: WriteMode::CreateNew,
    })
}

/// Claims `target` for replacing an existing vault.
pub fn overwrite(target: &VaultTarget) -> VaultHandle {
    VaultHandle {
        target: target.clone(),
        mode: WriteMode::Overwrite,
    }
}

impl VaultHandle {
    /// The target this handle writes to.
    pub fn target(&self) -> &VaultTarget {
        &self.target
    }

    /// Writes `ciphertext` to the target. `stdout` receives it when the
    /// target is [`VaultTarget::Stdout`] and is untouched otherwise.
    pub fn write(&self, ciphertext: &[u8], stdout: &mut dyn Write) -> Result<(), VaultError> {
        match &self.target {
            VaultTarget::Stdout => {
                stdout
                    .write_all(ciphertext)
                    .and_then(|()| stdout.flush())
                    .map_err(|source| VaultError::Write {
                        path: PathBuf::from("<stdout>"),
                        source,
                    })?;
                debug!(bytes = ciphertext.len(), "vault written to stdout");
                Ok(())
            }
            VaultTarget::File(path) => {
                write_atomic(path, ciphertext, self.mode)?;
                debug!(path = %path.display(), bytes = ciphertext.len(), "vault written");
                Ok(())
            }
        }
    }
}

fn write_atomic(path: &Path, contents: &[u8], mode: WriteMode) -> Result<(), VaultError> {
    let write_err = |source: io::Error| VaultError::Write {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    // Created 0600 in the destination directory so the rename stays on one filesystem.
    let mut tmp = tempfile::Builder::new()
        .prefix(".sshvault-")
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(write_err)?;
    tmp.write_all(contents).map_err(write_err)?;
    tmp.as_file().sync_all().map_err(write_err)?;

    persist(tmp, path, mode)
}

fn persist(tmp: NamedTempFile, path: &Path, mode: WriteMode) -> Result<(), VaultError> {
    let result = match mode {
        WriteMode::CreateNew => tmp.persist_noclobber(path),
        WriteMode::Overwrite => tmp.persist(path),
    };
    // On failure the temp file is dropped with the error and removed.
    result.map(drop).map_err(|e| {
        if mode == WriteMode::CreateNew && e.error.kind() == io::ErrorKind::AlreadyExists {
            VaultError::AlreadyExists {
                path: path.to_path_buf(),
            }
        } else {
            VaultError::Write {
                path: path.to_path_buf(),
                source: e.error,
            }
        }
    })
}

/// Reads the raw ciphertext of the vault at `path`.
pub fn read(path: &Path) -> Result<Vec<u8>, VaultError> {
    std::fs::read(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => VaultError::NotFound {
            path: path.to_path_buf(),
        },
        _ => VaultError::Read {
            path: path.to_path_buf(),
            source,
        },
    })
}
