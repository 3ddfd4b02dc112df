// SPDX-FileCopyrightText: 2026 SSH Vault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! AES-256-GCM single-secret vault bound to an SSH RSA public key.
//!
//! A vault is one encrypted blob. Its key is a random 32-byte password that
//! the user keeps; the fingerprint of an SSH RSA public key is bound into
//! every seal and open as associated data, so the blob only opens against
//! the key it was created for.

pub mod controller;
pub mod crypto;
pub mod editor;
pub mod prompt;
pub mod secret;
pub mod session;
pub mod store;

pub use controller::{OpenedVault, VaultController};
pub use editor::ExternalEditor;
pub use prompt::{read_password, LineReader, TerminalReader, PASSWORD_ENV_VAR};
pub use secret::{Password, PASSWORD_LEN};
pub use session::{Session, SessionBuilder};
pub use store::VaultTarget;
