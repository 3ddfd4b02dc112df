// SPDX-FileCopyrightText: 2026 SSH Vault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for ssh-vault.
//!
//! This crate provides the error taxonomy, the shared enums, and the
//! capability traits (key fetching, secret input, editing) that the other
//! workspace crates implement or consume.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::VaultError;
pub use types::{Action, Phase};

pub use traits::{Editor, KeyFetcher, SecretReader};
