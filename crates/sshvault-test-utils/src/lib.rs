// SPDX-FileCopyrightText: 2026 SSH Vault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for ssh-vault integration tests.
//!
//! Provides fixture keys, mock collaborators and a harness for fast,
//! deterministic tests without a terminal, network or real editor.
//!
//! # Components
//!
//! - [`fixtures`] - RSA and ed25519 public keys with known fingerprints
//! - [`MockFetcher`] - Key fetcher answering from a fixed URL table
//! - [`ScriptedEditor`] - Editor that keeps, replaces or refuses the buffer
//! - [`TestHarness`] - Temp directory plus controller factory

pub mod fixtures;
pub mod harness;
pub mod mock_editor;
pub mod mock_fetcher;

pub use harness::{password_line, SharedBuffer, TestHarness};
pub use mock_editor::ScriptedEditor;
pub use mock_fetcher::MockFetcher;
