// SPDX-FileCopyrightText: 2026 SSH Vault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Capability traits injected into the vault controller.
//!
//! Everything that touches the network, the terminal, or a child process sits
//! behind one of these traits so the orchestration can be tested in memory.
//! Async capabilities use `#[async_trait]` for dynamic dispatch compatibility.

pub mod editor;
pub mod fetch;
pub mod prompt;

pub use editor::Editor;
pub use fetch::KeyFetcher;
pub use prompt::SecretReader;
