// SPDX-FileCopyrightText: 2026 SSH Vault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared by the ssh-vault crates.

use strum::{Display, EnumString};

/// The user-facing operation a session was built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Action {
    Create,
    View,
    Edit,
    Fingerprint,
}

/// Controller state machine position.
///
/// `Failed` is reachable from every other phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "snake_case")]
pub enum Phase {
    Resolving,
    KeyReady,
    Sealing,
    Opening,
    Editing,
    Done,
    Failed,
}

impl Phase {
    /// True once the controller has finished, successfully or not.
    pub fn is_terminal(self) -> bool {
        matches!(self, Phase::Done | Phase::Failed)
    }
}
