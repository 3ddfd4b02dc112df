// SPDX-FileCopyrightText: 2026 SSH Vault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./sshvault.toml` > `~/.config/sshvault/sshvault.toml` > `/etc/sshvault/sshvault.toml`
//! with environment variable overrides via `SSHVAULT_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::SshVaultConfig;

/// Environment variables with the `SSHVAULT_` prefix that are not config keys.
///
/// `SSHVAULT_PASSWORD` is read by the password prompt, never by the loader.
const NON_CONFIG_VARS: &[&str] = &["password"];

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/sshvault/sshvault.toml` (system-wide)
/// 3. `~/.config/sshvault/sshvault.toml` (user XDG config)
/// 4. `./sshvault.toml` (local directory)
/// 5. `SSHVAULT_*` environment variables
pub fn load_config() -> Result<SshVaultConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<SshVaultConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(SshVaultConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<SshVaultConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(SshVaultConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used internally for config loading (exposed for diagnostic use).
///
/// Returns the Figment before extraction so callers can inspect metadata.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(SshVaultConfig::default()))
        .merge(Toml::file("/etc/sshvault/sshvault.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("sshvault/sshvault.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("sshvault.toml"))
        .merge(env_provider())
}

/// Create the environment variable provider using explicit `map()` for section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` because key names contain
/// underscores: `SSHVAULT_KEY_USER_AGENT` must map to `key.user_agent`, not
/// `key.user.agent`.
fn env_provider() -> Env {
    Env::prefixed("SSHVAULT_")
        .ignore(NON_CONFIG_VARS)
        .map(|key| {
            // `key` is the lowercased env var name with prefix stripped.
            // Example: SSHVAULT_KEY_DEFAULT_PATH -> "key_default_path"
            let key_str = key.as_str();
            let mapped = key_str
                .replacen("key_", "key.", 1)
                .replacen("editor_", "editor.", 1)
                .replacen("log_", "log.", 1);
            mapped.into()
        })
}
