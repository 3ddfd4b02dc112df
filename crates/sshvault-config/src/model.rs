// SPDX-FileCopyrightText: 2026 SSH Vault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for ssh-vault.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level ssh-vault configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SshVaultConfig {
    /// Public key lookup settings.
    #[serde(default)]
    pub key: KeyConfig,

    /// External editor settings.
    #[serde(default)]
    pub editor: EditorConfig,

    /// Logging settings.
    #[serde(default)]
    pub log: LogConfig,
}

/// Where public keys come from when the command line does not say.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct KeyConfig {
    /// Key file used when neither a path nor a URL is given.
    /// `None` makes a missing key source a configuration error.
    #[serde(default = "default_key_path")]
    pub default_path: Option<String>,

    /// Base URL for `--user` lookups; `<github_url>/<user>.keys` is fetched.
    #[serde(default = "default_github_url")]
    pub github_url: String,

    /// Base URL of the fingerprint lookup service; `<lookup_url>/<fingerprint>` is fetched.
    #[serde(default = "default_lookup_url")]
    pub lookup_url: String,

    /// User-Agent sent with every key request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Timeout for a key request, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for KeyConfig {
    fn default() -> Self {
        Self {
            default_path: default_key_path(),
            github_url: default_github_url(),
            lookup_url: default_lookup_url(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_key_path() -> Option<String> {
    dirs::home_dir().map(|home| {
        home.join(".ssh")
            .join("id_rsa.pub")
            .to_string_lossy()
            .into_owned()
    })
}

fn default_github_url() -> String {
    "https://github.com".to_string()
}

fn default_lookup_url() -> String {
    "https://ssh-keys.online/key".to_string()
}

fn default_user_agent() -> String {
    "ssh-vault".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

/// Editor used for `create` (interactive) and `edit`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct EditorConfig {
    /// Fallback command when `$EDITOR` is unset or empty.
    #[serde(default = "default_editor_command")]
    pub command: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            command: default_editor_command(),
        }
    }
}

fn default_editor_command() -> String {
    "vi".to_string()
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LogConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}
