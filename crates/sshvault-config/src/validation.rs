// SPDX-FileCopyrightText: 2026 SSH Vault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde attributes,
//! such as URL schemes, non-empty commands, and known log levels.

use crate::diagnostic::ConfigError;
use crate::model::SshVaultConfig;

/// Levels accepted by `log.level`.
const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &SshVaultConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.key.user_agent.trim().is_empty() {
        errors.push(invalid("key.user_agent", "must not be empty"));
    }

    for (key, url) in [
        ("key.github_url", &config.key.github_url),
        ("key.lookup_url", &config.key.lookup_url),
    ] {
        if !is_http_url(url) {
            errors.push(invalid(
                key,
                format!("`{url}` must start with http:// or https://"),
            ));
        }
    }

    if config.key.timeout_secs == 0 {
        errors.push(invalid("key.timeout_secs", "must be at least 1"));
    }

    if let Some(path) = &config.key.default_path
        && path.trim().is_empty()
    {
        errors.push(invalid(
            "key.default_path",
            "must not be empty; remove the key to disable the default",
        ));
    }

    if config.editor.command.split_whitespace().next().is_none() {
        errors.push(invalid("editor.command", "must name a program"));
    }

    if !LOG_LEVELS.contains(&config.log.level.to_lowercase().as_str()) {
        errors.push(invalid(
            "log.level",
            format!(
                "`{}` is not one of {}",
                config.log.level,
                LOG_LEVELS.join(", ")
            ),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn invalid(key: &str, message: impl Into<String>) -> ConfigError {
    ConfigError::Validation {
        key: key.to_string(),
        message: message.into(),
    }
}

fn is_http_url(url: &str) -> bool {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"));
    matches!(rest, Some(host) if !host.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn has_error_for(errors: &[ConfigError], wanted: &str) -> bool {
        errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { key, .. } if key == wanted))
    }

    #[test]
    fn default_config_validates() {
        let config = SshVaultConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn empty_user_agent_fails_validation() {
        let mut config = SshVaultConfig::default();
        config.key.user_agent = "  ".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(has_error_for(&errors, "key.user_agent"));
    }

    #[test]
    fn non_http_urls_fail_validation() {
        let mut config = SshVaultConfig::default();
        config.key.github_url = "ftp://github.com".to_string();
        config.key.lookup_url = "https://".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(has_error_for(&errors, "key.github_url"));
        assert!(has_error_for(&errors, "key.lookup_url"));
    }

    #[test]
    fn all_errors_are_collected() {
        let mut config = SshVaultConfig::default();
        config.key.timeout_secs = 0;
        config.editor.command = String::new();
        config.log.level = "loud".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(has_error_for(&errors, "key.timeout_secs"));
        assert!(has_error_for(&errors, "editor.command"));
        assert!(has_error_for(&errors, "log.level"));
    }

    #[test]
    fn unset_default_path_is_valid() {
        let mut config = SshVaultConfig::default();
        config.key.default_path = None;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn blank_default_path_fails_validation() {
        let mut config = SshVaultConfig::default();
        config.key.default_path = Some(String::new());
        let errors = validate_config(&config).unwrap_err();
        assert!(has_error_for(&errors, "key.default_path"));
    }

    #[test]
    fn log_level_is_case_insensitive() {
        let mut config = SshVaultConfig::default();
        config.log.level = "DEBUG".to_string();
        assert!(validate_config(&config).is_ok());
    }
}
