// SPDX-FileCopyrightText: 2026 SSH Vault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Figment-to-miette error bridge with "did you mean" suggestions.
//!
//! Deserialization failures from Figment become [`ConfigError`] diagnostics.
//! Unknown keys are matched against the section's valid keys with
//! Jaro-Winkler similarity and, when the offending file can be found, carry a
//! source span pointing at the bad key.

#![allow(unused_assignments)] // miette's Diagnostic derive generates code triggering this lint

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Minimum Jaro-Winkler similarity score to suggest a correction.
/// 0.75 catches typos like `usr_agent` -> `user_agent` or
/// `timout_secs` -> `timeout_secs` while filtering noise.
const SUGGESTION_THRESHOLD: f64 = 0.75;

/// A configuration error with rich diagnostic information.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    /// A key that no section declares.
    #[error("unknown configuration key `{key}`")]
    #[diagnostic(
        code(sshvault::config::unknown_key),
        help("{}", unknown_key_help(suggestion.as_deref(), valid_keys))
    )]
    UnknownKey {
        /// Dotted path of the unrecognized key.
        key: String,
        /// Closest valid key, if any is close enough.
        suggestion: Option<String>,
        /// Comma-separated valid keys for the section.
        valid_keys: String,
        /// Location of the key in the file it came from.
        #[label("not a sshvault.toml key")]
        span: Option<SourceSpan>,
        /// The file the key came from.
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    /// A value of the wrong type, e.g. a string for `timeout_secs`.
    #[error("invalid type for key `{key}`: found {found}")]
    #[diagnostic(code(sshvault::config::invalid_type), help("expected {expected}"))]
    InvalidType {
        /// Dotted path of the key.
        key: String,
        /// What the file contained.
        found: String,
        /// What the model expects.
        expected: String,
    },

    /// A required key is absent.
    #[error("missing required key `{key}`")]
    #[diagnostic(
        code(sshvault::config::missing_key),
        help("add `{key} = <value>` to your sshvault.toml")
    )]
    MissingKey {
        /// Name of the missing key.
        key: String,
    },

    /// A value that parsed but makes no sense.
    #[error("invalid value for `{key}`: {message}")]
    #[diagnostic(code(sshvault::config::validation))]
    Validation {
        /// Dotted path of the key.
        key: String,
        /// What is wrong with it.
        message: String,
    },

    /// Anything else Figment reports (unreadable file, TOML syntax error).
    #[error("configuration error: {0}")]
    #[diagnostic(code(sshvault::config::other))]
    Other(String),
}

fn unknown_key_help(suggestion: Option<&str>, valid_keys: &str) -> String {
    match suggestion {
        Some(s) => format!("did you mean `{s}`? valid keys: {valid_keys}"),
        None => format!("valid keys: {valid_keys}"),
    }
}

/// Convert a `figment::Error` (which may hold several errors) into diagnostics.
///
/// `sources` pairs file paths with their contents so unknown keys can be
/// located; pass an empty slice when spans are not wanted.
pub fn figment_to_config_errors(
    err: figment::Error,
    sources: &[(String, String)],
) -> Vec<ConfigError> {
    use figment::error::Kind;

    err.into_iter()
        .map(|error| {
            let section: Vec<String> = error.path.iter().map(ToString::to_string).collect();
            match &error.kind {
                Kind::UnknownField(field, expected) => {
                    let (span, src) = locate(&error, &section, field, sources);
                    let mut dotted = section.clone();
                    dotted.push(field.clone());
                    ConfigError::UnknownKey {
                        key: dotted.join("."),
                        suggestion: suggest_key(field, expected),
                        valid_keys: expected.join(", "),
                        span,
                        src,
                    }
                }
                Kind::MissingField(field) => ConfigError::MissingKey {
                    key: field.to_string(),
                },
                Kind::InvalidType(actual, expected) => ConfigError::InvalidType {
                    key: section.join("."),
                    found: actual.to_string(),
                    expected: expected.clone(),
                },
                _ => ConfigError::Other(error.to_string()),
            }
        })
        .collect()
}

/// Find the file an error came from and the span of `field` inside it.
fn locate(
    error: &figment::error::Error,
    section: &[String],
    field: &str,
    sources: &[(String, String)],
) -> (Option<SourceSpan>, Option<NamedSource<String>>) {
    let Some(figment::Source::File(path)) = error.metadata.as_ref().and_then(|m| m.source.as_ref())
    else {
        return (None, None);
    };
    let path = path.display().to_string();

    let Some((name, content)) = sources.iter().find(|(p, _)| *p == path) else {
        return (None, None);
    };

    match find_key_offset(content, section, field) {
        Some(offset) => (
            Some(SourceSpan::new(offset.into(), field.len())),
            Some(NamedSource::new(name, content.clone())),
        ),
        None => (None, None),
    }
}

/// Byte offset of `field` at the start of a line, searching after the
/// `[section]` header when `section` is non-empty.
pub fn find_key_offset(content: &str, section: &[String], field: &str) -> Option<usize> {
    let start = match section.first() {
        Some(name) => {
            let header = format!("[{name}]");
            content.find(&header)? + header.len()
        }
        None => 0,
    };

    let mut line_start = start;
    for line in content[start..].split_inclusive('\n') {
        let trimmed = line.trim_start();
        if trimmed.starts_with('[') && line_start > start {
            // Next section: the key is not in this one.
            return None;
        }
        if let Some(rest) = trimmed.strip_prefix(field)
            && rest.trim_start().starts_with('=')
        {
            return Some(line_start + (line.len() - trimmed.len()));
        }
        line_start += line.len();
    }
    None
}

/// Best Jaro-Winkler match for `unknown` above [`SUGGESTION_THRESHOLD`].
pub fn suggest_key(unknown: &str, valid_keys: &[&str]) -> Option<String> {
    valid_keys
        .iter()
        .map(|key| (strsim::jaro_winkler(unknown, key), *key))
        .filter(|(score, _)| *score > SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, key)| key.to_string())
}

/// Render diagnostics to stderr with miette's graphical handler.
pub fn render_errors(errors: &[ConfigError]) {
    let handler = miette::GraphicalReportHandler::new();
    for error in errors {
        let mut buf = String::new();
        match handler.render_report(&mut buf, error as &dyn Diagnostic) {
            Ok(()) => eprint!("{buf}"),
            Err(_) => eprintln!("ssh-vault: {error}"),
        }
    }
}
