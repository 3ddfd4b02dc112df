// SPDX-FileCopyrightText: 2026 SSH Vault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Public key resolution.
//!
//! Turns the key options of a command line into raw key bytes. A local path
//! always wins; a remote URL is used only when no path was given; the
//! configured default path is the last resort. Exactly one source is tried and
//! its failure is final.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use sshvault_config::model::KeyConfig;
use sshvault_core::{KeyFetcher, VaultError};
use tracing::{debug, info};

/// Key options as the user gave them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyRequest {
    /// Local path, or an `http(s)://` URL to fetch.
    pub key: Option<String>,
    /// GitHub user whose published keys should be fetched.
    pub user: Option<String>,
    /// Fingerprint to look up in the key lookup service.
    pub lookup: Option<String>,
    /// 1-based position of the key to use when the source lists several.
    pub index: usize,
}

impl Default for KeyRequest {
    fn default() -> Self {
        Self {
            key: None,
            user: None,
            lookup: None,
            index: 1,
        }
    }
}

impl KeyRequest {
    /// Request for a local key file.
    pub fn path(path: impl AsRef<Path>) -> Self {
        Self {
            key: Some(path.as_ref().to_string_lossy().into_owned()),
            ..Self::default()
        }
    }

    /// Request for a key served at `url`.
    pub fn url(url: impl Into<String>) -> Self {
        Self {
            key: Some(url.into()),
            ..Self::default()
        }
    }
}

/// The single place a key is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeySource {
    Local(PathBuf),
    Remote(String),
}

impl fmt::Display for KeySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeySource::Local(path) => write!(f, "{}", path.display()),
            KeySource::Remote(url) => f.write_str(url),
        }
    }
}

/// Raw bytes of one public key plus where they came from.
#[derive(Debug, Clone)]
pub struct ResolvedKey {
    pub source: KeySource,
    pub bytes: Vec<u8>,
}

/// Resolves [`KeyRequest`]s against the filesystem or a [`KeyFetcher`].
pub struct KeyResolver {
    fetcher: Arc<dyn KeyFetcher>,
    default_path: Option<PathBuf>,
    github_url: String,
    lookup_url: String,
}

impl KeyResolver {
    /// Creates a resolver using the `[key]` config section.
    pub fn new(config: &KeyConfig, fetcher: Arc<dyn KeyFetcher>) -> Self {
        Self {
            fetcher,
            default_path: config
                .default_path
                .as_deref()
                .filter(|p| !p.trim().is_empty())
                .map(expand_home),
            github_url: config.github_url.trim_end_matches('/').to_string(),
            lookup_url: config.lookup_url.trim_end_matches('/').to_string(),
        }
    }

    /// Picks the source a request will be resolved from, without reading it.
    pub fn plan(&self, request: &KeyRequest) -> Result<KeySource, VaultError> {
        if let Some(key) = non_empty(&request.key) {
            if key.starts_with("http://") || key.starts_with("https://") {
                return Ok(KeySource::Remote(key.to_string()));
            }
            return Ok(KeySource::Local(expand_home(key)));
        }
        if let Some(user) = non_empty(&request.user) {
            let user = path_segment("GitHub user", user)?;
            return Ok(KeySource::Remote(format!("{}/{user}.keys", self.github_url)));
        }
        if let Some(fingerprint) = non_empty(&request.lookup) {
            let fingerprint = path_segment("lookup fingerprint", fingerprint)?;
            return Ok(KeySource::Remote(format!(
                "{}/{fingerprint}",
                self.lookup_url
            )));
        }
        match &self.default_path {
            Some(path) => Ok(KeySource::Local(path.clone())),
            None => Err(VaultError::Config(
                "no public key given: pass --key, --user or --lookup, or set key.default_path"
                    .to_string(),
            )),
        }
    }

    /// Reads the planned source and selects the requested key from it.
    pub async fn resolve(&self, request: &KeyRequest) -> Result<ResolvedKey, VaultError> {
        let source = self.plan(request)?;
        debug!(%source, index = request.index, "resolving public key");

        let body = match &source {
            KeySource::Local(path) => std::fs::read(path).map_err(|e| {
                VaultError::KeyResolution(format!("cannot read key file {}: {e}", path.display()))
            })?,
            KeySource::Remote(url) => self.fetcher.fetch(url).await?,
        };

        let bytes = select_key(&body, request.index, &source)?;
        info!(%source, "public key resolved");
        Ok(ResolvedKey { source, bytes })
    }
}

/// Picks the `index`-th (1-based) key line out of `body`.
///
/// Blank lines and `#` comments are skipped. An empty body is never a key.
pub fn select_key(body: &[u8], index: usize, source: &KeySource) -> Result<Vec<u8>, VaultError> {
    let text = String::from_utf8_lossy(body);
    let keys: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .collect();

    if keys.is_empty() {
        return Err(VaultError::KeyResolution(format!("no key found in {source}")));
    }
    if index == 0 || index > keys.len() {
        return Err(VaultError::KeyResolution(format!(
            "key index {index} out of range: {source} holds {} key(s)",
            keys.len()
        )));
    }
    Ok(keys[index - 1].as_bytes().to_vec())
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Accepts `value` only if it stays a single URL path segment.
fn path_segment<'a>(what: &str, value: &'a str) -> Result<&'a str, VaultError> {
    let reserved = |c: char| {
        matches!(c, '/' | '\\' | '?' | '#' | '%') || c.is_whitespace() || c.is_control()
    };
    if value == "." || value == ".." || value.contains(reserved) {
        return Err(VaultError::Config(format!("invalid {what}: {value:?}")));
    }
    Ok(value)
}

fn expand_home(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}
