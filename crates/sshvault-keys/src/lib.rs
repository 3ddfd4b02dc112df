// SPDX-FileCopyrightText: 2026 SSH Vault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Public key handling for ssh-vault.
//!
//! The pipeline is resolve → convert → fingerprint:
//! - [`KeyResolver`] reads key bytes from a file or fetches them over HTTP,
//! - [`convert::to_pkcs8`] turns an `ssh-rsa` line into PKCS8 DER,
//! - [`Fingerprint::of`] digests that DER into the vault's associated data.

pub mod convert;
pub mod fetch;
pub mod fingerprint;
pub mod resolver;

pub use convert::{parse_public_key, to_pkcs8, ConvertedKey, PublicKeyInfo};
pub use fetch::HttpKeyFetcher;
pub use fingerprint::Fingerprint;
pub use resolver::{KeyRequest, KeyResolver, KeySource, ResolvedKey};
