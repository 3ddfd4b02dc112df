// SPDX-FileCopyrightText: 2026 SSH Vault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fixed public keys and their known derived values.

/// 2048-bit RSA key, comment `vault@example`.
pub const RSA_PUBLIC_KEY: &str = include_str!("../../sshvault-keys/testdata/id_rsa.pub");

/// A second, unrelated RSA key.
pub const OTHER_RSA_PUBLIC_KEY: &str = include_str!("../../sshvault-keys/testdata/other_rsa.pub");

/// An ed25519 key; never usable for a vault.
pub const ED25519_PUBLIC_KEY: &str = include_str!("../../sshvault-keys/testdata/id_ed25519.pub");

/// Vault fingerprint of [`RSA_PUBLIC_KEY`].
pub const RSA_FINGERPRINT: &str =
    "740dd42e9f1e2603a33d7f31f09db4a0bb2f153b36ac7ffa790c969fac4fe882";

/// `ssh-keygen -l` fingerprint of [`RSA_PUBLIC_KEY`].
pub const RSA_OPENSSH_FINGERPRINT: &str = "SHA256:MmvCqAUIPoWeten0WNk1I+ex40wHuVTXsFtXKwcJac4";

/// A body like GitHub's `/<user>.keys`: ed25519 first, then both RSA keys.
pub fn multi_key_body() -> String {
    format!(
        "{}\n{}\n{}\n",
        ED25519_PUBLIC_KEY.trim(),
        RSA_PUBLIC_KEY.trim(),
        OTHER_RSA_PUBLIC_KEY.trim()
    )
}
