// SPDX-FileCopyrightText: 2026 SSH Vault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Password acquisition via TTY prompt or the SSHVAULT_PASSWORD environment variable.

use std::io::BufRead;

use secrecy::{ExposeSecret, SecretString};
use sshvault_core::{SecretReader, VaultError};
use tracing::debug;

use crate::secret::Password;

/// The environment variable name for providing the vault password.
pub const PASSWORD_ENV_VAR: &str = "SSHVAULT_PASSWORD";

const PROMPT: &str = "Vault password: ";

/// Reads from the controlling terminal with echo disabled.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalReader;

impl SecretReader for TerminalReader {
    fn read_secret(&mut self, prompt: &str) -> Result<SecretString, VaultError> {
        rpassword::prompt_password(prompt)
            .map(SecretString::from)
            .map_err(|e| VaultError::Prompt(format!("failed to read password: {e}")))
    }
}

/// Reads one line from any buffered source. The prompt is not shown.
#[derive(Debug)]
pub struct LineReader<R> {
    inner: R,
}

impl<R: BufRead> LineReader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }
}

impl<R: BufRead + Send> SecretReader for LineReader<R> {
    fn read_secret(&mut self, _prompt: &str) -> Result<SecretString, VaultError> {
        let mut line = String::new();
        let read = self
            .inner
            .read_line(&mut line)
            .map_err(|e| VaultError::Prompt(format!("failed to read password: {e}")))?;
        if read == 0 {
            return Err(VaultError::Prompt("no password entered".to_string()));
        }
        let len = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(len);
        Ok(SecretString::from(line))
    }
}

/// Get the vault password from the environment or from `reader`.
///
/// Priority:
/// 1. `SSHVAULT_PASSWORD` (for scripts and CI)
/// 2. `reader`, normally a [`TerminalReader`]
pub fn read_password(reader: &mut dyn SecretReader) -> Result<Password, VaultError> {
    if let Ok(value) = std::env::var(PASSWORD_ENV_VAR)
        && !value.is_empty()
    {
        debug!("vault password taken from {PASSWORD_ENV_VAR}");
        return Password::from_hex(&value);
    }

    let secret = reader.read_secret(PROMPT)?;
    if secret.expose_secret().is_empty() {
        return Err(VaultError::Prompt("empty password not allowed".to_string()));
    }
    Password::from_hex(secret.expose_secret())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Cursor;

    fn reader(input: &str) -> LineReader<Cursor<Vec<u8>>> {
        LineReader::new(Cursor::new(input.as_bytes().to_vec()))
    }

    #[test]
    fn trailing_newline_is_stripped() {
        let secret = reader("argle-bargle\n").read_secret(PROMPT).unwrap();
        assert_eq!(secret.expose_secret(), "argle-bargle");
    }

    #[test]
    fn crlf_is_stripped_and_only_one_line_read() {
        let mut r = reader("first\r\nsecond\n");
        assert_eq!(r.read_secret(PROMPT).unwrap().expose_secret(), "first");
        assert_eq!(r.read_secret(PROMPT).unwrap().expose_secret(), "second");
    }

    #[test]
    fn inner_whitespace_is_kept() {
        let secret = reader("  spaced out  \n").read_secret(PROMPT).unwrap();
        assert_eq!(secret.expose_secret(), "  spaced out  ");
    }

    #[test]
    fn eof_is_prompt_error() {
        assert!(matches!(
            reader("").read_secret(PROMPT),
            Err(VaultError::Prompt(_))
        ));
    }

    #[test]
    #[serial]
    fn password_from_reader() {
        // SAFETY: test-only env mutation, serialised with other env tests.
        unsafe { std::env::remove_var(PASSWORD_ENV_VAR) };
        let hex = "ab".repeat(32);
        let password = read_password(&mut reader(&format!("{hex}\n"))).unwrap();
        assert_eq!(password, Password::from_hex(&hex).unwrap());
    }

    #[test]
    #[serial]
    fn empty_line_is_rejected() {
        unsafe { std::env::remove_var(PASSWORD_ENV_VAR) };
        let err = read_password(&mut reader("\n")).unwrap_err();
        assert!(matches!(err, VaultError::Prompt(ref m) if m.contains("empty")));
    }

    #[test]
    #[serial]
    fn non_hex_line_is_rejected() {
        unsafe { std::env::remove_var(PASSWORD_ENV_VAR) };
        let err = read_password(&mut reader("argle-bargle\n")).unwrap_err();
        assert!(matches!(err, VaultError::Prompt(_)));
    }

    #[test]
    #[serial]
    fn env_var_takes_priority_over_reader() {
        let hex = "cd".repeat(32);
        unsafe { std::env::set_var(PASSWORD_ENV_VAR, &hex) };
        // The reader would fail on EOF if it were consulted.
        let result = read_password(&mut reader(""));
        unsafe { std::env::remove_var(PASSWORD_ENV_VAR) };
        assert_eq!(result.unwrap(), Password::from_hex(&hex).unwrap());
    }

    #[test]
    #[serial]
    fn empty_env_var_falls_back_to_reader() {
        let hex = "ef".repeat(32);
        unsafe { std::env::set_var(PASSWORD_ENV_VAR, "") };
        let result = read_password(&mut reader(&hex));
        unsafe { std::env::remove_var(PASSWORD_ENV_VAR) };
        assert_eq!(result.unwrap(), Password::from_hex(&hex).unwrap());
    }
}
