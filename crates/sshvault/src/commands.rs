// SPDX-FileCopyrightText: 2026 SSH Vault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Subcommand handlers: wire the real collaborators into a controller and
//! talk to the terminal.

use std::io::{self, IsTerminal, Read, Write};
use std::path::PathBuf;
use std::sync::Arc;

use secrecy::ExposeSecret;
use sshvault_config::SshVaultConfig;
use sshvault_core::VaultError;
use sshvault_keys::{HttpKeyFetcher, KeyRequest, KeyResolver};
use sshvault_vault::{ExternalEditor, Password, TerminalReader, VaultController, VaultTarget};
use tracing::debug;
use zeroize::Zeroizing;

use crate::Commands;

pub async fn run(
    command: Commands,
    request: &KeyRequest,
    config: &SshVaultConfig,
) -> Result<(), VaultError> {
    let fetcher = Arc::new(HttpKeyFetcher::from_config(&config.key)?);
    let editor = Arc::new(ExternalEditor::from_env(&config.editor.command)?);
    let mut controller = VaultController::new(
        KeyResolver::new(&config.key, fetcher),
        Box::new(TerminalReader),
        editor,
        Box::new(io::stdout()),
    );

    match command {
        Commands::Create { vault } => create(&mut controller, request, vault).await,
        Commands::View { vault } => {
            let opened = controller.view(request, &vault).await?;
            write_stdout(&opened.plaintext)
        }
        Commands::Edit { vault } => controller.edit(request, &vault).await,
        Commands::Fingerprint => {
            let session = controller.fingerprint(request).await?;
            let mut out = format!(
                "{}\n{}\nkey: {}\nsource: {}\n",
                session.fingerprint(),
                session.openssh_fingerprint(),
                session.key_info(),
                session.key_source(),
            );
            if !session.comment().is_empty() {
                out.push_str(&format!("comment: {}\n", session.comment()));
            }
            write_stdout(out.as_bytes())
        }
    }
}

async fn create(
    controller: &mut VaultController,
    request: &KeyRequest,
    vault: Option<PathBuf>,
) -> Result<(), VaultError> {
    let target = VaultTarget::from_path(vault);

    // The key is resolved before the user is asked for the secret.
    let password = if io::stdin().is_terminal() {
        debug!("stdin is a terminal; composing in the editor");
        controller.compose(request, target).await?
    } else {
        let session = controller.prepare_create(request, target).await?;
        let mut plaintext = Zeroizing::new(Vec::new());
        io::stdin()
            .read_to_end(&mut plaintext)
            .map_err(|e| VaultError::Prompt(format!("failed to read stdin: {e}")))?;
        controller.seal_new(&session, &plaintext)?
    };

    announce_password(&password);
    Ok(())
}

fn announce_password(password: &Password) {
    let hex = password.to_hex();
    if io::stderr().is_terminal() {
        eprintln!("Vault password (shown once, keep it safe):");
    }
    eprintln!("{}", hex.expose_secret());
}

fn write_stdout(bytes: &[u8]) -> Result<(), VaultError> {
    let mut stdout = io::stdout().lock();
    stdout
        .write_all(bytes)
        .and_then(|()| stdout.flush())
        .map_err(|source| VaultError::Write {
            path: PathBuf::from("<stdout>"),
            source,
        })
}
