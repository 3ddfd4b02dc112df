// SPDX-FileCopyrightText: 2026 SSH Vault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! ssh-vault - keep one secret encrypted against an SSH RSA public key.
//!
//! This is the binary entry point.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use sshvault_keys::KeyRequest;

/// ssh-vault - keep one secret encrypted against an SSH RSA public key.
#[derive(Parser, Debug)]
#[command(name = "ssh-vault", version, about, long_about = None)]
struct Cli {
    /// Public key file, or an http(s) URL serving one.
    #[arg(short, long, global = true, value_name = "PATH|URL")]
    key: Option<String>,

    /// Use a GitHub user's published keys.
    #[arg(short, long, global = true, value_name = "USER", conflicts_with = "key")]
    user: Option<String>,

    /// Fetch the key with this fingerprint from the lookup service.
    #[arg(long, global = true, value_name = "FINGERPRINT", conflicts_with_all = ["key", "user"])]
    lookup: Option<String>,

    /// Which key to use when the source lists several (1-based).
    #[arg(long, global = true, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    key_index: u32,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Encrypt stdin (or an editor buffer) into a new vault.
    Create {
        /// Vault file to create; omit to write the vault to stdout.
        vault: Option<PathBuf>,
    },
    /// Decrypt a vault to stdout.
    View {
        /// Vault file to open.
        vault: PathBuf,
    },
    /// Decrypt a vault into $EDITOR and re-encrypt the result.
    Edit {
        /// Vault file to edit in place.
        vault: PathBuf,
    },
    /// Print the vault fingerprint of the selected key.
    Fingerprint,
}

impl Cli {
    fn key_request(&self) -> KeyRequest {
        KeyRequest {
            key: self.key.clone(),
            user: self.user.clone(),
            lookup: self.lookup.clone(),
            index: self.key_index as usize,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    let config = match sshvault_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            sshvault_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.log.level);

    let request = cli.key_request();
    if let Err(e) = commands::run(cli.command, &request, &config).await {
        eprintln!("ssh-vault: {e}");
        std::process::exit(1);
    }
}

/// Initializes the tracing subscriber on stderr with the given log level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("sshvault={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
