// SPDX-FileCopyrightText: 2026 SSH Vault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end tests for the vault lifecycle.
//!
//! Each test creates an isolated TestHarness with a temp directory, mock key
//! fetcher and scripted editor. Tests are independent and order-insensitive;
//! they are serialised because the password prompt honours SSHVAULT_PASSWORD.

use serial_test::serial;
use sshvault_core::{Phase, VaultError};
use sshvault_keys::KeyRequest;
use sshvault_test_utils::fixtures::{self, RSA_FINGERPRINT};
use sshvault_test_utils::harness::{GITHUB_URL, LOOKUP_URL};
use sshvault_test_utils::{password_line, ScriptedEditor, TestHarness};
use sshvault_vault::VaultTarget;

const FOX: &[u8] = b"The quick brown fox jumps over the lazy dog";

// ---- Edit cycle ----

#[tokio::test]
#[serial]
async fn create_view_edit_view_cycle() {
    let harness = TestHarness::new().unwrap();
    let vault = harness.vault_path("secret.vault");
    let password = harness.create_vault("secret.vault", FOX).await.unwrap();
    let first_blob = std::fs::read(&vault).unwrap();

    let opened = harness
        .controller_for(&password)
        .view(&harness.key_request(), &vault)
        .await
        .unwrap();
    assert_eq!(opened.plaintext.as_slice(), FOX);

    let mut controller = harness.controller_for(&password);
    controller.edit(&harness.key_request(), &vault).await.unwrap();
    assert_eq!(controller.phase(), Phase::Done);
    assert_eq!(harness.editor().seen().await, vec![FOX.to_vec()]);

    let second_blob = std::fs::read(&vault).unwrap();
    assert_ne!(first_blob, second_blob);

    let reopened = harness
        .controller_for(&password)
        .view(&harness.key_request(), &vault)
        .await
        .unwrap();
    assert_eq!(reopened.plaintext.as_slice(), FOX);
}

#[tokio::test]
#[serial]
async fn edited_contents_survive_under_the_original_password() {
    let harness = TestHarness::new()
        .unwrap()
        .with_editor(ScriptedEditor::replace("The quick brown cat"));
    let vault = harness.vault_path("secret.vault");
    let password = harness.create_vault("secret.vault", FOX).await.unwrap();

    harness
        .controller_for(&password)
        .edit(&harness.key_request(), &vault)
        .await
        .unwrap();

    let opened = harness
        .controller_for(&password)
        .view(&harness.key_request(), &vault)
        .await
        .unwrap();
    assert_eq!(opened.plaintext.as_slice(), b"The quick brown cat");
    assert_eq!(opened.password, password);
}

#[tokio::test]
#[serial]
async fn failing_editor_keeps_the_old_vault() {
    let harness = TestHarness::new()
        .unwrap()
        .with_editor(ScriptedEditor::fail("editor exited with 1"));
    let vault = harness.vault_path("secret.vault");
    let password = harness.create_vault("secret.vault", FOX).await.unwrap();
    let before = std::fs::read(&vault).unwrap();

    let err = harness
        .controller_for(&password)
        .edit(&harness.key_request(), &vault)
        .await
        .unwrap_err();
    assert!(matches!(err, VaultError::Edit(_)));
    assert_eq!(std::fs::read(&vault).unwrap(), before);
}

#[tokio::test]
#[serial]
async fn emptied_buffer_is_refused() {
    let harness = TestHarness::new()
        .unwrap()
        .with_editor(ScriptedEditor::replace(Vec::new()));
    let vault = harness.vault_path("secret.vault");
    let password = harness.create_vault("secret.vault", FOX).await.unwrap();

    let err = harness
        .controller_for(&password)
        .edit(&harness.key_request(), &vault)
        .await
        .unwrap_err();
    assert!(matches!(err, VaultError::EmptyInput));
}

// ---- Create ----

#[tokio::test]
#[serial]
async fn create_does_not_clobber() {
    let harness = TestHarness::new().unwrap();
    let vault = harness.vault_path("secret.vault");
    std::fs::write(&vault, b"existing").unwrap();

    let err = harness.create_vault("secret.vault", FOX).await.unwrap_err();
    assert!(matches!(err, VaultError::AlreadyExists { .. }));
    assert_eq!(std::fs::read(&vault).unwrap(), b"existing");
}

#[tokio::test]
#[serial]
async fn create_to_stdout_persists_nothing() {
    let harness = TestHarness::new().unwrap();
    let before: Vec<_> = std::fs::read_dir(harness.dir()).unwrap().collect();

    harness
        .controller("")
        .create(&harness.key_request(), VaultTarget::Stdout, FOX)
        .await
        .unwrap();

    assert!(harness.stdout().len() > FOX.len());
    let after: Vec<_> = std::fs::read_dir(harness.dir()).unwrap().collect();
    assert_eq!(before.len(), after.len());
}

#[tokio::test]
#[serial]
async fn composed_vault_holds_what_was_typed() {
    let harness = TestHarness::new()
        .unwrap()
        .with_editor(ScriptedEditor::replace("typed in the editor"));
    let vault = harness.vault_path("typed.vault");

    let password = harness
        .controller("")
        .compose(&harness.key_request(), VaultTarget::File(vault.clone()))
        .await
        .unwrap();
    assert_eq!(harness.editor().seen().await, vec![Vec::<u8>::new()]);

    let opened = harness
        .controller_for(&password)
        .view(&harness.key_request(), &vault)
        .await
        .unwrap();
    assert_eq!(opened.plaintext.as_slice(), b"typed in the editor");
}

#[tokio::test]
#[serial]
async fn editor_never_opens_when_the_key_cannot_be_resolved() {
    let harness = TestHarness::new()
        .unwrap()
        .with_editor(ScriptedEditor::replace("top secret typed by user"));
    harness.fetcher().not_found("https://keys.test/gone").await;
    let vault = harness.vault_path("new.vault");

    let requests = [
        KeyRequest::path(harness.dir().join("nonexistent.pub")),
        KeyRequest::url("https://keys.test/gone"),
        KeyRequest {
            user: Some("../x".to_string()),
            ..KeyRequest::default()
        },
    ];
    for request in &requests {
        let mut controller = harness.controller("");
        let err = controller
            .compose(request, VaultTarget::File(vault.clone()))
            .await
            .unwrap_err();
        assert!(
            matches!(err, VaultError::KeyResolution(_) | VaultError::Config(_)),
            "{request:?}: {err}"
        );
        assert_eq!(controller.phase(), Phase::Failed);
    }

    assert!(harness.editor().seen().await.is_empty());
    assert!(!vault.exists());
}

#[tokio::test]
#[serial]
async fn two_vaults_of_the_same_plaintext_differ() {
    let harness = TestHarness::new().unwrap();
    let a = harness.create_vault("a.vault", FOX).await.unwrap();
    let b = harness.create_vault("b.vault", FOX).await.unwrap();
    assert_ne!(a, b);
    assert_ne!(
        std::fs::read(harness.vault_path("a.vault")).unwrap(),
        std::fs::read(harness.vault_path("b.vault")).unwrap()
    );
}

// ---- Authentication ----

#[tokio::test]
#[serial]
async fn vault_is_bound_to_its_key() {
    let harness = TestHarness::new().unwrap();
    let vault = harness.vault_path("secret.vault");
    let password = harness.create_vault("secret.vault", FOX).await.unwrap();

    let err = harness
        .controller_for(&password)
        .view(&KeyRequest::path(harness.other_key_path()), &vault)
        .await
        .unwrap_err();
    assert!(err.is_authentication());
}

#[tokio::test]
#[serial]
async fn malformed_password_is_a_prompt_error() {
    let harness = TestHarness::new().unwrap();
    let vault = harness.vault_path("secret.vault");
    harness.create_vault("secret.vault", FOX).await.unwrap();

    let err = harness
        .controller("argle-bargle\n")
        .view(&harness.key_request(), &vault)
        .await
        .unwrap_err();
    assert!(matches!(err, VaultError::Prompt(_)));
}

// ---- Key resolution ----

#[tokio::test]
#[serial]
async fn missing_key_file_is_key_resolution_error() {
    let harness = TestHarness::new().unwrap();
    let err = harness
        .controller("")
        .create(
            &KeyRequest::path(harness.dir().join("nope.pub")),
            VaultTarget::File(harness.vault_path("v")),
            FOX,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, VaultError::KeyResolution(_)));
}

#[tokio::test]
#[serial]
async fn no_key_source_at_all_is_config_error() {
    let harness = TestHarness::new().unwrap();
    let err = harness
        .controller("")
        .fingerprint(&KeyRequest::default())
        .await
        .unwrap_err();
    assert!(matches!(err, VaultError::Config(_)));
}

#[tokio::test]
#[serial]
async fn default_key_path_is_used_when_nothing_is_given() {
    let harness = TestHarness::new().unwrap().with_default_key();
    let session = harness
        .controller("")
        .fingerprint(&KeyRequest::default())
        .await
        .unwrap();
    assert_eq!(session.fingerprint().as_str(), RSA_FINGERPRINT);
}

#[tokio::test]
#[serial]
async fn github_user_keys_are_indexed() {
    let harness = TestHarness::new().unwrap();
    let url = format!("{GITHUB_URL}/alice.keys");
    harness.fetcher().respond(&url, fixtures::multi_key_body()).await;

    // Key 1 is ed25519 and cannot protect a vault.
    let err = harness
        .controller("")
        .fingerprint(&KeyRequest {
            user: Some("alice".to_string()),
            ..KeyRequest::default()
        })
        .await
        .unwrap_err();
    assert!(matches!(err, VaultError::KeyFormat(_)));

    let session = harness
        .controller("")
        .fingerprint(&KeyRequest {
            user: Some("alice".to_string()),
            index: 2,
            ..KeyRequest::default()
        })
        .await
        .unwrap();
    assert_eq!(session.fingerprint().as_str(), RSA_FINGERPRINT);
    assert_eq!(session.key_source(), url);

    let err = harness
        .controller("")
        .fingerprint(&KeyRequest {
            user: Some("alice".to_string()),
            index: 4,
            ..KeyRequest::default()
        })
        .await
        .unwrap_err();
    assert!(matches!(err, VaultError::KeyResolution(_)));
}

#[tokio::test]
#[serial]
async fn remote_vault_roundtrip_via_lookup() {
    let harness = TestHarness::new().unwrap();
    let url = format!("{LOOKUP_URL}/{RSA_FINGERPRINT}");
    harness.fetcher().respond(&url, fixtures::RSA_PUBLIC_KEY).await;
    let request = KeyRequest {
        lookup: Some(RSA_FINGERPRINT.to_string()),
        ..KeyRequest::default()
    };
    let vault = harness.vault_path("remote.vault");

    let password = harness
        .controller("")
        .create(&request, VaultTarget::File(vault.clone()), FOX)
        .await
        .unwrap();

    // The local file of the same key opens it too.
    let opened = harness
        .controller(&password_line(&password))
        .view(&harness.key_request(), &vault)
        .await
        .unwrap();
    assert_eq!(opened.plaintext.as_slice(), FOX);
    assert_eq!(harness.fetcher().requests().await, vec![url]);
}

#[tokio::test]
#[serial]
async fn remote_404_and_empty_body_are_key_resolution_errors() {
    let harness = TestHarness::new().unwrap();
    harness.fetcher().not_found("https://keys.test/gone").await;
    harness.fetcher().respond("https://keys.test/empty", "").await;

    for url in ["https://keys.test/gone", "https://keys.test/empty"] {
        let err = harness
            .controller("")
            .create(
                &KeyRequest::url(url),
                VaultTarget::File(harness.vault_path("v")),
                FOX,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, VaultError::KeyResolution(_)), "{url}: {err}");
    }
    assert!(!harness.vault_path("v").exists());
}
