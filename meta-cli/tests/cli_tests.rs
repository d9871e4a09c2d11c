mod common;

use common::{login, storemeta, KEY_ID};
use predicates::prelude::*;
use tempfile::tempdir;

// =========================================================================
// Help & configuration
// =========================================================================

#[test]
fn test_help_lists_commands() {
    let dir = tempdir().unwrap();
    storemeta(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("login"))
        .stdout(predicate::str::contains("mirror"))
        .stdout(predicate::str::contains("add-locale"));
}

#[test]
fn test_config_init_writes_defaults() {
    let dir = tempdir().unwrap();
    storemeta(dir.path())
        .args(["config", "--init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote"))
        .stdout(predicate::str::contains(
            "base_url      = https://api.appstoreconnect.apple.com/v1",
        ));
    assert!(dir.path().join("config.toml").exists());

    storemeta(dir.path())
        .args(["config", "--init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn test_invalid_config_is_reported() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("config.toml"), "[api\n").unwrap();
    storemeta(dir.path())
        .arg("status")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid configuration"));
}

#[test]
fn test_unknown_field_rejected() {
    let dir = tempdir().unwrap();
    storemeta(dir.path())
        .args(["set", "ver-1", "--locale", "en-US", "--field", "title", "--value", "x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("title"));
}

// =========================================================================
// Login / logout / status
// =========================================================================

#[test]
fn test_status_when_logged_out() {
    let dir = tempdir().unwrap();
    storemeta(dir.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("NOT LOGGED IN"));
}

#[test]
fn test_login_status_logout() {
    let dir = tempdir().unwrap();
    login(dir.path());
    let credentials = dir.path().join("credentials.json");
    assert!(credentials.exists());

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = std::fs::metadata(&credentials).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600, "credentials should be 0600");
    }

    storemeta(dir.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains(KEY_ID))
        .stdout(predicate::str::contains("valid for"))
        .stdout(predicate::str::contains("PRIVATE KEY").not());

    storemeta(dir.path())
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged out"));
    assert!(!credentials.exists());

    // Logging out twice is fine.
    storemeta(dir.path()).arg("logout").assert().success();
}

#[test]
fn test_login_with_bad_key_saves_nothing() {
    let dir = tempdir().unwrap();
    let key_file = dir.path().join("bad.p8");
    std::fs::write(&key_file, "not a key").unwrap();

    storemeta(dir.path())
        .args(["login", "--issuer", "issuer", "--key-id", "KEY", "--key-file"])
        .arg(&key_file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Credentials rejected"));
    assert!(!dir.path().join("credentials.json").exists());
}

#[test]
fn test_login_with_missing_key_file() {
    let dir = tempdir().unwrap();
    storemeta(dir.path())
        .args(["login", "--issuer", "issuer", "--key-id", "KEY", "--key-file"])
        .arg(dir.path().join("missing.p8"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read private key"));
}

#[test]
fn test_networked_commands_require_login() {
    let dir = tempdir().unwrap();
    storemeta(dir.path())
        .arg("apps")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not logged in"));
}
