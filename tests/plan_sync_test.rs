use assert_cmd::cargo::cargo_bin_cmd;
use assert_fs::prelude::*;
use predicates::prelude::*;

/// Run keywarden with given args.
fn keywarden() -> assert_cmd::Command {
    cargo_bin_cmd!("keywarden")
}

// Throwaway ed25519 keys, one char apart, used only in tests.
const KEY_ALICE: &str =
    "ssh-ed25519 AAAAC3NzaC1lZDI1NTE5AAAAIOMqqnkVzrm0SdG6UOoqKLsabgH5C9okWi0dh2l9GKJl alice@example";
const KEY_BOB: &str =
    "ssh-ed25519 AAAAC3NzaC1lZDI1NTE5AAAAIOMqqnkVzrm0SdG6UOoqKLsabgH5C9okWi0dh2l9GKJm bob@example";

const CONFIG: &str = "[source]\ndir = \"keys\"\n";

fn setup(dir: &assert_fs::TempDir) {
    dir.child("keywarden.toml").write_str(CONFIG).unwrap();
    dir.child("keys").create_dir_all().unwrap();
}

// ─── Plan command ───────────────────────────────────────────────

#[test]
fn plan_lists_additions_for_fresh_inventory() {
    let dir = assert_fs::TempDir::new().unwrap();
    setup(&dir);
    dir.child("keys/alice.pub").write_str(KEY_ALICE).unwrap();
    dir.child("keys/bob.pub").write_str(KEY_BOB).unwrap();

    keywarden()
        .current_dir(dir.path())
        .arg("plan")
        .assert()
        .success()
        .stdout(predicate::str::contains("alice-gh-key"))
        .stdout(predicate::str::contains("bob-gh-key"))
        .stdout(predicate::str::contains("2 to add, 0 to delete"));
}

#[test]
fn plan_reports_converged_inventory() {
    let dir = assert_fs::TempDir::new().unwrap();
    setup(&dir);
    dir.child("keys/alice.pub").write_str(KEY_ALICE).unwrap();

    keywarden()
        .current_dir(dir.path())
        .arg("sync")
        .assert()
        .success();

    keywarden()
        .current_dir(dir.path())
        .arg("plan")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Inventory already matches the desired key set",
        ));
}

#[test]
fn plan_warns_about_malformed_keys() {
    let dir = assert_fs::TempDir::new().unwrap();
    setup(&dir);
    dir.child("keys/alice.pub").write_str(KEY_ALICE).unwrap();
    dir.child("keys/broken.pub")
        .write_str("this is not a key")
        .unwrap();

    keywarden()
        .current_dir(dir.path())
        .arg("plan")
        .assert()
        .success()
        .stdout(predicate::str::contains("broken-gh-key"))
        .stdout(predicate::str::contains("Excluded malformed key"))
        .stdout(predicate::str::contains("1 desired key(s)"));
}

// ─── Sync command ───────────────────────────────────────────────

#[test]
fn sync_converges_and_publishes() {
    let dir = assert_fs::TempDir::new().unwrap();
    setup(&dir);
    dir.child("keys/alice.pub").write_str(KEY_ALICE).unwrap();
    dir.child("keys/bob.pub").write_str(KEY_BOB).unwrap();

    keywarden()
        .current_dir(dir.path())
        .arg("sync")
        .assert()
        .success()
        .stdout(predicate::str::contains("Added alice-gh-key"))
        .stdout(predicate::str::contains("Added bob-gh-key"))
        .stdout(predicate::str::contains("2 key(s) → out/cloud-init.yaml"));

    let template = std::fs::read_to_string(dir.path().join("out/cloud-init.yaml")).unwrap();
    assert!(template.starts_with("#cloud-config\n"));
    assert!(template.contains(KEY_ALICE));
    assert!(template.contains(KEY_BOB));

    let registry = std::fs::read_to_string(dir.path().join(".keywarden/registry.json")).unwrap();
    assert!(registry.contains("alice-gh-key"));
    assert!(registry.contains("bob-gh-key"));
}

#[test]
fn second_sync_is_a_noop_with_identical_template() {
    let dir = assert_fs::TempDir::new().unwrap();
    setup(&dir);
    dir.child("keys/alice.pub").write_str(KEY_ALICE).unwrap();

    keywarden()
        .current_dir(dir.path())
        .arg("sync")
        .assert()
        .success();
    let first = std::fs::read(dir.path().join("out/cloud-init.yaml")).unwrap();

    keywarden()
        .current_dir(dir.path())
        .arg("sync")
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing to apply"));
    let second = std::fs::read(dir.path().join("out/cloud-init.yaml")).unwrap();

    assert_eq!(first, second);
}

#[test]
fn sync_deletes_keys_removed_from_source() {
    let dir = assert_fs::TempDir::new().unwrap();
    setup(&dir);
    dir.child("keys/alice.pub").write_str(KEY_ALICE).unwrap();
    dir.child("keys/bob.pub").write_str(KEY_BOB).unwrap();

    keywarden()
        .current_dir(dir.path())
        .arg("sync")
        .assert()
        .success();

    std::fs::remove_file(dir.path().join("keys/bob.pub")).unwrap();

    keywarden()
        .current_dir(dir.path())
        .arg("sync")
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted bob-gh-key"));

    let template = std::fs::read_to_string(dir.path().join("out/cloud-init.yaml")).unwrap();
    assert!(template.contains(KEY_ALICE));
    assert!(!template.contains(KEY_BOB));
}

#[test]
fn sync_leaves_unmanaged_key_pairs_alone() {
    let dir = assert_fs::TempDir::new().unwrap();
    setup(&dir);
    dir.child("keys/alice.pub").write_str(KEY_ALICE).unwrap();
    dir.child(".keywarden/registry.json")
        .write_str(r#"[{"name": "terraform-deployer", "fingerprint": "SHA256:unmanaged"}]"#)
        .unwrap();

    keywarden()
        .current_dir(dir.path())
        .arg("sync")
        .assert()
        .success();

    let registry = std::fs::read_to_string(dir.path().join(".keywarden/registry.json")).unwrap();
    assert!(registry.contains("terraform-deployer"));
    assert!(registry.contains("alice-gh-key"));
}

#[test]
fn sync_refuses_full_teardown_by_default() {
    let dir = assert_fs::TempDir::new().unwrap();
    setup(&dir);
    dir.child(".keywarden/registry.json")
        .write_str(r#"[{"name": "alice-gh-key", "fingerprint": "SHA256:gone"}]"#)
        .unwrap();

    keywarden()
        .current_dir(dir.path())
        .arg("sync")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Refusing to delete all 1"));

    // The registry is untouched.
    let registry = std::fs::read_to_string(dir.path().join(".keywarden/registry.json")).unwrap();
    assert!(registry.contains("alice-gh-key"));
}

#[test]
fn sync_allows_teardown_when_confirmed() {
    let dir = assert_fs::TempDir::new().unwrap();
    setup(&dir);
    dir.child(".keywarden/registry.json")
        .write_str(r#"[{"name": "alice-gh-key", "fingerprint": "SHA256:gone"}]"#)
        .unwrap();

    keywarden()
        .current_dir(dir.path())
        .args(["sync", "--allow-teardown"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted alice-gh-key"));

    let template = std::fs::read_to_string(dir.path().join("out/cloud-init.yaml")).unwrap();
    assert!(template.contains("ssh_authorized_keys: []"));
}

#[test]
fn dry_run_changes_nothing() {
    let dir = assert_fs::TempDir::new().unwrap();
    setup(&dir);
    dir.child("keys/alice.pub").write_str(KEY_ALICE).unwrap();

    keywarden()
        .current_dir(dir.path())
        .args(["sync", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dry run"))
        .stdout(predicate::str::contains("Would add 1, delete 0"));

    assert!(!dir.path().join("out/cloud-init.yaml").exists());
    assert!(!dir.path().join(".keywarden/registry.json").exists());
}

#[test]
fn missing_config_is_an_error() {
    let dir = assert_fs::TempDir::new().unwrap();

    keywarden()
        .current_dir(dir.path())
        .arg("sync")
        .assert()
        .failure()
        .stderr(predicate::str::contains("keywarden.toml not found"));
}
