use assert_cmd::cargo::cargo_bin_cmd;
use assert_fs::prelude::*;
use predicates::prelude::*;

/// Run keywarden with given args.
fn keywarden() -> assert_cmd::Command {
    cargo_bin_cmd!("keywarden")
}

const KEY_ALICE: &str =
    "ssh-ed25519 AAAAC3NzaC1lZDI1NTE5AAAAIOMqqnkVzrm0SdG6UOoqKLsabgH5C9okWi0dh2l9GKJl alice@example";
const KEY_BOB: &str =
    "ssh-ed25519 AAAAC3NzaC1lZDI1NTE5AAAAIOMqqnkVzrm0SdG6UOoqKLsabgH5C9okWi0dh2l9GKJm bob@example";

fn setup(dir: &assert_fs::TempDir, config: &str) {
    dir.child("keywarden.toml").write_str(config).unwrap();
    dir.child("keys").create_dir_all().unwrap();
}

// ─── Render command ─────────────────────────────────────────────

#[test]
fn render_writes_cloud_config_to_stdout() {
    let dir = assert_fs::TempDir::new().unwrap();
    setup(&dir, "[source]\ndir = \"keys\"\n");
    dir.child("keys/alice.pub").write_str(KEY_ALICE).unwrap();
    dir.child("keys/bob.pub").write_str(KEY_BOB).unwrap();

    keywarden()
        .current_dir(dir.path())
        .arg("render")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("#cloud-config\n"))
        .stdout(predicate::str::contains("  - name: admin\n"))
        .stdout(predicate::str::contains(KEY_ALICE))
        .stdout(predicate::str::contains(KEY_BOB));
}

#[test]
fn render_output_is_stable_across_runs() {
    let dir = assert_fs::TempDir::new().unwrap();
    setup(&dir, "[source]\ndir = \"keys\"\n");
    dir.child("keys/alice.pub").write_str(KEY_ALICE).unwrap();

    keywarden()
        .current_dir(dir.path())
        .args(["render", "--output", "first.yaml"])
        .assert()
        .success();
    keywarden()
        .current_dir(dir.path())
        .args(["render", "--output", "second.yaml"])
        .assert()
        .success();

    let first = std::fs::read(dir.path().join("first.yaml")).unwrap();
    let second = std::fs::read(dir.path().join("second.yaml")).unwrap();
    assert_eq!(first, second);
}

#[test]
fn render_honors_bootstrap_config() {
    let dir = assert_fs::TempDir::new().unwrap();
    setup(
        &dir,
        "[source]\ndir = \"keys\"\n\
         [bootstrap]\n\
         user_accounts = [\"ops\", \"deploy\"]\n\
         extra_directives = \"package_update: true\"\n",
    );
    dir.child("keys/alice.pub").write_str(KEY_ALICE).unwrap();

    keywarden()
        .current_dir(dir.path())
        .arg("render")
        .assert()
        .success()
        .stdout(predicate::str::contains("  - name: ops\n"))
        .stdout(predicate::str::contains("  - name: deploy\n"))
        .stdout(predicate::str::contains("package_update: true\n"));
}

#[test]
fn render_fails_on_empty_set_when_disallowed() {
    let dir = assert_fs::TempDir::new().unwrap();
    setup(
        &dir,
        "[source]\ndir = \"keys\"\n[bootstrap]\nallow_empty = false\n",
    );

    keywarden()
        .current_dir(dir.path())
        .arg("render")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Template rendering failed"));
}

// ─── Status command ─────────────────────────────────────────────

#[test]
fn status_reports_out_of_sync() {
    let dir = assert_fs::TempDir::new().unwrap();
    setup(&dir, "[source]\ndir = \"keys\"\n");
    dir.child("keys/alice.pub").write_str(KEY_ALICE).unwrap();

    keywarden()
        .current_dir(dir.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("1 valid key(s), 0 rejected"))
        .stdout(predicate::str::contains("Out of sync: 1 to add, 0 to delete"));
}

#[test]
fn status_reports_in_sync_after_sync() {
    let dir = assert_fs::TempDir::new().unwrap();
    setup(&dir, "[source]\ndir = \"keys\"\n");
    dir.child("keys/alice.pub").write_str(KEY_ALICE).unwrap();

    keywarden()
        .current_dir(dir.path())
        .arg("sync")
        .assert()
        .success();

    keywarden()
        .current_dir(dir.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("In sync."));
}

// ─── Init command ───────────────────────────────────────────────

#[test]
fn init_scaffolds_a_working_setup() {
    let dir = assert_fs::TempDir::new().unwrap();

    keywarden()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created keywarden.toml"));

    assert!(dir.path().join("keywarden.toml").exists());
    assert!(dir.path().join("keys").is_dir());
    assert!(dir.path().join(".keywarden/registry.json").exists());

    // The scaffold is immediately usable.
    keywarden()
        .current_dir(dir.path())
        .arg("status")
        .assert()
        .success();
}

#[test]
fn init_refuses_to_overwrite() {
    let dir = assert_fs::TempDir::new().unwrap();
    dir.child("keywarden.toml").write_str("[source]\n").unwrap();

    keywarden()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}
