#![allow(deprecated)]
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn soulguard(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("soulguard").unwrap();
    cmd.current_dir(dir.path()).env("SOULGUARD_ROOT", dir.path());
    cmd
}

fn init_repo(dir: &TempDir) {
    soulguard(dir).args(["init", "--name", "archie"]).assert().success();
}

fn git(dir: &TempDir, args: &[&str]) {
    let status = std::process::Command::new("git")
        .args(args)
        .current_dir(dir.path())
        .status()
        .expect("git available");
    assert!(status.success(), "git {args:?} failed");
}

/// Run `git commit` with the cargo-built `soulguard` binary on PATH, so an
/// installed pre-commit hook resolves it the same way a developer's shell
/// would. Returns the exit status instead of asserting.
fn git_commit(dir: &TempDir, message: &str) -> std::process::ExitStatus {
    let bin = assert_cmd::cargo::cargo_bin("soulguard");
    let bin_dir = bin.parent().expect("binary has a parent dir").to_path_buf();
    let path = std::env::join_paths(
        std::iter::once(bin_dir)
            .chain(std::env::split_paths(&std::env::var_os("PATH").unwrap_or_default())),
    )
    .unwrap();

    std::process::Command::new("git")
        .args([
            "-c",
            "user.name=test",
            "-c",
            "user.email=test@example.com",
            "commit",
            "-q",
            "-m",
            message,
        ])
        .current_dir(dir.path())
        .env("PATH", path)
        .status()
        .expect("git available")
}

fn read_soul(dir: &TempDir) -> serde_yaml::Value {
    let data = std::fs::read_to_string(dir.path().join(".soulguard/soul.yaml")).unwrap();
    serde_yaml::from_str(&data).unwrap()
}

fn write_directives(dir: &TempDir, text: &str) {
    let mut soul = read_soul(dir);
    soul["directives"] = serde_yaml::Value::String(text.to_string());
    std::fs::write(
        dir.path().join(".soulguard/soul.yaml"),
        serde_yaml::to_string(&soul).unwrap(),
    )
    .unwrap();
}

// ---------------------------------------------------------------------------
// soulguard init
// ---------------------------------------------------------------------------

#[test]
fn init_creates_soul_and_record() {
    let dir = TempDir::new().unwrap();
    soulguard(&dir)
        .args(["init", "--name", "archie"])
        .assert()
        .success()
        .stdout(predicate::str::contains("created: .soulguard/soul.yaml"))
        .stdout(predicate::str::contains("created: .github/soul.sha256"));

    assert!(dir.path().join(".soulguard/soul.yaml").exists());
    assert!(dir.path().join(".github/soul.sha256").exists());
}

#[test]
fn init_is_idempotent() {
    let dir = TempDir::new().unwrap();
    init_repo(&dir);
    soulguard(&dir)
        .args(["init", "--name", "archie"])
        .assert()
        .success()
        .stdout(predicate::str::contains("exists:  .soulguard/soul.yaml"));
}

#[test]
fn init_rejects_bad_name() {
    let dir = TempDir::new().unwrap();
    soulguard(&dir)
        .args(["init", "--name", "Not A Slug"])
        .assert()
        .failure();
}

// ---------------------------------------------------------------------------
// soulguard verify / hash / pin
// ---------------------------------------------------------------------------

#[test]
fn fresh_init_verifies() {
    let dir = TempDir::new().unwrap();
    init_repo(&dir);
    soulguard(&dir)
        .arg("verify")
        .assert()
        .success()
        .stdout(predicate::str::contains("OK: soul 'archie' verified"));
}

#[test]
fn edited_directives_fail_verify_with_both_digests() {
    let dir = TempDir::new().unwrap();
    init_repo(&dir);
    write_directives(&dir, "directive text v2");

    soulguard(&dir)
        .arg("verify")
        .assert()
        .failure()
        .stderr(predicate::str::contains("soul integrity check FAILED"))
        .stderr(predicate::str::contains("computed="))
        .stderr(predicate::str::contains("pinned="));
}

#[test]
fn hash_prints_digest_of_working_tree() {
    let dir = TempDir::new().unwrap();
    init_repo(&dir);
    soulguard(&dir)
        .arg("hash")
        .assert()
        .success()
        .stdout(predicate::str::is_match("^[0-9a-f]{64}\n$").unwrap());
}

#[test]
fn pin_restores_verification_and_updates_record() {
    let dir = TempDir::new().unwrap();
    init_repo(&dir);
    write_directives(&dir, "directive text v2");
    soulguard(&dir).arg("verify").assert().failure();

    soulguard(&dir)
        .arg("pin")
        .assert()
        .success()
        .stdout(predicate::str::contains("Re-pinned:"));

    soulguard(&dir).arg("verify").assert().success();

    // The record moved in lockstep with the pin.
    let record = std::fs::read_to_string(dir.path().join(".github/soul.sha256")).unwrap();
    let soul = read_soul(&dir);
    assert_eq!(record.trim(), soul["pinned_digest"].as_str().unwrap());
}

#[test]
fn stale_record_fails_verify() {
    let dir = TempDir::new().unwrap();
    init_repo(&dir);
    std::fs::write(
        dir.path().join(".github/soul.sha256"),
        "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855\n",
    )
    .unwrap();

    soulguard(&dir)
        .arg("verify")
        .assert()
        .failure()
        .stderr(predicate::str::contains("out of lockstep"));
}

#[test]
fn verify_json_reports_digest() {
    let dir = TempDir::new().unwrap();
    init_repo(&dir);
    let output = soulguard(&dir).args(["verify", "--json"]).assert().success();
    let stdout = String::from_utf8(output.get_output().stdout.clone()).unwrap();
    let report: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(report["name"], "archie");
    assert_eq!(report["verified"], true);
    assert_eq!(report["digest"].as_str().unwrap().len(), 64);
}

// ---------------------------------------------------------------------------
// soulguard precommit (commit gate)
// ---------------------------------------------------------------------------

#[test]
fn precommit_outside_git_repo_fails() {
    let dir = TempDir::new().unwrap();
    init_repo(&dir);
    soulguard(&dir)
        .arg("precommit")
        .assert()
        .failure()
        .stderr(predicate::str::contains("git repository"));
}

#[test]
fn precommit_passes_when_soul_not_staged() {
    let dir = TempDir::new().unwrap();
    git(&dir, &["init", "-q"]);
    init_repo(&dir);
    std::fs::write(dir.path().join("README.md"), "docs\n").unwrap();
    git(&dir, &["add", "README.md"]);

    soulguard(&dir).arg("precommit").assert().success();
}

#[test]
fn precommit_passes_consistent_staged_change() {
    let dir = TempDir::new().unwrap();
    git(&dir, &["init", "-q"]);
    init_repo(&dir);
    git(&dir, &["add", ".soulguard/soul.yaml", ".github/soul.sha256"]);

    soulguard(&dir)
        .arg("precommit")
        .assert()
        .success()
        .stdout(predicate::str::contains("staged soul verified"));
}

#[test]
fn precommit_blocks_stale_pin() {
    let dir = TempDir::new().unwrap();
    git(&dir, &["init", "-q"]);
    init_repo(&dir);
    // Edit the directives without re-pinning, then stage both files.
    write_directives(&dir, "directive text v2");
    git(&dir, &["add", ".soulguard/soul.yaml", ".github/soul.sha256"]);

    soulguard(&dir)
        .arg("precommit")
        .assert()
        .failure()
        .stderr(predicate::str::contains("digest mismatch"))
        .stderr(predicate::str::contains("computed="))
        .stderr(predicate::str::contains("pinned="));
}

#[test]
fn precommit_blocks_unpaired_soul_change() {
    let dir = TempDir::new().unwrap();
    git(&dir, &["init", "-q"]);
    init_repo(&dir);
    write_directives(&dir, "directive text v2");
    soulguard(&dir).arg("pin").assert().success();
    // Stage only the soul file — the updated record stays unstaged.
    git(&dir, &["add", ".soulguard/soul.yaml"]);

    soulguard(&dir)
        .arg("precommit")
        .assert()
        .failure()
        .stderr(predicate::str::contains("without its hash record"));
}

#[test]
fn precommit_reads_index_not_working_tree() {
    let dir = TempDir::new().unwrap();
    git(&dir, &["init", "-q"]);
    init_repo(&dir);
    git(&dir, &["add", ".soulguard/soul.yaml", ".github/soul.sha256"]);
    // Dirty the working tree after staging: what will be committed is still
    // the consistent staged pair, so the gate must pass.
    write_directives(&dir, "unstaged tampering");

    soulguard(&dir).arg("precommit").assert().success();
}

#[test]
fn precommit_blocks_computed_pin() {
    let dir = TempDir::new().unwrap();
    git(&dir, &["init", "-q"]);
    init_repo(&dir);
    let mut soul = read_soul(&dir);
    soul["pinned_digest"] = serde_yaml::Value::String("sha256(directives)".to_string());
    std::fs::write(
        dir.path().join(".soulguard/soul.yaml"),
        serde_yaml::to_string(&soul).unwrap(),
    )
    .unwrap();
    git(&dir, &["add", ".soulguard/soul.yaml", ".github/soul.sha256"]);

    soulguard(&dir)
        .arg("precommit")
        .assert()
        .failure()
        .stderr(predicate::str::contains("literal"));
}

#[test]
fn precommit_blocks_staged_deletion_of_soul() {
    let dir = TempDir::new().unwrap();
    git(&dir, &["init", "-q"]);
    init_repo(&dir);
    git(&dir, &["add", ".soulguard/soul.yaml", ".github/soul.sha256"]);
    assert!(git_commit(&dir, "pin soul").success());

    git(&dir, &["rm", "-q", ".soulguard/soul.yaml"]);

    soulguard(&dir)
        .arg("precommit")
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be deleted"));
}

// ---------------------------------------------------------------------------
// soulguard install-hook
// ---------------------------------------------------------------------------

#[test]
fn install_hook_writes_managed_script() {
    let dir = TempDir::new().unwrap();
    git(&dir, &["init", "-q"]);
    init_repo(&dir);

    soulguard(&dir).arg("install-hook").assert().success();

    let hook = std::fs::read_to_string(dir.path().join(".git/hooks/pre-commit")).unwrap();
    assert!(hook.contains("soulguard precommit"));
    assert!(hook.contains("soulguard:managed"));
}

#[test]
fn install_hook_refuses_foreign_hook_without_force() {
    let dir = TempDir::new().unwrap();
    git(&dir, &["init", "-q"]);
    init_repo(&dir);
    std::fs::create_dir_all(dir.path().join(".git/hooks")).unwrap();
    std::fs::write(
        dir.path().join(".git/hooks/pre-commit"),
        "#!/bin/sh\nmake lint\n",
    )
    .unwrap();

    soulguard(&dir)
        .arg("install-hook")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not managed by soulguard"));

    soulguard(&dir)
        .args(["install-hook", "--force"])
        .assert()
        .success();
}

#[test]
fn installed_hook_gates_real_commits() {
    let dir = TempDir::new().unwrap();
    git(&dir, &["init", "-q"]);
    init_repo(&dir);
    soulguard(&dir).arg("install-hook").assert().success();

    // Consistent pair commits cleanly through the hook.
    git(&dir, &["add", ".soulguard/soul.yaml", ".github/soul.sha256"]);
    assert!(git_commit(&dir, "pin soul").success());

    // Tampered directives with a stale pin: the hook aborts the commit.
    write_directives(&dir, "directive text v2");
    git(&dir, &["add", ".soulguard/soul.yaml"]);
    assert!(!git_commit(&dir, "tamper soul").success());

    // Re-pin and stage both files: the commit goes through again.
    soulguard(&dir).arg("pin").assert().success();
    git(&dir, &["add", ".soulguard/soul.yaml", ".github/soul.sha256"]);
    assert!(git_commit(&dir, "reviewed change").success());
}

#[test]
fn install_hook_outside_git_repo_fails() {
    let dir = TempDir::new().unwrap();
    init_repo(&dir);
    soulguard(&dir).arg("install-hook").assert().failure();
}

// ---------------------------------------------------------------------------
// soulguard mcp (startup gate)
// ---------------------------------------------------------------------------

#[test]
fn mcp_serves_initialize_when_soul_intact() {
    let dir = TempDir::new().unwrap();
    init_repo(&dir);

    soulguard(&dir)
        .arg("mcp")
        .write_stdin(r#"{"jsonrpc":"2.0","id":1,"method":"initialize"}"#.to_string() + "\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"soulguard\""));
}

#[test]
fn mcp_refuses_to_start_on_tampered_soul() {
    let dir = TempDir::new().unwrap();
    init_repo(&dir);
    write_directives(&dir, "tampered on the deployment host");

    soulguard(&dir)
        .arg("mcp")
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("soul integrity check FAILED"));
}
