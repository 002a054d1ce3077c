#![allow(deprecated)]
use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

fn seed(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("seed").unwrap();
    cmd.current_dir(dir.path()).env_remove("SEED_PROFILE");
    cmd
}

fn scaffold(dir: &TempDir, target: &str, profile: &str) {
    seed(dir)
        .args([target, "--profile", profile])
        .assert()
        .success();
}

fn git_available() -> bool {
    which::which("git").is_ok()
}

fn git(dir: &Path, args: &[&str]) -> std::process::Output {
    std::process::Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .unwrap()
}

fn inside_work_tree(dir: &Path) -> bool {
    git(dir, &["rev-parse", "--is-inside-work-tree"])
        .status
        .success()
}

fn run_sh(dir: &Path, script: &str) -> std::process::Output {
    std::process::Command::new("sh")
        .arg(script)
        .current_dir(dir)
        .output()
        .unwrap()
}

fn seed_lines(stdout: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(stdout)
        .lines()
        .filter(|l| l.starts_with("SEED_"))
        .map(str::to_string)
        .collect()
}

// ---------------------------------------------------------------------------
// seed [directory]
// ---------------------------------------------------------------------------

#[test]
fn scaffold_defaults_to_llm_without_a_terminal() {
    let dir = TempDir::new().unwrap();
    seed(&dir)
        .arg("demo")
        .assert()
        .success()
        .stdout(predicate::str::contains("Scaffold created: demo"))
        .stdout(predicate::str::contains("Profile: llm"))
        .stdout(predicate::str::contains(
            "3. Use skills/seed-validate/SKILL.md when making large doc or structure changes",
        ));

    let target = dir.path().join("demo");
    assert!(target.join(".seed/manifest.json").is_file());
    assert!(target.join("skills/seed-validate/SKILL.md").is_file());
    assert!(!target.join(".seed/seed-test.sh").exists());
}

#[test]
fn scaffold_core_writes_only_docs() {
    let dir = TempDir::new().unwrap();
    scaffold(&dir, "my_cool-app", "core");

    let target = dir.path().join("my_cool-app");
    let mut names: Vec<String> = std::fs::read_dir(&target)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(
        names,
        ["AGENTS.md", "CONTEXT.md", "DECISIONS.md", "README.md", "TODO.md"]
    );
    let readme = std::fs::read_to_string(target.join("README.md")).unwrap();
    assert!(readme.starts_with("# My Cool App\n"));
}

#[test]
fn scaffold_current_directory() {
    let dir = TempDir::new().unwrap();
    seed(&dir)
        .args(["--profile", "core"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1. cd ."));
    assert!(dir.path().join("README.md").is_file());
}

#[test]
fn scaffold_reads_profile_from_env() {
    let dir = TempDir::new().unwrap();
    seed(&dir)
        .arg("demo")
        .env("SEED_PROFILE", "core")
        .assert()
        .success()
        .stdout(predicate::str::contains("Profile: core"));
    assert!(!dir.path().join("demo/.seed").exists());
}

#[test]
fn scaffold_json_reports_created_files() {
    let dir = TempDir::new().unwrap();
    let output = seed(&dir)
        .args(["demo", "--profile", "llm", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["profile"], "llm");
    assert_eq!(report["created"].as_array().unwrap().len(), 7);
    assert_eq!(report["hooks_installed"], false);
}

#[test]
fn scaffold_refuses_non_empty_target() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir(dir.path().join("busy")).unwrap();
    std::fs::write(dir.path().join("busy/notes.txt"), "x").unwrap();

    seed(&dir)
        .args(["busy", "--profile", "core"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "target directory must be empty (or contain only .git)",
        ));
    assert!(!dir.path().join("busy/README.md").exists());
}

#[test]
fn invalid_profile_exits_one() {
    let dir = TempDir::new().unwrap();
    seed(&dir)
        .args(["demo", "--profile", "strict"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("invalid profile 'strict'"));
    assert!(!dir.path().join("demo").exists());
}

#[test]
fn unknown_flag_exits_one_and_help_exits_zero() {
    let dir = TempDir::new().unwrap();
    seed(&dir).arg("--bogus").assert().code(1);
    seed(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("validate-layout"));
}

// ---------------------------------------------------------------------------
// guarded profile
// ---------------------------------------------------------------------------

#[test]
fn guarded_without_repo_fails_but_keeps_files() {
    if !git_available() {
        return;
    }
    let dir = TempDir::new().unwrap();
    if inside_work_tree(dir.path()) {
        return;
    }
    seed(&dir)
        .args(["demo", "--profile", "guarded"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("initialized git repo"))
        .stderr(predicate::str::contains("git init && ./.seed/install-hooks.sh"));

    let target = dir.path().join("demo");
    for rel in [
        "README.md",
        ".seed/manifest.json",
        ".seed/seed-test.sh",
        ".seed/install-hooks.sh",
        ".seed/hooks/pre-commit",
    ] {
        assert!(target.join(rel).is_file(), "{rel}");
    }
}

#[test]
fn guarded_in_git_repo_installs_hooks() {
    if !git_available() {
        return;
    }
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("demo");
    std::fs::create_dir(&target).unwrap();
    assert!(git(&target, &["init", "-q"]).status.success());

    seed(&dir)
        .args(["demo", "--profile", "guarded"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "3. Pre-commit hooks are active and run ./.seed/seed-test.sh",
        ));

    assert_eq!(
        seed_core::git::hooks_path(&target).as_deref(),
        Some(seed_core::paths::HOOKS_DIR)
    );

    let check = run_sh(&target, ".seed/seed-test.sh");
    assert_eq!(check.status.code(), Some(0));
    assert!(seed_lines(&check.stdout).contains(&"SEED_STATUS=ok".to_string()));

    seed(&dir)
        .args(["validate-layout", "demo"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "seed-layout-validation: ok (profile=guarded)",
        ));

    // Reinstalling leaves the setting unchanged.
    assert!(run_sh(&target, ".seed/install-hooks.sh").status.success());
    assert_eq!(
        seed_core::git::hooks_path(&target).as_deref(),
        Some(seed_core::paths::HOOKS_DIR)
    );
}

#[test]
fn pre_commit_hook_maps_validator_status() {
    if !git_available() {
        return;
    }
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("demo");
    std::fs::create_dir(&target).unwrap();
    assert!(git(&target, &["init", "-q"]).status.success());
    scaffold(&dir, "demo", "guarded");

    let ok = run_sh(&target, ".seed/hooks/pre-commit");
    assert_eq!(ok.status.code(), Some(0));

    let todo = target.join("TODO.md");
    let content = std::fs::read_to_string(&todo).unwrap();
    std::fs::write(&todo, content.replace("## Doing Now\n", "## In Progress\n")).unwrap();
    let warned = run_sh(&target, ".seed/hooks/pre-commit");
    assert_eq!(warned.status.code(), Some(0));
    let stderr = String::from_utf8_lossy(&warned.stderr);
    assert!(stderr.contains("SEED_HOOK_DECISION=allowed_with_warning"));
    assert!(stderr.contains("SEED_VALIDATE_SKILL=skills/seed-validate/SKILL.md"));

    std::fs::remove_file(&todo).unwrap();
    let blocked = run_sh(&target, ".seed/hooks/pre-commit");
    assert_eq!(blocked.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&blocked.stderr).contains("SEED_HOOK_DECISION=blocked"));
}

// ---------------------------------------------------------------------------
// seed validate-layout
// ---------------------------------------------------------------------------

#[test]
fn validate_layout_infers_profile() {
    let dir = TempDir::new().unwrap();
    scaffold(&dir, "demo", "llm");
    seed(&dir)
        .args(["validate-layout", "demo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("SEED_STATUS=ok\n"))
        .stdout(predicate::str::contains("SEED_TRIGGER_REASONS=none\n"))
        .stdout(predicate::str::contains(
            "seed-layout-validation: ok (profile=llm)",
        ));
}

#[test]
fn validate_layout_missing_todo_fails() {
    let dir = TempDir::new().unwrap();
    scaffold(&dir, "demo", "core");
    std::fs::remove_file(dir.path().join("demo/TODO.md")).unwrap();

    seed(&dir)
        .args(["validate-layout", "demo", "--profile", "core"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("SEED_STATUS=fail"))
        .stdout(predicate::str::contains("SEED_ERRORS=1"))
        .stdout(predicate::str::contains("SEED_TRIGGER_REASONS=missing_file"))
        .stdout(predicate::str::contains("SEED_NEXT_ACTION").not())
        .stderr(predicate::str::contains(
            "Missing required Seed artifact: TODO.md",
        ));
}

#[test]
fn validate_layout_alias_recommends_skill() {
    let dir = TempDir::new().unwrap();
    scaffold(&dir, "demo", "llm");
    let context = dir.path().join("demo/CONTEXT.md");
    let body = std::fs::read_to_string(&context).unwrap();
    std::fs::write(
        &context,
        body.replace("## For LLM Agents\n", "## For Agents\n"),
    )
    .unwrap();

    seed(&dir)
        .args(["validate-layout", "demo"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("SEED_STATUS=skill_recommended"))
        .stdout(predicate::str::contains("SEED_TRIGGER_REASONS=heading_alias"))
        .stdout(predicate::str::contains(
            "SEED_NEXT_ACTION=run_seed_validate_skill",
        ))
        .stderr(predicate::str::contains(
            "Heading alias detected in CONTEXT.md: expected \"For LLM Agents\", found \"For Agents\"",
        ));
}

#[test]
fn validate_layout_flags_misplaced_content() {
    let dir = TempDir::new().unwrap();
    scaffold(&dir, "demo", "core");
    std::fs::create_dir(dir.path().join("demo/docs")).unwrap();
    std::fs::write(
        dir.path().join("demo/docs/plan.md"),
        "# Plan\n\n## Doing Now\n\n## Next Up\n",
    )
    .unwrap();

    seed(&dir)
        .args(["validate-layout", "demo"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("SEED_WARNINGS=1\n"))
        .stdout(predicate::str::contains(
            "SEED_TRIGGER_REASONS=misplaced_content",
        ));
}

#[test]
fn validate_layout_json_output() {
    let dir = TempDir::new().unwrap();
    scaffold(&dir, "demo", "core");
    std::fs::remove_file(dir.path().join("demo/AGENTS.md")).unwrap();

    let output = seed(&dir)
        .args(["validate-layout", "demo", "--json"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["profile"], "core");
    assert_eq!(report["description"], "Core markdown files only");
    assert_eq!(report["status"], "fail");
    assert_eq!(report["trigger_reasons"][0], "missing_file");
    assert_eq!(report["findings"][0]["path"], "AGENTS.md");
}

#[test]
fn validate_layout_rejects_missing_repo() {
    let dir = TempDir::new().unwrap();
    seed(&dir)
        .args(["validate-layout", "nope"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("not a directory"));
}

#[test]
fn top_level_profile_before_subcommand_is_rejected() {
    let dir = TempDir::new().unwrap();
    scaffold(&dir, "demo", "core");

    seed(&dir)
        .args(["--profile", "guarded", "validate-layout", "demo"])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains(
            "put it after the subcommand (e.g. seed validate-layout <repo> --profile <profile>)",
        ));

    seed(&dir)
        .args(["validate-layout", "demo", "--profile", "guarded"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains(
            "seed-layout-validation: fail (profile=guarded)",
        ));
}

#[test]
fn exported_profile_does_not_override_inference() {
    let dir = TempDir::new().unwrap();
    scaffold(&dir, "demo", "core");

    seed(&dir)
        .env("SEED_PROFILE", "guarded")
        .args(["validate-layout", "demo"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "seed-layout-validation: ok (profile=core)",
        ));
}

#[cfg(unix)]
#[test]
fn generated_script_agrees_with_native_validator() {
    if which::which("sh").is_err() {
        return;
    }
    let dir = TempDir::new().unwrap();
    scaffold(&dir, "demo", "llm");
    let target = dir.path().join("demo");
    std::fs::create_dir_all(target.join(".seed")).unwrap();
    std::fs::write(
        target.join(".seed/seed-test.sh"),
        seed_core::scripts::SEED_TEST_SH,
    )
    .unwrap();

    let todo = target.join("TODO.md");
    let body = std::fs::read_to_string(&todo).unwrap();
    std::fs::write(&todo, body.replace("## Next Up\n", "## Up Next\n")).unwrap();
    std::fs::create_dir(target.join("notes")).unwrap();
    std::fs::write(target.join("notes/scratch.md"), "## Entry Format\n").unwrap();
    std::fs::remove_file(target.join("AGENTS.md")).unwrap();

    let script = run_sh(&target, ".seed/seed-test.sh");
    let native = seed(&dir)
        .args(["validate-layout", "demo", "--profile", "llm"])
        .output()
        .unwrap();

    assert_eq!(script.status.code(), Some(1));
    assert_eq!(native.status.code(), Some(1));
    let script_lines = seed_lines(&script.stdout);
    assert_eq!(script_lines, seed_lines(&native.stdout));
    assert!(script_lines
        .contains(&"SEED_TRIGGER_REASONS=missing_file,heading_alias,misplaced_content".to_string()));
}

#[cfg(unix)]
#[test]
fn generated_script_escalates_warnings_when_configured() {
    if which::which("sh").is_err() {
        return;
    }
    let dir = TempDir::new().unwrap();
    scaffold(&dir, "demo", "llm");
    let target = dir.path().join("demo");
    std::fs::write(
        target.join(".seed/seed-test.sh"),
        seed_core::scripts::SEED_TEST_SH,
    )
    .unwrap();

    let manifest = target.join(".seed/manifest.json");
    let snapshot = std::fs::read_to_string(&manifest).unwrap();
    assert!(snapshot.contains("\"warnings_as_errors\": false"));
    std::fs::write(
        &manifest,
        snapshot.replace("\"warnings_as_errors\": false", "\"warnings_as_errors\": true"),
    )
    .unwrap();

    let todo = target.join("TODO.md");
    let body = std::fs::read_to_string(&todo).unwrap();
    std::fs::write(&todo, body.replace("## Next Up\n", "## Up Next\n")).unwrap();

    let script = run_sh(&target, ".seed/seed-test.sh");
    assert_eq!(script.status.code(), Some(1));
    let lines = seed_lines(&script.stdout);
    assert_eq!(
        lines,
        vec![
            "SEED_STATUS=fail".to_string(),
            "SEED_ERRORS=0".to_string(),
            "SEED_WARNINGS=1".to_string(),
            "SEED_TRIGGER_REASONS=heading_alias,warnings_as_errors".to_string(),
        ]
    );
    assert!(!lines.iter().any(|l| l.starts_with("SEED_NEXT_ACTION")));
}

#[cfg(unix)]
#[test]
fn generated_script_fails_without_manifest() {
    if which::which("sh").is_err() {
        return;
    }
    let dir = TempDir::new().unwrap();
    scaffold(&dir, "demo", "llm");
    let target = dir.path().join("demo");
    std::fs::write(
        target.join(".seed/seed-test.sh"),
        seed_core::scripts::SEED_TEST_SH,
    )
    .unwrap();
    std::fs::remove_file(target.join(".seed/manifest.json")).unwrap();

    let script = run_sh(&target, ".seed/seed-test.sh");
    assert_eq!(script.status.code(), Some(1));
    assert_eq!(
        seed_lines(&script.stdout),
        vec![
            "SEED_STATUS=fail".to_string(),
            "SEED_ERRORS=1".to_string(),
            "SEED_WARNINGS=0".to_string(),
            "SEED_TRIGGER_REASONS=missing_manifest".to_string(),
        ]
    );
    assert!(String::from_utf8_lossy(&script.stderr)
        .contains("Missing required Seed manifest: .seed/manifest.json"));
}

// ---------------------------------------------------------------------------
// seed install
// ---------------------------------------------------------------------------

#[test]
fn install_copies_binary_and_updates_rc_once() {
    let dir = TempDir::new().unwrap();
    let bin = dir.path().join("bin");
    let rc = dir.path().join(".zshrc");

    for _ in 0..2 {
        seed(&dir)
            .env("HOME", dir.path())
            .args(["install", "--name", "sd", "--bin-dir"])
            .arg(&bin)
            .arg("--shell-rc")
            .arg(&rc)
            .assert()
            .success()
            .stdout(predicate::str::contains("Installed command:"))
            .stdout(predicate::str::contains("Shell config updated:"));
    }

    assert!(bin.join("sd").is_file());
    let content = std::fs::read_to_string(&rc).unwrap();
    assert_eq!(content.matches("# Added by Seed CLI installer").count(), 1);
    assert!(content.contains(&format!("export PATH=\"{}:$PATH\"", bin.display())));
}

#[test]
fn install_default_bin_dir_uses_home() {
    let dir = TempDir::new().unwrap();
    seed(&dir)
        .env("HOME", dir.path())
        .env("SHELL", "/bin/bash")
        .arg("install")
        .assert()
        .success();

    assert!(dir.path().join(".local/bin/seed").is_file());
    let rc = std::fs::read_to_string(dir.path().join(".bashrc")).unwrap();
    assert!(rc.contains("export PATH=\"$HOME/.local/bin:$PATH\""));
}

#[test]
fn install_rejects_name_with_separator() {
    let dir = TempDir::new().unwrap();
    seed(&dir)
        .env("HOME", dir.path())
        .args(["install", "--name", "a/b"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("invalid command name"));
}
