use crate::error::{Result, SeedError};
use crate::paths;
use std::path::{Path, PathBuf};
use std::process::Command;

// ---------------------------------------------------------------------------
// git binary
// ---------------------------------------------------------------------------

fn git_bin(target: &Path) -> Result<PathBuf> {
    which::which("git").map_err(|_| SeedError::GitMissing(target.to_path_buf()))
}

/// True when `dir` sits inside a git work tree.
pub fn is_inside_work_tree(git: &Path, dir: &Path) -> bool {
    Command::new(git)
        .args(["rev-parse", "--is-inside-work-tree"])
        .current_dir(dir)
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// Value of `core.hooksPath` in the repository's local config, if set.
pub fn hooks_path(dir: &Path) -> Option<String> {
    let git = which::which("git").ok()?;
    let output = Command::new(git)
        .args(["config", "--local", "--get", "core.hooksPath"])
        .current_dir(dir)
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let value = String::from_utf8_lossy(&output.stdout).trim().to_string();
    (!value.is_empty()).then_some(value)
}

// ---------------------------------------------------------------------------
// Hook installation
// ---------------------------------------------------------------------------

/// Activate the generated pre-commit hook in `target`.
///
/// Runs the repository's own `.seed/install-hooks.sh` so the result is the
/// same as a manual per-clone install. Scaffolded files stay in place on
/// failure; the error says how to finish by hand.
pub fn install_hooks(target: &Path) -> Result<()> {
    let git = git_bin(target)?;
    if !is_inside_work_tree(&git, target) {
        return Err(SeedError::GitNotInitialized(target.to_path_buf()));
    }

    let script = format!("./{}", paths::INSTALL_HOOKS_SCRIPT);
    tracing::debug!(target = %target.display(), %script, "installing hooks");
    let output = Command::new("sh")
        .arg(&script)
        .current_dir(target)
        .output()
        .map_err(|e| SeedError::HookInstallFailed(e.to_string()))?;
    if !output.status.success() {
        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));
        return Err(SeedError::HookInstallFailed(combined.trim().to_string()));
    }
    match hooks_path(target) {
        Some(path) if path == paths::HOOKS_DIR => {}
        other => {
            return Err(SeedError::HookInstallFailed(format!(
                "core.hooksPath is {}, expected {}",
                other.as_deref().unwrap_or("unset"),
                paths::HOOKS_DIR
            )));
        }
    }
    tracing::info!(target = %target.display(), "pre-commit hook active");
    Ok(())
}
