use crate::assets;
use crate::contract::ProfileContract;
use crate::error::{Result, SeedError};
use crate::git;
use crate::io;
use crate::paths;
use crate::profile::Profile;
use crate::render::{self, ScaffoldInput};
use crate::scripts;
use serde::Serialize;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// ScaffoldReport
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct ScaffoldReport {
    pub target: PathBuf,
    pub profile: Profile,
    /// Repo-relative paths, in write order.
    pub created: Vec<String>,
    pub hooks_installed: bool,
}

impl ScaffoldReport {
    /// Human follow-up instructions printed after a successful scaffold.
    pub fn next_steps(&self) -> Vec<String> {
        let mut steps = vec![
            format!("1. cd {}", self.target.display()),
            "2. Replace placeholder run command in README.md".to_string(),
        ];
        match self.profile {
            Profile::Core => steps.push("3. Add any validation workflow only when needed".to_string()),
            Profile::Llm => steps.push(
                "3. Use skills/seed-validate/SKILL.md when making large doc or structure changes"
                    .to_string(),
            ),
            Profile::Guarded => {
                steps.push("3. Pre-commit hooks are active and run ./.seed/seed-test.sh".to_string());
                steps.push("4. If warnings appear, run skills/seed-validate/SKILL.md".to_string());
            }
        }
        steps
    }
}

// ---------------------------------------------------------------------------
// Target checks
// ---------------------------------------------------------------------------

/// Create `target` if missing; otherwise require it to be empty apart from
/// a `.git` directory.
pub fn ensure_target_dir(target: &Path) -> Result<()> {
    if !target.exists() {
        io::ensure_dir(target)?;
        return Ok(());
    }
    if !target.is_dir() {
        return Err(SeedError::TargetNotDirectory(target.to_path_buf()));
    }
    let mut entries = std::fs::read_dir(target)?.collect::<std::io::Result<Vec<_>>>()?;
    match entries.len() {
        0 => Ok(()),
        1 => {
            let only = entries.remove(0);
            if only.file_name() == paths::GIT_DIR && only.file_type()?.is_dir() {
                Ok(())
            } else {
                Err(SeedError::TargetNotEmpty(target.to_path_buf()))
            }
        }
        _ => Err(SeedError::TargetNotEmpty(target.to_path_buf())),
    }
}

// ---------------------------------------------------------------------------
// Scaffold
// ---------------------------------------------------------------------------

/// Write the artifact set for `profile` into `target`.
///
/// Guarded scaffolds also activate the pre-commit hook; if that fails the
/// files stay on disk and the error carries the manual recovery command.
pub fn scaffold(
    target: &Path,
    profile: Profile,
    input: &ScaffoldInput,
    contract: &ProfileContract,
) -> Result<ScaffoldReport> {
    ensure_target_dir(target)?;
    // Resolve everything fallible before the first write.
    let snapshot = if profile.has_manifest() {
        Some(contract.snapshot(profile)?.to_json()?)
    } else {
        None
    };

    let mut created = Vec::new();

    for (relative, body) in render::render_docs(input, profile) {
        io::atomic_write(&target.join(relative), body.as_bytes())?;
        created.push(relative.to_string());
    }

    if let Some(snapshot) = snapshot {
        io::atomic_write(&paths::manifest_path(target), snapshot.as_bytes())?;
        created.push(paths::MANIFEST_FILE.to_string());

        let skill = assets::read_text(paths::VALIDATE_SKILL_ASSET)?;
        io::atomic_write(&target.join(paths::VALIDATE_SKILL_FILE), skill.as_bytes())?;
        created.push(paths::VALIDATE_SKILL_FILE.to_string());
    }

    let mut hooks_installed = false;
    if profile.has_hooks() {
        for (relative, body) in scripts::guarded_scripts() {
            io::write_executable(&target.join(relative), body.as_bytes())?;
            created.push(relative.to_string());
        }
        git::install_hooks(target)?;
        hooks_installed = true;
    }

    tracing::info!(target = %target.display(), %profile, files = created.len(), "scaffold written");
    Ok(ScaffoldReport {
        target: target.to_path_buf(),
        profile,
        created,
        hooks_installed,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
