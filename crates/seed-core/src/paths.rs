use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Canonical documents
// ---------------------------------------------------------------------------

pub const README_MD: &str = "README.md";
pub const DECISIONS_MD: &str = "DECISIONS.md";
pub const TODO_MD: &str = "TODO.md";
pub const CONTEXT_MD: &str = "CONTEXT.md";
pub const AGENTS_MD: &str = "AGENTS.md";

/// Top-level documents every profile writes, in write order.
pub const CANONICAL_DOCS: [&str; 5] = [README_MD, DECISIONS_MD, TODO_MD, CONTEXT_MD, AGENTS_MD];

// ---------------------------------------------------------------------------
// Seed state and skill
// ---------------------------------------------------------------------------

pub const SEED_DIR: &str = ".seed";
pub const SKILLS_DIR: &str = "skills";

pub const MANIFEST_FILE: &str = ".seed/manifest.json";
pub const VALIDATE_SKILL_FILE: &str = "skills/seed-validate/SKILL.md";

pub const SEED_TEST_SCRIPT: &str = ".seed/seed-test.sh";
pub const INSTALL_HOOKS_SCRIPT: &str = ".seed/install-hooks.sh";
pub const HOOKS_DIR: &str = ".seed/hooks";
pub const PRE_COMMIT_HOOK: &str = ".seed/hooks/pre-commit";

/// Directories the misplaced-content scan never enters.
pub const RESERVED_PREFIXES: [&str; 2] = [".seed/", "skills/"];

pub const GIT_DIR: &str = ".git";

// ---------------------------------------------------------------------------
// Embedded assets
// ---------------------------------------------------------------------------

pub const CONTRACT_ASSET: &str = "seed-contract/manifest.json";
pub const VALIDATE_SKILL_ASSET: &str = "skills/seed-validate/SKILL.md";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn manifest_path(root: &Path) -> PathBuf {
    root.join(MANIFEST_FILE)
}

pub fn seed_test_path(root: &Path) -> PathBuf {
    root.join(SEED_TEST_SCRIPT)
}

/// Convert a repo-relative path to a forward-slash string so it can be
/// compared against contract entries on every platform.
pub fn to_slash(relative: &Path) -> String {
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

pub fn is_reserved(relative: &str) -> bool {
    RESERVED_PREFIXES.iter().any(|p| relative.starts_with(p))
}

pub fn is_canonical_doc(relative: &str) -> bool {
    CANONICAL_DOCS.contains(&relative)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
