use crate::profile::Profile;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("invalid profile '{0}' (expected core|llm|guarded)")]
    InvalidProfile(String),

    #[error("embedded asset missing: {0}")]
    AssetMissing(String),

    #[error("invalid contract: {0}")]
    ContractInvalid(String),

    #[error("canonical manifest has no profile definitions")]
    NoProfiles,

    #[error("canonical manifest missing profile rules for {0}")]
    ProfileRulesMissing(Profile),

    #[error("target exists and is not a directory: {}", .0.display())]
    TargetNotDirectory(PathBuf),

    #[error("target directory must be empty (or contain only .git): {}", .0.display())]
    TargetNotEmpty(PathBuf),

    #[error(
        "guarded profile requires git. install git, then run: (cd {dir} && git init && ./.seed/install-hooks.sh)",
        dir = .0.display()
    )]
    GitMissing(PathBuf),

    #[error(
        "guarded profile requires an initialized git repo in {dir}. run: (cd {dir} && git init && ./.seed/install-hooks.sh)",
        dir = .0.display()
    )]
    GitNotInitialized(PathBuf),

    #[error("guarded profile created files but hook setup failed: {0}")]
    HookInstallFailed(String),

    #[error("invalid command name '{0}': must be non-empty and must not include path separators")]
    InvalidCommandName(String),

    #[error("bin directory cannot be empty")]
    EmptyBinDir,

    #[error("cannot determine home directory (set HOME)")]
    HomeNotFound,

    #[error("write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SeedError>;
