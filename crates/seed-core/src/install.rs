//! `seed install`: copy the running binary onto the user's PATH.

use crate::error::{Result, SeedError};
use crate::io;
use serde::Serialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_COMMAND_NAME: &str = "seed";
pub const RC_COMMENT: &str = "# Added by Seed CLI installer";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallOptions {
    pub command_name: String,
    pub bin_dir: PathBuf,
    /// Detected from `$SHELL` when unset.
    pub shell_rc: Option<PathBuf>,
}

impl InstallOptions {
    /// `seed` into `~/.local/bin`, rc file auto-detected.
    pub fn defaults() -> Result<Self> {
        Ok(InstallOptions {
            command_name: DEFAULT_COMMAND_NAME.to_string(),
            bin_dir: default_bin_dir(&home_dir()?),
            shell_rc: None,
        })
    }

    fn check(&self) -> Result<()> {
        let name = self.command_name.trim();
        if name.is_empty() || name.contains('/') || name.contains(std::path::MAIN_SEPARATOR) {
            return Err(SeedError::InvalidCommandName(self.command_name.clone()));
        }
        if self.bin_dir.as_os_str().is_empty() {
            return Err(SeedError::EmptyBinDir);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct InstallReport {
    pub command_name: String,
    pub installed_path: PathBuf,
    pub shell_rc: PathBuf,
    /// False when the PATH line was already present.
    pub rc_updated: bool,
}

impl InstallReport {
    pub fn next_steps(&self) -> Vec<String> {
        vec![
            format!("1) Reload your shell: source {}", self.shell_rc.display()),
            format!(
                "2) In a new or empty project directory, run: {} <directory>",
                self.command_name
            ),
            "3) Omit --profile to use the interactive 3-option TUI".to_string(),
        ]
    }
}

// ---------------------------------------------------------------------------
// Environment lookups
// ---------------------------------------------------------------------------

/// `$HOME` when set and non-blank, else the platform home directory.
pub fn home_dir() -> Result<PathBuf> {
    if let Ok(home) = std::env::var("HOME") {
        let home = home.trim();
        if !home.is_empty() {
            return Ok(PathBuf::from(home));
        }
    }
    home::home_dir()
        .filter(|h| !h.as_os_str().is_empty())
        .ok_or(SeedError::HomeNotFound)
}

pub fn default_bin_dir(home: &Path) -> PathBuf {
    home.join(".local").join("bin")
}

/// Shell rc file for the login shell path in `shell` (usually `$SHELL`).
pub fn detect_shell_rc(home: &Path, shell: &str) -> PathBuf {
    if shell.ends_with("/zsh") {
        home.join(".zshrc")
    } else if shell.ends_with("/bash") {
        home.join(".bashrc")
    } else {
        home.join(".profile")
    }
}

fn path_export_line(home: &Path, bin_dir: &Path) -> String {
    if bin_dir == default_bin_dir(home) {
        "export PATH=\"$HOME/.local/bin:$PATH\"".to_string()
    } else {
        format!("export PATH=\"{}:$PATH\"", bin_dir.display())
    }
}

// ---------------------------------------------------------------------------
// Install
// ---------------------------------------------------------------------------

/// Install the currently running executable.
pub fn run(opts: &InstallOptions) -> Result<InstallReport> {
    let exe = std::env::current_exe()?;
    install_binary(&exe, opts, &home_dir()?)
}

/// Copy `source` to `<bin_dir>/<name>` (mode 0755) and make sure the shell rc
/// file puts `bin_dir` on PATH. Safe to repeat.
pub fn install_binary(source: &Path, opts: &InstallOptions, home: &Path) -> Result<InstallReport> {
    opts.check()?;
    let command_name = opts.command_name.trim().to_string();
    let shell_rc = match &opts.shell_rc {
        Some(rc) => rc.clone(),
        None => detect_shell_rc(home, &std::env::var("SHELL").unwrap_or_default()),
    };

    let installed_path = opts.bin_dir.join(&command_name);
    let bytes = std::fs::read(source)?;
    io::write_executable(&installed_path, &bytes)?;
    tracing::info!(path = %installed_path.display(), "binary installed");

    let export = path_export_line(home, &opts.bin_dir);
    let rc_updated = io::append_line_if_missing(&shell_rc, RC_COMMENT, &export)?;
    if rc_updated {
        tracing::debug!(rc = %shell_rc.display(), "PATH line appended");
    }

    Ok(InstallReport {
        command_name,
        installed_path,
        shell_rc,
        rc_updated,
    })
}
