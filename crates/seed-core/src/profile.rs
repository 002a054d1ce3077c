use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Profile
// ---------------------------------------------------------------------------

/// A named bundle of required artifacts and validation strictness.
///
/// Ordered from least to most strict; each profile requires everything the
/// previous one does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Profile {
    Core,
    Llm,
    Guarded,
}

impl Profile {
    pub fn all() -> &'static [Profile] {
        &[Profile::Core, Profile::Llm, Profile::Guarded]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Profile::Core => "core",
            Profile::Llm => "llm",
            Profile::Guarded => "guarded",
        }
    }

    /// True for profiles that ship the manifest snapshot and validation skill.
    pub fn has_manifest(self) -> bool {
        self >= Profile::Llm
    }

    /// True for the profile that ships scripts and installs git hooks.
    pub fn has_hooks(self) -> bool {
        self == Profile::Guarded
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Profile {
    type Err = crate::error::SeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let candidate = s.trim().to_ascii_lowercase();
        Profile::all()
            .iter()
            .copied()
            .find(|p| p.as_str() == candidate)
            .ok_or_else(|| crate::error::SeedError::InvalidProfile(candidate))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
