//! The profile contract: which files, headings, and signals each profile
//! requires.
//!
//! The on-disk form (embedded JSON and the per-repo `.seed/manifest.json`)
//! encodes headings as `"file::heading"` and aliases as
//! `"file::canonical::alias"` so the generated shell validator can read them
//! with `awk`. Inside the crate they are structured records; the delimited
//! form only exists at the serde boundary.

use crate::assets;
use crate::error::{Result, SeedError};
use crate::paths;
use crate::profile::Profile;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const ENTRY_DELIMITER: &str = "::";

// ---------------------------------------------------------------------------
// ValidationMode
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationMode {
    /// File and heading checks only.
    Structural,
    /// Structural checks plus the local validation skill.
    StructuralWithSkill,
    /// Structural checks run by the generated `.seed/seed-test.sh`.
    Scripted,
}

// ---------------------------------------------------------------------------
// RequiredHeading / HeadingAlias
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequiredHeading {
    pub file: String,
    pub heading: String,
}

impl RequiredHeading {
    pub fn new(file: &str, heading: &str) -> Self {
        Self {
            file: file.to_string(),
            heading: heading.to_string(),
        }
    }

    /// Parse `"file::heading"`. The heading is everything after the first
    /// delimiter.
    pub fn parse(entry: &str) -> Result<Self> {
        match entry.split_once(ENTRY_DELIMITER) {
            Some((file, heading)) if !file.is_empty() && !heading.is_empty() => {
                Ok(Self::new(file, heading))
            }
            _ => Err(SeedError::ContractInvalid(format!(
                "required heading '{entry}' must look like 'file::heading'"
            ))),
        }
    }

    pub fn encode(&self) -> String {
        format!("{}{ENTRY_DELIMITER}{}", self.file, self.heading)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingAlias {
    pub file: String,
    pub canonical: String,
    pub alias: String,
}

impl HeadingAlias {
    pub fn new(file: &str, canonical: &str, alias: &str) -> Self {
        Self {
            file: file.to_string(),
            canonical: canonical.to_string(),
            alias: alias.to_string(),
        }
    }

    /// Parse `"file::canonical::alias"`.
    pub fn parse(entry: &str) -> Result<Self> {
        let parsed = entry
            .split_once(ENTRY_DELIMITER)
            .and_then(|(file, rest)| {
                rest.split_once(ENTRY_DELIMITER)
                    .map(|(canonical, alias)| (file, canonical, alias))
            });
        match parsed {
            Some((file, canonical, alias))
                if !file.is_empty() && !canonical.is_empty() && !alias.is_empty() =>
            {
                Ok(Self::new(file, canonical, alias))
            }
            _ => Err(SeedError::ContractInvalid(format!(
                "heading alias '{entry}' must look like 'file::canonical::alias'"
            ))),
        }
    }

    pub fn encode(&self) -> String {
        format!(
            "{}{ENTRY_DELIMITER}{}{ENTRY_DELIMITER}{}",
            self.file, self.canonical, self.alias
        )
    }
}

// ---------------------------------------------------------------------------
// ProfileRules
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct ProfileRules {
    pub description: String,
    pub validation_mode: ValidationMode,
    pub validation_entrypoint: Option<String>,
    pub warnings_as_errors: bool,
    pub required_files: Vec<String>,
    pub required_headings: Vec<RequiredHeading>,
    pub heading_aliases: Vec<HeadingAlias>,
    pub misplaced_content_signals: Vec<String>,
}

impl ProfileRules {
    /// Aliases tolerated in place of `heading` in `file`.
    pub fn aliases_for<'a>(
        &'a self,
        file: &'a str,
        heading: &'a str,
    ) -> impl Iterator<Item = &'a HeadingAlias> + 'a {
        self.heading_aliases
            .iter()
            .filter(move |a| a.file == file && a.canonical == heading)
    }
}

// ---------------------------------------------------------------------------
// ProfileContract
// ---------------------------------------------------------------------------

/// The authoritative rule set, loaded once per process and passed by
/// reference to whatever needs it.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileContract {
    pub format_version: String,
    pub default_profile: Profile,
    pub profiles: BTreeMap<Profile, ProfileRules>,
}

impl ProfileContract {
    /// Load the contract bundled into the binary.
    pub fn load() -> Result<Self> {
        let raw = assets::read_text(paths::CONTRACT_ASSET)?;
        let contract = Self::from_json(&raw)?;
        tracing::debug!(
            format_version = %contract.format_version,
            profiles = contract.profiles.len(),
            "loaded embedded contract"
        );
        Ok(contract)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let parsed: RawContract = serde_json::from_str(raw)?;
        if parsed.profiles.is_empty() {
            return Err(SeedError::NoProfiles);
        }

        let default_profile = match parsed.default_profile.trim() {
            "" => Profile::Llm,
            name => name.parse::<Profile>().map_err(|_| {
                SeedError::ContractInvalid(format!("unknown default_profile '{name}'"))
            })?,
        };

        let mut profiles = BTreeMap::new();
        for (name, rules) in parsed.profiles {
            let profile: Profile = name
                .parse()
                .map_err(|_| SeedError::ContractInvalid(format!("unknown profile '{name}'")))?;
            profiles.insert(profile, rules.into_rules()?);
        }

        Ok(Self {
            format_version: parsed.seed_format_version,
            default_profile,
            profiles,
        })
    }

    pub fn rules(&self, profile: Profile) -> Result<&ProfileRules> {
        self.profiles
            .get(&profile)
            .ok_or(SeedError::ProfileRulesMissing(profile))
    }

    /// Project the contract onto one profile for `.seed/manifest.json`.
    pub fn snapshot(&self, profile: Profile) -> Result<ManifestSnapshot> {
        let rules = self.rules(profile)?;
        Ok(ManifestSnapshot {
            seed_format_version: self.format_version.clone(),
            active_profile: profile,
            validation_mode: rules.validation_mode,
            validation_entrypoint: rules.validation_entrypoint.clone(),
            warnings_as_errors: rules.warnings_as_errors,
            required_files: rules.required_files.clone(),
            required_headings: rules.required_headings.iter().map(|h| h.encode()).collect(),
            heading_aliases: rules.heading_aliases.iter().map(|a| a.encode()).collect(),
            misplaced_content_signals: rules.misplaced_content_signals.clone(),
        })
    }
}

// ---------------------------------------------------------------------------
// ManifestSnapshot
// ---------------------------------------------------------------------------

/// Profile-resolved contract written to `.seed/manifest.json`.
///
/// Field order and pretty-printing matter: the generated `seed-test.sh`
/// reads one array element per line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestSnapshot {
    pub seed_format_version: String,
    pub active_profile: Profile,
    pub validation_mode: ValidationMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation_entrypoint: Option<String>,
    pub warnings_as_errors: bool,
    pub required_files: Vec<String>,
    pub required_headings: Vec<String>,
    pub heading_aliases: Vec<String>,
    pub misplaced_content_signals: Vec<String>,
}

impl ManifestSnapshot {
    pub fn to_json(&self) -> Result<String> {
        let mut out = serde_json::to_string_pretty(self)?;
        out.push('\n');
        Ok(out)
    }
}

// ---------------------------------------------------------------------------
// Serde boundary
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct RawContract {
    seed_format_version: String,
    #[serde(default)]
    default_profile: String,
    #[serde(default)]
    profiles: BTreeMap<String, RawRules>,
}

#[derive(Deserialize)]
struct RawRules {
    #[serde(default)]
    description: String,
    validation_mode: ValidationMode,
    #[serde(default)]
    validation_entrypoint: Option<String>,
    #[serde(default)]
    warnings_as_errors: bool,
    #[serde(default)]
    required_files: Vec<String>,
    #[serde(default)]
    required_headings: Vec<String>,
    #[serde(default)]
    heading_aliases: Vec<String>,
    #[serde(default)]
    misplaced_content_signals: Vec<String>,
}

impl RawRules {
    fn into_rules(self) -> Result<ProfileRules> {
        let required_headings = self
            .required_headings
            .iter()
            .map(|s| RequiredHeading::parse(s))
            .collect::<Result<Vec<_>>>()?;
        let heading_aliases = self
            .heading_aliases
            .iter()
            .map(|s| HeadingAlias::parse(s))
            .collect::<Result<Vec<_>>>()?;
        Ok(ProfileRules {
            description: self.description,
            validation_mode: self.validation_mode,
            validation_entrypoint: self.validation_entrypoint.filter(|e| !e.is_empty()),
            warnings_as_errors: self.warnings_as_errors,
            required_files: self.required_files,
            required_headings,
            heading_aliases,
            misplaced_content_signals: self.misplaced_content_signals,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
