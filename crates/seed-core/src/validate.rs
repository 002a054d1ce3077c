//! Profile-driven layout validation.
//!
//! Rules are evaluated in a fixed order: required files, required headings
//! (with alias fallback), then a misplaced-content scan over every markdown
//! file outside the canonical documents and reserved directories. Errors
//! always fail; warnings fail only when the profile promotes them.

use crate::contract::{ProfileContract, ProfileRules};
use crate::error::Result;
use crate::paths;
use crate::profile::Profile;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub const NEXT_ACTION_VALIDATE_SKILL: &str = "run_seed_validate_skill";

// ---------------------------------------------------------------------------
// ValidationStatus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationStatus {
    Ok,
    SkillRecommended,
    Fail,
}

impl ValidationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ValidationStatus::Ok => "ok",
            ValidationStatus::SkillRecommended => "skill_recommended",
            ValidationStatus::Fail => "fail",
        }
    }

    pub fn exit_code(self) -> i32 {
        match self {
            ValidationStatus::Ok => 0,
            ValidationStatus::Fail => 1,
            ValidationStatus::SkillRecommended => 2,
        }
    }
}

impl fmt::Display for ValidationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// TriggerReason / Severity / Finding
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerReason {
    MissingFile,
    MissingHeading,
    HeadingAlias,
    MisplacedContent,
    WarningsAsErrors,
}

impl TriggerReason {
    pub fn as_str(self) -> &'static str {
        match self {
            TriggerReason::MissingFile => "missing_file",
            TriggerReason::MissingHeading => "missing_heading",
            TriggerReason::HeadingAlias => "heading_alias",
            TriggerReason::MisplacedContent => "misplaced_content",
            TriggerReason::WarningsAsErrors => "warnings_as_errors",
        }
    }
}

impl fmt::Display for TriggerReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
}

/// One counted issue, with the path it was found at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub severity: Severity,
    pub reason: TriggerReason,
    pub path: String,
    pub message: String,
}

// ---------------------------------------------------------------------------
// ValidationOutcome
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationOutcome {
    pub status: ValidationStatus,
    pub error_count: usize,
    pub warning_count: usize,
    /// Deduplicated, in order of first occurrence.
    pub trigger_reasons: Vec<TriggerReason>,
    pub findings: Vec<Finding>,
}

impl ValidationOutcome {
    pub fn has_reason(&self, reason: TriggerReason) -> bool {
        self.trigger_reasons.contains(&reason)
    }

    pub fn exit_code(&self) -> i32 {
        self.status.exit_code()
    }

    /// `KEY=value` report, identical to what `.seed/seed-test.sh` prints.
    pub fn status_lines(&self) -> Vec<String> {
        let reasons = if self.trigger_reasons.is_empty() {
            "none".to_string()
        } else {
            self.trigger_reasons
                .iter()
                .map(|r| r.as_str())
                .collect::<Vec<_>>()
                .join(",")
        };
        let mut lines = vec![
            format!("SEED_STATUS={}", self.status),
            format!("SEED_ERRORS={}", self.error_count),
            format!("SEED_WARNINGS={}", self.warning_count),
            format!("SEED_TRIGGER_REASONS={reasons}"),
        ];
        // Escalated failures intentionally carry no skill hint.
        if self.status == ValidationStatus::SkillRecommended {
            lines.push(format!("SEED_NEXT_ACTION={NEXT_ACTION_VALIDATE_SKILL}"));
            lines.push(format!("SEED_VALIDATE_SKILL={}", paths::VALIDATE_SKILL_FILE));
        }
        lines
    }
}

#[derive(Default)]
struct Tally {
    errors: usize,
    warnings: usize,
    reasons: Vec<TriggerReason>,
    findings: Vec<Finding>,
}

impl Tally {
    fn add_reason(&mut self, reason: TriggerReason) {
        if !self.reasons.contains(&reason) {
            self.reasons.push(reason);
        }
    }

    fn record(&mut self, severity: Severity, reason: TriggerReason, path: &str, message: String) {
        match severity {
            Severity::Error => self.errors += 1,
            Severity::Warning => self.warnings += 1,
        }
        self.add_reason(reason);
        tracing::debug!(reason = reason.as_str(), path, "{message}");
        self.findings.push(Finding {
            severity,
            reason,
            path: path.to_string(),
            message,
        });
    }

    fn resolve(mut self, warnings_as_errors: bool) -> ValidationOutcome {
        let status = if self.errors > 0 {
            ValidationStatus::Fail
        } else if self.warnings > 0 {
            if warnings_as_errors {
                self.add_reason(TriggerReason::WarningsAsErrors);
                ValidationStatus::Fail
            } else {
                ValidationStatus::SkillRecommended
            }
        } else {
            ValidationStatus::Ok
        };
        ValidationOutcome {
            status,
            error_count: self.errors,
            warning_count: self.warnings,
            trigger_reasons: self.reasons,
            findings: self.findings,
        }
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate `repo` against the rules of `profile` from `contract`.
pub fn validate_profile(
    repo: &Path,
    profile: Profile,
    contract: &ProfileContract,
) -> Result<ValidationOutcome> {
    let rules = contract.rules(profile)?;
    tracing::info!(repo = %repo.display(), %profile, "validating layout");
    Ok(validate(repo, rules))
}

/// Validate `repo` against an explicit rule set.
pub fn validate(repo: &Path, rules: &ProfileRules) -> ValidationOutcome {
    let mut tally = Tally::default();

    for relative in &rules.required_files {
        if !repo.join(relative).is_file() {
            tally.record(
                Severity::Error,
                TriggerReason::MissingFile,
                relative,
                format!("Missing required Seed artifact: {relative}"),
            );
        }
    }

    for required in &rules.required_headings {
        let path = repo.join(&required.file);
        // Absent files were already counted above.
        if !path.is_file() {
            continue;
        }
        let content = read_lossy(&path).unwrap_or_default();
        if has_heading(&content, &required.heading) {
            continue;
        }
        let alias = rules
            .aliases_for(&required.file, &required.heading)
            .find(|a| has_heading(&content, &a.alias));
        match alias {
            Some(alias) => tally.record(
                Severity::Warning,
                TriggerReason::HeadingAlias,
                &required.file,
                format!(
                    "Heading alias detected in {}: expected \"{}\", found \"{}\"",
                    required.file, required.heading, alias.alias
                ),
            ),
            None => tally.record(
                Severity::Error,
                TriggerReason::MissingHeading,
                &required.file,
                format!(
                    "Missing required heading \"{}\" in {}",
                    required.heading, required.file
                ),
            ),
        }
    }

    for (relative, path) in markdown_files(repo) {
        if paths::is_canonical_doc(&relative) || paths::is_reserved(&relative) {
            continue;
        }
        let Some(content) = read_lossy(&path) else {
            continue;
        };
        if let Some(signal) = rules
            .misplaced_content_signals
            .iter()
            .find(|s| has_heading(&content, s))
        {
            tally.record(
                Severity::Warning,
                TriggerReason::MisplacedContent,
                &relative,
                format!("Potential misplaced Seed content in {relative}: heading \"{signal}\""),
            );
        }
    }

    tally.resolve(rules.warnings_as_errors)
}

/// True when `content` has the exact line `## <heading>`.
///
/// Lines split on `\n` only, so a trailing `\r` does not match (same as
/// `grep -Fx` in the generated script).
pub fn has_heading(content: &str, heading: &str) -> bool {
    let target = format!("## {heading}");
    content.split('\n').any(|line| line == target)
}

fn read_lossy(path: &Path) -> Option<String> {
    match std::fs::read(path) {
        Ok(bytes) => Some(String::from_utf8_lossy(&bytes).into_owned()),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "cannot read file");
            None
        }
    }
}

/// Every `*.md` file under `repo` (except `.git/`), as (slash-relative, absolute).
fn markdown_files(repo: &Path) -> Vec<(String, PathBuf)> {
    WalkDir::new(repo)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !(e.depth() == 1 && e.file_name() == paths::GIT_DIR))
        .filter_map(|entry| match entry {
            Ok(e) => Some(e),
            Err(err) => {
                tracing::warn!(error = %err, "skipping unreadable path");
                None
            }
        })
        .filter(|e| e.file_type().is_file())
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "md"))
        .filter_map(|e| {
            let relative = paths::to_slash(e.path().strip_prefix(repo).ok()?);
            Some((relative, e.into_path()))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Profile inference
// ---------------------------------------------------------------------------

/// Best-effort guess at the profile a repository follows.
///
/// The guarded-only validator script wins; otherwise the manifest's
/// `active_profile` (falling back to `llm` if the manifest is present but
/// unusable); otherwise `core`.
pub fn infer_profile(repo: &Path) -> Profile {
    if paths::seed_test_path(repo).exists() {
        return Profile::Guarded;
    }
    let manifest = paths::manifest_path(repo);
    if !manifest.exists() {
        return Profile::Core;
    }
    match read_active_profile(&manifest) {
        Ok(profile) => profile,
        Err(e) => {
            tracing::warn!(path = %manifest.display(), error = %e, "unusable manifest, assuming llm");
            Profile::Llm
        }
    }
}

fn read_active_profile(manifest: &Path) -> Result<Profile> {
    #[derive(Deserialize)]
    struct ActiveProfile {
        #[serde(default)]
        active_profile: String,
    }
    let raw = std::fs::read_to_string(manifest)?;
    let parsed: ActiveProfile = serde_json::from_str(&raw)?;
    parsed.active_profile.parse()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
