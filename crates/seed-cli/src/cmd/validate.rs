use crate::output::print_json;
use anyhow::Context;
use seed_core::contract::ProfileContract;
use seed_core::validate::{self, ValidationOutcome};
use seed_core::Profile;
use serde::Serialize;
use std::path::Path;

/// Returns the process exit code: 0 ok, 1 fail, 2 skill recommended.
pub fn run(repo: &Path, profile: Option<Profile>, json: bool) -> anyhow::Result<i32> {
    if !repo.is_dir() {
        anyhow::bail!("repository path is not a directory: {}", repo.display());
    }
    let contract = ProfileContract::load().context("failed to load embedded contract")?;
    let profile = profile.unwrap_or_else(|| validate::infer_profile(repo));
    let outcome = validate::validate_profile(repo, profile, &contract)?;
    let description = &contract.rules(profile)?.description;

    if json {
        #[derive(Serialize)]
        struct ValidateOutput<'a> {
            repo: String,
            profile: Profile,
            description: &'a str,
            #[serde(flatten)]
            outcome: &'a ValidationOutcome,
        }
        print_json(&ValidateOutput {
            repo: repo.display().to_string(),
            profile,
            description,
            outcome: &outcome,
        })?;
        return Ok(outcome.exit_code());
    }

    for finding in &outcome.findings {
        eprintln!("{}", finding.message);
    }
    for line in outcome.status_lines() {
        println!("{line}");
    }
    println!(
        "seed-layout-validation: {} (profile={profile})",
        outcome.status
    );
    Ok(outcome.exit_code())
}
