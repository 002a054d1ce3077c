use crate::output::print_json;
use anyhow::Context;
use seed_core::contract::ProfileContract;
use seed_core::render::ScaffoldInput;
use seed_core::{scaffold, Profile};
use std::io::{BufRead, IsTerminal, Write};
use std::path::Path;

pub fn run(directory: Option<&Path>, profile: Option<Profile>, json: bool) -> anyhow::Result<()> {
    let target = directory.unwrap_or(Path::new("."));
    let contract = ProfileContract::load().context("failed to load embedded contract")?;

    let profile = match profile {
        Some(profile) => profile,
        None if !json && is_interactive() => {
            let stdin = std::io::stdin();
            let mut stdout = std::io::stdout();
            choose_profile(&mut stdin.lock(), &mut stdout, contract.default_profile)
                .context("failed to read profile choice")?
        }
        None => contract.default_profile,
    };

    let input = ScaffoldInput::for_target(target).context("failed to resolve project name")?;
    let report = scaffold::scaffold(target, profile, &input, &contract)?;

    if json {
        return print_json(&report);
    }
    println!("Scaffold created: {}", target.display());
    println!("Profile: {profile}");
    println!();
    println!("Next steps:");
    for step in report.next_steps() {
        println!("{step}");
    }
    Ok(())
}

fn is_interactive() -> bool {
    std::io::stdin().is_terminal() && std::io::stdout().is_terminal()
}

fn menu_label(profile: Profile) -> &'static str {
    match profile {
        Profile::Core => "core markdown files only",
        Profile::Llm => "core + manifest + local seed-validate skill",
        Profile::Guarded => "llm + seed-test + pre-commit hooks",
    }
}

/// Numbered profile menu. Blank input or end of input picks `default`;
/// anything else unrecognised re-prompts.
fn choose_profile<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    default: Profile,
) -> std::io::Result<Profile> {
    let profiles = Profile::all();
    let default_index = profiles.iter().position(|p| *p == default).unwrap_or(0) + 1;

    writeln!(out, "Choose a Seed profile:")?;
    for (i, profile) in profiles.iter().enumerate() {
        writeln!(out, "  {}) {:<7} - {}", i + 1, profile.as_str(), menu_label(*profile))?;
    }

    loop {
        write!(out, "Select profile [{default_index}]: ")?;
        out.flush()?;
        let mut line = String::new();
        input.read_line(&mut line)?;
        let choice = line.trim();
        if choice.is_empty() {
            return Ok(default);
        }
        let picked = choice
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| profiles.get(i));
        if let Some(profile) = picked {
            return Ok(*profile);
        }
        writeln!(out, "Invalid choice. Enter 1, 2, or 3.")?;
        // Input ended mid-line; nothing more will arrive.
        if !line.ends_with('\n') {
            return Ok(default);
        }
    }
}
