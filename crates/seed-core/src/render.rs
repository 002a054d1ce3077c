//! Markdown bodies for the five canonical documents.
//!
//! Every renderer is pure: the same input and profile always produce the
//! same text.

use crate::error::Result;
use crate::paths;
use crate::profile::Profile;
use std::path::{Component, Path, PathBuf};

const FALLBACK_PROJECT_NAME: &str = "New Seed Project";

// ---------------------------------------------------------------------------
// ScaffoldInput
// ---------------------------------------------------------------------------

/// Values substituted into the rendered documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldInput {
    pub project_name: String,
    pub one_liner: String,
    pub problem_statement: String,
    pub success_criteria: String,
    pub status_line: String,
    pub limitation_line: String,
    pub contact_line: String,
    pub run_command: String,
    /// `YYYY-MM-DD`
    pub created_date: String,
}

impl ScaffoldInput {
    /// Starter content for a project named after `project_name`, dated today.
    pub fn new(project_name: impl Into<String>) -> Self {
        ScaffoldInput {
            project_name: project_name.into(),
            one_liner: "Agent-ready project scaffold for fast proof-of-concept development."
                .to_string(),
            problem_statement:
                "Define the problem this project is testing before substantial implementation starts."
                    .to_string(),
            success_criteria:
                "Confirm the core idea is demoable and learn whether it merits a full project lifecycle."
                    .to_string(),
            status_line: "POC - scaffolded and ready for implementation.".to_string(),
            limitation_line: "Starter content is generic until project-specific details are added."
                .to_string(),
            contact_line: "Open an issue or ask the project owner.".to_string(),
            run_command: "echo \"TODO: add run command\"".to_string(),
            created_date: chrono::Local::now().format("%Y-%m-%d").to_string(),
        }
    }

    /// Starter content named after the target directory's last component.
    ///
    /// `.` (or a path ending in `..`) resolves against the current directory.
    pub fn for_target(target: &Path) -> Result<Self> {
        let last = target.components().next_back();
        let name = match last {
            Some(Component::Normal(part)) => part.to_string_lossy().into_owned(),
            Some(Component::RootDir) | Some(Component::Prefix(_)) => String::new(),
            Some(Component::CurDir) | Some(Component::ParentDir) | None => {
                let absolute = std::env::current_dir()?.join(target);
                let mut resolved = PathBuf::new();
                for component in absolute.components() {
                    match component {
                        Component::CurDir => {}
                        Component::ParentDir => {
                            resolved.pop();
                        }
                        other => resolved.push(other),
                    }
                }
                resolved
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default()
            }
        };
        Ok(Self::new(humanize_name(&name)))
    }
}

/// `my_cool-app` → `My Cool App`. Blank input yields `New Seed Project`.
pub fn humanize_name(raw: &str) -> String {
    let words: Vec<String> = raw
        .split(|c: char| c == '_' || c == '-' || c.is_whitespace())
        .filter(|w| !w.is_empty())
        .map(|w| {
            let lower = w.to_lowercase();
            let mut chars = lower.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect();
    if words.is_empty() {
        FALLBACK_PROJECT_NAME.to_string()
    } else {
        words.join(" ")
    }
}

// ---------------------------------------------------------------------------
// Documents
// ---------------------------------------------------------------------------

/// All five canonical documents as (relative path, body), in write order.
pub fn render_docs(input: &ScaffoldInput, profile: Profile) -> Vec<(&'static str, String)> {
    vec![
        (paths::README_MD, render_readme(input, profile)),
        (paths::DECISIONS_MD, render_decisions(input, profile)),
        (paths::TODO_MD, render_todo()),
        (paths::CONTEXT_MD, render_context(input, profile)),
        (paths::AGENTS_MD, render_agents(profile)),
    ]
}

pub fn render_readme(input: &ScaffoldInput, profile: Profile) -> String {
    let mut quick_start = vec![input.run_command.as_str()];
    match profile {
        Profile::Core => {}
        Profile::Llm => quick_start
            .push("# Optional: run skills/seed-validate/SKILL.md for nuanced drift checks"),
        Profile::Guarded => {
            quick_start.extend(["git init", "./.seed/install-hooks.sh", "./.seed/seed-test.sh"])
        }
    }

    let mut assets = vec![
        "- `README.md`: project purpose, run path, status, caveats",
        "- `DECISIONS.md`: non-obvious decisions and rationale",
        "- `TODO.md`: lightweight progress tracking",
        "- `CONTEXT.md`: problem, constraints, success criteria, guardrails",
        "- `AGENTS.md`: repo-local agent instructions",
    ];
    if profile.has_manifest() {
        assets.extend([
            "- `.seed/manifest.json`: local Seed contract snapshot",
            "- `skills/seed-validate/SKILL.md`: nuanced validation workflow",
        ]);
    }
    if profile.has_hooks() {
        assets.extend([
            "- `.seed/seed-test.sh`: structural validator and status emitter",
            "- `.seed/hooks/pre-commit`: commit-time validation trigger",
            "- `.seed/install-hooks.sh`: per-clone hook installer",
        ]);
    }

    let status_detail = match profile {
        Profile::Core => "Ready for implementation.",
        Profile::Llm => "Ready for implementation with local LLM-oriented validation guidance.",
        Profile::Guarded => "Ready for implementation with commit-time structural guardrails.",
    };

    format!(
        "# {name}\n\n\
        {one_liner}\n\n\
        ## Quick Start\n\n\
        {quick_start}\n\n\
        ## Current Status\n\n\
        {status}\n\n\
        ## Known Limitations\n\n\
        - {limitation}\n\n\
        ## Questions / Issues\n\n\
        {contact}\n\n\
        ## POC Success Criteria\n\n\
        - {success}\n\n\
        ## Seed Profile\n\n\
        - Active profile: {profile}\n\
        - {status_detail}\n\n\
        ## Seed Files\n\n\
        {assets}\n",
        name = input.project_name,
        one_liner = input.one_liner,
        quick_start = shell_block(&quick_start),
        status = input.status_line,
        limitation = input.limitation_line,
        contact = input.contact_line,
        success = input.success_criteria,
        assets = assets.join("\n"),
    )
}

pub fn render_decisions(input: &ScaffoldInput, profile: Profile) -> String {
    format!(
        "# Decisions\n\n\
        Capture non-obvious decisions and rationale.\n\n\
        ## Entry Format\n\n\
        ### YYYY-MM-DD: <Decision title>\n\
        Context:\n\
        Decision:\n\
        Why not <alternative>: (optional)\n\n\
        ## History\n\n\
        ### {date}: Initialized from Seed\n\
        Context: Need a lightweight structure to test an idea quickly.\n\
        Decision: Use Seed profile {profile} to balance speed and context quality.\n\
        Why not heavier process: Added process overhead is not justified at this stage.\n",
        date = input.created_date,
    )
}

pub fn render_todo() -> String {
    "# TODO\n\n\
    ## BLOCKERS\n\n\
    - NONE\n\n\
    ## Doing Now\n\n\
    - [ ] Confirm the core demo path works end to end\n\
    - [ ] Replace placeholder run command if still present\n\n\
    ## Next Up\n\n\
    - [ ] Add one improvement based on first user feedback\n\
    - [ ] Record non-obvious rationale in DECISIONS.md\n\n\
    ## Maybe Later\n\n\
    - [ ] Harden edge-case handling after demo validation\n\n\
    ## Done (recent)\n\n\
    - ~~[ ] Scaffolded initial Seed baseline~~\n\n\
    ## Won't Do (this iteration)\n\n\
    - Production-level hardening and scaling work\n"
        .to_string()
}

pub fn render_context(input: &ScaffoldInput, profile: Profile) -> String {
    let mut key_files = vec![
        "- README.md: project summary, run path, status, limitations",
        "- DECISIONS.md: non-obvious decisions and rationale",
        "- TODO.md: active work and short backlog",
        "- CONTEXT.md: problem, constraints, success criteria, and guardrails",
        "- AGENTS.md: concise agent operating guide for this repository",
    ];
    if profile.has_manifest() {
        key_files.extend([
            "- .seed/manifest.json: local Seed contract snapshot",
            "- skills/seed-validate/SKILL.md: nuanced drift analysis workflow",
        ]);
    }
    if profile.has_hooks() {
        key_files.extend([
            "- .seed/seed-test.sh: structural validation entrypoint",
            "- .seed/hooks/pre-commit: automatic validation trigger",
            "- .seed/install-hooks.sh: one-time hook installer per clone",
        ]);
    }

    let agent_guidance = match profile {
        Profile::Core => "- Use the profile-specific files listed above as local source of truth.",
        Profile::Llm => "- Run skills/seed-validate/SKILL.md for nuanced drift analysis when docs/structure shift significantly.",
        Profile::Guarded => "- Start with ./.seed/seed-test.sh output; if warnings appear, run skills/seed-validate/SKILL.md.",
    };

    format!(
        "# Context\n\n\
        ## Problem Statement\n\n\
        {problem}\n\n\
        ## Constraints\n\n\
        - Timeline:\n\
        - Budget:\n\
        - Must work with:\n\n\
        ## POC Success Criteria\n\n\
        - {success}\n\n\
        ## POC Philosophy\n\n\
        - Keep only artifacts that stay accurate under fast iteration.\n\
        - If a file is unlikely to be maintained when tired, simplify or remove it.\n\
        - Optimize for validated learning speed, not process completeness.\n\
        - Avoid premature contracts/diagrams/roadmaps unless complexity requires them.\n\n\
        ## Upgrade Triggers\n\n\
        - Move to OpenSpec/Spec Kit when work becomes phased with explicit milestones and handoffs.\n\
        - Move to OpenSpec/Spec Kit when multiple contributors need stronger contracts and review workflows.\n\
        - Move to OpenSpec/Spec Kit when production commitments require heavier planning and governance.\n\n\
        ## Key Files\n\n\
        {key_files}\n\n\
        ## Non-Obvious Dependencies\n\n\
        - The seeded repo is self-contained and must not require a path back to the Seed source repo.\n\n\
        ## For LLM Agents\n\n\
        - Read README.md first for run/status context.\n\
        - Preserve rationale in DECISIONS.md when making non-obvious choices.\n\
        - Keep TODO.md current by moving completed items into recent done.\n\
        {agent_guidance}\n",
        problem = input.problem_statement,
        success = input.success_criteria,
        key_files = key_files.join("\n"),
    )
}

pub fn render_agents(profile: Profile) -> String {
    let mut rules = vec![
        "- Keep changes small and focused on the user request.",
        "- Update TODO.md when task state changes.",
        "- Update DECISIONS.md for non-obvious decisions.",
    ];
    match profile {
        Profile::Core => {}
        Profile::Llm => rules.push(
            "- Use skills/seed-validate/SKILL.md for nuanced drift checks when making large structure/doc changes.",
        ),
        Profile::Guarded => rules.extend([
            "- Install hooks once per clone: ./.seed/install-hooks.sh",
            "- Pre-commit runs ./.seed/seed-test.sh automatically.",
            "- If SEED_STATUS=skill_recommended, run skills/seed-validate/SKILL.md.",
        ]),
    }

    format!(
        "# AGENTS.md\n\n\
        ## Scope\n\n\
        - Applies to the full repository.\n\n\
        ## Start Here\n\n\
        - Read README.md for quick start and project status.\n\
        - Read CONTEXT.md for constraints and success criteria.\n\
        - Read TODO.md for active priorities.\n\
        - Read DECISIONS.md for non-obvious rationale.\n\n\
        ## Working Rules\n\n\
        {rules}\n\n\
        ## POC Guardrails\n\n\
        - Optimize for fast learning and demoable outcomes over completeness.\n\
        - Keep artifacts lightweight; avoid heavy process docs that will go stale.\n\
        - Prefer executable truth in scripts over narrative setup/test instructions.\n\
        - Keep README operational: run path, current status, and immediate caveats.\n\
        - Keep TODO flat and atomic; avoid hierarchy and process overhead.\n\
        - Record only non-obvious decisions; keep entries concise.\n\n\
        ## Upgrade Triggers\n\n\
        - Propose moving to OpenSpec/Spec Kit when work becomes phased, multi-team, or contract-heavy.\n\
        - Propose moving to OpenSpec/Spec Kit when production hardening needs explicit planning/governance artifacts.\n",
        rules = rules.join("\n"),
    )
}

fn shell_block(commands: &[&str]) -> String {
    let mut block = String::from("```sh\n");
    for line in commands {
        block.push_str(line);
        block.push('\n');
    }
    block.push_str("```");
    block
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
