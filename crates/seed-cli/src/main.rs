mod cmd;
mod output;

use clap::parser::ValueSource;
use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use seed_core::Profile;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "seed",
    about = "Scaffold agent-ready proof-of-concept repositories and validate their layout",
    version,
    propagate_version = true
)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    /// Directory to scaffold; must be empty or hold only .git (default: current directory)
    directory: Option<PathBuf>,

    /// Profile to scaffold: core, llm, or guarded (prompted on a terminal when omitted)
    #[arg(long, env = "SEED_PROFILE")]
    profile: Option<Profile>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a repository against a profile's layout rules (exit 0 ok, 1 fail, 2 warnings)
    #[command(name = "validate-layout")]
    ValidateLayout {
        /// Repository to check
        #[arg(default_value = ".")]
        repo: PathBuf,

        /// Profile to check against (default: inferred from the repository)
        #[arg(long)]
        profile: Option<Profile>,
    },

    /// Copy this binary onto PATH and update the shell rc file
    Install {
        /// Installed command name
        #[arg(long)]
        name: Option<String>,

        /// Target directory (default: ~/.local/bin)
        #[arg(long)]
        bin_dir: Option<PathBuf>,

        /// Shell rc file to update (default: detected from $SHELL)
        #[arg(long)]
        shell_rc: Option<PathBuf>,
    },
}

fn main() {
    // Usage errors exit 1, not clap's default 2, which means "warnings" here.
    let parsed = Cli::command()
        .try_get_matches()
        .and_then(|matches| Cli::from_arg_matches(&matches).map(|cli| (cli, matches)));
    let (cli, matches) = match parsed {
        Ok(parsed) => parsed,
        Err(e) => {
            let code = if e.use_stderr() { 1 } else { 0 };
            e.print().ok();
            std::process::exit(code);
        }
    };

    // The top-level --profile only picks the scaffold profile. An exported
    // SEED_PROFILE stays ignored for subcommands.
    if cli.command.is_some()
        && matches.value_source("profile") == Some(ValueSource::CommandLine)
    {
        eprintln!(
            "error: --profile before a subcommand only applies to scaffolding; \
             put it after the subcommand (e.g. seed validate-layout <repo> --profile <profile>)"
        );
        std::process::exit(1);
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let result = match cli.command {
        None => cmd::scaffold::run(cli.directory.as_deref(), cli.profile, cli.json).map(|()| 0),
        Some(Commands::ValidateLayout { repo, profile }) => {
            cmd::validate::run(&repo, profile, cli.json)
        }
        Some(Commands::Install {
            name,
            bin_dir,
            shell_rc,
        }) => cmd::install::run(name, bin_dir, shell_rc, cli.json).map(|()| 0),
    };

    match result {
        Ok(0) => {}
        Ok(code) => std::process::exit(code),
        Err(e) => {
            // Print the full error chain (anyhow's alternate Display)
            eprintln!("error: {e:#}");
            std::process::exit(1);
        }
    }
}
