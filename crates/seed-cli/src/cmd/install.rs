use crate::output::print_json;
use anyhow::Context;
use seed_core::install::{self, InstallOptions};
use std::path::PathBuf;

pub fn run(
    name: Option<String>,
    bin_dir: Option<PathBuf>,
    shell_rc: Option<PathBuf>,
    json: bool,
) -> anyhow::Result<()> {
    let mut opts = InstallOptions::defaults().context("failed to resolve install defaults")?;
    if let Some(name) = name {
        opts.command_name = name;
    }
    if let Some(bin_dir) = bin_dir {
        opts.bin_dir = bin_dir;
    }
    opts.shell_rc = shell_rc.filter(|rc| !rc.as_os_str().is_empty());

    let report = install::run(&opts)?;

    if json {
        return print_json(&report);
    }
    println!("Installed command:");
    println!(
        "  {} -> {}",
        report.command_name,
        report.installed_path.display()
    );
    println!();
    println!("Shell config updated:");
    println!("  {}", report.shell_rc.display());
    println!();
    println!("Next:");
    for step in report.next_steps() {
        println!("  {step}");
    }
    Ok(())
}
