//! Scans the personal and project Claude Code roots and prints the
//! discovery report as JSON on stdout.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use ecosystem_locate::{DiscoveryReport, DiscoveryRoots, logging};

/// Discover skills, agents, MCP servers and hooks, and report integration gaps
#[derive(Parser, Debug)]
#[command(name = "discover-ecosystem")]
#[command(version, about, long_about = None)]
struct Args {
    /// Home directory whose `.claude` is the personal root
    #[arg(long)]
    home_dir: Option<PathBuf>,

    /// Personal config root (used only when absolute)
    #[arg(long, env = "CLAUDE_CONFIG_DIR")]
    config_dir: Option<String>,

    /// Project directory (defaults to the current directory)
    #[arg(long, env = "CLAUDE_PROJECT_DIR")]
    project_dir: Option<PathBuf>,

    /// Print compact JSON instead of pretty-printed
    #[arg(long)]
    compact: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logging::init_tracing(args.verbose);

    let project_dir = match args.project_dir {
        Some(dir) => dir,
        None => std::env::current_dir().context("cannot determine current directory")?,
    };
    let roots = DiscoveryRoots::resolve(
        args.home_dir.or_else(home::home_dir),
        args.config_dir.as_deref(),
        project_dir,
    )?;
    tracing::debug!(
        personal = %roots.personal_root().display(),
        project = %roots.project_dir().display(),
        "scanning roots"
    );

    let report = DiscoveryReport::discover(&roots);
    let json = if args.compact {
        serde_json::to_string(&report)?
    } else {
        serde_json::to_string_pretty(&report)?
    };
    println!("{json}");
    Ok(())
}
