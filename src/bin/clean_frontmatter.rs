//! Strips unsupported frontmatter fields from every `SKILL.md` in a skills
//! directory, or reports compliance without touching anything.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use ecosystem_locate::clean::{ALLOWED_FIELDS, Compliance, clean_skills, compliance_report};
use ecosystem_locate::logging;

/// Remove frontmatter fields Claude Code does not recognize from SKILL.md files
#[derive(Parser, Debug)]
#[command(name = "clean-frontmatter")]
#[command(version, about, long_about = None)]
struct Args {
    /// Skills directory (defaults to `<project>/.claude/skills`)
    #[arg(long)]
    skills_dir: Option<PathBuf>,

    /// Project directory
    #[arg(long, env = "CLAUDE_PROJECT_DIR", default_value = ".")]
    project_dir: PathBuf,

    /// Report compliance instead of rewriting files
    #[arg(long)]
    report: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();
    logging::init_tracing(args.verbose);

    let dir = args
        .skills_dir
        .unwrap_or_else(|| args.project_dir.join(".claude").join("skills"));
    if !dir.is_dir() {
        eprintln!("Skills directory not found: {}", dir.display());
        return Ok(ExitCode::from(1));
    }

    if args.report {
        let entries = compliance_report(&dir)?;
        let mut compliant = 0;
        for entry in &entries {
            match &entry.compliance {
                Compliance::NoFrontmatter => {
                    println!("? {} (no frontmatter)", entry.path.display());
                }
                Compliance::Valid { .. } => {
                    compliant += 1;
                    println!("ok {}", entry.path.display());
                }
                Compliance::Invalid { invalid_fields } => {
                    println!(
                        "x {} (unsupported: {})",
                        entry.path.display(),
                        invalid_fields.join(", ")
                    );
                }
            }
        }
        println!("{compliant}/{} skills compliant", entries.len());
        println!("Allowed fields: {}", ALLOWED_FIELDS.join(", "));
        return Ok(ExitCode::SUCCESS);
    }

    let summary = clean_skills(&dir)?;
    for path in &summary.cleaned {
        println!("Cleaned: {}", path.display());
    }
    println!(
        "Cleaned {} of {} skill files",
        summary.cleaned.len(),
        summary.total
    );
    Ok(ExitCode::SUCCESS)
}
