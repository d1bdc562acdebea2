//! Pre-write hook that validates `SKILL.md` metadata.
//!
//! Reads the tool event JSON on stdin. Exit codes: 0 valid or not a skill
//! file, 1 unreadable input, 2 metadata violations (blocks the write).

use std::io::Read;
use std::process::ExitCode;

use clap::Parser;
use ecosystem_locate::{ToolEvent, logging};

/// Validate SKILL.md frontmatter from a hook event on stdin
#[derive(Parser, Debug)]
#[command(name = "validate-skill-metadata")]
#[command(version, about, long_about = None)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init_tracing(args.verbose);

    let mut input = String::new();
    if let Err(e) = std::io::stdin().read_to_string(&mut input) {
        eprintln!("Error: cannot read stdin: {e}");
        return ExitCode::from(1);
    }

    let event: ToolEvent = match serde_json::from_str(&input) {
        Ok(event) => event,
        Err(e) => {
            eprintln!("Error: Invalid JSON input: {e}");
            return ExitCode::from(1);
        }
    };

    let Some(issues) = event.validate() else {
        tracing::debug!(path = %event.tool_input.file_path, "not a skill file");
        return ExitCode::SUCCESS;
    };

    if issues.is_empty() {
        println!("Skill metadata valid");
        return ExitCode::SUCCESS;
    }

    eprintln!("Skill metadata validation failed:");
    for issue in &issues {
        eprintln!("* {}", issue.message);
    }
    ExitCode::from(2)
}
