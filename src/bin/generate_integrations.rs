//! Reads a discovery report on stdin and prints the generated hook
//! configuration and remediation commands as JSON.
//!
//! ```text
//! discover-ecosystem | generate-integrations
//! ```

use std::io::Read;
use std::process::ExitCode;

use clap::Parser;
use ecosystem_locate::integrate::USAGE;
use ecosystem_locate::{IntegrationReport, integrate_str, logging};

/// Generate hook integrations from a discovery report on stdin
#[derive(Parser, Debug)]
#[command(name = "generate-integrations")]
#[command(version, about, long_about = None)]
struct Args {
    /// Print only the settings.json `hooks` object
    #[arg(long)]
    settings: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn read_report() -> anyhow::Result<IntegrationReport> {
    let mut input = String::new();
    std::io::stdin().read_to_string(&mut input)?;
    tracing::debug!(bytes = input.len(), "read discovery report");
    Ok(integrate_str(&input)?)
}

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init_tracing(args.verbose);

    let report = match read_report() {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("{USAGE}");
            return ExitCode::from(1);
        }
    };

    let rendered = if args.settings {
        serde_json::to_string_pretty(&report.generated_hooks_config.to_settings())
    } else {
        serde_json::to_string_pretty(&report)
    };
    match rendered {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(1)
        }
    }
}
