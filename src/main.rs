//! # chatstat CLI
//!
//! Command-line interface for the chatstat library.

use std::path::Path;
use std::process;

use clap::Parser as ClapParser;
use tracing_subscriber::EnvFilter;

use chatstat::analyzer::ChatAnalyzer;
use chatstat::cli::Args;
use chatstat::report::{render_report, write_report};
use chatstat::{ChatstatError, Result};

fn main() {
    let args = <Args as ClapParser>::parse();
    init_tracing(args.verbose);

    if let Err(e) = run(&args) {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

/// Logs go to stderr so a report on stdout stays clean.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run(args: &Args) -> Result<()> {
    let config = args.build_config()?;
    let date_pattern = args.date_pattern(config.date_order);
    let analyzer = ChatAnalyzer::new(config)?;

    if args.list_rules {
        for rule in analyzer.classifier().rules() {
            println!("{}", rule.name());
        }
        return Ok(());
    }

    let input = args
        .input
        .as_deref()
        .ok_or_else(|| ChatstatError::invalid_format("input", "no chat export given"))?;
    tracing::debug!(input = %input.display(), "analyzing");

    let stats = analyzer.analyze_file(input)?;
    let format = args.report_format();

    match args.output.as_deref() {
        Some(path) => {
            write_report(&stats, path, format, &date_pattern)?;
            announce(path, stats.total_messages);
        }
        None => print!("{}", render_report(&stats, format, &date_pattern)?),
    }
    Ok(())
}

fn announce(path: &Path, total: usize) {
    eprintln!("✅ {} messages counted, report saved to {}", total, path.display());
}
