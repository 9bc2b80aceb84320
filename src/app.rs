//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and parses CLI arguments
//! - runs the pipeline or the summary query
//! - prints reports

use clap::Parser;

use crate::cli::{Command, ProcessArgs, SummaryArgs};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `sales` binary.
pub fn run() -> Result<(), AppError> {
    // Flags and SALES_LOG fall back to variables that may live in `.env`.
    dotenvy::dotenv().ok();
    crate::logging::init_tracing();

    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Process(args) => handle_process(args),
        Command::Summary(args) => handle_summary(args),
    }
}

fn handle_process(args: ProcessArgs) -> Result<(), AppError> {
    let config = args.to_config();
    let merged = pipeline::run_pipeline(&config)?;

    println!(
        "{}",
        crate::report::format_ingest_report(&merged.report, Some(config.output_path.as_path()))
    );
    if args.preview > 0 {
        println!("{}", crate::report::format_preview(&merged.records, args.preview));
    }
    Ok(())
}

fn handle_summary(args: SummaryArgs) -> Result<(), AppError> {
    let config = args.to_config();
    let records = pipeline::load_clean_records(&config.output_path)?;
    let summary = crate::aggregate::summarize(&records, config.cutoff_date, args.region);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("{}", crate::report::format_summary(&summary));
    }
    Ok(())
}

/// Rewrite argv so `sales` defaults to `sales process`.
///
/// Rules:
/// - `sales`                        -> `sales process`
/// - `sales --input-dir d ...`      -> `sales process --input-dir d ...`
/// - `sales --help/--version/-h`    -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("process".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    if arg1.starts_with('-') {
        argv.insert(1, "process".to_string());
    }
    argv
}
