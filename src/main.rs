use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use rxscan_lib::config::{ParserConfig, APP_VERSION};
use rxscan_lib::{PrescriptionParser, SoftFailure};

#[derive(Parser, Debug)]
#[command(name = "rxscan", version, about = "Recover structured prescriptions from OCR text")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Parse OCR text and print the prescription as JSON
    Parse(ParseArgs),
}

#[derive(Parser, Debug)]
struct ParseArgs {
    /// File containing OCR text (reads stdin when omitted)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Config file (defaults to the platform config directory)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

fn main() -> ExitCode {
    rxscan_lib::init_tracing();
    tracing::debug!(version = APP_VERSION, "rxscan starting");

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Parse(args) => run_parse(&args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run_parse(args: &ParseArgs) -> Result<()> {
    let config = match &args.config {
        Some(path) => ParserConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => ParserConfig::load_or_default(),
    };

    let text = read_input(args.input.as_ref())?;
    let parsed = PrescriptionParser::new(config)
        .parse(&text)
        .context("parsing prescription text")?;

    for failure in parsed.soft_failures() {
        match failure {
            SoftFailure::UnrecoverableStructure => {
                eprintln!("warning: no medications recognized; review the raw text");
            }
            SoftFailure::PartialExtraction {
                medication_index,
                missing,
            } => {
                eprintln!(
                    "warning: medication {} is missing {:?}; defaults applied",
                    medication_index + 1,
                    missing
                );
            }
        }
    }

    let json = if args.pretty {
        serde_json::to_string_pretty(&parsed)?
    } else {
        serde_json::to_string(&parsed)?
    };
    println!("{json}");
    Ok(())
}

fn read_input(path: Option<&PathBuf>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display())),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("reading stdin")?;
            Ok(text)
        }
    }
}
