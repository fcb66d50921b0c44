//! relplan - command-line front end.
//!
//! Reads one query (inline or from stdin) and prints its relational algebra,
//! operator graph and execution plan.

use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use relplan::session::{ProcessorConfig, QueryProcessor, QueryReport};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
    Dot,
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();

    // Parse simple command line args.
    let mut catalog: Option<PathBuf> = None;
    let mut execute: Option<String> = None;
    let mut format = OutputFormat::Text;
    let mut strict_aliases = false;
    let mut verbose = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-e" | "--execute" => {
                i += 1;
                if i < args.len() {
                    execute = Some(args[i].clone());
                }
            }
            "-c" | "--catalog" => {
                i += 1;
                if i < args.len() {
                    catalog = Some(PathBuf::from(&args[i]));
                }
            }
            "--json" => format = OutputFormat::Json,
            "--dot" => format = OutputFormat::Dot,
            "--strict-aliases" => strict_aliases = true,
            "-v" | "--verbose" => verbose = true,
            "-h" | "--help" => {
                print_help();
                return ExitCode::SUCCESS;
            }
            "--version" => {
                println!("relplan v{}", env!("CARGO_PKG_VERSION"));
                return ExitCode::SUCCESS;
            }
            arg => {
                eprintln!("Unknown option: {}", arg);
                return ExitCode::FAILURE;
            }
        }
        i += 1;
    }

    init_logging(verbose);

    let mut config = ProcessorConfig::new().strict_aliases(strict_aliases);
    if let Some(path) = catalog {
        config = config.catalog_path(path);
    }

    let processor = match QueryProcessor::open(config) {
        Ok(processor) => processor,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let sql = match execute {
        Some(sql) => sql,
        None => {
            let mut buf = String::new();
            if let Err(e) = io::stdin().read_to_string(&mut buf) {
                eprintln!("Error reading query: {}", e);
                return ExitCode::FAILURE;
            }
            buf
        }
    };

    match processor.process(&sql) {
        Ok(report) => match print_report(&report, format) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("Error: {}", e);
                ExitCode::FAILURE
            }
        },
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "relplan=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn print_report(report: &QueryReport, format: OutputFormat) -> serde_json::Result<()> {
    match format {
        OutputFormat::Text => print!("{}", report),
        OutputFormat::Json => println!("{}", report.to_json()?),
        OutputFormat::Dot => print!("{}", report.to_dot()),
    }
    Ok(())
}

fn print_help() {
    println!("relplan - SQL to relational algebra and operator plans");
    println!();
    println!("Usage: relplan [OPTIONS]");
    println!();
    println!("Options:");
    println!("  -e, --execute SQL      Query to plan (default: read from stdin)");
    println!("  -c, --catalog PATH     JSON schema catalog (default: built-in store schema)");
    println!("  --json                 Print the report as JSON");
    println!("  --dot                  Print the operator graph as Graphviz DOT");
    println!("  --strict-aliases       Reject queries that bind an alias twice");
    println!("  -v, --verbose          Enable debug logging (RUST_LOG overrides)");
    println!("  -h, --help             Show this help message");
    println!("  --version              Show version");
    println!();
    println!("Examples:");
    println!("  relplan -e 'SELECT x.Nome FROM Produto x'");
    println!("  echo 'SELECT p.Nome FROM Produto p' | relplan --dot");
}
