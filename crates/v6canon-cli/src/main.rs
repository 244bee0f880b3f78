use clap::{Parser, Subcommand};
use colored::Colorize;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::EnvFilter;

use v6canon_core::{conformance, normalizer, FilterTable};

/// Exit code: everything succeeded
const EXIT_OK: i32 = 0;
/// Exit code: an address, row set or conformance case failed validation
const EXIT_INVALID: i32 = 1;
/// Exit code: I/O or input decoding error
const EXIT_ERROR: i32 = 2;

/// v6canon — canonical IPv6 text compression
///
/// Simplify expanded IPv6 addresses and filter row tables.
#[derive(Parser)]
#[command(name = "v6canon", version, about, long_about = None)]
struct Cli {
    /// Suppress stdout on success
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simplify one or more expanded addresses
    Simplify {
        /// Addresses as eight colon-separated groups of 1-4 hex digits
        #[arg(required = true)]
        addresses: Vec<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Simplify every address in a file (one per line, `#` comments allowed)
    Batch {
        /// Path to address file
        file: PathBuf,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run the built-in conformance cases
    Check {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Filter rows loaded from a JSON array of string arrays
    Filter {
        /// Path to rows .json file
        rows: PathBuf,
        /// Inclusive filter, repeatable
        #[arg(long = "filter", value_name = "COL=VALUE", value_parser = parse_column_value)]
        filters: Vec<(usize, String)>,
        /// Filter to remove after all filters are added, repeatable
        #[arg(long = "remove", value_name = "COL=VALUE", value_parser = parse_column_value)]
        removals: Vec<(usize, String)>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show version information
    Version,
}

/// One simplified (or rejected) address for output
#[derive(Serialize)]
struct SimplifyReport<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    line: Option<usize>,
    address: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    simplified: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<'a> SimplifyReport<'a> {
    fn new(line: Option<usize>, address: &'a str) -> Self {
        match normalizer::simplify(address) {
            Ok(simplified) => SimplifyReport {
                line,
                address,
                simplified: Some(simplified),
                error: None,
            },
            Err(e) => SimplifyReport {
                line,
                address,
                simplified: None,
                error: Some(e.to_string()),
            },
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging();

    if cli.no_color {
        colored::control::set_override(false);
    }

    let quiet = cli.quiet;
    let exit_code = match cli.command {
        Commands::Simplify { addresses, json } => cmd_simplify(&addresses, json, quiet),
        Commands::Batch { file, json } => cmd_batch(&file, json, quiet),
        Commands::Check { json } => cmd_check(json, quiet),
        Commands::Filter {
            rows,
            filters,
            removals,
            json,
        } => cmd_filter(&rows, &filters, &removals, json, quiet),
        Commands::Version => {
            println!(
                "v6canon {} (v6canon-core {})",
                env!("CARGO_PKG_VERSION"),
                v6canon_core::VERSION
            );
            EXIT_OK
        }
    };

    process::exit(exit_code);
}

/// Logs go to stderr so stdout stays machine-readable; level from `RUST_LOG`
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

// ── Helpers ───────────────────────────────────────────────

fn parse_column_value(s: &str) -> Result<(usize, String), String> {
    let (column, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected COL=VALUE, got '{}'", s))?;
    let column = column
        .trim()
        .parse::<usize>()
        .map_err(|e| format!("invalid column index '{}': {}", column, e))?;
    Ok((column, value.to_string()))
}

fn read_file(path: &Path) -> Result<String, i32> {
    std::fs::read_to_string(path).map_err(|e| {
        eprintln!("{}: cannot read {}: {}", "error".red(), path.display(), e);
        EXIT_ERROR
    })
}

fn print_json<T: Serialize>(value: &T) -> i32 {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{}", json);
            EXIT_OK
        }
        Err(e) => {
            eprintln!("{}: serialization failed: {}", "error".red(), e);
            EXIT_ERROR
        }
    }
}

/// Print reports and return the exit code for them
fn emit_reports(reports: &[SimplifyReport], json: bool, quiet: bool) -> i32 {
    let failed = reports.iter().any(|r| r.error.is_some());

    if json {
        // JSON goes out even on failure so callers can see which entries failed
        if !quiet || failed {
            let code = print_json(&reports);
            if code != EXIT_OK {
                return code;
            }
        }
    } else {
        for report in reports {
            match (&report.simplified, &report.error) {
                (Some(simplified), _) => {
                    if !quiet {
                        println!("{}", simplified);
                    }
                }
                (None, Some(error)) => match report.line {
                    Some(line) => eprintln!("{}: line {}: {}", "error".red(), line, error),
                    None => eprintln!("{}: {}: {}", "error".red(), report.address, error),
                },
                (None, None) => {}
            }
        }
    }

    if failed {
        EXIT_INVALID
    } else {
        EXIT_OK
    }
}

// ── Commands ──────────────────────────────────────────────

fn cmd_simplify(addresses: &[String], json: bool, quiet: bool) -> i32 {
    let reports: Vec<SimplifyReport> = addresses
        .iter()
        .map(|address| SimplifyReport::new(None, address))
        .collect();
    emit_reports(&reports, json, quiet)
}

fn cmd_batch(file: &Path, json: bool, quiet: bool) -> i32 {
    let text = match read_file(file) {
        Ok(text) => text,
        Err(code) => return code,
    };

    let reports: Vec<SimplifyReport> = text
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
        .map(|(number, line)| SimplifyReport::new(Some(number), line))
        .collect();

    tracing::debug!(count = reports.len(), file = %file.display(), "batch loaded");
    emit_reports(&reports, json, quiet)
}

fn cmd_check(json: bool, quiet: bool) -> i32 {
    let outcomes = conformance::run();
    let all_passed = outcomes.iter().all(|o| o.passed);

    if json {
        if !quiet || !all_passed {
            let output = serde_json::json!({
                "passed": all_passed,
                "cases": outcomes,
            });
            let code = print_json(&output);
            if code != EXIT_OK {
                return code;
            }
        }
    } else {
        for outcome in &outcomes {
            let detail = format!(
                "Original: [{}] Expected: [{}] Actual: [{}]",
                outcome.case.address, outcome.case.expected, outcome.actual
            );
            if outcome.passed {
                if !quiet {
                    println!("{} {}", "Correct!".green(), detail);
                }
            } else {
                eprintln!("{} {}", "INCORRECT!".red().bold(), detail);
            }
        }
    }

    if all_passed {
        EXIT_OK
    } else {
        EXIT_INVALID
    }
}

fn cmd_filter(
    rows_path: &Path,
    filters: &[(usize, String)],
    removals: &[(usize, String)],
    json: bool,
    quiet: bool,
) -> i32 {
    let text = match read_file(rows_path) {
        Ok(text) => text,
        Err(code) => return code,
    };

    let rows: Vec<Vec<String>> = match serde_json::from_str(&text) {
        Ok(rows) => rows,
        Err(e) => {
            eprintln!(
                "{}: {} is not a JSON array of string arrays: {}",
                "error".red(),
                rows_path.display(),
                e
            );
            return EXIT_ERROR;
        }
    };

    let mut table = match FilterTable::new(rows) {
        Ok(table) => table,
        Err(e) => {
            eprintln!("{}: {}", "error".red(), e);
            return EXIT_INVALID;
        }
    };

    // Ignored filters are already logged by the table
    for (column, value) in filters {
        table.add_filter(*column, value.as_str());
    }
    for (column, value) in removals {
        table.remove_filter(*column, value);
    }

    let filtered = table.filtered_rows();
    if quiet {
        return EXIT_OK;
    }
    if json {
        return print_json(&filtered);
    }
    for row in filtered {
        println!("{}", row.join(", "));
    }
    EXIT_OK
}
