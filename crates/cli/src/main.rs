//! Cache simulator CLI.
//!
//! This binary replays a valgrind memory trace against a set-associative cache. It performs:
//! 1. **Configuration:** Cache geometry from `-s/-E/-b`, optionally layered over a JSON file.
//! 2. **Replay:** Every data access in the trace file given by `-t`, with per-access lines under `-v`.
//! 3. **Reporting:** The `hits:H misses:M evictions:E` summary and the `.csim_results` file.

use std::io;
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use csim_core::config::{Config, SetAllocation};
use csim_core::stats::RESULTS_FILE;
use csim_core::trace::TraceReader;
use csim_core::{SimError, Simulator};

#[derive(Parser, Debug)]
#[command(
    name = "csim",
    author,
    version,
    about = "Trace-driven set-associative cache simulator",
    long_about = "Replay a valgrind lackey trace against a cache with 2^s sets of E lines and 2^b-byte blocks.\n\nExamples:\n  csim -s 4 -E 1 -b 4 -t traces/yi.trace\n  csim -v -s 8 -E 2 -b 4 -t traces/trans.trace\n  csim --config cache.json -t traces/long.trace --stats"
)]
struct Cli {
    /// Print one line per data access with its hit/miss/eviction events.
    #[arg(short, long)]
    verbose: bool,

    /// Number of set index bits (the cache has 2^s sets).
    #[arg(short = 's', value_name = "NUM")]
    set_index_bits: Option<u32>,

    /// Number of lines per set (associativity).
    #[arg(short = 'E', value_name = "NUM")]
    associativity: Option<usize>,

    /// Number of block offset bits (blocks are 2^b bytes).
    #[arg(short = 'b', value_name = "NUM")]
    block_offset_bits: Option<u32>,

    /// Trace file to replay.
    #[arg(short = 't', value_name = "FILE")]
    trace: Option<PathBuf>,

    /// JSON configuration file; command-line flags override its fields.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Allocate 2 * 2^s sets, matching the reference simulator's allocation.
    #[arg(long)]
    double_sets: bool,

    /// Print a detailed statistics block after the summary.
    #[arg(long)]
    stats: bool,

    /// Do not write the .csim_results file.
    #[arg(long)]
    no_results: bool,
}

fn main() {
    let cli = Cli::parse();
    init_tracing();

    if let Err(e) = run(&cli) {
        eprintln!("csim: {e:#}");
        process::exit(1);
    }
}

/// Logs go to stderr so stdout carries only trace lines and the summary.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let config = build_config(cli)?;
    let trace_path = config
        .general
        .trace_path
        .clone()
        .ok_or_else(|| missing_argument("-t <file>"))?;

    debug!(
        trace = %trace_path.display(),
        sets = config.cache.num_sets(),
        ways = config.cache.associativity,
        "configuration resolved"
    );
    let mut sim = Simulator::new(&config)?;
    let reader = TraceReader::open(&trace_path)?;

    let stdout = io::stdout();
    let stats = sim.run(reader, &mut stdout.lock())?;

    stats.print_summary();
    if cli.stats {
        stats.print_detailed();
    }
    if !cli.no_results {
        stats
            .write_results(RESULTS_FILE)
            .with_context(|| format!("writing {RESULTS_FILE}"))?;
    }
    Ok(())
}

/// Merges flags over the optional JSON file and validates the result.
///
/// Without `--config`, `-s`, `-E` and `-b` are all required.
fn build_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("loading configuration {}", path.display()))?,
        None => {
            if cli.set_index_bits.is_none() {
                return Err(missing_argument("-s <num>"));
            }
            if cli.associativity.is_none() {
                return Err(missing_argument("-E <num>"));
            }
            if cli.block_offset_bits.is_none() {
                return Err(missing_argument("-b <num>"));
            }
            Config::default()
        }
    };

    if let Some(s) = cli.set_index_bits {
        config.cache.set_index_bits = s;
    }
    if let Some(e) = cli.associativity {
        config.cache.associativity = e;
    }
    if let Some(b) = cli.block_offset_bits {
        config.cache.block_offset_bits = b;
    }
    if cli.double_sets {
        config.cache.set_allocation = SetAllocation::Doubled;
    }
    if cli.trace.is_some() {
        config.general.trace_path.clone_from(&cli.trace);
    }
    config.general.verbose |= cli.verbose;

    config.validate()?;
    Ok(config)
}

fn missing_argument(flag: &str) -> anyhow::Error {
    SimError::config(format!(
        "missing required argument {flag}\nusage: csim [-hv] -s <num> -E <num> -b <num> -t <file>"
    ))
    .into()
}
