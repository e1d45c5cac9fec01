//! Tree-PLRU cache simulator CLI.
//!
//! This binary replays an address stream through a configured cache and
//! prints the hit/miss summary. It supports:
//! 1. **Matmul:** The synthetic matrix-multiply workload (the default driver).
//! 2. **Trace:** A text file with one address per line.
//!
//! Geometry comes from built-in defaults, optionally a JSON config file, then
//! command-line overrides, in that order.

use std::process;

use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use plru_core::config::{Config, VictimSelection};
use plru_core::sim::{Simulator, trace};

#[derive(Parser, Debug)]
#[command(
    name = "sim",
    author,
    version,
    about = "Tree-PLRU set-associative cache simulator",
    long_about = "Replay an address stream through a Tree-PLRU cache and report hits and misses.\n\nExamples:\n  sim matmul --size 64\n  sim trace addrs.txt --ways 4 --sets 64\n  sim --config cache.json matmul --dump-sets"
)]
struct Cli {
    /// JSON configuration file (cache geometry and workload).
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Increase log verbosity (-v debug, -vv per-access trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(flatten)]
    geometry: GeometryArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Overrides applied on top of the configuration file.
#[derive(Args, Debug)]
struct GeometryArgs {
    /// Associativity (power of two, at most 64).
    #[arg(long, global = true)]
    ways: Option<usize>,

    /// Number of sets (power of two).
    #[arg(long, global = true)]
    sets: Option<usize>,

    /// Width of the line offset field in bits.
    #[arg(long, global = true)]
    offset_bits: Option<u32>,

    /// Fill invalid ways before consulting the PLRU tree.
    #[arg(long, global = true)]
    invalid_first: bool,

    /// Print every set's final state and ways after the summary.
    #[arg(long, global = true)]
    dump_sets: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the matrix-multiply workload.
    Matmul {
        /// Square matrix dimension.
        #[arg(short, long)]
        size: Option<usize>,
    },

    /// Replay an address trace file.
    Trace {
        /// Trace path: one hex (0x-prefixed) or decimal address per line.
        path: String,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = match cli.config.as_deref().map(Config::from_file).transpose() {
        Ok(config) => config.unwrap_or_default(),
        Err(e) => fail(&e),
    };
    apply_overrides(&mut config, &cli.geometry);
    if let Commands::Matmul { size: Some(size) } = cli.command {
        config.workload.matrix_size = size;
    }

    let mut sim = Simulator::new(config).unwrap_or_else(|e| fail(&e));
    sim.cache.dump_sets = cli.geometry.dump_sets;

    println!(
        "Configuration: {} ways x {} sets, offset {} bits, index {} bits, tag {} bits, {:?} victim selection",
        sim.config.cache.ways,
        sim.config.cache.sets,
        sim.cache.decoder().offset_bits(),
        sim.cache.decoder().index_bits(),
        sim.cache.decoder().tag_bits(),
        sim.cache.victim_selection()
    );

    match cli.command {
        Commands::Matmul { .. } => {
            println!(
                "[*] Matmul workload: {0}x{0} matrices",
                sim.config.workload.matrix_size
            );
            let _ = sim.run_matmul();
        }
        Commands::Trace { path } => {
            println!("[*] Trace replay: {path}");
            let addrs = trace::load(&path).unwrap_or_else(|e| fail(&e));
            info!(addresses = addrs.len(), "trace loaded");
            let _ = sim.run(addrs);
        }
    }

    println!("{}", sim.cache);
}

/// Applies command-line geometry overrides to `config`.
fn apply_overrides(config: &mut Config, args: &GeometryArgs) {
    if let Some(ways) = args.ways {
        config.cache.ways = ways;
    }
    if let Some(sets) = args.sets {
        config.cache.sets = sets;
    }
    if let Some(bits) = args.offset_bits {
        config.cache.offset_bits = bits;
    }
    if args.invalid_first {
        config.cache.victim_selection = VictimSelection::InvalidFirst;
    }
}

/// Installs the global subscriber. `RUST_LOG` takes precedence over `-v`.
fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Reports a fatal error and exits with status 1.
fn fail(err: &dyn std::error::Error) -> ! {
    eprintln!("\n[!] FATAL: {err}");
    process::exit(1);
}
