//! Gatesim - Logic Gate Circuit Explorer
//!
//! Small frontend over the gatesim engine.
//!
//! # Usage
//!
//! ```bash
//! gatesim truth-table and
//! gatesim demo -v
//! gatesim --visit per-path cycle --length 3
//! ```

use std::io;

use clap::{Parser, Subcommand};
use gatesim_core::{
    error::Result,
    report::{run_demo, run_ring, write_truth_table},
    ComponentKind, EvalConfig, VisitPolicy,
};
use tracing_subscriber::EnvFilter;

/// Logic gate circuit explorer
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Visited-set policy for evaluation (shared, per-path)
    #[arg(long, global = true, value_name = "POLICY", default_value = "shared")]
    visit: VisitPolicy,

    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the truth table of a component kind
    TruthTable {
        /// Component kind (source, buffer, not, and, or)
        #[arg(value_name = "KIND")]
        kind: ComponentKind,
    },
    /// Run the AND/OR/buffer wiring scenario and report every change
    Demo,
    /// Evaluate a NOT/buffer feedback ring
    Cycle {
        /// Number of components on the ring
        #[arg(short, long, default_value_t = 2)]
        length: usize,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = EvalConfig::new().with_visit_policy(args.visit);

    let mut out = io::stdout().lock();
    match args.command {
        Command::TruthTable { kind } => write_truth_table(kind, &mut out),
        Command::Demo => run_demo(config, &mut out),
        Command::Cycle { length } => run_ring(length, config, &mut out),
    }
}
