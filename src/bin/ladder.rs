//! Ranked Ladder Simulation Binary
//!
//! Estimates the number of matches needed to reach rank 0.
//!
//! ## Usage
//! ```bash
//! cargo run --bin ladder --release -- --rank 25 --star 0 --rate 0.5 --runs 1000
//! ```

use anyhow::Result;
use clap::{Parser, ValueEnum};
use rand::prelude::*;

use ladder_simulation::ladder::Tiering;
use ladder_simulation::monte_carlo::{
    run_report, run_report_parallel, SimulationConfig, SimulationReport, MAX_MATCHES,
};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum TieringArg {
    /// Every rank holds 5 stars.
    Legacy,
    /// Ranks 15-49 hold 3 stars, 10-14 hold 4, the rest 5.
    Tiered,
}

impl From<TieringArg> for Tiering {
    fn from(arg: TieringArg) -> Self {
        match arg {
            TieringArg::Legacy => Tiering::Legacy,
            TieringArg::Tiered => Tiering::Tiered,
        }
    }
}

#[derive(Parser)]
#[command(
    name = "ladder",
    about = "Monte Carlo estimate of matches needed to climb a ranked ladder"
)]
struct Cli {
    /// At which rank to start the simulation.
    #[arg(long, default_value_t = 25)]
    rank: u32,

    /// At which star to start the simulation.
    #[arg(long, default_value_t = 0)]
    star: u32,

    /// Estimated deck win rate.
    #[arg(long, default_value_t = 0.5)]
    rate: f64,

    /// Number of runs.
    #[arg(long, default_value_t = 1000)]
    runs: usize,

    /// Seed for reproducible runs. Random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Spread trials across threads.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Stars-per-rank table.
    #[arg(long, value_enum, default_value_t = TieringArg::Legacy)]
    tiering: TieringArg,

    /// Print the effective configuration to stderr.
    #[arg(long, default_value_t = false)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = SimulationConfig {
        starting_rank: cli.rank,
        starting_stars: cli.star,
        win_rate: cli.rate,
        runs: cli.runs,
        tiering: cli.tiering.into(),
    };

    let seed = cli.seed.unwrap_or_else(|| thread_rng().gen());

    if cli.verbose {
        eprintln!("Parameters:");
        eprintln!("  Starting rank: {}", config.starting_rank);
        eprintln!("  Starting stars: {}", config.starting_stars);
        eprintln!("  Win rate: {:.3}", config.win_rate);
        eprintln!("  Runs: {}", config.runs);
        eprintln!("  Tiering: {}", config.tiering.name());
        eprintln!("  Seed: {}", seed);
        eprintln!("  Mode: {}", if cli.parallel { "parallel" } else { "sequential" });
    }

    let report = run(&config, seed, cli.parallel)?;
    report.print();

    if report.capped_trials > 0 {
        eprintln!(
            "warning: {} of {} runs stopped at the {}-match cap without reaching rank 0",
            report.capped_trials, config.runs, MAX_MATCHES
        );
    }

    Ok(())
}

fn run(config: &SimulationConfig, seed: u64, parallel: bool) -> Result<SimulationReport> {
    let report = if parallel {
        run_report_parallel(config, seed)?
    } else {
        let mut rng = StdRng::seed_from_u64(seed);
        run_report(config, &mut rng)?
    };
    Ok(report)
}
