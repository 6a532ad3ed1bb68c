//! Ranked Ladder Simulation Library
//!
//! Estimates how many matches a player needs to climb a rank + star ladder
//! to rank 0 at a given win rate.
//!
//! ## Modules
//!
//! - `ladder`: rank/star progression rules for a single match
//! - `monte_carlo`: trial driver with a per-trial safety cap
//! - `stats`: min/max/mean over per-trial match counts
//!
//! ## Usage
//!
//! ```bash
//! # Default: rank 25, 0 stars, 50% win rate, 1000 runs
//! cargo run --bin ladder --release
//!
//! # Reproducible parallel run
//! cargo run --bin ladder --release -- --rank 20 --rate 0.55 --seed 42 --parallel
//! ```

pub mod ladder;
pub mod monte_carlo;
pub mod stats;
