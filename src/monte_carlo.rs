//! Monte Carlo Ladder Climb
//!
//! Plays independent trials from a starting rank until the player reaches
//! rank 0 or the safety cap is hit, recording how many matches each took.
//!
//! ## Drivers
//! - `run_simulation`: sequential, draws from one injected random source
//! - `run_simulation_parallel`: rayon fan-out, one seeded stream per trial
//!
//! Both are deterministic for a fixed seed. The parallel driver returns the
//! same results regardless of the number of worker threads.

use rand::prelude::*;
use rayon::prelude::*;
use thiserror::Error;

use crate::ladder::{LadderState, Outcome, Tiering};
use crate::stats::{summarize, Summary};

/// Safety limit so hopeless configurations still terminate.
pub const MAX_MATCHES: u32 = 10_000;

/// Deepest starting rank that can lose every match up to the cap.
pub const MAX_STARTING_RANK: u32 = u32::MAX - MAX_MATCHES;

const SEED_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("win rate must be within [0, 1], got {0}")]
    WinRateOutOfRange(f64),
    #[error("run count must be at least 1")]
    NoRuns,
    #[error("starting rank {rank} is above the deepest supported rank {max}")]
    RankTooDeep { rank: u32, max: u32 },
    #[error("starting stars {stars} exceed the {capacity}-star capacity of rank {rank}")]
    StarsOverCapacity { rank: u32, stars: u32, capacity: u32 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimulationConfig {
    pub starting_rank: u32,
    pub starting_stars: u32,
    pub win_rate: f64,        // Probability of winning any single match
    pub runs: usize,
    pub tiering: Tiering,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            starting_rank: 25,
            starting_stars: 0,
            win_rate: 0.5,
            runs: 1000,
            tiering: Tiering::Legacy,
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.win_rate) {
            return Err(ConfigError::WinRateOutOfRange(self.win_rate));
        }
        if self.runs == 0 {
            return Err(ConfigError::NoRuns);
        }
        if self.starting_rank > MAX_STARTING_RANK {
            return Err(ConfigError::RankTooDeep {
                rank: self.starting_rank,
                max: MAX_STARTING_RANK,
            });
        }

        let capacity = self.tiering.capacity(self.starting_rank);
        if self.starting_stars > capacity {
            return Err(ConfigError::StarsOverCapacity {
                rank: self.starting_rank,
                stars: self.starting_stars,
                capacity,
            });
        }

        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TrialResult {
    pub matches: u32,
    pub final_rank: u32,
}

impl TrialResult {
    pub fn reached_top(&self) -> bool {
        self.final_rank == 0
    }

    pub fn hit_cap(&self) -> bool {
        !self.reached_top()
    }
}

/// Win iff a uniform draw from [0, 1) falls below `win_rate`.
pub fn simulate_match(win_rate: f64, rng: &mut impl Rng) -> Outcome {
    if rng.gen::<f64>() < win_rate {
        Outcome::Win
    } else {
        Outcome::Loss
    }
}

pub fn run_trial(config: &SimulationConfig, rng: &mut impl Rng) -> TrialResult {
    let mut state = LadderState::new(config.starting_rank, config.starting_stars);
    let mut matches = 0;

    while !state.is_top() && matches < MAX_MATCHES {
        matches += 1;
        let outcome = simulate_match(config.win_rate, rng);
        state = state.apply(outcome, &config.tiering);
    }

    TrialResult {
        matches,
        final_rank: state.rank,
    }
}

pub fn run_simulation(config: &SimulationConfig, rng: &mut impl Rng) -> Vec<TrialResult> {
    (0..config.runs).map(|_| run_trial(config, rng)).collect()
}

/// Seed for trial `index`, derived from the master seed alone.
pub fn trial_seed(seed: u64, index: u64) -> u64 {
    seed.wrapping_add(index.wrapping_mul(SEED_STRIDE))
}

pub fn run_simulation_parallel(config: &SimulationConfig, seed: u64) -> Vec<TrialResult> {
    (0..config.runs)
        .into_par_iter()
        .map(|i| {
            let mut rng = StdRng::seed_from_u64(trial_seed(seed, i as u64));
            run_trial(config, &mut rng)
        })
        .collect()
}

#[derive(Debug, Clone)]
pub struct SimulationReport {
    pub config: SimulationConfig,
    pub summary: Summary,
    pub capped_trials: usize,
}

impl SimulationReport {
    pub fn from_results(config: SimulationConfig, results: &[TrialResult]) -> Self {
        let matches: Vec<u32> = results.iter().map(|r| r.matches).collect();
        let summary = summarize(&matches);
        let capped_trials = results.iter().filter(|r| r.hit_cap()).count();

        Self {
            config,
            summary,
            capped_trials,
        }
    }

    pub fn print(&self) {
        println!(
            "estimated number of matches: {:.2} (min: {}, max: {})",
            self.summary.mean, self.summary.min, self.summary.max
        );
    }
}

pub fn run_report(
    config: &SimulationConfig,
    rng: &mut impl Rng,
) -> Result<SimulationReport, ConfigError> {
    config.validate()?;
    let results = run_simulation(config, rng);
    Ok(SimulationReport::from_results(*config, &results))
}

pub fn run_report_parallel(
    config: &SimulationConfig,
    seed: u64,
) -> Result<SimulationReport, ConfigError> {
    config.validate()?;
    let results = run_simulation_parallel(config, seed);
    Ok(SimulationReport::from_results(*config, &results))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_chacha::ChaCha8Rng;

    fn create_test_rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(12345)
    }

    fn config(rank: u32, win_rate: f64, runs: usize) -> SimulationConfig {
        SimulationConfig {
            starting_rank: rank,
            win_rate,
            runs,
            ..SimulationConfig::default()
        }
    }

    #[test]
    fn test_always_win_from_rank_one() {
        let mut rng = create_test_rng();
        let result = run_trial(&config(1, 1.0, 1), &mut rng);

        // No streak bonus at rank 1: six single-star wins to exceed 5.
        assert_eq!(result, TrialResult { matches: 6, final_rank: 0 });
    }

    #[test]
    fn test_always_win_from_rank_six() {
        let mut rng = create_test_rng();
        let result = run_trial(&config(6, 1.0, 1), &mut rng);

        // Rank 6 takes 4 wins (1+1+2+2), then 5 ranks at 5 wins each.
        assert_eq!(result.matches, 29);
        assert!(result.reached_top());
    }

    #[test]
    fn test_always_lose_hits_cap() {
        let mut rng = create_test_rng();
        let results = run_simulation(&config(25, 0.0, 5), &mut rng);

        for r in &results {
            assert_eq!(r.matches, MAX_MATCHES);
            assert!(r.hit_cap());
        }
    }

    #[test]
    fn test_start_at_top_plays_nothing() {
        let mut rng = create_test_rng();
        let result = run_trial(&config(0, 0.5, 1), &mut rng);

        assert_eq!(result.matches, 0);
        assert!(result.reached_top());
    }

    #[test]
    fn test_simulation_runs() {
        let mut rng = create_test_rng();
        let results = run_simulation(&SimulationConfig::default(), &mut rng);

        assert_eq!(results.len(), 1000);
        assert!(results.iter().all(|r| r.matches <= MAX_MATCHES));
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let cfg = config(15, 0.55, 50);
        let first = run_simulation(&cfg, &mut ChaCha8Rng::seed_from_u64(7));
        let second = run_simulation(&cfg, &mut ChaCha8Rng::seed_from_u64(7));

        assert_eq!(first, second);
    }

    #[test]
    fn test_parallel_matches_per_trial_streams() {
        let cfg = config(10, 0.6, 64);
        let parallel = run_simulation_parallel(&cfg, 99);

        let sequential: Vec<TrialResult> = (0..cfg.runs)
            .map(|i| {
                let mut rng = StdRng::seed_from_u64(trial_seed(99, i as u64));
                run_trial(&cfg, &mut rng)
            })
            .collect();

        assert_eq!(parallel, sequential);
        assert_eq!(parallel, run_simulation_parallel(&cfg, 99));
    }

    #[test]
    fn test_validate_rejects_bad_config() {
        assert_eq!(
            config(25, 1.5, 10).validate(),
            Err(ConfigError::WinRateOutOfRange(1.5))
        );
        assert!(config(25, f64::NAN, 10).validate().is_err());
        assert_eq!(config(25, 0.5, 0).validate(), Err(ConfigError::NoRuns));

        let over = SimulationConfig {
            starting_stars: 6,
            ..SimulationConfig::default()
        };
        assert_eq!(
            over.validate(),
            Err(ConfigError::StarsOverCapacity { rank: 25, stars: 6, capacity: 5 })
        );
        assert!(SimulationConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_rank_too_deep() {
        let bottom = config(u32::MAX, 0.0, 1);
        assert_eq!(
            bottom.validate(),
            Err(ConfigError::RankTooDeep { rank: u32::MAX, max: MAX_STARTING_RANK })
        );
        assert!(config(MAX_STARTING_RANK, 0.0, 1).validate().is_ok());

        let mut rng = create_test_rng();
        assert!(run_report(&bottom, &mut rng).is_err());
    }

    #[test]
    fn test_deepest_rank_all_losses_stays_capped() {
        let mut rng = create_test_rng();
        let report = run_report(&config(MAX_STARTING_RANK, 0.0, 1), &mut rng).unwrap();

        assert_eq!(report.capped_trials, 1);
        assert_eq!(report.summary.max, MAX_MATCHES);
    }

    #[test]
    fn test_unvalidated_trial_does_not_wrap() {
        let mut rng = create_test_rng();
        let result = run_trial(&config(u32::MAX, 0.0, 1), &mut rng);
        assert_eq!(result, TrialResult { matches: MAX_MATCHES, final_rank: u32::MAX });

        let stuffed = SimulationConfig {
            starting_stars: u32::MAX,
            ..config(3, 1.0, 1)
        };
        let result = run_trial(&stuffed, &mut rng);
        assert!(result.reached_top());
    }

    #[test]
    fn test_always_win_tiered_from_rank_sixteen() {
        let cfg = SimulationConfig {
            tiering: Tiering::Tiered,
            ..config(16, 1.0, 1)
        };
        let mut rng = create_test_rng();
        let result = run_trial(&cfg, &mut rng);

        // 16: 3 wins, 15-10: 2 wins each on the streak bonus, 9-6: 9 wins,
        // 5: 4 wins, then 4-1 at 5 wins each.
        assert_eq!(result, TrialResult { matches: 49, final_rank: 0 });
    }

    #[test]
    fn test_report_counts_capped_trials() {
        let mut rng = create_test_rng();
        let report = run_report(&config(25, 0.0, 3), &mut rng).unwrap();

        assert_eq!(report.capped_trials, 3);
        assert_eq!(report.summary.min, MAX_MATCHES);
        assert_eq!(report.summary.max, MAX_MATCHES);
    }

    #[test]
    fn test_report_rejects_invalid_config() {
        let mut rng = create_test_rng();
        assert!(run_report(&config(25, -0.1, 3), &mut rng).is_err());
        assert!(run_report_parallel(&config(25, 0.5, 0), 1).is_err());
    }
}
