//! Single-play Monte Carlo simulator
//!
//! Runs N independent trials of one play call from one game state and
//! reports the outcome distribution. Field-goal and punt calls have their
//! own branches; everything else goes through the yardage sampler.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};
use crate::models::{ActionType, PlaySpec};
use crate::sim::{fg_make_probability, kick_distance, resolve_seed, sample_punt_net, sample_yards};

pub const MIN_TRIALS: usize = 100;
pub const MAX_TRIALS: usize = 5000;

/// Distributional summary of one simulated play call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimResult {
    pub yards_mean: f64,
    pub yards_p10: f64,
    pub yards_p50: f64,
    pub yards_p90: f64,
    pub td_rate: f64,
    pub fg_rate: f64,
    pub turnover_rate: f64,
    pub assumptions: Vec<String>,
    pub seed: u64,
}

/// Nearest-rank percentile over a sorted sample: index floor(p * (n-1)).
fn percentile(sorted: &[i32], p: f64) -> f64 {
    let idx = (p * (sorted.len() - 1) as f64) as usize;
    sorted[idx] as f64
}

fn mean(samples: &[i32]) -> f64 {
    samples.iter().map(|&y| y as i64).sum::<i64>() as f64 / samples.len() as f64
}

/// Simulate `n` independent trials of the specified play.
///
/// The spec must already be validated and autofixed. The resolved seed is
/// echoed in the result so the exact run can be replayed.
pub fn simulate_next_play(spec: &PlaySpec, n: usize, seed: Option<u64>) -> Result<SimResult> {
    if !(MIN_TRIALS..=MAX_TRIALS).contains(&n) {
        return Err(SimError::InvalidParameter(format!(
            "n must be {}..={}, got {}",
            MIN_TRIALS, MAX_TRIALS, n
        )));
    }
    let seed = resolve_seed(seed);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let yl = spec.state.yardline_100;
    let distance = spec.state.distance;
    let down = spec.state.down;

    match spec.action.action_type {
        ActionType::FieldGoal => {
            let p = fg_make_probability(yl);
            let made = (0..n).filter(|_| rng.gen::<f64>() < p).count();
            let missed = n - made;
            Ok(SimResult {
                yards_mean: 0.0,
                yards_p10: 0.0,
                yards_p50: 0.0,
                yards_p90: 0.0,
                td_rate: 0.0,
                fg_rate: made as f64 / n as f64,
                turnover_rate: missed as f64 / n as f64,
                assumptions: vec![format!(
                    "FG make prob from {}y ≈ {:.2}",
                    kick_distance(yl),
                    p
                )],
                seed,
            })
        }
        ActionType::Punt => {
            let mut samples: Vec<i32> = (0..n).map(|_| sample_punt_net(&mut rng, yl)).collect();
            samples.sort_unstable();
            Ok(SimResult {
                yards_mean: mean(&samples),
                yards_p10: percentile(&samples, 0.1),
                yards_p50: percentile(&samples, 0.5),
                yards_p90: percentile(&samples, 0.9),
                td_rate: 0.0,
                fg_rate: 0.0,
                turnover_rate: 0.0,
                assumptions: vec!["Net punt yards heuristic".to_string()],
                seed,
            })
        }
        _ => {
            let mut samples = Vec::with_capacity(n);
            let mut touchdowns = 0usize;
            let mut turnovers = 0usize;
            for _ in 0..n {
                let y = sample_yards(&mut rng, &spec.action);
                samples.push(y);
                if yl - y.max(0) <= 0 {
                    touchdowns += 1;
                }
                if down == 4 && y < distance {
                    turnovers += 1;
                }
            }
            samples.sort_unstable();
            Ok(SimResult {
                yards_mean: mean(&samples),
                yards_p10: percentile(&samples, 0.1),
                yards_p50: percentile(&samples, 0.5),
                yards_p90: percentile(&samples, 0.9),
                td_rate: touchdowns as f64 / n as f64,
                fg_rate: 0.0,
                turnover_rate: turnovers as f64 / n as f64,
                assumptions: vec![
                    "Heuristic outcome distributions by action type; 4th-down turnover on fail"
                        .to_string(),
                ],
                seed,
            })
        }
    }
}
