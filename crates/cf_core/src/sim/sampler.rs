//! Yardage sampler
//!
//! Maps an action call to one signed yardage sample. Gaussian per action
//! type (and pass depth tier), rounded and clamped to [-15, 80]. Pure
//! given the rng handle; the caller owns the seeded stream.

use rand::Rng;
use rand_distr::{Distribution, StandardNormal};

use crate::models::{ActionSpec, ActionType, PassDepth};

pub const MIN_YARDS: i32 = -15;
pub const MAX_YARDS: i32 = 80;

fn gauss<R: Rng>(rng: &mut R, mean: f64, sd: f64) -> f64 {
    let z: f64 = StandardNormal.sample(rng);
    mean + sd * z
}

fn pass_mean(depth: Option<PassDepth>) -> f64 {
    match depth {
        Some(PassDepth::Screen) => 1.0,
        Some(PassDepth::Short) => 5.5,
        Some(PassDepth::Intermediate) => 9.0,
        Some(PassDepth::Deep) => 15.0,
        None => 6.0,
    }
}

/// One yardage draw for the given call.
///
/// SPIKE and KNEEL are fixed (0 and -1) but everything else is a single
/// normal draw, so the rng advances exactly once per stochastic call.
pub fn sample_yards<R: Rng>(rng: &mut R, action: &ActionSpec) -> i32 {
    let y = match action.action_type {
        ActionType::QbSneak => gauss(rng, 1.0, 0.7),
        ActionType::Run => gauss(rng, 4.3, 3.0),
        ActionType::Pass => gauss(rng, pass_mean(action.pass_depth), 7.0),
        ActionType::Spike => 0.0,
        ActionType::Kneel => -1.0,
        ActionType::Trick => gauss(rng, 8.0, 12.0),
        // special-teams call run from scrimmage (busted/fake): generic play
        ActionType::FieldGoal | ActionType::Punt => gauss(rng, 3.0, 5.0),
    };
    y.clamp(MIN_YARDS as f64, MAX_YARDS as f64).round() as i32
}
