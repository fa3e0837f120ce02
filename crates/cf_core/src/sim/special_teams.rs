//! Field-goal and punt models
//!
//! The kick model is a deterministic step function of kick distance; the
//! punt model is a net-yardage heuristic that shortens as the offense
//! nears midfield (coffin-corner effect).

use rand::Rng;
use rand_distr::{Distribution, StandardNormal};

pub const PUNT_MIN_NET: i32 = 25;
pub const PUNT_MAX_NET: i32 = 70;

/// Kick distance from scrimmage: yards-to-goal plus snap depth and the
/// end zone (7 + 10).
pub fn kick_distance(yardline_100: i32) -> i32 {
    yardline_100 + 17
}

/// Make probability, monotonically non-increasing in kick distance.
pub fn fg_make_probability(yardline_100: i32) -> f64 {
    let kick = kick_distance(yardline_100);
    if kick <= 20 {
        0.99
    } else if kick <= 30 {
        0.97
    } else if kick <= 40 {
        0.92
    } else if kick <= 50 {
        0.78
    } else if kick <= 60 {
        0.55
    } else {
        0.15
    }
}

/// Expected net punt yards before noise.
pub fn punt_net_mean(yardline_100: i32) -> i32 {
    let base = if yardline_100 > 70 { 42 } else { 38 };
    base - ((100 - yardline_100) as f64 * 0.15) as i32
}

/// One net punt yardage draw: Gaussian around the heuristic mean,
/// clamped to [25, 70].
pub fn sample_punt_net<R: Rng>(rng: &mut R, yardline_100: i32) -> i32 {
    let z: f64 = StandardNormal.sample(rng);
    let net = punt_net_mean(yardline_100) as f64 + 6.0 * z;
    net.clamp(PUNT_MIN_NET as f64, PUNT_MAX_NET as f64).round() as i32
}
