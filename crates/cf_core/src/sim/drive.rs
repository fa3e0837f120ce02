//! Drive state machine
//!
//! Simulates an entire possession snap-by-snap: fourth-down decision
//! policy, call selection, yardage sampling, down/distance/field-position
//! bookkeeping and the play clock, until one of six terminal outcomes.
//!
//! The per-snap logic lives in a single transition function (`step`) that
//! mutates a `DriveState` and emits the snap record; `simulate_drive_once`
//! is just the driver loop. Draw order within a snap is fixed (yardage or
//! FG/punt draw first, then the clock draw) so a seed fully determines the
//! drive.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::error::{Result, SimError};
use crate::models::{
    ActionSpec, ActionType, DriveEnd, DrivePlay, DriveSummary, PassDepth, PlayResult, PlaySpec,
    StateSpec,
};
use crate::sim::{fg_make_probability, kick_distance, resolve_seed, sample_punt_net, sample_yards};

pub const MAX_DRIVES: usize = 20;

/// Defensive iteration cap. Unreachable in practice: a 900-second quarter
/// at the 6-second minimum snap cost allows at most 150 snaps.
const MAX_SNAPS: usize = 256;

/// FG is attempted on 4th down when the kick is no longer than this.
const FG_MAX_KICK: i32 = 60;

/// Punt on 4th down when still this far (or farther) from the goal line.
const PUNT_MIN_YARDLINE: i32 = 60;

/// Mutable possession state carried across snaps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriveState {
    pub down: u8,
    pub distance: i32,
    pub yardline_100: i32,
    pub clock_seconds: i32,
    pub points: u32,
    pub elapsed_seconds: i32,
    pub snaps: usize,
}

impl DriveState {
    pub fn from_spec(state: &StateSpec) -> Self {
        DriveState {
            down: state.down,
            distance: state.distance,
            yardline_100: state.yardline_100,
            clock_seconds: state.clock_seconds,
            points: 0,
            elapsed_seconds: 0,
            snaps: 0,
        }
    }
}

/// Result of one transition: either a recorded snap with the drive still
/// alive, or a terminal outcome (with the final record, if any).
#[derive(Debug)]
pub(crate) enum StepOutcome {
    Snap(DrivePlay),
    Ended {
        record: Option<DrivePlay>,
        ended: DriveEnd,
    },
}

/// Per-snap clock cost: 6 + U[0,3] seconds for a pass, 7 + U[0,3] for
/// everything else (runs, kicks, punts).
fn clock_cost<R: Rng>(rng: &mut R, call_type: ActionType) -> i32 {
    let base = if call_type == ActionType::Pass { 6 } else { 7 };
    base + rng.gen_range(0..=3)
}

fn tick<R: Rng>(st: &mut DriveState, rng: &mut R, call_type: ActionType) {
    let t = clock_cost(rng, call_type);
    st.elapsed_seconds += t;
    st.clock_seconds -= t;
}

/// Play caller for every snap after the first: intermediate pass on
/// 3rd-and-long, otherwise a plain run.
fn policy_call(down: u8, distance: i32) -> ActionSpec {
    if down == 3 && distance >= 6 {
        ActionSpec {
            pass_depth: Some(PassDepth::Intermediate),
            ..ActionSpec::plain(ActionType::Pass)
        }
    } else {
        ActionSpec::plain(ActionType::Run)
    }
}

/// Advance the drive by one snap (or terminate it).
pub(crate) fn step<R: Rng>(
    st: &mut DriveState,
    first_call: &ActionSpec,
    rng: &mut R,
) -> StepOutcome {
    // out of time this quarter
    if st.clock_seconds <= 0 {
        return StepOutcome::Ended {
            record: None,
            ended: DriveEnd::Exhausted,
        };
    }

    // fourth-down decision policy
    if st.down == 4 {
        if kick_distance(st.yardline_100) <= FG_MAX_KICK {
            let p = fg_make_probability(st.yardline_100);
            let made = rng.gen::<f64>() < p;
            let record = DrivePlay {
                down: 4,
                distance: 0,
                yardline_100: st.yardline_100,
                call_type: ActionType::FieldGoal,
                yards: 0,
                result: if made {
                    PlayResult::FieldGoalGood
                } else {
                    PlayResult::FieldGoalMiss
                },
            };
            tick(st, rng, ActionType::FieldGoal);
            let ended = if made {
                st.points += 3;
                DriveEnd::FgGood
            } else {
                DriveEnd::FgMiss
            };
            return StepOutcome::Ended {
                record: Some(record),
                ended,
            };
        }
        if st.yardline_100 >= PUNT_MIN_YARDLINE {
            let net = sample_punt_net(rng, st.yardline_100);
            let record = DrivePlay {
                down: 4,
                distance: 0,
                yardline_100: st.yardline_100,
                call_type: ActionType::Punt,
                yards: net,
                result: PlayResult::Punt,
            };
            tick(st, rng, ActionType::Punt);
            return StepOutcome::Ended {
                record: Some(record),
                ended: DriveEnd::Punt,
            };
        }
        // between the FG range and the punt threshold: go for it
    }

    // first snap runs the caller's action; afterwards the policy decides
    let call = if st.snaps == 0 {
        first_call.clone()
    } else {
        policy_call(st.down, st.distance)
    };

    let pre_down = st.down;
    let pre_distance = st.distance;
    let pre_yardline = st.yardline_100;

    let yards = sample_yards(rng, &call);

    // touchdown: ball crosses the goal line (losses never score)
    if pre_yardline - yards.max(0) <= 0 {
        let record = DrivePlay {
            down: pre_down,
            distance: pre_distance,
            yardline_100: pre_yardline,
            call_type: call.action_type,
            yards,
            result: PlayResult::Touchdown,
        };
        tick(st, rng, call.action_type);
        st.points += 6;
        return StepOutcome::Ended {
            record: Some(record),
            ended: DriveEnd::Td,
        };
    }

    // signed-yards bookkeeping: a loss moves the ball back and stretches
    // the line to gain
    st.yardline_100 = (pre_yardline - yards).clamp(1, 99);
    let result = if yards >= pre_distance {
        st.down = 1;
        st.distance = if st.yardline_100 > 10 {
            10
        } else {
            st.yardline_100
        };
        PlayResult::FirstDown
    } else {
        st.down = pre_down + 1;
        st.distance = (pre_distance - yards).max(1);
        if st.down > 4 {
            let record = DrivePlay {
                down: 4,
                distance: st.distance,
                yardline_100: st.yardline_100,
                call_type: call.action_type,
                yards,
                result: PlayResult::TurnoverOnDowns,
            };
            tick(st, rng, call.action_type);
            return StepOutcome::Ended {
                record: Some(record),
                ended: DriveEnd::Downs,
            };
        }
        PlayResult::Gain
    };

    let record = DrivePlay {
        down: pre_down,
        distance: pre_distance,
        yardline_100: pre_yardline,
        call_type: call.action_type,
        yards,
        result,
    };
    tick(st, rng, call.action_type);
    st.snaps += 1;
    StepOutcome::Snap(record)
}

/// Simulate one full possession from a validated spec with an explicit
/// seed. Always reaches exactly one terminal outcome.
pub fn simulate_drive_once(spec: &PlaySpec, seed: u64) -> DriveSummary {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut st = DriveState::from_spec(&spec.state);
    let mut plays = Vec::new();

    for _ in 0..MAX_SNAPS {
        match step(&mut st, &spec.action, &mut rng) {
            StepOutcome::Snap(record) => plays.push(record),
            StepOutcome::Ended { record, ended } => {
                plays.extend(record);
                return DriveSummary {
                    plays,
                    points_for_offense: st.points,
                    time_elapsed_seconds: st.elapsed_seconds,
                    ended,
                };
            }
        }
    }

    // iteration cap; clock exhaustion makes this path unreachable
    log::warn!("drive hit the {}-snap cap; treating as exhausted", MAX_SNAPS);
    DriveSummary {
        plays,
        points_for_offense: st.points,
        time_elapsed_seconds: st.elapsed_seconds,
        ended: DriveEnd::Exhausted,
    }
}

/// Simulate `n` independent drives from the same initial spec. Drive `i`
/// is seeded `base + i`, so any single drive can be replayed on its own.
/// Returns the summaries and the resolved base seed.
pub fn simulate_drive_batch(
    spec: &PlaySpec,
    n: usize,
    seed: Option<u64>,
) -> Result<(Vec<DriveSummary>, u64)> {
    if !(1..=MAX_DRIVES).contains(&n) {
        return Err(SimError::InvalidParameter(format!(
            "n must be 1..={}, got {}",
            MAX_DRIVES, n
        )));
    }
    let base = resolve_seed(seed);
    let drives = (0..n as u64)
        .map(|i| simulate_drive_once(spec, base.wrapping_add(i)))
        .collect();
    Ok((drives, base))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::HashMark;

    fn spec(down: u8, distance: i32, yardline_100: i32, action_type: ActionType) -> PlaySpec {
        spec_with_clock(down, distance, yardline_100, action_type, 900)
    }

    fn spec_with_clock(
        down: u8,
        distance: i32,
        yardline_100: i32,
        action_type: ActionType,
        clock_seconds: i32,
    ) -> PlaySpec {
        PlaySpec {
            state: StateSpec {
                offense: "KC".to_string(),
                defense: "BUF".to_string(),
                quarter: 4,
                clock_seconds,
                down,
                distance,
                yardline_100,
                off_timeouts: 3,
                def_timeouts: 3,
                score_off: 0,
                score_def: 0,
                hash: HashMark::Middle,
            },
            action: ActionSpec::plain(action_type),
            context: None,
        }
    }

    #[test]
    fn exhausted_immediately_when_clock_is_zero() {
        let s = spec_with_clock(1, 10, 75, ActionType::Run, 0);
        let summary = simulate_drive_once(&s, 1);
        assert_eq!(summary.ended, DriveEnd::Exhausted);
        assert!(summary.plays.is_empty());
        assert_eq!(summary.time_elapsed_seconds, 0);
        assert_eq!(summary.points_for_offense, 0);
    }

    #[test]
    fn fourth_down_in_own_territory_punts() {
        // own 35: too far for a kick, punt unit comes on
        let s = spec(4, 5, 65, ActionType::Run);
        for seed in 0..20 {
            let summary = simulate_drive_once(&s, seed);
            assert_eq!(summary.ended, DriveEnd::Punt);
            assert_eq!(summary.plays.len(), 1);
            let play = &summary.plays[0];
            assert_eq!(play.call_type, ActionType::Punt);
            assert_eq!(play.result, PlayResult::Punt);
            assert_eq!(play.down, 4);
            assert_eq!(play.distance, 0);
            assert_eq!(play.yardline_100, 65);
            assert!((7..=10).contains(&summary.time_elapsed_seconds));
        }
    }

    #[test]
    fn fourth_down_in_range_attempts_field_goal() {
        // opp 25: 42-yard kick
        let s = spec(4, 3, 25, ActionType::Run);
        let mut made = 0;
        for seed in 0..100 {
            let summary = simulate_drive_once(&s, seed);
            assert_eq!(summary.plays.len(), 1);
            let play = &summary.plays[0];
            assert_eq!(play.call_type, ActionType::FieldGoal);
            assert_eq!(play.yards, 0);
            match summary.ended {
                DriveEnd::FgGood => {
                    assert_eq!(summary.points_for_offense, 3);
                    assert_eq!(play.result, PlayResult::FieldGoalGood);
                    made += 1;
                }
                DriveEnd::FgMiss => {
                    assert_eq!(summary.points_for_offense, 0);
                    assert_eq!(play.result, PlayResult::FieldGoalMiss);
                }
                other => panic!("unexpected outcome {:?}", other),
            }
        }
        // make prob is 0.92; ~50% would be far outside sampling noise
        assert!(made > 75, "only {} of 100 kicks made", made);
    }

    #[test]
    fn fourth_down_no_mans_land_goes_for_it() {
        // opp 42: 75-yard kick is out of range, but too close to punt
        let s = spec(4, 2, 58, ActionType::Run);
        for seed in 0..20 {
            let summary = simulate_drive_once(&s, seed);
            let first = &summary.plays[0];
            assert_eq!(first.call_type, ActionType::Run);
            assert_eq!(first.down, 4);
            assert_eq!(first.yardline_100, 58);
            assert!(matches!(
                first.result,
                PlayResult::Gain
                    | PlayResult::FirstDown
                    | PlayResult::Touchdown
                    | PlayResult::TurnoverOnDowns
            ));
        }
    }

    #[test]
    fn goal_line_run_scores_touchdowns() {
        let s = spec(1, 2, 2, ActionType::Run);
        let mut touchdowns = 0;
        for seed in 0..20 {
            let summary = simulate_drive_once(&s, seed);
            if summary.ended == DriveEnd::Td {
                touchdowns += 1;
                assert_eq!(summary.points_for_offense, 6);
                let last = summary.plays.last().unwrap();
                assert_eq!(last.result, PlayResult::Touchdown);
                assert!(last.yardline_100 - last.yards.max(0) <= 0);
            }
        }
        assert!(touchdowns > 0, "no touchdown in 20 seeded drives from the 2");
    }

    #[test]
    fn turnover_on_downs_records_post_snap_state() {
        // 4th & 12 at the opp 45: goes for it; a failed conversion turns
        // it over (kick would be 62 yards, too close to punt)
        let s = spec(4, 12, 45, ActionType::Kneel);
        let summary = simulate_drive_once(&s, 0);
        // kneel loses a yard: always short of 12
        assert_eq!(summary.ended, DriveEnd::Downs);
        assert_eq!(summary.plays.len(), 1);
        let play = &summary.plays[0];
        assert_eq!(play.result, PlayResult::TurnoverOnDowns);
        assert_eq!(play.down, 4);
        assert_eq!(play.yards, -1);
        assert_eq!(play.distance, 13); // loss stretches the line to gain
        assert_eq!(play.yardline_100, 46);
    }

    #[test]
    fn first_snap_uses_callers_action_then_policy_takes_over() {
        let s = spec(1, 10, 80, ActionType::Trick);
        let summary = simulate_drive_once(&s, 3);
        assert_eq!(summary.plays[0].call_type, ActionType::Trick);
        for play in &summary.plays[1..] {
            assert!(
                matches!(
                    play.call_type,
                    ActionType::Run | ActionType::Pass | ActionType::FieldGoal | ActionType::Punt
                ),
                "policy produced {:?}",
                play.call_type
            );
        }
    }

    #[test]
    fn policy_calls_intermediate_pass_on_third_and_long() {
        let call = policy_call(3, 6);
        assert_eq!(call.action_type, ActionType::Pass);
        assert_eq!(call.pass_depth, Some(PassDepth::Intermediate));
        assert_eq!(policy_call(3, 5).action_type, ActionType::Run);
        assert_eq!(policy_call(2, 9).action_type, ActionType::Run);
    }

    #[test]
    fn same_seed_produces_byte_identical_summaries() {
        let s = spec(1, 10, 75, ActionType::Pass);
        for seed in [0u64, 17, 123456789] {
            let a = simulate_drive_once(&s, seed);
            let b = simulate_drive_once(&s, seed);
            let ja = serde_json::to_string(&a).unwrap();
            let jb = serde_json::to_string(&b).unwrap();
            assert_eq!(ja, jb);
        }
    }

    #[test]
    fn drive_always_terminates_with_plays_unless_clock_spent() {
        for seed in 0..50 {
            let s = spec(1, 10, 75, ActionType::Run);
            let summary = simulate_drive_once(&s, seed);
            assert!(!summary.plays.is_empty());
            // elapsed time is the sum of 6..=10 second snap costs
            let n = summary.plays.len() as i32;
            assert!(summary.time_elapsed_seconds >= 6 * n);
            assert!(summary.time_elapsed_seconds <= 10 * n);
        }
    }

    #[test]
    fn batch_rejects_bad_counts_and_replays_per_drive() {
        let s = spec(1, 10, 75, ActionType::Run);
        assert!(simulate_drive_batch(&s, 0, Some(1)).is_err());
        assert!(simulate_drive_batch(&s, 21, Some(1)).is_err());

        let (drives, base) = simulate_drive_batch(&s, 3, Some(500)).unwrap();
        assert_eq!(drives.len(), 3);
        assert_eq!(base, 500);
        assert_eq!(drives[1], simulate_drive_once(&s, 501));
        assert_eq!(drives[2], simulate_drive_once(&s, 502));
    }

    #[test]
    fn batch_resolves_missing_seed() {
        let s = spec(1, 10, 75, ActionType::Run);
        let (drives, base) = simulate_drive_batch(&s, 2, None).unwrap();
        let (replay, _) = simulate_drive_batch(&s, 2, Some(base)).unwrap();
        assert_eq!(drives, replay);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn arb_action() -> impl Strategy<Value = ActionType> {
            prop_oneof![
                Just(ActionType::Run),
                Just(ActionType::Pass),
                Just(ActionType::QbSneak),
                Just(ActionType::Trick),
                Just(ActionType::Spike),
                Just(ActionType::Kneel),
            ]
        }

        proptest! {
            /// Every drive reaches a terminal outcome with consistent
            /// records: yardline in bounds, scrimmage distances >= 1,
            /// and the touchdown test holding exactly for TD rows.
            #[test]
            fn drive_invariants(
                down in 1u8..=4,
                distance in 1i32..=30,
                yardline in 1i32..=99,
                clock in 0i32..=900,
                action in arb_action(),
                seed in any::<u64>(),
            ) {
                let mut s = spec_with_clock(down, distance.min(yardline), yardline, action, clock);
                prop_assert!(s.validate().is_ok());
                s.autofix();
                let summary = simulate_drive_once(&s, seed);

                if clock > 0 {
                    prop_assert!(!summary.plays.is_empty());
                }

                for play in &summary.plays {
                    prop_assert!((1..=99).contains(&play.yardline_100));
                    prop_assert!((1..=4).contains(&play.down));
                    let scrimmage = !matches!(
                        play.call_type,
                        ActionType::FieldGoal | ActionType::Punt
                    );
                    if scrimmage {
                        prop_assert!(play.distance >= 1);
                        // pre-snap rows only; the turnover row stores the
                        // computed post-snap position
                        if play.result != PlayResult::TurnoverOnDowns {
                            let crossed = play.yardline_100 - play.yards.max(0) <= 0;
                            prop_assert_eq!(
                                crossed,
                                play.result == PlayResult::Touchdown
                            );
                        }
                    }
                }

                match summary.ended {
                    DriveEnd::Td => prop_assert_eq!(summary.points_for_offense, 6),
                    DriveEnd::FgGood => prop_assert_eq!(summary.points_for_offense, 3),
                    _ => prop_assert_eq!(summary.points_for_offense, 0),
                }
            }

            /// Transition determinism: two equally seeded runs agree.
            #[test]
            fn drive_reproducibility(seed in any::<u64>()) {
                let s = spec_with_clock(1, 10, 75, ActionType::Pass, 900);
                let a = simulate_drive_once(&s, seed);
                let b = simulate_drive_once(&s, seed);
                prop_assert_eq!(a, b);
            }
        }
    }
}
