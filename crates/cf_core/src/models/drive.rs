//! Drive simulation records
//!
//! One `DrivePlay` per snap, appended chronologically; a `DriveSummary`
//! per simulated possession, immutable once returned.

use serde::{Deserialize, Serialize};

use super::spec::ActionType;

/// Outcome tag of a single snap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlayResult {
    Gain,
    FirstDown,
    Touchdown,
    TurnoverOnDowns,
    FieldGoalGood,
    FieldGoalMiss,
    Punt,
}

/// Terminal outcome of a possession. Exactly one per drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DriveEnd {
    Td,
    FgGood,
    FgMiss,
    Punt,
    Downs,
    Exhausted,
}

/// One snap row. Down/distance/yardline are the PRE-snap values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrivePlay {
    pub down: u8,
    pub distance: i32,
    pub yardline_100: i32,
    pub call_type: ActionType,
    pub yards: i32,
    pub result: PlayResult,
}

/// Full possession result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriveSummary {
    pub plays: Vec<DrivePlay>,
    pub points_for_offense: u32,
    pub time_elapsed_seconds: i32,
    pub ended: DriveEnd,
}
