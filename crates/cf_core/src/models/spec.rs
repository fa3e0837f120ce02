//! Play specification schema
//!
//! The structured game-state + action-call pair every simulation consumes.
//! Field ranges mirror the wire schema; `PlaySpec::validate` rejects
//! out-of-range input at the boundary so the simulators can assume
//! internally consistent state, and `PlaySpec::autofix` applies the
//! documented clamps (distance ≤ yards-to-goal, clock within a quarter).

use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};

// =============================================================================
// Enumerations
// =============================================================================

/// Lateral ball placement at the snap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HashMark {
    Left,
    Middle,
    Right,
}

impl Default for HashMark {
    fn default() -> Self {
        HashMark::Middle
    }
}

/// Offensive play call category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionType {
    Run,
    Pass,
    FieldGoal,
    Punt,
    QbSneak,
    Spike,
    Kneel,
    Trick,
}

impl ActionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionType::Run => "RUN",
            ActionType::Pass => "PASS",
            ActionType::FieldGoal => "FIELD_GOAL",
            ActionType::Punt => "PUNT",
            ActionType::QbSneak => "QB_SNEAK",
            ActionType::Spike => "SPIKE",
            ActionType::Kneel => "KNEEL",
            ActionType::Trick => "TRICK",
        }
    }
}

/// Target depth tier of a pass call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PassDepth {
    Screen,
    Short,
    Intermediate,
    Deep,
}

/// Target area of a pass call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PassArea {
    Left,
    Middle,
    Right,
}

/// Offensive personnel grouping (RB/TE count notation).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Personnel {
    #[serde(rename = "10")]
    P10,
    #[serde(rename = "11")]
    P11,
    #[serde(rename = "12")]
    P12,
    #[serde(rename = "13")]
    P13,
    #[serde(rename = "20")]
    P20,
    #[serde(rename = "21")]
    P21,
    #[serde(rename = "22")]
    P22,
}

impl Personnel {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "10" => Some(Personnel::P10),
            "11" => Some(Personnel::P11),
            "12" => Some(Personnel::P12),
            "13" => Some(Personnel::P13),
            "20" => Some(Personnel::P20),
            "21" => Some(Personnel::P21),
            "22" => Some(Personnel::P22),
            _ => None,
        }
    }
}

// =============================================================================
// Specification structs
// =============================================================================

fn default_timeouts() -> u8 {
    3
}

/// Pre-snap game state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateSpec {
    pub offense: String,
    pub defense: String,
    pub quarter: u8,
    pub clock_seconds: i32,
    pub down: u8,
    pub distance: i32,
    pub yardline_100: i32,
    #[serde(default = "default_timeouts")]
    pub off_timeouts: u8,
    #[serde(default = "default_timeouts")]
    pub def_timeouts: u8,
    #[serde(default)]
    pub score_off: u32,
    #[serde(default)]
    pub score_def: u32,
    #[serde(default)]
    pub hash: HashMark,
}

/// Requested play call for the first snap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionSpec {
    #[serde(rename = "type")]
    pub action_type: ActionType,
    #[serde(default)]
    pub pass_depth: Option<PassDepth>,
    #[serde(default)]
    pub pass_area: Option<PassArea>,
    #[serde(default)]
    pub play_action: bool,
    #[serde(default)]
    pub personnel_offense: Option<Personnel>,
    #[serde(default)]
    pub route_concept: Option<String>,
}

impl ActionSpec {
    /// Plain call with no modifiers, as the in-drive play caller produces.
    pub fn plain(action_type: ActionType) -> Self {
        ActionSpec {
            action_type,
            pass_depth: None,
            pass_area: None,
            play_action: false,
            personnel_offense: None,
            route_concept: None,
        }
    }
}

/// Optional situational context. Carried on the wire, unused by the models.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContextSpec {
    #[serde(default)]
    pub coverage_hint: Option<String>,
    #[serde(default)]
    pub weather: Option<String>,
}

/// Validated game-state + action-call pair fed to the simulators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaySpec {
    pub state: StateSpec,
    pub action: ActionSpec,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<ContextSpec>,
}

// =============================================================================
// Validation & autofix
// =============================================================================

fn check_range(field: &str, value: i64, min: i64, max: i64) -> Result<()> {
    if value < min || value > max {
        return Err(SimError::ValidationError(format!(
            "{} must be {}..={}, got {}",
            field, min, max, value
        )));
    }
    Ok(())
}

impl PlaySpec {
    /// Range checks at the specification boundary. Enum membership is
    /// enforced by deserialization; everything numeric is checked here.
    pub fn validate(&self) -> Result<()> {
        let st = &self.state;
        check_range("quarter", st.quarter as i64, 1, 4)?;
        check_range("clock_seconds", st.clock_seconds as i64, 0, 900)?;
        check_range("down", st.down as i64, 1, 4)?;
        check_range("distance", st.distance as i64, 1, 99)?;
        check_range("yardline_100", st.yardline_100 as i64, 1, 99)?;
        check_range("off_timeouts", st.off_timeouts as i64, 0, 3)?;
        check_range("def_timeouts", st.def_timeouts as i64, 0, 3)?;
        if st.offense.trim().is_empty() || st.defense.trim().is_empty() {
            return Err(SimError::ValidationError(
                "offense/defense team codes must be non-empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Normalize an in-range spec, returning human-readable warnings for
    /// every adjustment or suspicious call.
    pub fn autofix(&mut self) -> Vec<String> {
        let mut warnings = Vec::new();
        self.state.offense = self.state.offense.to_uppercase();
        self.state.defense = self.state.defense.to_uppercase();

        if self.state.distance > self.state.yardline_100 {
            warnings.push(format!(
                "distance {} > yards-to-goal {}; clamped",
                self.state.distance, self.state.yardline_100
            ));
            log::warn!(
                "autofix: clamping distance {} to yardline {}",
                self.state.distance,
                self.state.yardline_100
            );
            self.state.distance = self.state.yardline_100;
        }
        self.state.clock_seconds = self.state.clock_seconds.clamp(0, 900);

        if self.action.action_type == ActionType::FieldGoal && self.state.yardline_100 + 17 > 60 {
            warnings.push(format!(
                "Very long FG attempt (~{} yards).",
                self.state.yardline_100 + 17
            ));
        }
        if self.action.action_type == ActionType::Punt && self.state.yardline_100 < 60 {
            warnings.push("Punting inside opponent 40 is uncommon.".to_string());
        }
        warnings
    }
}
