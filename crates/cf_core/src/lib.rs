//! # cf_core - Football Play & Drive Counterfactual Engine
//!
//! This library turns a structured (or freeform-text) game-state + play
//! description into stochastic simulations: single-play outcome
//! distributions and full possession ("drive") simulations.
//!
//! ## Features
//! - 100% deterministic simulation (same seed = same result)
//! - Deterministic freeform-text parsing into a validated play spec
//! - Drive state machine with 4th-down policy and clock bookkeeping
//! - JSON API for easy embedding

pub mod api;
pub mod error;
pub mod models;
pub mod parse;
pub mod sim;

// Re-export main API functions
pub use api::{
    parse_freeform_json, simulate_drive_json, simulate_play_json, DriveBatchResponse,
    SimDriveRequest, SimPlayRequest,
};
pub use error::{Result, SimError};
pub use models::{
    ActionSpec, ActionType, ContextSpec, DriveEnd, DrivePlay, DriveSummary, HashMark, PassArea,
    PassDepth, Personnel, PlayResult, PlaySpec, StateSpec,
};
pub use parse::{parse_freeform_to_spec, ParseRequest, ParseResponse};
pub use sim::{
    resolve_seed, simulate_drive_batch, simulate_drive_once, simulate_next_play, SimResult,
};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
