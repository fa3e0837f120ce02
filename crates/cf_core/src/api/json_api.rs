//! JSON entry points
//!
//! String-in/string-out wrappers for embedding callers (CLI, service
//! glue). Each parses the request, validates and autofixes the embedded
//! spec, runs the simulation and serializes the response.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::{DriveSummary, PlaySpec};
use crate::parse::{parse_freeform_to_spec, ParseRequest};
use crate::sim::{simulate_drive_batch, simulate_next_play};

fn default_play_trials() -> usize {
    1000
}

fn default_drive_count() -> usize {
    1
}

/// Single-play simulation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimPlayRequest {
    pub spec: PlaySpec,
    #[serde(default = "default_play_trials")]
    pub n: usize,
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Drive simulation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimDriveRequest {
    pub spec: PlaySpec,
    #[serde(default = "default_drive_count")]
    pub n: usize,
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Batch of independent drives plus the base seed that replays them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriveBatchResponse {
    pub drives: Vec<DriveSummary>,
    pub seed: u64,
}

/// `{ text, offense, defense }` → `{ spec, warnings }`.
pub fn parse_freeform_json(request_json: &str) -> Result<String> {
    let request: ParseRequest = serde_json::from_str(request_json)?;
    let response = parse_freeform_to_spec(&request)?;
    Ok(serde_json::to_string(&response)?)
}

/// `{ spec, n?, seed? }` → `SimResult` JSON. Autofix warnings are
/// appended to the result's assumption notes.
pub fn simulate_play_json(request_json: &str) -> Result<String> {
    let request: SimPlayRequest = serde_json::from_str(request_json)?;
    let mut spec = request.spec;
    spec.validate()?;
    let warnings = spec.autofix();
    let mut result = simulate_next_play(&spec, request.n, request.seed)?;
    result.assumptions.extend(warnings);
    Ok(serde_json::to_string(&result)?)
}

/// `{ spec, n?, seed? }` → `{ drives, seed }` JSON.
pub fn simulate_drive_json(request_json: &str) -> Result<String> {
    let request: SimDriveRequest = serde_json::from_str(request_json)?;
    let mut spec = request.spec;
    spec.validate()?;
    spec.autofix();
    let (drives, seed) = simulate_drive_batch(&spec, request.n, request.seed)?;
    Ok(serde_json::to_string(&DriveBatchResponse { drives, seed })?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn spec_json() -> serde_json::Value {
        json!({
            "state": {
                "offense": "KC",
                "defense": "BUF",
                "quarter": 4,
                "clock_seconds": 300,
                "down": 1,
                "distance": 10,
                "yardline_100": 75
            },
            "action": { "type": "RUN" }
        })
    }

    #[test]
    fn parse_endpoint_round_trip() {
        let request = json!({
            "text": "3rd & 7 Q4 2:00 at KC 35, play action deep pass right",
            "offense": "KC",
            "defense": "BUF"
        });
        let out = parse_freeform_json(&request.to_string()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed["spec"]["state"]["down"], 3);
        assert_eq!(parsed["spec"]["state"]["yardline_100"], 65);
        assert_eq!(parsed["spec"]["action"]["type"], "PASS");
        assert_eq!(parsed["spec"]["action"]["pass_depth"], "DEEP");
        assert_eq!(parsed["spec"]["action"]["play_action"], true);
    }

    #[test]
    fn play_endpoint_applies_defaults_and_echoes_seed() {
        let request = json!({ "spec": spec_json(), "seed": 42 });
        let out = simulate_play_json(&request.to_string()).unwrap();
        let result: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(result["seed"], 42);
        assert!(result["yards_mean"].is_number());
        assert!(result["assumptions"].is_array());
    }

    #[test]
    fn play_endpoint_rejects_invalid_spec() {
        let mut bad = spec_json();
        bad["state"]["down"] = json!(7);
        let request = json!({ "spec": bad, "seed": 1 });
        assert!(simulate_play_json(&request.to_string()).is_err());
    }

    #[test]
    fn play_endpoint_rejects_unknown_action_type() {
        let mut bad = spec_json();
        bad["action"]["type"] = json!("ONSIDE_KICK");
        let request = json!({ "spec": bad });
        assert!(simulate_play_json(&request.to_string()).is_err());
    }

    #[test]
    fn drive_endpoint_returns_batch_with_seed() {
        let request = json!({ "spec": spec_json(), "n": 3, "seed": 9 });
        let out = simulate_drive_json(&request.to_string()).unwrap();
        let result: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(result["seed"], 9);
        assert_eq!(result["drives"].as_array().unwrap().len(), 3);
        let ended = result["drives"][0]["ended"].as_str().unwrap();
        assert!(["TD", "FG_GOOD", "FG_MISS", "PUNT", "DOWNS", "EXHAUSTED"].contains(&ended));
    }

    #[test]
    fn drive_endpoint_defaults_to_one_drive() {
        let request = json!({ "spec": spec_json(), "seed": 11 });
        let out = simulate_drive_json(&request.to_string()).unwrap();
        let result: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(result["drives"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn drive_endpoint_rejects_oversized_batch() {
        let request = json!({ "spec": spec_json(), "n": 50 });
        assert!(simulate_drive_json(&request.to_string()).is_err());
    }
}
