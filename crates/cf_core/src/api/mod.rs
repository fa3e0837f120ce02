pub mod json_api;

pub use json_api::{
    parse_freeform_json, simulate_drive_json, simulate_play_json, DriveBatchResponse,
    SimDriveRequest, SimPlayRequest,
};
