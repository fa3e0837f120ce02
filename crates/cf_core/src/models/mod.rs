pub mod drive;
pub mod spec;

pub use drive::{DriveEnd, DrivePlay, DriveSummary, PlayResult};
pub use spec::{
    ActionSpec, ActionType, ContextSpec, HashMark, PassArea, PassDepth, Personnel, PlaySpec,
    StateSpec,
};
