pub mod phase;
pub mod record;

pub use phase::{Phase, PhaseValues};
pub use record::{
    NormalizedRecord, ParseFieldError, PhaseShares, Profile, Record, SHARE_TOLERANCE, Scenario,
    ShareError, TargetKind,
};
