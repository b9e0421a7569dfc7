use mg_core::ActivityId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BehaviorError {
    #[error("invalid timing: min duration {min} exceeds max duration {max}")]
    InvalidTiming { min: u64, max: u64 },

    #[error("activity {0} is not registered with this brain")]
    UnknownActivity(ActivityId),

    #[error("activity {0} is registered twice")]
    DuplicateActivity(ActivityId),
}

pub type BehaviorResult<T> = Result<T, BehaviorError>;
