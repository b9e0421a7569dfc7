use mg_behavior::BehaviorError;
use mg_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("{what} length {got} does not match agent count {expected}")]
    AgentCountMismatch {
        expected: usize,
        got:      usize,
        what:     &'static str,
    },

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Behavior(#[from] BehaviorError),

    #[error("failed to build worker pool: {0}")]
    ThreadPool(String),
}

pub type SimResult<T> = Result<T, SimError>;
