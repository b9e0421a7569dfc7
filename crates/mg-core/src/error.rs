//! Framework error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant via `#[from]`.  Nothing on the per-tick path returns an error;
//! these only surface while configuring a run.

use thiserror::Error;

/// The base error type for `mg-core` and a common variant for sub-crates.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for all `mg-*` crates.
pub type CoreResult<T> = Result<T, CoreError>;
