use std::io;
use thiserror::Error;

/// Failures surfaced to the caller. Internal invariant violations are not
/// represented here; those abort via `assert!`/`panic!`.
#[derive(Debug, Error)]
pub enum Error {
    #[error("could not read input: {0}")]
    Io(#[from] io::Error),
    #[error("malformed input: {0}")]
    MalformedInput(String),
    #[error("usage: {0}")]
    Usage(String),
}
