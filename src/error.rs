// sprinkler-console/src/error.rs

use thiserror::Error;

/// Failures surfaced by sessions, stores, and the clock codec.
#[derive(Debug, Error)]
pub enum Error {
    /// The backend was unreachable, answered with a non-success status, or
    /// returned a body that does not parse as a configuration document. The
    /// message carries which; recovery is the same either way.
    #[error("connection failed: {0}")]
    Connection(String),

    #[error("invalid time format {0:?} (expected HH:MM:SS)")]
    InvalidTimeFormat(String),

    #[error("a write is already in flight")]
    WriteInFlight,

    #[error("a load is already in flight")]
    LoadInFlight,

    /// A commit was requested before the first successful load.
    #[error("not connected; load the configuration first")]
    NotConnected,

    #[error("no schedule event at index {0}")]
    NoSuchEvent(usize),
}

pub type Result<T> = std::result::Result<T, Error>;
