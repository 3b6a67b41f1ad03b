//! Tool-level errors.
//!
//! Protocol-level faults are handled where they occur (per walk step, per
//! rename row) and never bubble up as `Err`; what remains here is the
//! misconfiguration and setup surface that must fail the whole run before
//! any protocol operation is attempted.

/// Result type alias using the tool's Error type.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Reading the interactive target prompt failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Building or connecting the SNMP session failed.
    #[error(transparent)]
    Snmp(#[from] async_snmp::Error),
}
