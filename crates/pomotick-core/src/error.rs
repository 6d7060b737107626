//! Core error types for pomotick-core.
//!
//! The state machine itself has no fallible operations: a rejected
//! transition is reported through a `false` return, never an error. What can
//! genuinely fail is resolving user-supplied text into a command, which is a
//! caller defect and surfaces as an explicit error here.

use thiserror::Error;

/// Core error type for pomotick-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// A symbolic command name matching none of the seven commands.
    #[error("unknown command: {0}")]
    UnknownCommand(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
