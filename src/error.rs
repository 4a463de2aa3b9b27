//! Error types for pipecfg.
//!
//! Uses thiserror for derive macros. Every message names the offending file
//! or configuration key so the user can fix it without a debugger.

use crate::exit_codes;
use thiserror::Error;

/// Main error type for pipecfg operations.
#[derive(Error, Debug)]
pub enum PipecfgError {
    /// Invalid arguments, unreadable files, or an unknown variant.
    #[error("{0}")]
    UserError(String),

    /// The configuration could not be parsed or a value is out of range.
    #[error("invalid configuration: {0}")]
    SchemaError(String),

    /// A glob pattern in the configuration does not compile.
    #[error("invalid glob pattern: {0}")]
    GlobError(String),

    /// Files referenced by the configuration do not exist.
    #[error("missing referenced files: {0}")]
    MissingReferences(String),
}

impl PipecfgError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            PipecfgError::UserError(_) => exit_codes::USER_ERROR,
            PipecfgError::SchemaError(_) => exit_codes::CONFIG_ERROR,
            PipecfgError::GlobError(_) => exit_codes::CONFIG_ERROR,
            PipecfgError::MissingReferences(_) => exit_codes::MISSING_REFERENCES,
        }
    }
}

/// Result type alias for pipecfg operations.
pub type Result<T> = std::result::Result<T, PipecfgError>;
