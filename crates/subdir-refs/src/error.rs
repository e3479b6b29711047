//! Error types for refspec and dirspec operations.

use thiserror::Error;

/// Errors that can occur while parsing or applying ref and directory specs.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SpecError {
    /// The refspec text is not a `[+]left*:right*` glob pair.
    #[error("invalid refspec: {spec}: {reason}")]
    InvalidRefSpec { spec: String, reason: String },

    /// The dirspec text is not a relative `left:right` pair.
    #[error("invalid dirspec: {dirspec}: {reason}")]
    InvalidDirSpec { dirspec: String, reason: String },

    /// The dirspec requires tree rewriting, which is not available.
    #[error("unsupported dirspec: {dirspec}: {reason}")]
    UnsupportedDirSpec { dirspec: String, reason: String },

    /// The remote name cannot be embedded in ref prefixes or config keys.
    #[error("invalid remote name: {name}: {reason}")]
    InvalidRemoteName { name: String, reason: String },
}

/// Convenience type alias for spec operations.
pub type Result<T> = std::result::Result<T, SpecError>;
