//! Error types for transformation passes

use roast_rules::RuleError;
use serde::Serialize;
use thiserror::Error;

/// What is wrong with a raw record
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
pub enum RecordDefect {
    /// Fewer fields than the positional contract requires
    #[error("expected at least {expected} fields, found {found}")]
    TooShort {
        /// Required arity
        expected: usize,
        /// Fields present
        found: usize,
    },

    /// A field the interaction name is built from is empty
    #[error("empty {0} field")]
    EmptyField(&'static str),

    /// Date token is not `YYYYMMDDHHMM`
    #[error("unparsable date token '{0}'")]
    BadDate(String),
}

/// A raw record that was skipped
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[error("Malformed record #{index}: {defect}")]
pub struct MalformedRecord {
    /// Position of the record in the input
    pub index: usize,
    /// Why it was rejected
    pub defect: RecordDefect,
}

/// Errors that can occur during a transformation pass
#[derive(Error, Debug)]
pub enum TransformError {
    /// Rule file missing or a required rule absent; fatal
    #[error("Configuration error: {0}")]
    Configuration(#[from] RuleError),

    /// Raw record rejected; the pass skips it and counts it
    #[error(transparent)]
    MalformedRecord(#[from] MalformedRecord),

    /// Interaction count does not match the accepted record count; fatal
    #[error("Consistency error: expected {expected} interactions, produced {produced}")]
    Consistency {
        /// Accepted records
        expected: usize,
        /// Interactions produced
        produced: usize,
    },

    /// Invalid materializer configuration
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Result type for transformation operations
pub type Result<T> = std::result::Result<T, TransformError>;
