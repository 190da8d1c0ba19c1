//! Error types for rule loading and resolution

use std::path::PathBuf;
use thiserror::Error;

/// Configuration errors raised by the rule store
///
/// Every variant is fatal for a transformation pass.
#[derive(Error, Debug)]
pub enum RuleError {
    /// Rule file missing or unreadable
    #[error("Failed to read rule file {}: {source}", path.display())]
    FileRead {
        /// Path that could not be read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Rule file is not well-formed
    #[error("Failed to parse {origin} at line {line}: {message}")]
    Parse {
        /// Rule file the error was found in
        origin: String,
        /// 1-based line number
        line: usize,
        /// Description of the problem
        message: String,
    },

    /// Neither the override nor the default resolved
    #[error(
        "Missing rule in {origin}: no entry for '{entity}' in [{section}] and no '{default_key}' in [{default_section}]"
    )]
    MissingKey {
        /// Rule file consulted
        origin: String,
        /// Entity name looked up
        entity: String,
        /// Override section
        section: String,
        /// Fallback key
        default_key: String,
        /// Fallback section
        default_section: String,
    },

    /// A default key a transformer depends on is absent
    #[error("Missing default '{key}' in [{section}] of {origin}")]
    MissingDefault {
        /// Rule file consulted
        origin: String,
        /// Default section
        section: String,
        /// Key that was required
        key: String,
    },

    /// A required section is absent
    #[error("Missing section [{section}] in {origin}")]
    MissingSection {
        /// Rule file consulted
        origin: String,
        /// Section that was required
        section: String,
    },

    /// A value exists but cannot be interpreted
    #[error("Invalid value for '{key}' in [{section}] of {origin}: {message}")]
    InvalidValue {
        /// Rule file consulted
        origin: String,
        /// Section holding the value
        section: String,
        /// Key holding the value
        key: String,
        /// Description of the problem
        message: String,
    },
}
