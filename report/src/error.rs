//! Error types for report synthesis.
//!
//! Only static configuration and graph access can fail. Everything a result
//! graph may omit is resolved by defaulting rules, never by an error.

use thiserror::Error;

/// Result type for report synthesis operations.
pub type Result<T> = std::result::Result<T, ReportError>;

/// Report synthesis and configuration errors.
#[derive(Debug, Error)]
pub enum ReportError {
    /// An additional info template has malformed placeholder syntax.
    #[error("Invalid additional info template '{template}': {message}")]
    InvalidTemplate {
        /// The template text as configured.
        template: String,
        /// What is wrong with it.
        message: String,
    },

    /// The requested report locale is not a valid locale identifier.
    #[error("Invalid locale '{0}'")]
    InvalidLocale(String),

    /// The underlying RDF graph failed while being read.
    #[error("Graph access failed: {0}")]
    Graph(String),

    /// The report configuration file could not be parsed.
    #[error("Invalid report configuration: {0}")]
    Config(#[from] toml::de::Error),
}

impl ReportError {
    /// Wraps an error raised by an RDF graph implementation.
    pub fn graph(err: impl std::error::Error) -> Self {
        ReportError::Graph(err.to_string())
    }
}
