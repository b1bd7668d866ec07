//! Error types and handling for nodefetch
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! This module is organized into sub-modules by error domain:
//! - [`workflow`]: Workflow document errors
//! - [`enrich`]: Enrichment collaborator errors
//! - [`config`]: Configuration errors
//! - [`fs`]: File system errors
//! - [`history`]: Download history errors

pub mod config;
pub mod enrich;
pub mod fs;
pub mod history;
pub mod workflow;

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for nodefetch operations
#[derive(Error, Diagnostic, Debug)]
pub enum NodefetchError {
    // Workflow errors
    #[error("Failed to parse workflow document: {reason}")]
    #[diagnostic(
        code(nodefetch::workflow::parse_failed),
        help("The workflow must be a JSON export (UI graph or API prompt format)")
    )]
    WorkflowParse { reason: String },

    #[error("No resources found in workflow")]
    #[diagnostic(
        code(nodefetch::workflow::no_resources),
        help(
            "The workflow only uses built-in nodes and references no model files. Nothing to install."
        )
    )]
    NoResources,

    // Enrichment errors
    #[error("Enrichment batch {batch} failed: {reason}")]
    #[diagnostic(code(nodefetch::enrich::batch_failed))]
    EnrichmentBatch { batch: usize, reason: String },

    #[error("Enrichment failed for every batch ({batches} attempted)")]
    #[diagnostic(
        code(nodefetch::enrich::failed),
        help("Check the guesses file, or run without --guesses to use the offline heuristics")
    )]
    EnrichmentFailed { batches: usize },

    // Review errors
    #[error("{failed} resource(s) failed validation")]
    #[diagnostic(
        code(nodefetch::validate::blocked),
        help("Fix the reported URLs in the resource list, or run without --strict to generate anyway")
    )]
    ValidationBlocked { failed: usize },

    #[error("Unsupported script dialect: {dialect}")]
    #[diagnostic(
        code(nodefetch::installer::unsupported_dialect),
        help("Supported dialects: posix (sh), batch (bat)")
    )]
    UnsupportedDialect { dialect: String },

    #[error("Failed to render install script: {reason}")]
    #[diagnostic(code(nodefetch::installer::render_failed))]
    ScriptRender { reason: String },

    // Configuration errors
    #[error("Failed to parse configuration file: {path}: {reason}")]
    #[diagnostic(code(nodefetch::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    #[error("Failed to read configuration file: {path}")]
    #[diagnostic(code(nodefetch::config::read_failed))]
    ConfigReadFailed { path: String, reason: String },

    #[error("Invalid configuration: {message}")]
    #[diagnostic(code(nodefetch::config::invalid))]
    ConfigInvalid { message: String },

    // File system errors
    #[error("Failed to read file: {path}: {reason}")]
    #[diagnostic(code(nodefetch::fs::read_failed))]
    FileReadFailed { path: String, reason: String },

    #[error("Failed to write file: {path}: {reason}")]
    #[diagnostic(code(nodefetch::fs::write_failed))]
    FileWriteFailed { path: String, reason: String },

    #[error("Invalid resource list: {path}: {reason}")]
    #[diagnostic(
        code(nodefetch::fs::invalid_resources),
        help("Resource lists are produced by 'nodefetch resolve' and must stay a JSON array")
    )]
    InvalidResourceList { path: String, reason: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(nodefetch::fs::io_error))]
    IoError { message: String },

    // History errors
    #[error("Download history operation failed: {message}")]
    #[diagnostic(
        code(nodefetch::history::failed),
        help("Set NODEFETCH_DATA_DIR to a writable directory")
    )]
    HistoryFailed { message: String },
}

impl From<std::io::Error> for NodefetchError {
    fn from(err: std::io::Error) -> Self {
        NodefetchError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for NodefetchError {
    fn from(err: serde_yaml::Error) -> Self {
        NodefetchError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for NodefetchError {
    fn from(err: serde_json::Error) -> Self {
        NodefetchError::WorkflowParse {
            reason: err.to_string(),
        }
    }
}

impl From<minijinja::Error> for NodefetchError {
    fn from(err: minijinja::Error) -> Self {
        NodefetchError::ScriptRender {
            reason: err.to_string(),
        }
    }
}

impl From<inquire::InquireError> for NodefetchError {
    fn from(err: inquire::InquireError) -> Self {
        NodefetchError::IoError {
            message: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, NodefetchError>;
