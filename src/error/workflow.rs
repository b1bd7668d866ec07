//! Workflow document errors

use super::NodefetchError;

/// The document is not well-formed JSON, or is JSON of an unsupported top-level shape
pub fn parse_failed(reason: impl Into<String>) -> NodefetchError {
    NodefetchError::WorkflowParse {
        reason: reason.into(),
    }
}
