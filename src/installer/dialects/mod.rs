//! Built-in dialect descriptions
//!
//! - **posix**: bash, `wget -c` for resumable downloads, tools from `PATH`
//! - **batch**: Windows cmd, PowerShell `Invoke-WebRequest` for downloads, prefers the
//!   portable build's embedded Python when present

pub mod batch;
pub mod posix;

/// Collapse line breaks so a value can never start a new script line
pub(crate) fn single_line(value: &str) -> String {
    value.replace(['\r', '\n'], " ")
}
