//! Command implementations for nodefetch CLI

pub mod completions;
pub mod generate;
pub mod helpers;
pub mod history;
pub mod resolve;
pub mod scan;
pub mod validate;
pub mod version;
