//! nodefetch - workflow dependency installer generator
//!
//! A pipeline of three stages, run strictly in order:
//! 1. [`scanner`] extracts custom node types and model files from a workflow document
//! 2. [`resolver`] folds external guesses into editable [`domain::EnrichedResource`]s
//!    and validates their download links
//! 3. [`installer`] synthesizes an idempotent install script in one of two dialects
//!
//! The command line front end lives in [`cli`] and [`commands`].

pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod error;
pub mod history;
pub mod installer;
pub mod logging;
pub mod progress;
pub mod resolver;
pub mod scanner;
pub mod ui;

pub use error::{NodefetchError, Result};
