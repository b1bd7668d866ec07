//! Script dialects
//!
//! A dialect is described by a [`DialectSyntax`] record: the handful of fragments the
//! shared templates need (conditionals, directory moves, echo, checked commands, the
//! download primitive) plus the escaping rules for values spliced into them. The
//! templates never branch on the dialect themselves.

use std::fmt;
use std::str::FromStr;

use minijinja::{Environment, UndefinedBehavior};

use crate::error::{NodefetchError, Result};

use super::dialects::{batch, posix};

/// Target script dialect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Dialect {
    /// Bash script, tools taken from `PATH`
    #[default]
    Posix,
    /// Windows batch file with embedded-interpreter detection
    Batch,
}

impl Dialect {
    pub fn syntax(self) -> &'static DialectSyntax {
        match self {
            Dialect::Posix => &posix::SYNTAX,
            Dialect::Batch => &batch::SYNTAX,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Dialect::Posix => "posix",
            Dialect::Batch => "batch",
        }
    }

    /// Default output file name for generated scripts
    pub fn default_file_name(self) -> String {
        format!("install_resources.{}", self.syntax().file_extension)
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Dialect {
    type Err = NodefetchError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "posix" | "sh" | "bash" | "linux" | "macos" => Ok(Dialect::Posix),
            "batch" | "bat" | "cmd" | "windows" => Ok(Dialect::Batch),
            _ => Err(NodefetchError::UnsupportedDialect {
                dialect: s.to_string(),
            }),
        }
    }
}

/// Fragments and escaping rules for one dialect
///
/// Fragments are minijinja templates. `path` is quoted with the `quote` filter, free
/// text goes through `echo` (or `comment`), values inside the download primitive go
/// through `fetch`. `command` is spliced as it is.
pub struct DialectSyntax {
    pub file_extension: &'static str,
    pub line_ending: &'static str,
    pub separator: char,
    /// Lines before the header comment
    pub prologue: &'static [&'static str],
    /// Interpreter detection, run once before any resource block
    pub environment: &'static [&'static str],
    pub comment: &'static str,
    pub if_dir_missing: &'static str,
    pub if_dir_present: &'static str,
    pub if_file_missing: &'static str,
    pub if_file_present: &'static str,
    pub else_branch: &'static str,
    pub end_if: &'static str,
    pub ensure_dir: &'static str,
    pub enter_dir: &'static str,
    pub leave_dir: &'static str,
    pub echo: &'static str,
    /// Run `command`, then echo `ok` or `fail` without aborting the script
    pub checked: &'static str,
    /// Resumable or scripted HTTP fetch of `url` into `dest`, reporting `ok`/`fail`
    pub fetch: &'static str,
    pub python: &'static str,
    pub pip: &'static str,
    /// Lines after the trailer comment
    pub epilogue: &'static [&'static str],
    /// Wrap a value in double quotes for use as a command argument
    pub quote: fn(&str) -> String,
    /// Escape free text for `echo`
    pub escape_echo: fn(&str) -> String,
    /// Escape a value for the inside of the fetch primitive
    pub escape_fetch: fn(&str) -> String,
    /// Escape free text for a comment line
    pub escape_comment: fn(&str) -> String,
}

/// Templated fragments of a dialect, used as template names
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Fragment {
    Comment,
    IfDirMissing,
    IfDirPresent,
    IfFileMissing,
    IfFilePresent,
    EnsureDir,
    EnterDir,
    Echo,
    Checked,
    Fetch,
}

impl Fragment {
    const ALL: [Fragment; 10] = [
        Fragment::Comment,
        Fragment::IfDirMissing,
        Fragment::IfDirPresent,
        Fragment::IfFileMissing,
        Fragment::IfFilePresent,
        Fragment::EnsureDir,
        Fragment::EnterDir,
        Fragment::Echo,
        Fragment::Checked,
        Fragment::Fetch,
    ];

    pub(crate) fn name(self) -> &'static str {
        match self {
            Fragment::Comment => "comment",
            Fragment::IfDirMissing => "if_dir_missing",
            Fragment::IfDirPresent => "if_dir_present",
            Fragment::IfFileMissing => "if_file_missing",
            Fragment::IfFilePresent => "if_file_present",
            Fragment::EnsureDir => "ensure_dir",
            Fragment::EnterDir => "enter_dir",
            Fragment::Echo => "echo",
            Fragment::Checked => "checked",
            Fragment::Fetch => "fetch",
        }
    }
}

impl DialectSyntax {
    /// Join path segments with the dialect's separator
    ///
    /// Both `/` and `\` are accepted as input separators; empty, `.` and `..`
    /// segments are dropped so a path can never climb out of the install root.
    pub fn join_path<'a>(&self, parts: impl IntoIterator<Item = &'a str>) -> String {
        let separator = self.separator.to_string();
        parts
            .into_iter()
            .flat_map(|part| part.split(['/', '\\']))
            .map(str::trim)
            .filter(|segment| !segment.is_empty() && *segment != "." && *segment != "..")
            .collect::<Vec<_>>()
            .join(&separator)
    }

    fn source(&self, fragment: Fragment) -> &'static str {
        match fragment {
            Fragment::Comment => self.comment,
            Fragment::IfDirMissing => self.if_dir_missing,
            Fragment::IfDirPresent => self.if_dir_present,
            Fragment::IfFileMissing => self.if_file_missing,
            Fragment::IfFilePresent => self.if_file_present,
            Fragment::EnsureDir => self.ensure_dir,
            Fragment::EnterDir => self.enter_dir,
            Fragment::Echo => self.echo,
            Fragment::Checked => self.checked,
            Fragment::Fetch => self.fetch,
        }
    }

    /// Template environment with every fragment loaded and this dialect's escaping
    /// registered as the `quote`, `echo`, `fetch` and `comment` filters
    ///
    /// Undefined variables are errors, so a fragment can never silently render a
    /// blank argument.
    ///
    /// # Errors
    ///
    /// Returns `NodefetchError::ScriptRender` if a fragment is not a valid template.
    pub(crate) fn templates(&self) -> Result<Environment<'static>> {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);

        let (quote, echo, fetch, comment) = (
            self.quote,
            self.escape_echo,
            self.escape_fetch,
            self.escape_comment,
        );
        env.add_filter("quote", move |value: String| quote(&value));
        env.add_filter("echo", move |value: String| echo(&value));
        env.add_filter("fetch", move |value: String| fetch(&value));
        env.add_filter("comment", move |value: String| comment(&value));

        for fragment in Fragment::ALL {
            env.add_template(fragment.name(), self.source(fragment))?;
        }
        Ok(env)
    }
}
