//! Bash dialect

use super::single_line;
use crate::installer::dialect::DialectSyntax;

pub static SYNTAX: DialectSyntax = DialectSyntax {
    file_extension: "sh",
    line_ending: "\n",
    separator: '/',
    prologue: &["#!/usr/bin/env bash"],
    environment: &[],
    comment: "# {{ text | comment }}",
    if_dir_missing: "if [ ! -d {{ path | quote }} ]; then",
    if_dir_present: "if [ -d {{ path | quote }} ]; then",
    if_file_missing: "if [ ! -f {{ path | quote }} ]; then",
    if_file_present: "if [ -f {{ path | quote }} ]; then",
    else_branch: "else",
    end_if: "fi",
    ensure_dir: "mkdir -p {{ path | quote }}",
    enter_dir: "pushd {{ path | quote }} > /dev/null",
    leave_dir: "popd > /dev/null",
    echo: "echo \"{{ text | echo }}\"",
    checked: "{{ command }} && echo \"{{ ok | echo }}\" || echo \"{{ fail | echo }}\"",
    fetch: "wget -c \"{{ url | fetch }}\" -O \"{{ dest | fetch }}\" && echo \"{{ ok | fetch }}\" || echo \"{{ fail | fetch }}\"",
    python: "python",
    pip: "pip",
    epilogue: &[],
    quote,
    escape_echo: escape_double_quoted,
    escape_fetch: escape_double_quoted,
    escape_comment: single_line,
};

/// Escape the characters bash still interprets inside double quotes
fn escape_double_quoted(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in single_line(value).chars() {
        if matches!(c, '\\' | '"' | '$' | '`') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

fn quote(value: &str) -> String {
    format!("\"{}\"", escape_double_quoted(value))
}
