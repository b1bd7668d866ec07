//! Windows batch dialect
//!
//! Detects the portable build's embedded interpreter (`..\python_embeded\python.exe`
//! relative to the application root) and routes every Python and pip call through it.

use super::single_line;
use crate::installer::dialect::DialectSyntax;

pub static SYNTAX: DialectSyntax = DialectSyntax {
    file_extension: "bat",
    line_ending: "\r\n",
    separator: '\\',
    prologue: &["@echo off", "setlocal"],
    environment: &[
        "set \"PYTHON=python\"",
        "if exist \"..\\python_embeded\\python.exe\" (",
        "    set \"PYTHON=%CD%\\..\\python_embeded\\python.exe\"",
        "    echo Using embedded Python: ..\\python_embeded\\python.exe",
        ") else (",
        "    echo Using system Python from PATH",
        ")",
    ],
    comment: "REM {{ text | comment }}",
    if_dir_missing: "if not exist {{ path | quote }} (",
    if_dir_present: "if exist {{ path | quote }} (",
    if_file_missing: "if not exist {{ path | quote }} (",
    if_file_present: "if exist {{ path | quote }} (",
    else_branch: ") else (",
    end_if: ")",
    ensure_dir: "if not exist {{ path | quote }} mkdir {{ path | quote }}",
    enter_dir: "pushd {{ path | quote }}",
    leave_dir: "popd",
    echo: "echo {{ text | echo }}",
    checked: "{{ command }} && (echo {{ ok | echo }}) || (echo {{ fail | echo }})",
    fetch: "powershell -NoProfile -ExecutionPolicy Bypass -Command \"$ProgressPreference = 'SilentlyContinue'; try { Invoke-WebRequest -Uri '{{ url | fetch }}' -OutFile '{{ dest | fetch }}' -UseBasicParsing -ErrorAction Stop; Write-Host '{{ ok | fetch }}' } catch { Write-Host '{{ fail | fetch }}' }\"",
    python: "\"%PYTHON%\"",
    pip: "\"%PYTHON%\" -m pip",
    epilogue: &["pause", "endlocal"],
    quote,
    escape_echo,
    escape_fetch,
    escape_comment,
};

/// Double `%` so cmd does not expand it as a variable
fn escape_percent(value: &str) -> String {
    single_line(value).replace('%', "%%")
}

/// Quoted argument; `"` cannot appear inside cmd quotes, so it is percent-encoded
fn quote(value: &str) -> String {
    format!("\"{}\"", escape_percent(value).replace('"', "%%22"))
}

/// Caret-escape cmd metacharacters in unquoted echo text
fn escape_echo(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in single_line(value).chars() {
        match c {
            '%' => out.push_str("%%"),
            '^' | '&' | '|' | '<' | '>' | '(' | ')' | '"' => {
                out.push('^');
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}

/// Values inside a PowerShell single-quoted string inside a cmd double-quoted argument
fn escape_fetch(value: &str) -> String {
    escape_percent(value)
        .replace('\'', "''")
        .replace('"', "%%22")
}

fn escape_comment(value: &str) -> String {
    escape_percent(value)
}
