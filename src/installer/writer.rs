//! Line buffer for generated scripts

use minijinja::{Environment, Value, context};

use super::dialect::{DialectSyntax, Fragment};
use crate::error::Result;

const INDENT: &str = "    ";

/// Accumulates script lines with block indentation
pub(super) struct ScriptWriter<'a> {
    syntax: &'a DialectSyntax,
    templates: Environment<'static>,
    lines: Vec<String>,
    depth: usize,
}

impl<'a> ScriptWriter<'a> {
    pub(super) fn new(syntax: &'a DialectSyntax) -> Result<Self> {
        Ok(Self {
            syntax,
            templates: syntax.templates()?,
            lines: Vec::new(),
            depth: 0,
        })
    }

    pub(super) fn syntax(&self) -> &'a DialectSyntax {
        self.syntax
    }

    fn render(&self, fragment: Fragment, values: Value) -> Result<String> {
        Ok(self
            .templates
            .get_template(fragment.name())?
            .render(values)?)
    }

    /// Render an ad-hoc template with this dialect's filters
    pub(super) fn render_str(&self, source: &str, values: Value) -> Result<String> {
        Ok(self.templates.render_str(source, values)?)
    }

    pub(super) fn line(&mut self, line: impl AsRef<str>) {
        let line = line.as_ref();
        if line.is_empty() {
            self.lines.push(String::new());
        } else {
            self.lines.push(format!("{}{line}", INDENT.repeat(self.depth)));
        }
    }

    pub(super) fn blank(&mut self) {
        self.lines.push(String::new());
    }

    pub(super) fn comment(&mut self, text: &str) -> Result<()> {
        let line = self.render(Fragment::Comment, context! { text })?;
        self.line(line);
        Ok(())
    }

    pub(super) fn echo(&mut self, text: &str) -> Result<()> {
        let line = self.render(Fragment::Echo, context! { text })?;
        self.line(line);
        Ok(())
    }

    /// A command whose outcome is reported but never aborts the script
    pub(super) fn checked(&mut self, command: &str, ok: &str, fail: &str) -> Result<()> {
        let line = self.render(Fragment::Checked, context! { command, ok, fail })?;
        self.line(line);
        Ok(())
    }

    /// A download whose outcome is reported but never aborts the script
    pub(super) fn fetch(&mut self, url: &str, dest: &str, ok: &str, fail: &str) -> Result<()> {
        let line = self.render(Fragment::Fetch, context! { url, dest, ok, fail })?;
        self.line(line);
        Ok(())
    }

    /// Emit a path fragment such as [`Fragment::EnsureDir`]
    pub(super) fn path_line(&mut self, fragment: Fragment, path: &str) -> Result<()> {
        let line = self.render(fragment, context! { path })?;
        self.line(line);
        Ok(())
    }

    /// Open a conditional block on `path`
    pub(super) fn open(&mut self, condition: Fragment, path: &str) -> Result<()> {
        self.path_line(condition, path)?;
        self.depth += 1;
        Ok(())
    }

    pub(super) fn else_branch(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.line(self.syntax.else_branch);
        self.depth += 1;
    }

    pub(super) fn close(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.line(self.syntax.end_if);
    }

    pub(super) fn finish(self) -> String {
        let ending = self.syntax.line_ending;
        let mut out = self.lines.join(ending);
        out.push_str(ending);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::installer::Dialect;

    #[test]
    fn test_blocks_are_indented() {
        let mut writer = ScriptWriter::new(Dialect::Posix.syntax()).unwrap();
        writer.open(Fragment::IfDirMissing, "bar").unwrap();
        writer.echo("missing").unwrap();
        writer.else_branch();
        writer.echo("present").unwrap();
        writer.close();
        assert_eq!(
            writer.finish(),
            "if [ ! -d \"bar\" ]; then\n    echo \"missing\"\nelse\n    echo \"present\"\nfi\n"
        );
    }

    #[test]
    fn test_batch_uses_crlf() {
        let mut writer = ScriptWriter::new(Dialect::Batch.syntax()).unwrap();
        writer.comment("100% done").unwrap();
        writer.blank();
        assert_eq!(writer.finish(), "REM 100%% done\r\n\r\n");
    }

    #[test]
    fn test_render_str_uses_dialect_filters() {
        let writer = ScriptWriter::new(Dialect::Batch.syntax()).unwrap();
        let rendered = writer
            .render_str("git clone {{ url | quote }}", context! { url => "https://x/a%b" })
            .unwrap();
        assert_eq!(rendered, "git clone \"https://x/a%%b\"");
    }
}
