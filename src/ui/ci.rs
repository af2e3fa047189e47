//! GitHub Actions workflow-command annotations.

use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnotationLevel {
    Notice,
    Warning,
    Error,
}

impl AnnotationLevel {
    fn as_str(self) -> &'static str {
        match self {
            AnnotationLevel::Notice => "notice",
            AnnotationLevel::Warning => "warning",
            AnnotationLevel::Error => "error",
        }
    }
}

pub fn github_actions_annotation(
    level: AnnotationLevel,
    message: &str,
    file: Option<&str>,
    line: Option<usize>,
    title: Option<&str>,
) -> String {
    let mut props = Vec::new();
    if let Some(file) = file {
        props.push(format!("file={}", escape_workflow_command_property(file)));
    }
    if let Some(line) = line {
        props.push(format!("line={}", line));
    }
    if let Some(title) = title {
        props.push(format!("title={}", escape_workflow_command_property(title)));
    }

    let prop_str = if props.is_empty() {
        String::new()
    } else {
        format!(" {}", props.join(","))
    };

    format!(
        "::{}{}::{}",
        level.as_str(),
        prop_str,
        escape_workflow_command_message(message)
    )
}

fn escape_workflow_command_message(s: &str) -> String {
    s.replace('%', "%25").replace('\r', "%0D").replace('\n', "%0A")
}

// Properties additionally reserve `:` and `,`.
fn escape_workflow_command_property(s: &str) -> String {
    escape_workflow_command_message(s)
        .replace(':', "%3A")
        .replace(',', "%2C")
}

/// Line-oriented annotation sink.
///
/// Write failures are ignored: losing a log line must never change the
/// outcome of a deploy step.
pub struct CiLog<W: Write> {
    out: W,
}

impl<W: Write> CiLog<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn notice(&mut self, message: &str) {
        self.emit(AnnotationLevel::Notice, message, None, None);
    }

    pub fn warning(&mut self, message: &str) {
        self.emit(AnnotationLevel::Warning, message, None, None);
    }

    /// Warning anchored to a file location
    pub fn warning_at(&mut self, message: &str, file: &str, line: Option<usize>) {
        self.emit(AnnotationLevel::Warning, message, Some(file), line);
    }

    pub fn error(&mut self, message: &str) {
        self.emit(AnnotationLevel::Error, message, None, None);
    }

    /// Plain, unannotated output
    pub fn plain(&mut self, text: &str) {
        let _ = writeln!(self.out, "{}", text);
    }

    fn emit(
        &mut self,
        level: AnnotationLevel,
        message: &str,
        file: Option<&str>,
        line: Option<usize>,
    ) {
        let rendered = github_actions_annotation(level, message, file, line, None);
        let _ = writeln!(self.out, "{}", rendered);
        let _ = self.out.flush();
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl CiLog<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}
