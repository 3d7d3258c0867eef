//! Human-facing progress reporting.
//!
//! Every line is a verb padded to a fixed column, then a message, written to
//! stderr. stdout stays free for palettes and completion scripts that other
//! tools consume.

use std::io::{self, IsTerminal, Write};
use std::path::Path;

const VERB_COLUMN: usize = 12;

const RESET: &str = "\x1b[0m";
const DIM: &str = "\x1b[2m";
const CYAN: &str = "\x1b[36m";

/// How a status line is coloured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tone {
    Progress,
    Note,
    Caution,
    Failure,
}

impl Tone {
    fn ansi(self) -> &'static str {
        match self {
            Tone::Progress => "\x1b[1;32m",
            Tone::Note => "\x1b[1;36m",
            Tone::Caution => "\x1b[1;33m",
            Tone::Failure => "\x1b[1;31m",
        }
    }
}

/// Writes status lines, with ANSI colour when stderr is a terminal.
pub struct Printer {
    color: bool,
}

impl Printer {
    pub fn new() -> Self {
        Self::with_color(io::stderr().is_terminal())
    }

    pub fn with_color(color: bool) -> Self {
        Self { color }
    }

    /// A step of the job, such as `Running` or `Generated`.
    pub fn status(&self, verb: &str, message: &str) {
        self.emit(Tone::Progress, verb, message);
    }

    pub fn success(&self, verb: &str, message: &str) {
        self.emit(Tone::Progress, verb, message);
    }

    pub fn info(&self, verb: &str, message: &str) {
        self.emit(Tone::Note, verb, message);
    }

    pub fn warning(&self, verb: &str, message: &str) {
        self.emit(Tone::Caution, verb, message);
    }

    pub fn error(&self, verb: &str, message: &str) {
        self.emit(Tone::Failure, verb, message);
    }

    /// De-emphasised text, used for command lines.
    pub fn dim(&self, text: &str) -> String {
        self.paint(DIM, text)
    }

    pub fn cyan(&self, text: &str) -> String {
        self.paint(CYAN, text)
    }

    fn paint(&self, code: &str, text: &str) -> String {
        if self.color {
            format!("{code}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn line(&self, tone: Tone, verb: &str, message: &str) -> String {
        let verb = format!("{verb:>VERB_COLUMN$}");
        format!("{} {message}", self.paint(tone.ansi(), &verb))
    }

    fn emit(&self, tone: Tone, verb: &str, message: &str) {
        let _ = writeln!(io::stderr().lock(), "{}", self.line(tone, verb, message));
    }
}

/// `"1 tile"`, `"3 tiles"`.
pub fn plural(n: usize, singular: &str, many: &str) -> String {
    let noun = if n == 1 { singular } else { many };
    format!("{n} {noun}")
}

/// `path` relative to the working directory when it lies beneath it.
pub fn display_path(path: &Path) -> String {
    let relative = std::env::current_dir()
        .ok()
        .and_then(|cwd| path.strip_prefix(cwd).ok().map(Path::to_path_buf));
    match relative {
        Some(rel) if rel.as_os_str().is_empty() => ".".to_string(),
        Some(rel) => rel.display().to_string(),
        None => path.display().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plural() {
        assert_eq!(plural(1, "tile", "tiles"), "1 tile");
        assert_eq!(plural(0, "job", "jobs"), "0 jobs");
        assert_eq!(plural(5, "unique tile", "unique tiles"), "5 unique tiles");
    }

    #[test]
    fn test_verbs_share_a_column() {
        let printer = Printer::with_color(false);
        assert_eq!(printer.line(Tone::Progress, "Running", "job"), "     Running job");
        assert_eq!(printer.line(Tone::Failure, "Failed", "job"), "      Failed job");
    }

    #[test]
    fn test_colour_wraps_padded_verb() {
        let printer = Printer::with_color(true);
        assert_eq!(
            printer.line(Tone::Caution, "Warning", "x"),
            "\x1b[1;33m     Warning\x1b[0m x"
        );
        assert_eq!(printer.dim("x"), "\x1b[2mx\x1b[0m");
    }

    #[test]
    fn test_plain_text_without_colour() {
        let printer = Printer::with_color(false);
        assert_eq!(printer.cyan("artifacts/hero"), "artifacts/hero");
        assert_eq!(printer.dim("aseprite -b"), "aseprite -b");
    }

    #[test]
    fn test_display_path_relative_to_cwd() {
        let cwd = std::env::current_dir().unwrap();
        assert_eq!(
            display_path(&cwd.join("artifacts").join("j1")),
            format!("artifacts{}j1", std::path::MAIN_SEPARATOR)
        );
        assert_eq!(display_path(&cwd), ".");
    }

    #[test]
    fn test_display_path_outside_cwd() {
        assert_eq!(display_path(Path::new("/nonexistent/job")), "/nonexistent/job");
    }
}
