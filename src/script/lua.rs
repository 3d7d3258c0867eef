//! Minimal Lua source writer.

use crate::types::{IndexedPalette, PixelTemplate};

const INDENT: &str = "  ";

/// Accumulates Lua source with block indentation.
#[derive(Debug, Default)]
pub struct LuaWriter {
    out: String,
    depth: usize,
}

impl LuaWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write one line at the current depth.
    pub fn line(&mut self, text: &str) -> &mut Self {
        if text.is_empty() {
            self.out.push('\n');
            return self;
        }
        for _ in 0..self.depth {
            self.out.push_str(INDENT);
        }
        self.out.push_str(text);
        self.out.push('\n');
        self
    }

    pub fn blank(&mut self) -> &mut Self {
        self.line("")
    }

    /// Write a line that opens a block and indent what follows.
    pub fn open(&mut self, text: &str) -> &mut Self {
        self.line(text);
        self.depth += 1;
        self
    }

    /// Dedent and write the closing line.
    pub fn close(&mut self, text: &str) -> &mut Self {
        self.depth = self.depth.saturating_sub(1);
        self.line(text)
    }

    /// A template's rows as a table of quoted strings, opened by `head`
    /// and closed by `tail`.
    pub fn rows_table(&mut self, head: &str, template: &PixelTemplate, tail: &str) -> &mut Self {
        self.open(head);
        for row in template.text_rows() {
            self.line(&format!("{},", quote(&row)));
        }
        self.close(tail)
    }

    /// `local NAME = { {r, g, b, a}, ... }` in index order.
    pub fn palette_table(&mut self, name: &str, palette: &IndexedPalette) -> &mut Self {
        self.open(&format!("local {} = {{", name));
        for colour in palette.entries() {
            self.line(&format!(
                "{{ {}, {}, {}, {} }},",
                colour.r, colour.g, colour.b, colour.a
            ));
        }
        self.close("}")
    }

    pub fn finish(self) -> String {
        self.out
    }
}

/// Quote a string as a Lua literal.
pub fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => out.push_str(&format!("\\{:03}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Milliseconds to the seconds value Aseprite expects for frame durations.
pub fn seconds(ms: u32) -> String {
    format!("{}", ms as f64 / 1000.0)
}
