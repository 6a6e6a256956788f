//! Doc comment rendering.
//!
//! Blocks are wrapped at a fixed column. Wrapping never changes the words,
//! only where lines break. `@param` descriptions line up on one column.

use unicode_width::UnicodeWidthStr;

const OPEN: &str = "/**";
const LINE: &str = " *";
const CLOSE: &str = " */";

/// Name and description of the trailing variadic message parameter.
pub const VARIADIC_PARAM: (&str, &str) = ("...", "optional message format and arguments");

/// A doc comment under construction.
#[derive(Debug, Clone, Default)]
pub struct DocBlock {
    paragraphs: Vec<String>,
    params: Vec<(String, String)>,
    returns: Vec<String>,
}

impl DocBlock {
    pub fn new(summary: impl Into<String>) -> Self {
        Self {
            paragraphs: vec![summary.into()],
            ..Self::default()
        }
    }

    /// Add a wrapped prose paragraph after the summary.
    pub fn paragraph(mut self, text: impl Into<String>) -> Self {
        self.paragraphs.push(text.into());
        self
    }

    pub fn param(mut self, name: impl Into<String>, description: impl Into<String>) -> Self {
        self.params.push((name.into(), description.into()));
        self
    }

    /// Add `@return` lines. They are emitted verbatim.
    pub fn returns(mut self, lines: Vec<String>) -> Self {
        self.returns = lines;
        self
    }

    pub fn render(&self, width: usize) -> String {
        let mut lines = vec![OPEN.to_string()];

        for (idx, paragraph) in self.paragraphs.iter().enumerate() {
            if idx > 0 {
                lines.push(LINE.to_string());
            }
            let prefix = format!("{} ", LINE);
            lines.extend(wrap(paragraph, width, &prefix, &prefix));
        }

        if !self.params.is_empty() || !self.returns.is_empty() {
            lines.push(LINE.to_string());
        }

        let name_width = self
            .params
            .iter()
            .map(|(name, _)| UnicodeWidthStr::width(name.as_str()))
            .max()
            .unwrap_or(0);
        for (name, description) in &self.params {
            let pad = name_width - UnicodeWidthStr::width(name.as_str());
            let first = format!("{} @param {}{}  ", LINE, name, " ".repeat(pad));
            let rest = " ".repeat(UnicodeWidthStr::width(first.as_str()));
            let rest = format!("{}{}", LINE, &rest[LINE.len()..]);
            lines.extend(wrap(description, width, &first, &rest));
        }

        for (idx, line) in self.returns.iter().enumerate() {
            if idx == 0 {
                lines.push(format!("{} @return {}", LINE, line));
            } else {
                lines.push(format!("{}         {}", LINE, line));
            }
        }

        lines.push(CLOSE.to_string());
        let mut out = lines.join("\n");
        out.push('\n');
        out
    }
}

/// Greedy word wrap. The first line starts with `first`, later lines with
/// `rest`. A single word wider than the column is kept whole.
pub fn wrap(text: &str, width: usize, first: &str, rest: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = first.to_string();
    let mut has_word = false;

    for word in text.split_whitespace() {
        let candidate = UnicodeWidthStr::width(current.as_str())
            + usize::from(has_word)
            + UnicodeWidthStr::width(word);
        if has_word && candidate > width {
            lines.push(current);
            current = rest.to_string();
            has_word = false;
        }
        if has_word {
            current.push(' ');
        }
        current.push_str(word);
        has_word = true;
    }

    if has_word {
        lines.push(current);
    } else {
        lines.push(current.trim_end().to_string());
    }
    lines
}
