// Line-oriented view of a text file.
// Lines are split on '\n' only, so joining them back reproduces the input exactly.

/// An ordered sequence of text lines
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Document {
    lines: Vec<String>,
}

impl Document {
    /// Split text into lines, keeping a trailing empty line when the text ends with '\n'
    pub fn from_text(text: &str) -> Self {
        Self {
            lines: split_lines(text),
        }
    }

    pub fn from_lines(lines: Vec<String>) -> Self {
        Self { lines }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Join the lines with '\n'
    pub fn to_text(&self) -> String {
        self.lines.join("\n")
    }
}

/// Split on '\n' exactly; '\r' stays part of the line
pub fn split_lines(text: &str) -> Vec<String> {
    text.split('\n').map(str::to_string).collect()
}
