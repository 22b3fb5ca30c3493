//! Line-oriented view over the raw source of one review request

/// Snippets longer than this are cut and suffixed with `...`
pub const SNIPPET_MAX_CHARS: usize = 50;

/// Source text split on `\n`, addressed with 1-based line numbers.
///
/// A trailing newline produces a final empty line so that line numbers agree
/// with what an editor shows.
#[derive(Debug, Clone)]
pub struct SourceText<'a> {
    raw: &'a str,
    lines: Vec<&'a str>,
}

impl<'a> SourceText<'a> {
    pub fn new(raw: &'a str) -> Self {
        Self {
            raw,
            lines: raw.split('\n').collect(),
        }
    }

    pub fn raw(&self) -> &'a str {
        self.raw
    }

    pub fn lines(&self) -> &[&'a str] {
        &self.lines
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Iterate `(line_number, line)` pairs starting at 1
    pub fn numbered(&self) -> impl Iterator<Item = (usize, &'a str)> + '_ {
        self.lines.iter().enumerate().map(|(i, l)| (i + 1, *l))
    }

    /// Clamp a line number into `1..=line_count`
    pub fn clamp_line(&self, line_number: usize) -> usize {
        line_number.clamp(1, self.lines.len().max(1))
    }

    /// Line text for a 1-based line number, empty when out of range
    pub fn line(&self, line_number: usize) -> &'a str {
        line_number
            .checked_sub(1)
            .and_then(|idx| self.lines.get(idx).copied())
            .unwrap_or("")
    }

    /// Lines that contain something other than whitespace
    pub fn non_blank_count(&self) -> usize {
        self.lines.iter().filter(|l| !l.trim().is_empty()).count()
    }

    pub fn is_blank(&self) -> bool {
        self.raw.trim().is_empty()
    }
}

/// First `SNIPPET_MAX_CHARS` characters followed by `...` when the line is longer
pub fn truncated_snippet(line: &str) -> String {
    if line.chars().count() > SNIPPET_MAX_CHARS {
        let head: String = line.chars().take(SNIPPET_MAX_CHARS).collect();
        format!("{}...", head)
    } else {
        line.to_string()
    }
}
