use crate::text::{split_lines, words};

/// Size statistics of one document's raw text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextStats {
    /// Unicode scalar values, not bytes.
    pub chars: usize,
    pub words: usize,
    pub lines: usize,
}

impl TextStats {
    pub fn from_text(text: &str) -> Self {
        Self {
            chars: text.chars().count(),
            words: words(text).count(),
            lines: split_lines(text).len(),
        }
    }
}

/// Absolute differences between two documents' statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatDifferences {
    pub chars: usize,
    pub words: usize,
    pub lines: usize,
}

impl StatDifferences {
    pub fn between(left: &TextStats, right: &TextStats) -> Self {
        Self {
            chars: left.chars.abs_diff(right.chars),
            words: left.words.abs_diff(right.words),
            lines: left.lines.abs_diff(right.lines),
        }
    }
}

/// Format a count with comma thousands separators: `1234567` → `"1,234,567"`.
pub fn group_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
