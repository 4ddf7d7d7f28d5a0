use std::fmt;

use crate::matcher::SequenceMatcher;

/// Character-level similarity of two strings as a percentage in [0, 100].
///
/// Equal strings (including two empty strings) score exactly 100.0. The
/// inputs are put in a canonical order before matching, so the score does
/// not depend on argument order.
pub fn similarity(a: &str, b: &str) -> f64 {
    similarity_with(a, b, true)
}

/// [`similarity`] with explicit control over the popular-character
/// heuristic (see [`SequenceMatcher::with_autojunk`]).
pub fn similarity_with(a: &str, b: &str, autojunk: bool) -> f64 {
    if a == b {
        return 100.0;
    }
    let (first, second) = if a <= b { (a, b) } else { (b, a) };
    let first: Vec<char> = first.chars().collect();
    let second: Vec<char> = second.chars().collect();

    let score = SequenceMatcher::with_autojunk(&first, &second, autojunk).ratio() * 100.0;
    tracing::debug!(
        left_chars = first.len(),
        right_chars = second.len(),
        score,
        "similarity computed"
    );
    score
}

/// Classification of a similarity score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Exactly 100%.
    Identical,
    /// At least 95%.
    AlmostIdentical,
    /// At least 80%.
    Similar,
    Different,
}

impl Verdict {
    pub fn from_score(score: f64) -> Self {
        if score == 100.0 {
            Verdict::Identical
        } else if score >= 95.0 {
            Verdict::AlmostIdentical
        } else if score >= 80.0 {
            Verdict::Similar
        } else {
            Verdict::Different
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Verdict::Identical => "IDENTICAL",
            Verdict::AlmostIdentical => "ALMOST IDENTICAL",
            Verdict::Similar => "SIMILAR",
            Verdict::Different => "DIFFERENT",
        }
    }

    /// One-line human description of what the verdict means.
    pub fn description(&self) -> &'static str {
        match self {
            Verdict::Identical => "PDFs contain exactly the same content",
            Verdict::AlmostIdentical => "PDFs are very similar with minor differences",
            Verdict::Similar => "PDFs have noticeable differences",
            Verdict::Different => "PDFs have significant differences",
        }
    }

    /// Stable kebab-case identifier, used as a CSS class in reports.
    pub fn slug(&self) -> &'static str {
        match self {
            Verdict::Identical => "identical",
            Verdict::AlmostIdentical => "almost-identical",
            Verdict::Similar => "similar",
            Verdict::Different => "different",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
