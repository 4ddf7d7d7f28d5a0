use std::path::Path;

use crate::backend::{ExtractProgress, PdfBackend};
use crate::diff::{DiffOptions, DiffTable, diff_lines};
use crate::similarity::{Verdict, similarity_with};
use crate::stats::{StatDifferences, TextStats};
use crate::text::{NormalizeOptions, normalize_with, split_lines};
use crate::{CompareError, Document};

/// Knobs for a comparison run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompareOptions {
    pub normalize: NormalizeOptions,
    pub diff: DiffOptions,
    /// Popular-character heuristic for the similarity matcher.
    pub autojunk: bool,
    /// Build the line diff table. Skipped when only the score is wanted.
    pub build_diff: bool,
}

impl Default for CompareOptions {
    fn default() -> Self {
        Self {
            normalize: NormalizeOptions::default(),
            diff: DiffOptions::default(),
            autojunk: true,
            build_diff: true,
        }
    }
}

/// Result of comparing two documents.
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub left: TextStats,
    pub right: TextStats,
    pub differences: StatDifferences,
    /// Similarity of the normalized texts, 0–100.
    pub score: f64,
    pub verdict: Verdict,
    /// Line diff of the raw texts; `None` when not requested.
    pub diff: Option<DiffTable>,
}

impl Comparison {
    pub fn is_identical(&self) -> bool {
        self.verdict == Verdict::Identical
    }
}

/// Fail with [`CompareError::FileNotFound`] unless `path` exists.
pub fn ensure_exists(path: &Path) -> Result<(), CompareError> {
    if path.exists() {
        Ok(())
    } else {
        Err(CompareError::FileNotFound(path.to_path_buf()))
    }
}

/// Read a document through `backend`, attaching the path to any failure.
pub fn extract_document(
    backend: &dyn PdfBackend,
    path: &Path,
    progress: &dyn Fn(ExtractProgress),
) -> Result<Document, CompareError> {
    let document = backend
        .extract_document(path, progress)
        .map_err(|error| CompareError::UnreadableDocument {
            path: path.to_path_buf(),
            error,
        })?;
    tracing::info!(
        path = %path.display(),
        pages = document.page_count(),
        "document extracted"
    );
    Ok(document)
}

/// Compare two extracted documents.
pub fn compare_documents(left: &Document, right: &Document, options: &CompareOptions) -> Comparison {
    compare_texts(&left.text(), &right.text(), options)
}

/// Compare two raw texts.
///
/// The score is computed on normalized text; statistics and the line diff
/// use the raw text.
pub fn compare_texts(left: &str, right: &str, options: &CompareOptions) -> Comparison {
    let left_stats = TextStats::from_text(left);
    let right_stats = TextStats::from_text(right);

    let left_norm = normalize_with(left, &options.normalize);
    let right_norm = normalize_with(right, &options.normalize);
    let score = similarity_with(&left_norm, &right_norm, options.autojunk);
    let verdict = Verdict::from_score(score);

    let diff = options.build_diff.then(|| {
        let left_lines = split_lines(left);
        let right_lines = split_lines(right);
        diff_lines(&left_lines, &right_lines, &options.diff)
    });

    tracing::info!(score, verdict = %verdict, "comparison finished");
    Comparison {
        left: left_stats,
        right: right_stats,
        differences: StatDifferences::between(&left_stats, &right_stats),
        score,
        verdict,
        diff,
    }
}
