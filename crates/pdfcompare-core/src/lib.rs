use std::path::PathBuf;

use thiserror::Error;

pub mod backend;
pub mod compare;
pub mod config_file;
pub mod diff;
pub mod matcher;
pub mod similarity;
pub mod stats;
pub mod text;

// Re-export for convenience
pub use backend::{ExtractProgress, MemoryBackend, PdfBackend};
pub use compare::{
    CompareOptions, Comparison, compare_documents, compare_texts, ensure_exists, extract_document,
};
pub use diff::{Cell, DiffOptions, DiffRow, DiffTable, RowKind, Segment, diff_lines};
pub use matcher::{MatchingBlock, Opcode, SequenceMatcher, Tag};
pub use similarity::{Verdict, similarity, similarity_with};
pub use stats::{StatDifferences, TextStats, group_thousands};
pub use text::{NormalizeOptions, expand_ligatures, normalize, normalize_with, split_lines};

/// A document as read from a PDF: its pages' text, in page order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub pages: Vec<String>,
}

impl Document {
    pub fn new(pages: Vec<String>) -> Self {
        Self { pages }
    }

    /// Convenience for a document made of a single page.
    pub fn single_page(text: impl Into<String>) -> Self {
        Self {
            pages: vec![text.into()],
        }
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Concatenate all pages into one string, in page order.
    pub fn text(&self) -> String {
        self.pages.concat()
    }
}

/// Errors raised by a [`PdfBackend`] while opening or reading a document.
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("failed to open PDF: {0}")]
    OpenError(String),
    #[error("failed to extract text: {0}")]
    ExtractionError(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Fatal errors of a comparison run. Each one names the offending path.
#[derive(Error, Debug)]
pub enum CompareError {
    #[error("File not found - {}", .0.display())]
    FileNotFound(PathBuf),
    #[error("Error reading {}: {error}", path.display())]
    UnreadableDocument {
        path: PathBuf,
        error: BackendError,
    },
}
