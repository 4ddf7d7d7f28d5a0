use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::{BackendError, Document};

/// Progress reported while a backend reads a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractProgress {
    /// The document was opened and has `page_count` pages.
    Opened { page_count: usize },
    /// Page `index` (0-based) of `total` has been extracted.
    Page { index: usize, total: usize },
}

/// Trait for PDF text extraction backends.
///
/// Implementors open a file and return its per-page text; everything
/// downstream (normalization, scoring, diffing) works on the returned
/// [`Document`].
pub trait PdfBackend: Send + Sync {
    /// Read every page of the PDF at `path`, reporting progress as pages complete.
    fn extract_document(
        &self,
        path: &Path,
        progress: &dyn Fn(ExtractProgress),
    ) -> Result<Document, BackendError>;
}

/// In-memory [`PdfBackend`] that serves pre-built documents by path.
///
/// Useful for tests and for callers that already hold extracted text.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    documents: HashMap<PathBuf, Document>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `document` under `path`.
    pub fn with_document(mut self, path: impl Into<PathBuf>, document: Document) -> Self {
        self.documents.insert(path.into(), document);
        self
    }
}

impl PdfBackend for MemoryBackend {
    fn extract_document(
        &self,
        path: &Path,
        progress: &dyn Fn(ExtractProgress),
    ) -> Result<Document, BackendError> {
        let document = self
            .documents
            .get(path)
            .cloned()
            .ok_or_else(|| BackendError::OpenError(format!("no document at {}", path.display())))?;

        let total = document.page_count();
        progress(ExtractProgress::Opened { page_count: total });
        for index in 0..total {
            progress(ExtractProgress::Page { index, total });
        }
        Ok(document)
    }
}
