use std::fs::File;
use std::io::Read;
use std::path::Path;

use mupdf::{Document, TextPageFlags};

use pdfcompare_core::{BackendError, ExtractProgress, PdfBackend};

/// How far into the file the `%PDF-` signature may appear.
const SIGNATURE_WINDOW: u64 = 1024;

/// MuPDF-based implementation of [`PdfBackend`].
///
/// This crate is the sole AGPL island: it isolates the mupdf dependency
/// (which is AGPL-3.0) so that the scoring and diffing code does not
/// transitively depend on it.
///
/// Text is produced block by block and line by line, one `\n` per text
/// line. Glyphs MuPDF cannot map to Unicode become U+FFFD.
#[derive(Debug, Default)]
pub struct MupdfBackend;

impl MupdfBackend {
    pub fn new() -> Self {
        Self
    }
}

/// Reject files that do not carry a PDF header before MuPDF sees them.
///
/// MuPDF happily opens other formats (plain text, images, EPUB) by
/// content sniffing, which would turn a wrong input into a bogus score.
fn check_signature(path: &Path) -> Result<(), BackendError> {
    let mut head = Vec::with_capacity(SIGNATURE_WINDOW as usize);
    File::open(path)?
        .take(SIGNATURE_WINDOW)
        .read_to_end(&mut head)?;

    if head.windows(5).any(|w| w == b"%PDF-") {
        Ok(())
    } else {
        Err(BackendError::OpenError(
            "not a PDF file (no %PDF- header)".into(),
        ))
    }
}

impl PdfBackend for MupdfBackend {
    fn extract_document(
        &self,
        path: &Path,
        progress: &dyn Fn(ExtractProgress),
    ) -> Result<pdfcompare_core::Document, BackendError> {
        check_signature(path)?;

        let path_str = path
            .to_str()
            .ok_or_else(|| BackendError::OpenError("invalid path encoding".into()))?;

        let document =
            Document::open(path_str).map_err(|e| BackendError::OpenError(e.to_string()))?;

        if document
            .needs_password()
            .map_err(|e| BackendError::OpenError(e.to_string()))?
        {
            return Err(BackendError::OpenError("document is encrypted".into()));
        }

        let total = document
            .page_count()
            .map_err(|e| BackendError::ExtractionError(e.to_string()))?;
        let total = usize::try_from(total).unwrap_or(0);
        progress(ExtractProgress::Opened { page_count: total });

        let mut pages_text = Vec::with_capacity(total);

        for (index, page_result) in document
            .pages()
            .map_err(|e| BackendError::ExtractionError(e.to_string()))?
            .enumerate()
        {
            let page = page_result.map_err(|e| BackendError::ExtractionError(e.to_string()))?;
            let text_page = page
                .to_text_page(TextPageFlags::empty())
                .map_err(|e| BackendError::ExtractionError(e.to_string()))?;

            let mut page_text = String::new();
            for block in text_page.blocks() {
                for line in block.lines() {
                    let line_text: String = line
                        .chars()
                        .map(|c| c.char().unwrap_or('\u{FFFD}'))
                        .collect();
                    page_text.push_str(&line_text);
                    page_text.push('\n');
                }
            }
            tracing::debug!(
                page = index + 1,
                total,
                chars = page_text.len(),
                "page extracted"
            );
            pages_text.push(page_text);
            progress(ExtractProgress::Page { index, total });
        }

        Ok(pdfcompare_core::Document::new(pages_text))
    }
}
