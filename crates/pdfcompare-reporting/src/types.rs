use std::time::SystemTime;

use pdfcompare_core::Comparison;

/// One input document as shown in a report.
#[derive(Debug, Clone, Copy)]
pub struct ReportDocument<'a> {
    /// File name, without directories.
    pub name: &'a str,
    /// Column heading, e.g. "PDF 1".
    pub label: &'a str,
}

/// Everything needed to render a comparison report.
#[derive(Debug, Clone, Copy)]
pub struct Report<'a> {
    pub left: ReportDocument<'a>,
    pub right: ReportDocument<'a>,
    pub comparison: &'a Comparison,
    /// Wrap diff lines at this many characters; 0 disables wrapping.
    pub wrap_column: usize,
    pub generated_at: SystemTime,
}
