use std::path::PathBuf;

use thiserror::Error;

pub mod export;
pub mod types;

pub use export::{DEFAULT_REPORT_NAME, export_html, write_report};
pub use types::{Report, ReportDocument};

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("failed to write report {}: {error}", path.display())]
    Io {
        path: PathBuf,
        error: std::io::Error,
    },
}
