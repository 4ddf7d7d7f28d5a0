use std::io::{IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use anyhow::Context;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use pdfcompare_core::config_file::{self, ConfigFile};
use pdfcompare_core::{Document, ExtractProgress, PdfBackend, compare_documents, ensure_exists};
use pdfcompare_pdf_mupdf::MupdfBackend;
use pdfcompare_reporting::{Report, ReportDocument, write_report};
use tracing::Level;
use tracing_subscriber::EnvFilter;

mod output;
mod settings;

use output::{ColorMode, Side};
use settings::{Overrides, Settings};

const EXAMPLES: &str = "\
Examples:
  pdfcompare struts.pdf angular.pdf
  pdfcompare struts.pdf angular.pdf --save-diff
  pdfcompare old.pdf new.pdf --save-diff --output review.html --full-diff";

/// Compare the text of two PDF documents and report how similar they are
#[derive(Parser, Debug)]
#[command(version, about, long_about = None, after_help = EXAMPLES)]
struct Cli {
    /// First PDF (left side of the diff)
    pdf1: PathBuf,

    /// Second PDF (right side of the diff)
    pdf2: PathBuf,

    /// Write a side-by-side HTML diff report
    #[arg(long)]
    save_diff: bool,

    /// Path of the HTML report [default: pdf_comparison_report.html]
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Unchanged lines shown around each change [default: 3]
    #[arg(long, conflicts_with = "full_diff")]
    context: Option<usize>,

    /// Show every line in the report instead of hunks
    #[arg(long)]
    full_diff: bool,

    /// Wrap report lines at this column, 0 disables [default: 80]
    #[arg(long)]
    wrap_column: Option<usize>,

    /// Label for the first PDF [default: "PDF 1"]
    #[arg(long)]
    left_label: Option<String>,

    /// Label for the second PDF [default: "PDF 2"]
    #[arg(long)]
    right_label: Option<String>,

    /// Expand typographic ligatures (ﬁ, ﬂ, ...) before scoring
    #[arg(long)]
    expand_ligatures: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Additional TOML config file, applied over the default locations
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Usage errors exit 1; --help and --version exit 0.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let code = if err.use_stderr() { 1 } else { 0 };
            err.print()?;
            std::process::exit(code);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(Level::WARN.into()))
        .with_writer(std::io::stderr)
        .init();

    run(cli)
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = config_file::load_config();
    if let Some(path) = &cli.config {
        config = config_file::merge(config, config_file::load_explicit(path)?);
    }
    let settings = resolve_settings(&cli, config);

    let color = ColorMode(
        !cli.no_color
            && std::env::var_os("NO_COLOR").is_none()
            && std::io::stdout().is_terminal(),
    );

    // Both files are checked before any work starts.
    ensure_exists(&cli.pdf1)?;
    ensure_exists(&cli.pdf2)?;

    let stdout = std::io::stdout();
    let mut w = stdout.lock();

    output::print_banner(&mut w, &settings.left_label, &settings.right_label, color)?;
    output::print_step(&mut w, 1, "Extracting text from PDFs...")?;

    let backend = MupdfBackend::new();
    let left_doc = read_document(&mut w, &backend, &cli.pdf1)?;
    let right_doc = read_document(&mut w, &backend, &cli.pdf2)?;

    writeln!(w)?;
    output::print_step(&mut w, 2, "Normalizing text and calculating similarity...")?;
    let comparison = compare_documents(
        &left_doc,
        &right_doc,
        &settings.compare_options(cli.save_diff),
    );

    let left_name = file_name(&cli.pdf1);
    let right_name = file_name(&cli.pdf2);
    output::print_statistics(
        &mut w,
        &Side {
            label: &settings.left_label,
            name: &left_name,
            stats: &comparison.left,
        },
        &Side {
            label: &settings.right_label,
            name: &right_name,
            stats: &comparison.right,
        },
        color,
    )?;
    output::print_results(&mut w, &comparison, color)?;

    if cli.save_diff {
        writeln!(w)?;
        output::print_step(&mut w, 3, "Generating HTML report...")?;
        let report = Report {
            left: ReportDocument {
                name: &left_name,
                label: &settings.left_label,
            },
            right: ReportDocument {
                name: &right_name,
                label: &settings.right_label,
            },
            comparison: &comparison,
            wrap_column: settings.wrap_column,
            generated_at: SystemTime::now(),
        };
        write_report(&report, &settings.report_path)?;
        output::print_report_saved(&mut w, &settings.report_path, color)?;
    } else {
        output::print_report_tip(&mut w, color)?;
    }

    output::print_completed(&mut w, color)?;
    Ok(())
}

fn resolve_settings(cli: &Cli, config: ConfigFile) -> Settings {
    let overrides = Overrides {
        output: cli.output.clone(),
        context: cli.context,
        full_diff: cli.full_diff,
        wrap_column: cli.wrap_column,
        left_label: cli.left_label.clone(),
        right_label: cli.right_label.clone(),
        expand_ligatures: cli.expand_ligatures,
    };
    Settings::resolve(overrides, config, std::env::var("PDFCOMPARE_REPORT").ok())
}

/// Extract one PDF, drawing page progress on stderr.
fn read_document(
    w: &mut dyn Write,
    backend: &dyn PdfBackend,
    path: &Path,
) -> anyhow::Result<Document> {
    output::print_reading(w, &file_name(path))?;
    w.flush()?;

    let bar = ProgressBar::new(0);
    bar.set_style(
        ProgressStyle::with_template("   {msg} [{bar:40.cyan/dim}] {pos}/{len}")
            .context("invalid progress template")?
            .progress_chars("=> "),
    );
    bar.set_message("Extracting pages");

    let result = pdfcompare_core::extract_document(backend, path, &|event| match event {
        ExtractProgress::Opened { page_count } => bar.set_length(page_count as u64),
        ExtractProgress::Page { index, .. } => bar.set_position(index as u64 + 1),
    });
    bar.finish_and_clear();

    let document = result?;
    output::print_page_total(w, document.page_count())?;
    Ok(document)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
