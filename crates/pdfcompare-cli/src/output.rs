use std::io::Write;
use std::path::Path;

use owo_colors::{OwoColorize, Style};
use pdfcompare_core::{Comparison, TextStats, Verdict, group_thousands};

const RULE_WIDTH: usize = 70;
const BAR_WIDTH: usize = 50;

/// Whether to use colored output.
#[derive(Debug, Clone, Copy)]
pub struct ColorMode(pub bool);

impl ColorMode {
    pub fn enabled(&self) -> bool {
        self.0
    }

    fn paint(&self, text: &str, style: Style) -> String {
        if self.enabled() {
            text.style(style).to_string()
        } else {
            text.to_string()
        }
    }
}

/// One input as shown in the console summary.
pub struct Side<'a> {
    pub label: &'a str,
    pub name: &'a str,
    pub stats: &'a TextStats,
}

fn heavy_rule(w: &mut dyn Write) -> std::io::Result<()> {
    writeln!(w, "{}", "=".repeat(RULE_WIDTH))
}

fn light_rule(w: &mut dyn Write) -> std::io::Result<()> {
    writeln!(w, "{}", "-".repeat(RULE_WIDTH))
}

pub fn print_banner(
    w: &mut dyn Write,
    left_label: &str,
    right_label: &str,
    color: ColorMode,
) -> std::io::Result<()> {
    writeln!(w)?;
    heavy_rule(w)?;
    writeln!(
        w,
        "{}",
        color.paint(
            &format!("PDF COMPARISON TOOL - {} vs {}", left_label, right_label),
            Style::new().bold(),
        )
    )?;
    heavy_rule(w)?;
    writeln!(w)?;
    Ok(())
}

pub fn print_step(w: &mut dyn Write, step: usize, message: &str) -> std::io::Result<()> {
    writeln!(w, "Step {}: {}", step, message)
}

pub fn print_reading(w: &mut dyn Write, name: &str) -> std::io::Result<()> {
    writeln!(w, "Reading {}...", name)
}

pub fn print_page_total(w: &mut dyn Write, pages: usize) -> std::io::Result<()> {
    writeln!(w, "   Total pages: {}", pages)
}

pub fn print_statistics(
    w: &mut dyn Write,
    left: &Side<'_>,
    right: &Side<'_>,
    color: ColorMode,
) -> std::io::Result<()> {
    writeln!(w)?;
    light_rule(w)?;
    writeln!(w, "{}", color.paint("STATISTICS", Style::new().bold()))?;
    light_rule(w)?;
    for (i, side) in [left, right].into_iter().enumerate() {
        if i > 0 {
            writeln!(w)?;
        }
        writeln!(w, "{} ({}):", side.label, side.name)?;
        writeln!(w, "  - Characters: {}", group_thousands(side.stats.chars))?;
        writeln!(w, "  - Words: {}", group_thousands(side.stats.words))?;
        writeln!(w, "  - Lines: {}", group_thousands(side.stats.lines))?;
    }
    Ok(())
}

/// `[█████░░░…]`: one filled cell per 2% of similarity.
pub fn score_bar(score: f64) -> String {
    let filled = ((score / 100.0 * BAR_WIDTH as f64) as usize).min(BAR_WIDTH);
    format!(
        "[{}{}]",
        "█".repeat(filled),
        "░".repeat(BAR_WIDTH - filled)
    )
}

fn verdict_line(verdict: Verdict) -> &'static str {
    match verdict {
        Verdict::Identical => "PDFs are IDENTICAL! Content matches 100%",
        Verdict::AlmostIdentical => "PDFs are ALMOST IDENTICAL (>95% match)",
        Verdict::Similar => "PDFs are SIMILAR but have some differences (80-95% match)",
        Verdict::Different => "PDFs are DIFFERENT: significant differences (<80% match)",
    }
}

fn verdict_style(verdict: Verdict) -> Style {
    match verdict {
        Verdict::Identical => Style::new().green().bold(),
        Verdict::AlmostIdentical => Style::new().cyan().bold(),
        Verdict::Similar => Style::new().yellow().bold(),
        Verdict::Different => Style::new().red().bold(),
    }
}

pub fn print_results(
    w: &mut dyn Write,
    comparison: &Comparison,
    color: ColorMode,
) -> std::io::Result<()> {
    writeln!(w)?;
    heavy_rule(w)?;
    writeln!(w, "{}", color.paint("COMPARISON RESULTS", Style::new().bold()))?;
    heavy_rule(w)?;

    writeln!(w)?;
    writeln!(w, "Similarity Score: {:.2}%", comparison.score)?;
    writeln!(w, "{} {:.2}%", score_bar(comparison.score), comparison.score)?;

    writeln!(w)?;
    writeln!(
        w,
        "{}",
        color.paint(
            verdict_line(comparison.verdict),
            verdict_style(comparison.verdict)
        )
    )?;

    let d = &comparison.differences;
    writeln!(w)?;
    writeln!(w, "Differences:")?;
    writeln!(w, "  - Character difference: {}", group_thousands(d.chars))?;
    writeln!(w, "  - Word difference: {}", group_thousands(d.words))?;
    writeln!(w, "  - Line difference: {}", group_thousands(d.lines))?;
    Ok(())
}

pub fn print_report_saved(w: &mut dyn Write, path: &Path, color: ColorMode) -> std::io::Result<()> {
    writeln!(
        w,
        "HTML report saved to: {}",
        color.paint(&path.display().to_string(), Style::new().cyan())
    )?;
    writeln!(w)?;
    writeln!(
        w,
        "Open the HTML file in your browser to view the detailed report!"
    )?;
    Ok(())
}

pub fn print_report_tip(w: &mut dyn Write, color: ColorMode) -> std::io::Result<()> {
    writeln!(w)?;
    writeln!(
        w,
        "{}",
        color.paint(
            "Tip: Use --save-diff flag to generate an HTML report",
            Style::new().dimmed(),
        )
    )
}

pub fn print_completed(w: &mut dyn Write, color: ColorMode) -> std::io::Result<()> {
    writeln!(w)?;
    heavy_rule(w)?;
    writeln!(
        w,
        "{}",
        color.paint("Comparison completed!", Style::new().green())
    )?;
    heavy_rule(w)?;
    writeln!(w)?;
    Ok(())
}
