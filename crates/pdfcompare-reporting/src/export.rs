use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use pdfcompare_core::{Cell, DiffRow, DiffTable, RowKind, Segment, TextStats, group_thousands};

use crate::ReportError;
use crate::types::{Report, ReportDocument};

/// File name used when no report path is configured.
pub const DEFAULT_REPORT_NAME: &str = "pdf_comparison_report.html";

/// Render `report` and write it to `path`, replacing any existing file.
pub fn write_report(report: &Report<'_>, path: &Path) -> Result<(), ReportError> {
    let content = export_html(report);
    std::fs::write(path, content.as_bytes()).map_err(|error| ReportError::Io {
        path: path.to_path_buf(),
        error,
    })?;
    tracing::info!(path = %path.display(), bytes = content.len(), "report written");
    Ok(())
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Render a complete, self-contained HTML report.
pub fn export_html(report: &Report<'_>) -> String {
    let mut out = String::with_capacity(16384);
    let comparison = report.comparison;
    let verdict = comparison.verdict;
    let timestamp = format_timestamp(report.generated_at);

    out.push_str(&format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"UTF-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n\
         <title>PDF Comparison Report - {} vs {}</title>\n",
        html_escape(report.left.name),
        html_escape(report.right.name),
    ));
    out.push_str(STYLE);
    out.push_str("</head>\n<body>\n<div class=\"container\">\n");

    // Header
    out.push_str(&format!(
        "<header>\n<h1>PDF Comparison Report</h1>\n<p>{} vs {}</p>\n<div class=\"timestamp\">Generated {}</div>\n</header>\n",
        html_escape(report.left.label),
        html_escape(report.right.label),
        timestamp,
    ));

    out.push_str("<main>\n");
    out.push_str(&format!(
        "<div class=\"status-banner {}\">\n<h2>{}</h2>\n<p>{}</p>\n</div>\n",
        verdict.slug(),
        verdict.label(),
        verdict.description(),
    ));

    // Score with bar
    out.push_str(&format!(
        "<div class=\"score\">\n<span class=\"score-number\">{:.1}%</span>\n\
         <div class=\"bar\"><div class=\"bar-fill\" style=\"width: {:.1}%;\">{:.1}% Match</div></div>\n</div>\n",
        comparison.score, comparison.score, comparison.score,
    ));

    // Per-document statistics
    out.push_str("<div class=\"files\">\n");
    write_file_card(&mut out, "left", &report.left, &comparison.left);
    write_file_card(&mut out, "right", &report.right, &comparison.right);
    out.push_str("</div>\n");

    // Difference cards
    let d = &comparison.differences;
    out.push_str("<div class=\"stats\">\n");
    write_stat_card(&mut out, &group_thousands(d.chars), "Character difference");
    write_stat_card(&mut out, &group_thousands(d.words), "Word difference");
    write_stat_card(&mut out, &group_thousands(d.lines), "Line difference");
    write_stat_card(
        &mut out,
        &format!("{:.1}%", comparison.score),
        "Match quality",
    );
    out.push_str("</div>\n");

    if comparison.is_identical() {
        out.push_str(
            "<section class=\"diff-section\">\n<h2>No Differences Found!</h2>\n\
             <p class=\"dim\">Both PDFs contain identical content.</p>\n</section>\n",
        );
    } else {
        out.push_str("<section class=\"diff-section\">\n<h2>Line-by-Line Comparison</h2>\n");
        match &comparison.diff {
            Some(table) if !table.is_empty() => write_diff_table(&mut out, report, table),
            Some(_) => out.push_str(
                "<p class=\"dim\">The raw lines are identical; the texts differ only after normalization.</p>\n",
            ),
            None => out.push_str("<p class=\"dim\">Line diff was not generated.</p>\n"),
        }
        out.push_str("</section>\n");
    }
    out.push_str("</main>\n");

    out.push_str(&format!(
        "<footer>\n<p>Generated by <strong>pdfcompare</strong> &mdash; {}</p>\n\
         <p class=\"legend\">Legend: <span class=\"sub\">Removed</span> <span class=\"add\">Added</span> <span class=\"chg\">Changed</span></p>\n\
         </footer>\n",
        timestamp,
    ));
    out.push_str("</div>\n</body>\n</html>\n");
    out
}

fn write_file_card(out: &mut String, side: &str, doc: &ReportDocument<'_>, stats: &TextStats) {
    out.push_str(&format!(
        "<div class=\"file-card {}\">\n<h3>{}</h3>\n<div class=\"file-name\">{}</div>\n<dl>\n",
        side,
        html_escape(doc.label),
        html_escape(doc.name),
    ));
    for (label, value) in [
        ("Characters", stats.chars),
        ("Words", stats.words),
        ("Lines", stats.lines),
    ] {
        out.push_str(&format!(
            "<dt>{}</dt><dd>{}</dd>\n",
            label,
            group_thousands(value)
        ));
    }
    out.push_str("</dl>\n</div>\n");
}

fn write_stat_card(out: &mut String, value: &str, label: &str) {
    out.push_str(&format!(
        "<div class=\"stat-card\"><span class=\"number\">{}</span><span class=\"label\">{}</span></div>\n",
        value, label,
    ));
}

fn write_diff_table(out: &mut String, report: &Report<'_>, table: &DiffTable) {
    out.push_str("<div class=\"diff-container\">\n<table class=\"diff\">\n");
    out.push_str(&format!(
        "<thead><tr><th colspan=\"2\">{}</th><th colspan=\"2\">{}</th></tr></thead>\n<tbody>\n",
        html_escape(report.left.label),
        html_escape(report.right.label),
    ));
    for row in &table.rows {
        match row {
            DiffRow::Elided { lines } => {
                let noun = if *lines == 1 { "line" } else { "lines" };
                out.push_str(&format!(
                    "<tr class=\"elided\"><td colspan=\"4\">&hellip; {} unchanged {} &hellip;</td></tr>\n",
                    group_thousands(*lines),
                    noun,
                ));
            }
            _ => write_line_row(out, row, report.wrap_column),
        }
    }
    out.push_str("</tbody>\n</table>\n</div>\n");
}

fn write_line_row(out: &mut String, row: &DiffRow, wrap_column: usize) {
    let (row_class, left_class, right_class) = match row.kind() {
        RowKind::Unchanged => ("unchanged", "", ""),
        RowKind::Added => ("added", "empty", "add"),
        RowKind::Removed => ("removed", "sub", "empty"),
        RowKind::Changed => ("changed", "chg", "chg"),
        RowKind::Elided => return,
    };

    let left_chunks = row
        .left()
        .map(|c| wrap_segments(&c.segments, wrap_column))
        .unwrap_or_default();
    let right_chunks = row
        .right()
        .map(|c| wrap_segments(&c.segments, wrap_column))
        .unwrap_or_default();
    let height = left_chunks.len().max(right_chunks.len()).max(1);

    for k in 0..height {
        out.push_str(&format!("<tr class=\"{}\">", row_class));
        write_side(out, row.left(), left_chunks.get(k), k, left_class, "em-sub");
        write_side(out, row.right(), right_chunks.get(k), k, right_class, "em-add");
        out.push_str("</tr>\n");
    }
}

fn write_side(
    out: &mut String,
    cell: Option<&Cell>,
    chunk: Option<&Vec<Segment>>,
    chunk_index: usize,
    class: &str,
    em_class: &str,
) {
    let (Some(cell), Some(chunk)) = (cell, chunk) else {
        out.push_str("<td class=\"lineno\"></td><td class=\"text empty\"></td>");
        return;
    };

    // Continuation lines of a wrapped cell show '>' instead of a number.
    let number = if chunk_index == 0 {
        cell.line_number.to_string()
    } else {
        "&gt;".to_string()
    };
    out.push_str(&format!(
        "<td class=\"lineno\">{}</td><td class=\"text {}\">",
        number, class
    ));
    for segment in chunk {
        if segment.emphasized {
            out.push_str(&format!(
                "<span class=\"{}\">{}</span>",
                em_class,
                html_escape(&segment.text)
            ));
        } else {
            out.push_str(&html_escape(&segment.text));
        }
    }
    out.push_str("</td>");
}

/// Split a line's segments into chunks of at most `width` characters.
///
/// `width == 0` disables wrapping. An empty line yields one empty chunk.
fn wrap_segments(segments: &[Segment], width: usize) -> Vec<Vec<Segment>> {
    let total: usize = segments.iter().map(|s| s.text.chars().count()).sum();
    if width == 0 || total <= width {
        return vec![segments.to_vec()];
    }

    let mut chunks = Vec::new();
    let mut current: Vec<Segment> = Vec::new();
    let mut used = 0;
    for segment in segments {
        let mut piece = String::new();
        for c in segment.text.chars() {
            if used == width {
                if !piece.is_empty() {
                    current.push(Segment {
                        text: std::mem::take(&mut piece),
                        emphasized: segment.emphasized,
                    });
                }
                chunks.push(std::mem::take(&mut current));
                used = 0;
            }
            piece.push(c);
            used += 1;
        }
        if !piece.is_empty() {
            current.push(Segment {
                text: piece,
                emphasized: segment.emphasized,
            });
        }
    }
    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

/// `YYYY-MM-DD HH:MM UTC`.
fn format_timestamp(at: SystemTime) -> String {
    let now = at.duration_since(UNIX_EPOCH).unwrap_or_default().as_secs();
    let secs_per_day = 86400u64;
    let days = now / secs_per_day;
    let time_of_day = now % secs_per_day;
    let hours = time_of_day / 3600;
    let minutes = (time_of_day % 3600) / 60;
    let (year, month, day) = days_to_ymd(days);
    format!(
        "{:04}-{:02}-{:02} {:02}:{:02} UTC",
        year, month, day, hours, minutes
    )
}

/// Convert days since Unix epoch to (year, month, day).
fn days_to_ymd(days: u64) -> (u64, u64, u64) {
    // Civil-from-days over 400-year eras
    let z = days + 719468;
    let era = z / 146097;
    let doe = z - era * 146097;
    let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146096) / 365;
    let y = yoe + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let d = doy - (153 * mp + 2) / 5 + 1;
    let m = if mp < 10 { mp + 3 } else { mp - 9 };
    let y = if m <= 2 { y + 1 } else { y };
    (y, m, d)
}

const STYLE: &str = r#"<style>
:root {
  --bg: #1a1a2e;
  --surface: #16213e;
  --card: #0f3460;
  --text: #e0e0e0;
  --dim: #888;
  --green: #4ecca3;
  --red: #e74c3c;
  --yellow: #f39c12;
  --blue: #3498db;
  --border: #2a2a4a;
}
* { box-sizing: border-box; margin: 0; padding: 0; }
body {
  font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
  background: var(--bg);
  color: var(--text);
  line-height: 1.6;
  padding: 2rem;
}
.container { max-width: 1400px; margin: 0 auto; }
header { text-align: center; margin-bottom: 2rem; }
header h1 { color: var(--green); font-size: 2rem; }
header p { color: var(--dim); }
.timestamp {
  display: inline-block;
  margin-top: 0.75rem;
  padding: 0.3rem 0.9rem;
  border: 1px solid var(--border);
  border-radius: 999px;
  font-size: 0.85rem;
  color: var(--dim);
}
h2 { margin: 1.5rem 0 1rem; font-size: 1.3rem; }
.dim { color: var(--dim); }
.status-banner {
  text-align: center;
  padding: 1.5rem;
  border-radius: 8px;
  margin-bottom: 1.5rem;
  color: #000;
}
.status-banner h2 { margin: 0 0 0.3rem; font-size: 2rem; }
.status-banner.identical { background: var(--green); }
.status-banner.almost-identical { background: var(--blue); color: #fff; }
.status-banner.similar { background: var(--yellow); }
.status-banner.different { background: var(--red); color: #fff; }
.score {
  display: flex;
  align-items: center;
  gap: 1.5rem;
  background: var(--surface);
  border: 1px solid var(--border);
  border-radius: 8px;
  padding: 1.5rem;
  margin-bottom: 1.5rem;
}
.score-number { font-size: 3rem; font-weight: bold; color: var(--green); }
.bar {
  flex: 1;
  height: 1.8rem;
  background: var(--card);
  border-radius: 999px;
  overflow: hidden;
}
.bar-fill {
  height: 100%;
  background: var(--green);
  color: #000;
  font-weight: 600;
  font-size: 0.85rem;
  display: flex;
  align-items: center;
  justify-content: center;
  white-space: nowrap;
}
.files {
  display: grid;
  grid-template-columns: 1fr 1fr;
  gap: 1rem;
  margin-bottom: 1.5rem;
}
.file-card {
  background: var(--surface);
  border: 1px solid var(--border);
  border-radius: 8px;
  padding: 1rem 1.5rem;
}
.file-card.left { border-left: 4px solid var(--blue); }
.file-card.right { border-left: 4px solid var(--yellow); }
.file-name { font-weight: 600; word-break: break-all; margin: 0.3rem 0 0.6rem; }
.file-card dl { display: grid; grid-template-columns: 1fr auto; gap: 0.2rem 1rem; }
.file-card dt { color: var(--dim); }
.file-card dd { font-weight: 600; text-align: right; }
.stats {
  display: flex;
  gap: 1rem;
  flex-wrap: wrap;
  margin-bottom: 2rem;
}
.stat-card {
  flex: 1;
  background: var(--surface);
  border: 1px solid var(--border);
  border-radius: 8px;
  padding: 1rem 1.5rem;
  text-align: center;
  min-width: 160px;
}
.stat-card .number { font-size: 2rem; font-weight: bold; display: block; }
.stat-card .label { font-size: 0.85rem; color: var(--dim); }
.diff-container {
  overflow-x: auto;
  border: 1px solid var(--border);
  border-radius: 8px;
}
table.diff {
  width: 100%;
  border-collapse: collapse;
  font-family: 'SFMono-Regular', Consolas, 'Courier New', monospace;
  font-size: 0.85rem;
  background: var(--surface);
}
table.diff th {
  background: var(--card);
  text-align: left;
  padding: 0.5rem 0.75rem;
}
table.diff td { padding: 0.15rem 0.5rem; vertical-align: top; border-top: 1px solid var(--border); }
table.diff td.lineno { color: var(--dim); text-align: right; width: 3.5rem; user-select: none; }
table.diff td.text { white-space: pre-wrap; word-break: break-all; width: 50%; }
td.add, .legend .add { background: rgba(78, 204, 163, 0.18); }
td.sub, .legend .sub { background: rgba(231, 76, 60, 0.18); }
td.chg, .legend .chg { background: rgba(243, 156, 18, 0.15); }
td.empty { background: var(--bg); }
.em-add { background: rgba(78, 204, 163, 0.45); border-radius: 2px; }
.em-sub { background: rgba(231, 76, 60, 0.45); border-radius: 2px; }
tr.elided td { text-align: center; color: var(--dim); background: var(--card); }
.legend span { padding: 0.15rem 0.5rem; border-radius: 4px; margin: 0 0.2rem; }
footer {
  margin-top: 3rem;
  padding-top: 1rem;
  border-top: 1px solid var(--border);
  font-size: 0.85rem;
  color: var(--dim);
  text-align: center;
}
@media (max-width: 768px) {
  .files { grid-template-columns: 1fr; }
  .score { flex-direction: column; }
}
</style>
"#;
