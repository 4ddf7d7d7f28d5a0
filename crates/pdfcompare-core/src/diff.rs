//! Side-by-side line diff.
//!
//! Lines are aligned with [`SequenceMatcher`]; replaced lines are paired
//! positionally and get character-level emphasis on the spans that differ.

use crate::matcher::{Opcode, SequenceMatcher, Tag};

/// Options for [`diff_lines`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiffOptions {
    /// Unchanged lines kept around each change. `None` keeps every line.
    pub context: Option<usize>,
    /// Popular-line heuristic for the line matcher.
    pub autojunk: bool,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            context: Some(3),
            autojunk: true,
        }
    }
}

/// A piece of a line, emphasized when it differs from the other side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub emphasized: bool,
}

/// One side of a diff row: a 1-based line number and its text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub line_number: usize,
    pub segments: Vec<Segment>,
}

impl Cell {
    fn plain(line_number: usize, text: &str, emphasized: bool) -> Self {
        let mut segments = Vec::new();
        push_segment(&mut segments, text, emphasized);
        Self {
            line_number,
            segments,
        }
    }

    /// Full text of the line, emphasis dropped.
    pub fn text(&self) -> String {
        self.segments.iter().map(|s| s.text.as_str()).collect()
    }
}

/// Row classification, independent of the cells it carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    Unchanged,
    Added,
    Removed,
    Changed,
    Elided,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffRow {
    Unchanged { left: Cell, right: Cell },
    /// Line present only in the right document.
    Added { right: Cell },
    /// Line present only in the left document.
    Removed { left: Cell },
    Changed { left: Cell, right: Cell },
    /// `lines` unchanged lines left out between hunks.
    Elided { lines: usize },
}

impl DiffRow {
    pub fn kind(&self) -> RowKind {
        match self {
            DiffRow::Unchanged { .. } => RowKind::Unchanged,
            DiffRow::Added { .. } => RowKind::Added,
            DiffRow::Removed { .. } => RowKind::Removed,
            DiffRow::Changed { .. } => RowKind::Changed,
            DiffRow::Elided { .. } => RowKind::Elided,
        }
    }

    pub fn left(&self) -> Option<&Cell> {
        match self {
            DiffRow::Unchanged { left, .. }
            | DiffRow::Removed { left }
            | DiffRow::Changed { left, .. } => Some(left),
            _ => None,
        }
    }

    pub fn right(&self) -> Option<&Cell> {
        match self {
            DiffRow::Unchanged { right, .. }
            | DiffRow::Added { right }
            | DiffRow::Changed { right, .. } => Some(right),
            _ => None,
        }
    }
}

/// Aligned rows of a two-document line diff.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffTable {
    pub rows: Vec<DiffRow>,
}

impl DiffTable {
    /// True when the two line sequences were identical.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of rows that are not unchanged context or elision markers.
    pub fn change_count(&self) -> usize {
        self.rows
            .iter()
            .filter(|r| {
                matches!(
                    r.kind(),
                    RowKind::Added | RowKind::Removed | RowKind::Changed
                )
            })
            .count()
    }
}

/// Diff two line sequences into a side-by-side table.
pub fn diff_lines(left: &[&str], right: &[&str], options: &DiffOptions) -> DiffTable {
    let matcher = SequenceMatcher::with_autojunk(left, right, options.autojunk);
    let hunks = match options.context {
        Some(context) => matcher.grouped_opcodes(context),
        None => {
            let ops = matcher.opcodes();
            if ops.iter().all(|op| op.tag == Tag::Equal) {
                Vec::new()
            } else {
                vec![ops]
            }
        }
    };

    let mut rows = Vec::new();
    let mut next_line = 0;
    for hunk in &hunks {
        let Some(first) = hunk.first() else { continue };
        if first.a_start > next_line {
            rows.push(DiffRow::Elided {
                lines: first.a_start - next_line,
            });
        }
        for op in hunk {
            push_opcode_rows(&mut rows, left, right, op);
        }
        if let Some(last) = hunk.last() {
            next_line = last.a_end;
        }
    }
    if !hunks.is_empty() && next_line < left.len() {
        rows.push(DiffRow::Elided {
            lines: left.len() - next_line,
        });
    }

    tracing::debug!(
        left_lines = left.len(),
        right_lines = right.len(),
        hunks = hunks.len(),
        rows = rows.len(),
        "line diff built"
    );
    DiffTable { rows }
}

fn push_opcode_rows(rows: &mut Vec<DiffRow>, left: &[&str], right: &[&str], op: &Opcode) {
    match op.tag {
        Tag::Equal => {
            for (i, j) in op.a_range().zip(op.b_range()) {
                rows.push(DiffRow::Unchanged {
                    left: Cell::plain(i + 1, left[i], false),
                    right: Cell::plain(j + 1, right[j], false),
                });
            }
        }
        Tag::Delete => {
            for i in op.a_range() {
                rows.push(DiffRow::Removed {
                    left: Cell::plain(i + 1, left[i], true),
                });
            }
        }
        Tag::Insert => {
            for j in op.b_range() {
                rows.push(DiffRow::Added {
                    right: Cell::plain(j + 1, right[j], true),
                });
            }
        }
        Tag::Replace => {
            let paired = (op.a_end - op.a_start).max(op.b_end - op.b_start);
            for k in 0..paired {
                let i = op.a_start + k;
                let j = op.b_start + k;
                let row = match (i < op.a_end, j < op.b_end) {
                    (true, true) => {
                        let (left_segments, right_segments) = inline_changes(left[i], right[j]);
                        DiffRow::Changed {
                            left: Cell {
                                line_number: i + 1,
                                segments: left_segments,
                            },
                            right: Cell {
                                line_number: j + 1,
                                segments: right_segments,
                            },
                        }
                    }
                    (true, false) => DiffRow::Removed {
                        left: Cell::plain(i + 1, left[i], true),
                    },
                    (false, true) => DiffRow::Added {
                        right: Cell::plain(j + 1, right[j], true),
                    },
                    (false, false) => continue,
                };
                rows.push(row);
            }
        }
    }
}

/// Character-level emphasis for a pair of differing lines.
fn inline_changes(left: &str, right: &str) -> (Vec<Segment>, Vec<Segment>) {
    let a: Vec<char> = left.chars().collect();
    let b: Vec<char> = right.chars().collect();
    let matcher = SequenceMatcher::with_autojunk(&a, &b, false);

    let mut left_segments = Vec::new();
    let mut right_segments = Vec::new();
    for op in matcher.opcodes() {
        let emphasized = op.tag != Tag::Equal;
        let left_text: String = a[op.a_range()].iter().collect();
        let right_text: String = b[op.b_range()].iter().collect();
        push_segment(&mut left_segments, &left_text, emphasized);
        push_segment(&mut right_segments, &right_text, emphasized);
    }
    (left_segments, right_segments)
}

/// Append `text`, merging with the previous segment when emphasis matches.
fn push_segment(segments: &mut Vec<Segment>, text: &str, emphasized: bool) {
    if text.is_empty() {
        return;
    }
    match segments.last_mut() {
        Some(last) if last.emphasized == emphasized => last.text.push_str(text),
        _ => segments.push(Segment {
            text: text.to_string(),
            emphasized,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(n: usize) -> Vec<String> {
        (1..=n).map(|i| format!("line {i}")).collect()
    }

    fn as_strs(v: &[String]) -> Vec<&str> {
        v.iter().map(String::as_str).collect()
    }

    fn kinds(table: &DiffTable) -> Vec<RowKind> {
        table.rows.iter().map(DiffRow::kind).collect()
    }

    #[test]
    fn test_identical_lines_produce_empty_table() {
        let lines = vec!["a", "b", "c"];
        let table = diff_lines(&lines, &lines, &DiffOptions::default());
        assert!(table.is_empty());

        let full = DiffOptions {
            context: None,
            ..DiffOptions::default()
        };
        assert!(diff_lines(&lines, &lines, &full).is_empty());
        assert!(diff_lines(&[], &[], &full).is_empty());
    }

    #[test]
    fn test_single_changed_line_with_context() {
        let a = numbered(20);
        let mut b = a.clone();
        b[9] = "line ten".to_string();
        let table = diff_lines(&as_strs(&a), &as_strs(&b), &DiffOptions::default());

        use RowKind::*;
        assert_eq!(
            kinds(&table),
            vec![
                Elided, Unchanged, Unchanged, Unchanged, Changed, Unchanged, Unchanged,
                Unchanged, Elided
            ]
        );
        assert_eq!(table.rows[0], DiffRow::Elided { lines: 6 });
        assert_eq!(table.rows[8], DiffRow::Elided { lines: 7 });
        assert_eq!(table.change_count(), 1);

        let changed = &table.rows[4];
        assert_eq!(changed.left().unwrap().line_number, 10);
        assert_eq!(changed.right().unwrap().text(), "line ten");
    }

    #[test]
    fn test_inline_emphasis_marks_only_changed_span() {
        let table = diff_lines(
            &["The quick brown fox"],
            &["The quick red fox"],
            &DiffOptions::default(),
        );
        let DiffRow::Changed { left, right } = &table.rows[0] else {
            panic!("expected a changed row, got {:?}", table.rows[0]);
        };
        assert_eq!(left.text(), "The quick brown fox");
        assert_eq!(right.text(), "The quick red fox");
        assert_eq!(
            left.segments.first(),
            Some(&Segment {
                text: "The quick ".into(),
                emphasized: false
            })
        );
        assert_eq!(
            right.segments.last(),
            Some(&Segment {
                text: " fox".into(),
                emphasized: false
            })
        );
        assert!(left.segments.iter().any(|s| s.emphasized));
        assert!(right.segments.iter().any(|s| s.emphasized));
    }

    #[test]
    fn test_inserted_line_is_add_only() {
        let a = vec!["alpha", "beta", "gamma"];
        let b = vec!["alpha", "beta", "inserted", "gamma"];
        let table = diff_lines(&a, &b, &DiffOptions::default());

        use RowKind::*;
        assert_eq!(
            kinds(&table),
            vec![Unchanged, Unchanged, Added, Unchanged]
        );
        let added = &table.rows[2];
        assert!(added.left().is_none());
        assert_eq!(added.right().unwrap().line_number, 3);
    }

    #[test]
    fn test_deleted_line_is_remove_only() {
        let a = vec!["alpha", "beta", "gamma"];
        let b = vec!["alpha", "gamma"];
        let table = diff_lines(&a, &b, &DiffOptions::default());

        use RowKind::*;
        assert_eq!(kinds(&table), vec![Unchanged, Removed, Unchanged]);
        assert_eq!(table.rows[1].left().unwrap().text(), "beta");
    }

    #[test]
    fn test_uneven_replace_pairs_then_spills() {
        let a = vec!["keep", "old one", "old two", "end"];
        let b = vec!["keep", "new one", "end"];
        let table = diff_lines(&a, &b, &DiffOptions::default());

        use RowKind::*;
        assert_eq!(kinds(&table), vec![Unchanged, Changed, Removed, Unchanged]);
    }

    #[test]
    fn test_empty_side() {
        let table = diff_lines(&[], &["only right"], &DiffOptions::default());
        assert_eq!(kinds(&table), vec![RowKind::Added]);

        let table = diff_lines(&["only left"], &[], &DiffOptions::default());
        assert_eq!(kinds(&table), vec![RowKind::Removed]);
    }

    #[test]
    fn test_full_mode_keeps_every_line() {
        let a = numbered(20);
        let mut b = a.clone();
        b[9] = "line ten".to_string();
        let options = DiffOptions {
            context: None,
            ..DiffOptions::default()
        };
        let table = diff_lines(&as_strs(&a), &as_strs(&b), &options);
        assert_eq!(table.rows.len(), 20);
        assert!(table.rows.iter().all(|r| r.kind() != RowKind::Elided));
    }

    #[test]
    fn test_zero_context_shows_only_changes() {
        let a = numbered(10);
        let mut b = a.clone();
        b[4] = "five".to_string();
        let options = DiffOptions {
            context: Some(0),
            ..DiffOptions::default()
        };
        let table = diff_lines(&as_strs(&a), &as_strs(&b), &options);

        use RowKind::*;
        assert_eq!(kinds(&table), vec![Elided, Changed, Elided]);
    }

    #[test]
    fn test_oversized_context_keeps_every_line() {
        use RowKind::*;
        for context in [usize::MAX, usize::MAX / 2 + 10] {
            let options = DiffOptions {
                context: Some(context),
                ..DiffOptions::default()
            };
            let table = diff_lines(&["x", "a", "b"], &["y", "a", "b"], &options);
            assert_eq!(kinds(&table), vec![Changed, Unchanged, Unchanged]);
        }

        let a = numbered(20);
        let mut b = a.clone();
        b[2] = "three".to_string();
        b[17] = "eighteen".to_string();
        let options = DiffOptions {
            context: Some(usize::MAX),
            ..DiffOptions::default()
        };
        let table = diff_lines(&as_strs(&a), &as_strs(&b), &options);
        assert_eq!(table.rows.len(), 20);
        assert_eq!(table.change_count(), 2);
    }
}
