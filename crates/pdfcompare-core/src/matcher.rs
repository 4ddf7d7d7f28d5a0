//! Longest-matching-block sequence alignment.
//!
//! [`SequenceMatcher`] finds the longest contiguous run shared by two
//! sequences, then repeats the search in the gaps before and after it.
//! The resulting matching blocks drive both the character-level similarity
//! score and the line-level diff.

use std::collections::HashMap;
use std::hash::Hash;
use std::ops::Range;

/// Sequences at least this long get the popular-element heuristic.
const AUTOJUNK_MIN_LEN: usize = 200;

/// A run of `len` equal elements starting at `a` in the first sequence
/// and `b` in the second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct MatchingBlock {
    pub a: usize,
    pub b: usize,
    pub len: usize,
}

/// Kind of edit an [`Opcode`] describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    Equal,
    Replace,
    Delete,
    Insert,
}

/// One step in turning the first sequence into the second:
/// `a[a_start..a_end]` relates to `b[b_start..b_end]` as `tag` says.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Opcode {
    pub tag: Tag,
    pub a_start: usize,
    pub a_end: usize,
    pub b_start: usize,
    pub b_end: usize,
}

impl Opcode {
    pub fn new(tag: Tag, a_start: usize, a_end: usize, b_start: usize, b_end: usize) -> Self {
        Self {
            tag,
            a_start,
            a_end,
            b_start,
            b_end,
        }
    }

    pub fn a_range(&self) -> Range<usize> {
        self.a_start..self.a_end
    }

    pub fn b_range(&self) -> Range<usize> {
        self.b_start..self.b_end
    }
}

/// Aligns two sequences by repeatedly taking the longest matching block.
///
/// No global optimality is attempted; the result is the familiar
/// "human-readable" alignment of classic diff tools.
pub struct SequenceMatcher<'a, T> {
    a: &'a [T],
    b: &'a [T],
    /// Positions of each element of `b`, ascending. Popular elements are
    /// absent when autojunk dropped them.
    b2j: HashMap<&'a T, Vec<usize>>,
}

impl<'a, T: Eq + Hash> SequenceMatcher<'a, T> {
    /// Matcher with the popular-element heuristic enabled.
    pub fn new(a: &'a [T], b: &'a [T]) -> Self {
        Self::with_autojunk(a, b, true)
    }

    /// When `autojunk` is set and `b` has at least 200 elements, elements
    /// occurring more than `len(b) / 100 + 1` times are not used to seed
    /// matches. They can still become part of a match by extension.
    pub fn with_autojunk(a: &'a [T], b: &'a [T], autojunk: bool) -> Self {
        let mut b2j: HashMap<&'a T, Vec<usize>> = HashMap::new();
        for (j, elt) in b.iter().enumerate() {
            b2j.entry(elt).or_default().push(j);
        }

        if autojunk && b.len() >= AUTOJUNK_MIN_LEN {
            let threshold = b.len() / 100 + 1;
            let before = b2j.len();
            b2j.retain(|_, positions| positions.len() <= threshold);
            tracing::trace!(
                dropped = before - b2j.len(),
                threshold,
                "autojunk removed popular elements"
            );
        }

        Self { a, b, b2j }
    }

    /// Longest matching block in `a[alo..ahi]` and `b[blo..bhi]`.
    ///
    /// Among equally long blocks the one starting earliest in `a` wins,
    /// then the one starting earliest in `b`. Returns a block of length 0
    /// at `(alo, blo)` when nothing matches.
    pub fn find_longest_match(
        &self,
        alo: usize,
        ahi: usize,
        blo: usize,
        bhi: usize,
    ) -> MatchingBlock {
        let (mut best_i, mut best_j, mut best_len) = (alo, blo, 0);

        // run_len[j] = length of the match ending at a[i - 1] and b[j]
        let mut run_len: HashMap<usize, usize> = HashMap::new();
        for i in alo..ahi {
            let mut next_run_len = HashMap::new();
            if let Some(positions) = self.b2j.get(&self.a[i]) {
                for &j in positions {
                    if j < blo {
                        continue;
                    }
                    if j >= bhi {
                        break;
                    }
                    let k = j
                        .checked_sub(1)
                        .and_then(|prev| run_len.get(&prev))
                        .copied()
                        .unwrap_or(0)
                        + 1;
                    next_run_len.insert(j, k);
                    if k > best_len {
                        best_i = i + 1 - k;
                        best_j = j + 1 - k;
                        best_len = k;
                    }
                }
            }
            run_len = next_run_len;
        }

        // Grow across elements the index left out (popular ones).
        while best_i > alo && best_j > blo && self.a[best_i - 1] == self.b[best_j - 1] {
            best_i -= 1;
            best_j -= 1;
            best_len += 1;
        }
        while best_i + best_len < ahi
            && best_j + best_len < bhi
            && self.a[best_i + best_len] == self.b[best_j + best_len]
        {
            best_len += 1;
        }

        MatchingBlock {
            a: best_i,
            b: best_j,
            len: best_len,
        }
    }

    /// All matching blocks, sorted, with adjacent blocks merged.
    ///
    /// The last entry is always the sentinel `(len(a), len(b), 0)`.
    pub fn matching_blocks(&self) -> Vec<MatchingBlock> {
        let (la, lb) = (self.a.len(), self.b.len());

        let mut queue = vec![(0, la, 0, lb)];
        let mut blocks = Vec::new();
        while let Some((alo, ahi, blo, bhi)) = queue.pop() {
            let m = self.find_longest_match(alo, ahi, blo, bhi);
            if m.len == 0 {
                continue;
            }
            blocks.push(m);
            if alo < m.a && blo < m.b {
                queue.push((alo, m.a, blo, m.b));
            }
            if m.a + m.len < ahi && m.b + m.len < bhi {
                queue.push((m.a + m.len, ahi, m.b + m.len, bhi));
            }
        }
        blocks.sort();

        let mut merged: Vec<MatchingBlock> = Vec::with_capacity(blocks.len() + 1);
        for block in blocks {
            match merged.last_mut() {
                Some(last) if last.a + last.len == block.a && last.b + last.len == block.b => {
                    last.len += block.len;
                }
                _ => merged.push(block),
            }
        }
        merged.push(MatchingBlock {
            a: la,
            b: lb,
            len: 0,
        });
        merged
    }

    /// Edit script turning `a` into `b`.
    pub fn opcodes(&self) -> Vec<Opcode> {
        let (mut i, mut j) = (0, 0);
        let mut ops = Vec::new();

        for block in self.matching_blocks() {
            let tag = match (i < block.a, j < block.b) {
                (true, true) => Some(Tag::Replace),
                (true, false) => Some(Tag::Delete),
                (false, true) => Some(Tag::Insert),
                (false, false) => None,
            };
            if let Some(tag) = tag {
                ops.push(Opcode::new(tag, i, block.a, j, block.b));
            }
            i = block.a + block.len;
            j = block.b + block.len;
            if block.len > 0 {
                ops.push(Opcode::new(Tag::Equal, block.a, i, block.b, j));
            }
        }
        ops
    }

    /// Opcodes grouped into hunks with up to `context` equal elements
    /// around each change.
    ///
    /// Equal runs longer than `2 * context` split hunks. Identical
    /// sequences produce no hunks.
    pub fn grouped_opcodes(&self, context: usize) -> Vec<Vec<Opcode>> {
        let mut codes = self.opcodes();
        if codes.is_empty() {
            codes.push(Opcode::new(Tag::Equal, 0, 1, 0, 1));
        }

        if let Some(first) = codes.first_mut() {
            if first.tag == Tag::Equal {
                first.a_start = first.a_start.max(first.a_end.saturating_sub(context));
                first.b_start = first.b_start.max(first.b_end.saturating_sub(context));
            }
        }
        if let Some(last) = codes.last_mut() {
            if last.tag == Tag::Equal {
                last.a_end = last.a_end.min(last.a_start.saturating_add(context));
                last.b_end = last.b_end.min(last.b_start.saturating_add(context));
            }
        }

        let mut groups = Vec::new();
        let mut group = Vec::new();
        for mut code in codes {
            if code.tag == Tag::Equal && code.a_end - code.a_start > context.saturating_mul(2) {
                group.push(Opcode::new(
                    Tag::Equal,
                    code.a_start,
                    code.a_end.min(code.a_start.saturating_add(context)),
                    code.b_start,
                    code.b_end.min(code.b_start.saturating_add(context)),
                ));
                groups.push(std::mem::take(&mut group));
                code.a_start = code.a_start.max(code.a_end.saturating_sub(context));
                code.b_start = code.b_start.max(code.b_end.saturating_sub(context));
            }
            group.push(code);
        }
        if !group.is_empty() && !(group.len() == 1 && group[0].tag == Tag::Equal) {
            groups.push(group);
        }
        groups
    }

    /// Similarity in [0, 1]: `2 * M / T` where `M` is the number of
    /// matched elements and `T` the combined length. Two empty sequences
    /// score 1.
    pub fn ratio(&self) -> f64 {
        let total = self.a.len() + self.b.len();
        if total == 0 {
            return 1.0;
        }
        let matches: usize = self.matching_blocks().iter().map(|m| m.len).sum();
        2.0 * matches as f64 / total as f64
    }
}
