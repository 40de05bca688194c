//! Longest-matching-blocks sequence alignment.
//!
//! A Ratcliff/Obershelp style matcher: find the longest contiguous equal run,
//! then recurse on the pieces to its left and right. The resulting blocks
//! drive both the similarity ratio and the equal/replace/delete/insert
//! opcodes. Works over any slice of hashable elements, so the same code
//! compares characters and whole words.

use std::collections::HashMap;
use std::hash::Hash;
use std::ops::Range;

use serde::{Deserialize, Serialize};

/// A run of `size` equal elements starting at `a[a_start]` and `b[b_start]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match {
    pub a_start: usize,
    pub b_start: usize,
    pub size: usize,
}

impl Match {
    fn new(a_start: usize, b_start: usize, size: usize) -> Self {
        Self {
            a_start,
            b_start,
            size,
        }
    }
}

/// How a span of `a` relates to a span of `b`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpTag {
    /// `a[a]` equals `b[b]`.
    Equal,
    /// `a[a]` should be replaced by `b[b]`.
    Replace,
    /// `a[a]` has no counterpart in `b` (`b` range is empty).
    Delete,
    /// `b[b]` has no counterpart in `a` (`a` range is empty).
    Insert,
}

/// One step of the edit script turning `a` into `b`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opcode {
    pub tag: OpTag,
    pub a: Range<usize>,
    pub b: Range<usize>,
}

/// Aligns two sequences by repeatedly extracting longest common runs.
pub struct SequenceMatcher<'a, T> {
    a: &'a [T],
    b: &'a [T],
    /// Positions of every element of `b`, ascending.
    b2j: HashMap<&'a T, Vec<usize>>,
}

impl<'a, T: Eq + Hash> SequenceMatcher<'a, T> {
    pub fn new(a: &'a [T], b: &'a [T]) -> Self {
        let mut b2j: HashMap<&'a T, Vec<usize>> = HashMap::new();
        for (j, elt) in b.iter().enumerate() {
            b2j.entry(elt).or_default().push(j);
        }
        Self { a, b, b2j }
    }

    /// Longest equal run within `a[alo..ahi]` and `b[blo..bhi]`.
    ///
    /// Among equally long runs the one starting earliest in `a` wins, and
    /// among those the one starting earliest in `b`. Returns a zero-size
    /// match at `(alo, blo)` when nothing matches.
    pub fn find_longest_match(&self, alo: usize, ahi: usize, blo: usize, bhi: usize) -> Match {
        let (mut best_i, mut best_j, mut best_size) = (alo, blo, 0usize);

        // j2len[j] = length of the equal run ending at a[i - 1], b[j]
        let mut j2len: HashMap<usize, usize> = HashMap::new();
        for i in alo..ahi {
            let mut next_j2len: HashMap<usize, usize> = HashMap::new();
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
                        .and_then(|prev| j2len.get(&prev))
                        .copied()
                        .unwrap_or(0)
                        + 1;
                    next_j2len.insert(j, k);
                    if k > best_size {
                        best_i = i + 1 - k;
                        best_j = j + 1 - k;
                        best_size = k;
                    }
                }
            }
            j2len = next_j2len;
        }

        while best_i > alo && best_j > blo && self.a[best_i - 1] == self.b[best_j - 1] {
            best_i -= 1;
            best_j -= 1;
            best_size += 1;
        }
        while best_i + best_size < ahi
            && best_j + best_size < bhi
            && self.a[best_i + best_size] == self.b[best_j + best_size]
        {
            best_size += 1;
        }

        Match::new(best_i, best_j, best_size)
    }

    /// Non-overlapping, order-preserving equal runs covering as much of both
    /// sequences as the greedy longest-first strategy finds.
    ///
    /// Blocks are sorted, adjacent blocks are merged, and the list always
    /// ends with the sentinel `(a.len(), b.len(), 0)`.
    pub fn matching_blocks(&self) -> Vec<Match> {
        let (la, lb) = (self.a.len(), self.b.len());

        let mut queue = vec![(0, la, 0, lb)];
        let mut blocks = Vec::new();
        while let Some((alo, ahi, blo, bhi)) = queue.pop() {
            let m = self.find_longest_match(alo, ahi, blo, bhi);
            if m.size == 0 {
                continue;
            }
            if alo < m.a_start && blo < m.b_start {
                queue.push((alo, m.a_start, blo, m.b_start));
            }
            if m.a_start + m.size < ahi && m.b_start + m.size < bhi {
                queue.push((m.a_start + m.size, ahi, m.b_start + m.size, bhi));
            }
            blocks.push(m);
        }
        blocks.sort_by_key(|m| (m.a_start, m.b_start, m.size));

        let mut merged: Vec<Match> = Vec::with_capacity(blocks.len() + 1);
        for m in blocks {
            match merged.last_mut() {
                Some(last)
                    if last.a_start + last.size == m.a_start
                        && last.b_start + last.size == m.b_start =>
                {
                    last.size += m.size;
                }
                _ => merged.push(m),
            }
        }
        merged.push(Match::new(la, lb, 0));
        merged
    }

    /// Edit script from `a` to `b`, in left-to-right order.
    pub fn opcodes(&self) -> Vec<Opcode> {
        let mut ops = Vec::new();
        let (mut i, mut j) = (0, 0);

        for m in self.matching_blocks() {
            let tag = match (i < m.a_start, j < m.b_start) {
                (true, true) => Some(OpTag::Replace),
                (true, false) => Some(OpTag::Delete),
                (false, true) => Some(OpTag::Insert),
                (false, false) => None,
            };
            if let Some(tag) = tag {
                ops.push(Opcode {
                    tag,
                    a: i..m.a_start,
                    b: j..m.b_start,
                });
            }
            i = m.a_start + m.size;
            j = m.b_start + m.size;
            if m.size > 0 {
                ops.push(Opcode {
                    tag: OpTag::Equal,
                    a: m.a_start..i,
                    b: m.b_start..j,
                });
            }
        }

        ops
    }

    /// Similarity in `[0.0, 1.0]`: twice the matched length over the total
    /// length. Two empty sequences are identical (1.0).
    pub fn ratio(&self) -> f64 {
        let total = self.a.len() + self.b.len();
        if total == 0 {
            return 1.0;
        }
        let matched: usize = self.matching_blocks().iter().map(|m| m.size).sum();
        2.0 * matched as f64 / total as f64
    }
}

/// Character-level similarity ratio of two strings.
pub fn char_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    SequenceMatcher::new(&a, &b).ratio()
}
