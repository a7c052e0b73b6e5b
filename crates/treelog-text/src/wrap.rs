#![forbid(unsafe_code)]

//! Hard wrapping of a single line into column budgets.
//!
//! Unlike word wrapping, a fragment ends exactly where the budget runs out,
//! mid-word if need be. The first fragment continues the current line, so it
//! gets whatever room is left there; every further fragment starts a fresh
//! line with the full continuation budget.

use crate::cursor::advance;
use crate::metric::{Metric, fit};

/// Split `line` into fragments: the first at most `first` columns wide, the
/// rest at most `rest` columns wide.
///
/// Concatenating the fragments yields `line` again. An empty line yields one
/// empty fragment. When nothing fits the remaining room of the current line,
/// the first fragment is empty and the text moves to a fresh line. A unit
/// wider than a fresh line is emitted on its own rather than dropped.
///
/// `line` should not contain `\n`; callers split on newlines first.
#[must_use]
pub fn split_line(line: &[u8], first: usize, rest: usize, metric: Metric) -> Vec<&[u8]> {
    if line.is_empty() {
        return vec![line];
    }
    let rest = rest.max(1);
    let mut fragments = Vec::new();
    let mut offset = 0usize;
    let mut budget = first;
    let mut fresh = first >= rest;

    while offset < line.len() {
        let mut end = fit(line, offset, budget, metric);
        if end == offset {
            if fresh {
                end = advance(line, offset, 1);
            } else {
                // Nothing fits after the current column; continue below.
                fragments.push(&line[offset..offset]);
                budget = rest;
                fresh = true;
                continue;
            }
        }
        fragments.push(&line[offset..end]);
        offset = end;
        budget = rest;
        fresh = true;
    }
    fragments
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split<'a>(line: &'a str, first: usize, rest: usize) -> Vec<&'a str> {
        split_line(line.as_bytes(), first, rest, Metric::Codepoints)
            .into_iter()
            .map(|frag| std::str::from_utf8(frag).unwrap())
            .collect()
    }

    #[test]
    fn short_line_is_one_fragment() {
        assert_eq!(split("hello", 10, 10), vec!["hello"]);
        assert_eq!(split("hello", 5, 10), vec!["hello"]);
    }

    #[test]
    fn empty_line_is_one_empty_fragment() {
        assert_eq!(split("", 10, 10), vec![""]);
    }

    #[test]
    fn wraps_mid_word_on_unit_boundaries() {
        assert_eq!(split("héllo wörld", 4, 6), vec!["héll", "o wörl", "d"]);
    }

    #[test]
    fn exhausted_first_budget_starts_fresh_line() {
        assert_eq!(split("abc", 0, 2), vec!["", "ab", "c"]);
    }

    #[test]
    fn zero_rest_budget_still_progresses() {
        assert_eq!(split("abc", 1, 0), vec!["a", "b", "c"]);
    }

    #[test]
    fn wide_cell_moves_to_next_line() {
        let frags = split_line("a你".as_bytes(), 2, 4, Metric::Cells);
        assert_eq!(frags, vec!["a".as_bytes(), "你".as_bytes()]);
    }

    #[test]
    fn wide_cell_on_narrow_fresh_line_is_forced() {
        let frags = split_line("你好".as_bytes(), 1, 1, Metric::Cells);
        assert_eq!(frags, vec!["你".as_bytes(), "好".as_bytes()]);
    }

    #[test]
    fn color_sequences_stay_in_one_fragment() {
        let line = "ab\x1b[1;32m[  OK  ]\x1b[0m";
        assert_eq!(split(line, 3, 4), vec!["ab\x1b[1;32m[", "  OK", "  ]\x1b[0m"]);
    }

    #[test]
    fn malformed_bytes_are_kept() {
        let frags = split_line(b"ab\xffcd", 3, 3, Metric::Codepoints);
        assert_eq!(frags, vec![&b"ab\xff"[..], &b"cd"[..]]);
    }
}
