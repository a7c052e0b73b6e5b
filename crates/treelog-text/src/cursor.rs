#![forbid(unsafe_code)]

//! UTF-8 aware seeking over byte spans.
//!
//! A *unit* is either one Unicode scalar value or one malformed sequence.
//! Malformed input follows the "maximal subpart" rule: the longest prefix
//! that could have started a valid sequence is consumed as a single unit, and
//! a sequence cut off by the end of input is one unit as well. Decoding never
//! fails and never skips bytes, so every byte of the input belongs to exactly
//! one unit.
//!
//! # Example
//! ```
//! use treelog_text::cursor::{advance, length, slice};
//!
//! let text = b"a\xffb\xe2\x82";
//! assert_eq!(length(text), 4); // 'a', 0xff, 'b', truncated "€"
//! assert_eq!(advance(text, 0, 2), 2);
//! assert_eq!(slice(text, 3, 1), b"\xe2\x82");
//! ```

/// One decoded unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unit<'a> {
    /// Bytes making up the unit.
    pub bytes: &'a [u8],
    /// The scalar value, or `None` for a malformed sequence.
    pub ch: Option<char>,
}

impl Unit<'_> {
    /// Length of the unit in bytes (always at least 1).
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Units are never empty; provided for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Decode the unit at the start of `bytes`, or `None` on empty input.
#[must_use]
pub fn decode(bytes: &[u8]) -> Option<Unit<'_>> {
    let &lead = bytes.first()?;
    let expected = match lead {
        0x00..=0x7F => {
            return Some(Unit {
                bytes: &bytes[..1],
                ch: Some(char::from(lead)),
            });
        }
        0xC2..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF4 => 4,
        // Continuation bytes, overlong leads and out-of-range leads.
        _ => {
            return Some(Unit {
                bytes: &bytes[..1],
                ch: None,
            });
        }
    };

    let window = &bytes[..expected.min(bytes.len())];
    let unit = match std::str::from_utf8(window) {
        Ok(valid) => Unit {
            bytes: window,
            ch: valid.chars().next(),
        },
        Err(err) => {
            // `valid_up_to` is 0: the window starts at the failing sequence.
            let len = err.error_len().unwrap_or(window.len()).max(1);
            Unit {
                bytes: &window[..len],
                ch: None,
            }
        }
    };
    Some(unit)
}

/// Iterator over the units of a byte span.
#[derive(Debug, Clone)]
pub struct Units<'a> {
    rest: &'a [u8],
}

impl<'a> Iterator for Units<'a> {
    type Item = Unit<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let unit = decode(self.rest)?;
        self.rest = &self.rest[unit.len()..];
        Some(unit)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.rest.len().div_ceil(4), Some(self.rest.len()))
    }
}

/// Iterate the units of `text`.
#[must_use]
pub fn units(text: &[u8]) -> Units<'_> {
    Units { rest: text }
}

/// Number of units in `text`.
#[must_use]
pub fn length(text: &[u8]) -> usize {
    if text.is_ascii() {
        return text.len();
    }
    units(text).count()
}

/// Byte offset reached by skipping `count` units from `offset`.
///
/// Stops at the end of input; an `offset` past the end is clamped.
#[must_use]
pub fn advance(text: &[u8], offset: usize, count: usize) -> usize {
    let start = offset.min(text.len());
    let skipped: usize = units(&text[start..]).take(count).map(|u| u.len()).sum();
    start + skipped
}

/// Byte span of `count` units starting at unit `start`.
#[must_use]
pub fn slice(text: &[u8], start: usize, count: usize) -> &[u8] {
    let begin = advance(text, 0, start);
    let end = advance(text, begin, count);
    &text[begin..end]
}

/// Offset just past the next `\n` at or after `offset`, or the end of input.
#[must_use]
pub fn line_end(text: &[u8], offset: usize) -> usize {
    let start = offset.min(text.len());
    // 0x0A never occurs inside a multi-byte sequence.
    text[start..]
        .iter()
        .position(|&b| b == b'\n')
        .map_or(text.len(), |pos| start + pos + 1)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn length_matches_chars_for_valid_utf8(s in "\\PC{0,64}") {
            prop_assert_eq!(length(s.as_bytes()), s.chars().count());
        }

        #[test]
        fn units_partition_arbitrary_bytes(bytes in proptest::collection::vec(any::<u8>(), 0..64)) {
            let total: usize = units(&bytes).map(|u| u.len()).sum();
            prop_assert_eq!(total, bytes.len());
            prop_assert!(units(&bytes).all(|u| !u.is_empty() && u.len() <= 4));
        }

        #[test]
        fn slices_concatenate_back(s in "\\PC{0,48}", split in 0usize..64) {
            let text = s.as_bytes();
            let n = length(text);
            let head = slice(text, 0, split);
            let tail = slice(text, split, n);
            let mut joined = head.to_vec();
            joined.extend_from_slice(tail);
            prop_assert_eq!(joined, text.to_vec());
        }
    }
}
