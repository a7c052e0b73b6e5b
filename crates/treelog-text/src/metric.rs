#![forbid(unsafe_code)]

//! Column metrics for units.
//!
//! A CSI escape sequence (`ESC [`, parameter and intermediate bytes, one
//! final byte in `0x40..=0x7E`) occupies no columns under either metric and
//! is measured and fitted as a whole, so wrapping never breaks inside one.
//! An unterminated sequence is ordinary text.

use std::str::FromStr;

use unicode_width::UnicodeWidthChar;

use crate::cursor::{Unit, decode, length};

const ESC: u8 = 0x1b;

/// How many columns a unit advances the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Metric {
    /// Every unit is one column.
    #[default]
    Codepoints,
    /// Terminal cell width: CJK and emoji take two, combining marks and
    /// control characters none. Malformed units take one.
    Cells,
}

impl Metric {
    /// Columns taken by `unit`.
    #[must_use]
    pub fn unit_width(self, unit: &Unit<'_>) -> usize {
        match (self, unit.ch) {
            (Self::Codepoints, _) | (Self::Cells, None) => 1,
            (Self::Cells, Some(ch)) => ch.width().unwrap_or(0),
        }
    }

    /// Lowercase name, as accepted by [`FromStr`].
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Codepoints => "codepoints",
            Self::Cells => "cells",
        }
    }
}

impl FromStr for Metric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "codepoints" | "codepoint" | "chars" => Ok(Self::Codepoints),
            "cells" | "cell" | "width" => Ok(Self::Cells),
            _ => Err(s.to_string()),
        }
    }
}

/// Byte length of the CSI sequence at the start of `bytes`, if complete.
#[must_use]
pub fn csi_len(bytes: &[u8]) -> Option<usize> {
    if bytes.len() < 3 || bytes[0] != ESC || bytes[1] != b'[' {
        return None;
    }
    for (i, &b) in bytes.iter().enumerate().skip(2) {
        match b {
            0x20..=0x3f => {}
            0x40..=0x7e => return Some(i + 1),
            _ => return None,
        }
    }
    None
}

/// Byte length and column width of each step through `text`: a whole CSI
/// sequence or a single unit.
fn steps(text: &[u8], metric: Metric) -> impl Iterator<Item = (usize, usize)> + '_ {
    let mut rest = text;
    std::iter::from_fn(move || {
        let step = match csi_len(rest) {
            Some(len) => (len, 0),
            None => {
                let unit = decode(rest)?;
                (unit.len(), metric.unit_width(&unit))
            }
        };
        rest = &rest[step.0..];
        Some(step)
    })
}

/// Total columns of `text` under `metric`.
#[must_use]
pub fn measure(text: &[u8], metric: Metric) -> usize {
    if metric == Metric::Codepoints && !text.contains(&ESC) {
        return length(text);
    }
    steps(text, metric).map(|(_, width)| width).sum()
}

/// End offset of the longest run starting at `offset` that fits in `budget`
/// columns.
///
/// Zero-width units and escape sequences directly after the run are
/// included.
#[must_use]
pub fn fit(text: &[u8], offset: usize, budget: usize, metric: Metric) -> usize {
    let start = offset.min(text.len());
    let mut end = start;
    let mut used = 0usize;
    for (len, width) in steps(&text[start..], metric) {
        if used + width > budget {
            break;
        }
        used += width;
        end += len;
    }
    end
}
