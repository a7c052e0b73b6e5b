#![forbid(unsafe_code)]

//! Text histograms.
//!
//! The value range is cut into at most [`HIST_HEIGHT`] bands. Each output row
//! is a band, top band first, with a caption column on the left holding the
//! band's upper bound on every other row:
//!
//! ```text
//! 12.50   ░░░█░░░
//!         ░░██░░░
//! 10.00   ░███░█░
//! ```

use treelog_text::{length, slice};

/// Columns reserved for the caption.
pub const CAPTION_WIDTH: usize = 8;

/// Number of rows in a histogram.
pub const HIST_HEIGHT: usize = 20;

/// Glyph for an empty histogram cell.
pub const EMPTY_BAR: &str = "░";

/// Glyph for a filled histogram cell.
pub const FULL_BAR: &str = "█";

/// How a value fills its column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HistStyle {
    /// Only the band containing the value is filled.
    #[default]
    Band,
    /// Every band from the minimum up to the value is filled.
    Bar,
}

/// Rows of a histogram for `values` fitted to `content_width` columns.
///
/// Returns no rows when the content width cannot hold the caption. Empty
/// input yields a blank block of [`HIST_HEIGHT`] full-width rows. Only the
/// first `content_width - CAPTION_WIDTH` values are shown.
#[must_use]
pub fn histogram_rows(values: &[f64], content_width: usize, style: HistStyle) -> Vec<String> {
    if content_width <= CAPTION_WIDTH {
        return Vec::new();
    }
    let width = content_width - CAPTION_WIDTH;
    if values.is_empty() {
        return vec![EMPTY_BAR.repeat(content_width); HIST_HEIGHT];
    }

    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let amp = if max == min { 1.0 } else { max - min };
    let bands = (amp.ceil() as usize).clamp(1, HIST_HEIGHT);
    let step = amp / bands as f64;

    let shown = &values[..values.len().min(width)];
    let lead = (width - shown.len()) / 2;
    let trail = width - shown.len() - lead;

    (0..HIST_HEIGHT)
        .rev()
        .map(|i| {
            let high = (i + 1) as f64 * step + min;
            let low = i as f64 * step + min;
            let mut row = if i % 2 == 0 {
                caption(high)
            } else {
                " ".repeat(CAPTION_WIDTH)
            };
            row.push_str(&EMPTY_BAR.repeat(lead));
            for &v in shown {
                let filled = (v <= high || style == HistStyle::Bar) && v >= low;
                row.push_str(if filled { FULL_BAR } else { EMPTY_BAR });
            }
            row.push_str(&EMPTY_BAR.repeat(trail));
            row
        })
        .collect()
}

/// Caption for a band bound: at most `CAPTION_WIDTH - 1` units, padded.
fn caption(value: f64) -> String {
    let text = if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value:.2}")
    };
    let bytes = text.as_bytes();
    let keep = length(bytes).min(CAPTION_WIDTH - 1);
    let mut out = String::from_utf8_lossy(slice(bytes, 0, keep)).into_owned();
    out.push_str(&" ".repeat(CAPTION_WIDTH - keep));
    out
}
