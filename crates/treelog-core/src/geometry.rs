#![forbid(unsafe_code)]

//! Terminal geometry: raw column count and the chrome around content.
//!
//! Every rendered line has the same shape:
//!
//! ```text
//! [dd.MM.yyyy hh:mm:ss.zzz]     content ..................... [  OK  ]
//! |<-------- gutter -------->|<------ content width ------>|<bracket>|
//! ```
//!
//! The gutter is the stamp plus its brackets and five spaces of padding
//! (`stamp_width + 7`), the bracket column is `BRACKET_WIDTH + 2`. Content
//! width is whatever the terminal has left.

use std::fmt;

/// Interior width of a status bracket (`[` and `]` excluded).
pub const BRACKET_WIDTH: usize = 6;

/// Content width used when the terminal cannot be queried or the lane is not
/// bound to the console.
pub const DEFAULT_FALLBACK_WIDTH: usize = 60;

/// `[` + `]` + five spaces following the stamp.
const GUTTER_PAD: usize = 7;

/// Source of the terminal's raw column count.
///
/// Implementations must never block and never fail; `None` means "unknown"
/// and selects the fallback width.
pub trait WidthProvider: Send + Sync + fmt::Debug {
    /// Current number of terminal columns, if known.
    fn columns(&self) -> Option<u16>;
}

/// Queries the real terminal through crossterm.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalWidth;

impl WidthProvider for TerminalWidth {
    #[cfg(not(target_arch = "wasm32"))]
    fn columns(&self) -> Option<u16> {
        crossterm::terminal::size()
            .ok()
            .map(|(cols, _)| cols)
            .filter(|&cols| cols > 0)
    }

    #[cfg(target_arch = "wasm32")]
    fn columns(&self) -> Option<u16> {
        None
    }
}

/// A fixed column count, for tests and non-interactive output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedColumns(pub u16);

impl WidthProvider for FixedColumns {
    fn columns(&self) -> Option<u16> {
        Some(self.0)
    }
}

/// Line layout derived from the stamp width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    stamp_width: usize,
    fallback_width: usize,
}

impl Geometry {
    /// Layout for stamps `stamp_width` columns wide.
    #[must_use]
    pub fn new(stamp_width: usize, fallback_width: usize) -> Self {
        Self {
            stamp_width,
            fallback_width: fallback_width.max(1),
        }
    }

    /// Width reserved left of the content: stamp, its brackets and padding.
    #[must_use]
    pub const fn gutter(&self) -> usize {
        self.stamp_width + GUTTER_PAD
    }

    /// Columns not available to content: gutter plus the status bracket.
    #[must_use]
    pub const fn chrome(&self) -> usize {
        self.gutter() + BRACKET_WIDTH + 2
    }

    /// Usable content width for a terminal of `columns` columns.
    ///
    /// Never returns zero, so wrapping always makes progress.
    #[must_use]
    pub fn content_width(&self, columns: Option<u16>) -> usize {
        match columns {
            Some(cols) => usize::from(cols).saturating_sub(self.chrome()).max(1),
            None => self.fallback_width,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_stamp_chrome_matches_layout() {
        // "dd.MM.yyyy hh:mm:ss.zzz" renders 23 columns wide.
        let geometry = Geometry::new(23, DEFAULT_FALLBACK_WIDTH);
        assert_eq!(geometry.gutter(), 30);
        assert_eq!(geometry.chrome(), 38);
        assert_eq!(geometry.content_width(Some(120)), 82);
    }

    #[test]
    fn unknown_columns_use_fallback() {
        let geometry = Geometry::new(23, DEFAULT_FALLBACK_WIDTH);
        assert_eq!(geometry.content_width(None), 60);
    }

    #[test]
    fn narrow_terminal_never_yields_zero() {
        let geometry = Geometry::new(23, DEFAULT_FALLBACK_WIDTH);
        assert_eq!(geometry.content_width(Some(10)), 1);
        assert_eq!(geometry.content_width(Some(38)), 1);
    }

    #[test]
    fn zero_fallback_is_clamped() {
        assert_eq!(Geometry::new(5, 0).content_width(None), 1);
    }

    #[test]
    fn fixed_columns_report_their_value() {
        assert_eq!(FixedColumns(98).columns(), Some(98));
    }
}
