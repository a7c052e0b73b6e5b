#![forbid(unsafe_code)]

//! Spinner glyphs and bracket labels.

use treelog_core::BRACKET_WIDTH;

/// Spinner sequence, advanced once per progress update.
pub const TICK_GLYPHS: [char; 4] = ['|', '/', '-', '\\'];

/// Cyclic position in [`TICK_GLYPHS`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickCursor {
    index: usize,
}

impl TickCursor {
    /// Glyph shown by the next progress update.
    #[must_use]
    pub fn current(self) -> char {
        TICK_GLYPHS[self.index % TICK_GLYPHS.len()]
    }

    /// Move to the next glyph, wrapping around.
    pub fn advance(&mut self) {
        self.index = (self.index + 1) % TICK_GLYPHS.len();
    }
}

/// Bracket interior for `label`.
///
/// The label is split at half its length: the left half is right-aligned and
/// the right half left-aligned, each in half the bracket width. Labels longer
/// than the bracket overflow rather than being cut.
///
/// ```
/// use treelog_render::tick::center_label;
///
/// assert_eq!(center_label("OK"), "  OK  ");
/// assert_eq!(center_label("FAIL"), " FAIL ");
/// ```
#[must_use]
pub fn center_label(label: &str) -> String {
    const HALF: usize = BRACKET_WIDTH / 2;
    let mid = label
        .char_indices()
        .nth(label.chars().count() / 2)
        .map_or(label.len(), |(at, _)| at);
    let (left, right) = label.split_at(mid);
    format!("{left:>HALF$}{right:<HALF$}")
}

/// Label for a percent bracket: glyph, space, percentage padded to three.
///
/// `total` must be non-zero.
#[must_use]
pub fn percent_label(glyph: char, cur: usize, total: usize) -> String {
    let pct = 100 * cur as u128 / total.max(1) as u128;
    format!("{glyph} {pct:>3}%")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_cycles_through_glyphs() {
        let mut tick = TickCursor::default();
        let seen: Vec<char> = (0..5)
            .map(|_| {
                let glyph = tick.current();
                tick.advance();
                glyph
            })
            .collect();
        assert_eq!(seen, vec!['|', '/', '-', '\\', '|']);
    }

    #[test]
    fn status_labels_are_centered() {
        assert_eq!(center_label("OK"), "  OK  ");
        assert_eq!(center_label("FAIL"), " FAIL ");
        assert_eq!(center_label("|"), "   |  ");
        assert_eq!(center_label(""), "      ");
    }

    #[test]
    fn odd_labels_lean_right() {
        assert_eq!(center_label("ERR"), "  ERR ");
    }

    #[test]
    fn long_labels_overflow() {
        assert_eq!(center_label("TIMEOUT"), "TIMEOUT");
        assert_eq!(center_label("WARNING!"), "WARNING!");
    }

    #[test]
    fn multibyte_labels_split_on_chars() {
        assert_eq!(center_label("ÖK"), "  ÖK  ");
    }

    #[test]
    fn percent_labels() {
        assert_eq!(percent_label('|', 50, 200), "|  25%");
        assert_eq!(percent_label('/', 0, 7), "/   0%");
        assert_eq!(percent_label('-', 7, 7), "- 100%");
        assert_eq!(percent_label('\\', 1, 3), "\\  33%");
    }

    #[test]
    fn percent_label_fills_bracket() {
        assert_eq!(center_label(&percent_label('|', 50, 200)), "|  25%");
    }

    #[test]
    fn huge_counts_do_not_overflow() {
        assert_eq!(percent_label('|', usize::MAX, usize::MAX), "| 100%");
    }
}
