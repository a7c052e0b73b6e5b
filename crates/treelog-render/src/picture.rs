#![forbid(unsafe_code)]

//! Character pictures and their downsampling.
//!
//! A picture is a grid of colored cells with rows of any length. Pictures
//! wider than the content area are shrunk by nearest-neighbour sampling with
//! the same factor on both axes; narrower pictures are never stretched.

/// Color of a default cell (bright white).
pub const DEFAULT_CELL_COLOR: u8 = 15;

/// Glyph drawn for empty cells.
pub const EMPTY_GLYPH: &str = "░";

/// One character cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PictureCell {
    /// Character drawn for the cell.
    pub ch: char,
    /// SGR color code.
    pub color: u8,
}

impl PictureCell {
    /// Cell drawing `ch` in `color`.
    #[must_use]
    pub const fn new(ch: char, color: u8) -> Self {
        Self { ch, color }
    }

    /// A space counts as empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.ch == ' '
    }
}

impl Default for PictureCell {
    fn default() -> Self {
        Self::new(' ', DEFAULT_CELL_COLOR)
    }
}

impl From<char> for PictureCell {
    fn from(ch: char) -> Self {
        Self::new(ch, DEFAULT_CELL_COLOR)
    }
}

/// Row-major grid of cells.
pub type Picture = Vec<Vec<PictureCell>>;

/// Build a picture from text lines, one cell per char, all in `color`.
#[must_use]
pub fn picture_from_lines<S: AsRef<str>>(lines: &[S], color: u8) -> Picture {
    lines
        .iter()
        .map(|line| line.as_ref().chars().map(|ch| PictureCell::new(ch, color)).collect())
        .collect()
}

/// Output size and sampling factor for drawing a picture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sampling {
    /// Source cells per output cell, at least 1.
    pub aspect: f64,
    /// Output rows.
    pub rows: usize,
    /// Output columns.
    pub cols: usize,
    height: usize,
}

impl Sampling {
    /// Sampling for `picture` drawn into `width` columns, or `None` when
    /// there is nothing to draw.
    #[must_use]
    pub fn new(picture: &[Vec<PictureCell>], width: usize) -> Option<Self> {
        let widest = picture.iter().map(Vec::len).max()?;
        if widest == 0 {
            return None;
        }
        let width = width.max(1);
        let aspect = ((widest - 1) as f64 / (width - 1).max(1) as f64).max(1.0);
        let height = picture.len();
        Some(Self {
            aspect,
            rows: (height as f64 / aspect).ceil() as usize,
            cols: width.min(widest),
            height,
        })
    }

    /// Source row for output row `i`.
    #[must_use]
    pub fn src_row(&self, i: usize) -> usize {
        ((i as f64 * self.aspect).round() as usize).min(self.height - 1)
    }

    /// Source column for output column `j`; may exceed a short row.
    #[must_use]
    pub fn src_col(&self, j: usize) -> usize {
        (j as f64 * self.aspect).round() as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: usize, cols: usize) -> Picture {
        vec![vec![PictureCell::from('#'); cols]; rows]
    }

    #[test]
    fn default_cell_is_empty_white() {
        let cell = PictureCell::default();
        assert!(cell.is_empty());
        assert_eq!(cell.color, 15);
        assert!(!PictureCell::from('x').is_empty());
    }

    #[test]
    fn empty_pictures_have_no_sampling() {
        assert!(Sampling::new(&[], 30).is_none());
        assert!(Sampling::new(&[vec![], vec![]], 30).is_none());
    }

    #[test]
    fn narrow_picture_is_drawn_one_to_one() {
        let sampling = Sampling::new(&grid(3, 5), 30).unwrap();
        assert_eq!(sampling.aspect, 1.0);
        assert_eq!((sampling.rows, sampling.cols), (3, 5));
        assert_eq!(sampling.src_row(2), 2);
        assert_eq!(sampling.src_col(4), 4);
    }

    #[test]
    fn wide_picture_is_downsampled_on_both_axes() {
        let sampling = Sampling::new(&grid(9, 61), 31).unwrap();
        assert_eq!(sampling.aspect, 2.0);
        assert_eq!(sampling.rows, 5);
        assert_eq!(sampling.cols, 31);
        assert_eq!(sampling.src_row(4), 8);
        assert_eq!(sampling.src_col(30), 60);
    }

    #[test]
    fn source_row_is_clamped() {
        let sampling = Sampling::new(&grid(3, 100), 34).unwrap();
        assert_eq!(sampling.aspect, 3.0);
        assert_eq!(sampling.rows, 1);
        assert_eq!(sampling.src_row(5), 2);
    }

    #[test]
    fn ragged_rows_use_widest() {
        let picture = vec![vec![PictureCell::from('a'); 2], vec![PictureCell::from('b'); 7]];
        let sampling = Sampling::new(&picture, 30).unwrap();
        assert_eq!(sampling.cols, 7);
    }

    #[test]
    fn lines_become_cells() {
        let picture = picture_from_lines(&["ab", " c"], 31);
        assert_eq!(picture[0][1], PictureCell::new('b', 31));
        assert!(picture[1][0].is_empty());
    }
}
