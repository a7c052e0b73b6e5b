#![forbid(unsafe_code)]

//! Text handling for treelog.
//!
//! Operates on byte slices rather than `&str`: log text comes from arbitrary
//! sources, and malformed UTF-8 must be rendered, not rejected. The crate
//! provides:
//! - [`cursor`] - unit decoding, counting, seeking and slicing
//! - [`Metric`] - how many columns a unit occupies; escape sequences none
//! - [`wrap`] - splitting a logical line into width-bounded fragments
//!
//! # Example
//! ```
//! use treelog_text::{Metric, cursor, wrap::split_line};
//!
//! let text = "héllo wörld".as_bytes();
//! assert_eq!(cursor::length(text), 11);
//! assert_eq!(cursor::slice(text, 6, 5), "wörld".as_bytes());
//!
//! let fragments = split_line(text, 4, 6, Metric::Codepoints);
//! assert_eq!(fragments, vec!["héll".as_bytes(), "o wörl".as_bytes(), b"d"]);
//! ```

pub mod cursor;
pub mod metric;
pub mod wrap;

pub use cursor::{Unit, Units, advance, decode, length, line_end, slice, units};
pub use metric::{Metric, csi_len, fit, measure};
pub use wrap::split_line;
