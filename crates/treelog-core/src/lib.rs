#![forbid(unsafe_code)]

//! Core: level/mask gating, terminal geometry, timestamps, color detection.
//!
//! Everything here is independent of how bytes reach the terminal; the
//! rendering crate composes these pieces into lanes and renderers.

pub mod color;
pub mod error;
pub mod gate;
pub mod geometry;
pub mod logging;
pub mod stamp;

pub use color::ColorSupport;
pub use error::{Error, Result};
pub use gate::{LevelGate, LogLevel, MessageMask};
pub use geometry::{
    BRACKET_WIDTH, DEFAULT_FALLBACK_WIDTH, FixedColumns, Geometry, TerminalWidth, WidthProvider,
};
pub use stamp::{DEFAULT_STAMP_FORMAT, FixedStamp, LocalClock, StampSource};

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, error, info, trace, warn};
