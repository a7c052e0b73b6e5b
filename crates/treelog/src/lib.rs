#![forbid(unsafe_code)]

//! treelog public facade crate.
//!
//! Re-exports the types most programs need and offers a prelude. The usual
//! entry point is [`current`], the calling thread's renderer on the global
//! registry:
//!
//! ```no_run
//! let out = treelog::current();
//! out.announce().text("Fetching index");
//! for i in 0..=10 {
//!     out.percent(i, 10);
//! }
//! out.ok();
//! ```
//!
//! Tests and embedders build their own [`Registry`] with a fixed stamp and
//! width and read the captured console back.

// --- Core re-exports -------------------------------------------------------

pub use treelog_core::{
    BRACKET_WIDTH, ColorSupport, Error, FixedColumns, FixedStamp, Geometry, LevelGate,
    LocalClock, LogLevel, MessageMask, Result, StampSource, TerminalWidth, WidthProvider,
};

// --- Text re-exports -------------------------------------------------------

pub use treelog_text::Metric;

// --- Render re-exports -----------------------------------------------------

pub use treelog_render::{
    ColorMode, Command, HistStyle, Lane, LaneSink, Picture, PictureCell, Registry,
    RegistryBuilder, Renderer, RendererConfig, picture_from_lines,
};

/// Renderer for the calling thread on the global registry.
#[must_use]
pub fn current() -> Renderer {
    Renderer::current()
}

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Command, Error, HistStyle, LogLevel, MessageMask, Picture, PictureCell, Registry,
        Renderer, current,
    };

    pub use crate::{core, render, text};
}

pub use treelog_core as core;
pub use treelog_render as render;
pub use treelog_text as text;
