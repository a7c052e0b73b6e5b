#![forbid(unsafe_code)]

//! Tree-indented console rendering.
//!
//! # Role in treelog
//! `treelog-render` composes the pieces from `treelog-core` and
//! `treelog-text` into [`Renderer`]s: per-thread handles that print
//! timestamped messages, nest them into scopes drawn as a tree, close scopes
//! with status brackets and draw progress spinners, pictures and
//! histograms.
//!
//! # Layout
//! ```text
//! [12:00]     Loading config
//! └───[12:00]     parse                       [  OK  ]
//!                                             [  OK  ]
//! ```
//!
//! # Threads
//! Each thread renders into its own [`Lane`]. The first lane of a
//! [`Registry`] writes to the console; later lanes buffer and are shown when
//! the console closes its next bracket, after the worker itself closed one.

pub mod ansi;
pub mod command;
pub mod config;
pub mod histogram;
pub mod lane;
mod pen;
pub mod picture;
pub mod registry;
pub mod renderer;
pub mod scope;
pub mod tick;

pub use command::Command;
pub use config::{ColorMode, RendererConfig};
pub use histogram::{CAPTION_WIDTH, HIST_HEIGHT, HistStyle, histogram_rows};
pub use lane::{Lane, LaneSink};
pub use picture::{Picture, PictureCell, Sampling, picture_from_lines};
pub use registry::{Registry, RegistryBuilder};
pub use renderer::{Renderer, UNBALANCED_STACK_MESSAGE};
pub use scope::ScopeStack;
pub use tick::{TICK_GLYPHS, TickCursor, center_label, percent_label};
