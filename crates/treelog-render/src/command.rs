#![forbid(unsafe_code)]

//! Rendering commands as values.
//!
//! A [`Command`] names one renderer operation so sequences can be built,
//! stored and replayed. Commands are applied strictly left to right.
//!
//! ```
//! use treelog_core::{ColorSupport, FixedColumns, FixedStamp};
//! use treelog_render::{Command, Registry};
//!
//! let registry = Registry::builder()
//!     .stamp(FixedStamp::new("12:00"))
//!     .width(FixedColumns(50))
//!     .color(ColorSupport::fixed(false))
//!     .capture()
//!     .build()
//!     .unwrap();
//! registry
//!     .renderer()
//!     .run([Command::Announce, Command::Text("step"), Command::Ok]);
//! assert!(registry.console().unwrap().contents().contains("step"));
//! ```

use treelog_core::{LogLevel, MessageMask};

use crate::renderer::Renderer;

/// One renderer operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command<'a> {
    /// [`Renderer::announce`]
    Announce,
    /// [`Renderer::text`]
    Text(&'a str),
    /// [`Renderer::newline`]
    NewLine,
    /// [`Renderer::ok`]
    Ok,
    /// [`Renderer::fail`]
    Fail,
    /// [`Renderer::brackets`]
    Brackets { label: &'a str, color: u8 },
    /// [`Renderer::color`]
    Color(u8),
    /// [`Renderer::no_color`]
    NoColor,
    /// [`Renderer::flush`]
    Flush,
    /// [`Renderer::push_level`]
    Level(LogLevel),
    /// [`Renderer::push_mask`]
    Mask(MessageMask),
    /// [`Renderer::pop_level`]
    Pop,
    /// [`Renderer::tick`]
    Tick,
    /// [`Renderer::percent`]
    Percent { cur: usize, total: usize },
}

impl Renderer {
    /// Apply one command.
    pub fn apply(&self, command: Command<'_>) -> &Self {
        match command {
            Command::Announce => self.announce(),
            Command::Text(text) => self.text(text),
            Command::NewLine => self.newline(),
            Command::Ok => self.ok(),
            Command::Fail => self.fail(),
            Command::Brackets { label, color } => self.brackets(label, color),
            Command::Color(code) => self.color(code),
            Command::NoColor => self.no_color(),
            Command::Flush => self.flush(),
            Command::Level(level) => self.push_level(level),
            Command::Mask(mask) => self.push_mask(mask),
            Command::Pop => self.pop_level(),
            Command::Tick => self.tick(),
            Command::Percent { cur, total } => self.percent(cur, total),
        }
    }

    /// Apply commands in order.
    pub fn run<'a>(&self, commands: impl IntoIterator<Item = Command<'a>>) -> &Self {
        for command in commands {
            self.apply(command);
        }
        self
    }
}
