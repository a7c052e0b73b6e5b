#![forbid(unsafe_code)]

//! Verbosity level and category mask gating.
//!
//! A [`LevelGate`] holds a stack of `(level, mask)` pairs. Callers push a
//! level or a mask around a sub-operation and pop it afterwards; the top of
//! the stack decides whether a message is visible:
//!
//! ```text
//! visible = top.level <= out_level && top.mask ∩ filter ≠ ∅
//! ```
//!
//! # Invariants
//!
//! 1. The base entry `(Info, MessageMask::DEFAULT)` is never removed.
//! 2. Every push is matched by exactly one pop; a pop that would remove the
//!    base entry returns [`Error::LevelUnderflow`] and leaves the stack intact.
//!
//! # Example
//!
//! ```
//! use treelog_core::gate::{LevelGate, LogLevel, MessageMask};
//!
//! let mut gate = LevelGate::new(LogLevel::Info, MessageMask::all());
//! assert!(gate.can_message());
//!
//! gate.push_level(LogLevel::Debug);
//! assert!(!gate.can_message());
//! gate.pop().unwrap();
//! assert!(gate.can_message());
//! ```

use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;

use crate::error::{Error, Result};

/// Message verbosity, ordered from always-shown to most verbose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum LogLevel {
    /// Top-level progress a user always wants to see.
    #[default]
    Info,
    /// Individual steps of a workflow.
    Workflow,
    /// Developer diagnostics.
    Debug,
    /// Fine-grained tracing.
    Trace,
    /// Everything, including per-item chatter.
    DeepTrace,
}

impl LogLevel {
    /// All levels in ascending verbosity.
    pub const ALL: [Self; 5] = [
        Self::Info,
        Self::Workflow,
        Self::Debug,
        Self::Trace,
        Self::DeepTrace,
    ];

    /// Lowercase name, as accepted by [`FromStr`].
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Workflow => "workflow",
            Self::Debug => "debug",
            Self::Trace => "trace",
            Self::DeepTrace => "deeptrace",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "info" | "0" => Ok(Self::Info),
            "workflow" | "work-flow" | "1" => Ok(Self::Workflow),
            "debug" | "2" => Ok(Self::Debug),
            "trace" | "3" => Ok(Self::Trace),
            "deeptrace" | "deep-trace" | "4" => Ok(Self::DeepTrace),
            _ => Err(Error::InvalidLevel(s.to_string())),
        }
    }
}

bitflags! {
    /// Category set used to filter messages independently of verbosity.
    ///
    /// Only [`MessageMask::DEFAULT`] has a fixed meaning; applications assign
    /// the remaining bits themselves via [`MessageMask::from_bits_retain`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct MessageMask: u64 {
        /// Category of messages that did not choose one.
        const DEFAULT = 1;
        const _ = !0;
    }
}

impl Default for MessageMask {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl FromStr for MessageMask {
    type Err = Error;

    /// Parse a mask written in decimal or as `0x`-prefixed hexadecimal.
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let parsed = match trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
        {
            Some(hex) => u64::from_str_radix(hex, 16),
            None => trimmed.parse::<u64>(),
        };
        parsed
            .map(Self::from_bits_retain)
            .map_err(|_| Error::InvalidMask(s.to_string()))
    }
}

/// Stack of `(level, mask)` pairs plus the configured output filter.
#[derive(Debug, Clone)]
pub struct LevelGate {
    stack: Vec<(LogLevel, MessageMask)>,
    out_level: LogLevel,
    filter: MessageMask,
    forced: bool,
}

impl LevelGate {
    /// Create a gate showing messages up to `out_level` in `filter`.
    #[must_use]
    pub fn new(out_level: LogLevel, filter: MessageMask) -> Self {
        Self {
            stack: vec![(LogLevel::Info, MessageMask::DEFAULT)],
            out_level,
            filter,
            forced: false,
        }
    }

    /// Whether a message issued now would be rendered.
    #[must_use]
    pub fn can_message(&self) -> bool {
        if self.forced {
            return true;
        }
        let (level, mask) = self.top();
        level <= self.out_level && mask.intersects(self.filter)
    }

    /// The active `(level, mask)` pair.
    #[must_use]
    pub fn top(&self) -> (LogLevel, MessageMask) {
        self.stack
            .last()
            .copied()
            .unwrap_or((LogLevel::Info, MessageMask::DEFAULT))
    }

    /// Push `level`, keeping the current mask.
    pub fn push_level(&mut self, level: LogLevel) {
        let (_, mask) = self.top();
        self.stack.push((level, mask));
    }

    /// Push `mask`, keeping the current level.
    pub fn push_mask(&mut self, mask: MessageMask) {
        let (level, _) = self.top();
        self.stack.push((level, mask));
    }

    /// Remove the most recent push.
    ///
    /// # Errors
    ///
    /// [`Error::LevelUnderflow`] when only the base entry remains.
    pub fn pop(&mut self) -> Result<(LogLevel, MessageMask)> {
        if self.stack.len() <= 1 {
            return Err(Error::LevelUnderflow);
        }
        self.stack.pop().ok_or(Error::LevelUnderflow)
    }

    /// Number of entries, including the base entry.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Configured output level.
    #[must_use]
    pub const fn out_level(&self) -> LogLevel {
        self.out_level
    }

    /// Change the configured output level.
    pub fn set_out_level(&mut self, level: LogLevel) {
        self.out_level = level;
    }

    /// Configured filter mask.
    #[must_use]
    pub const fn filter(&self) -> MessageMask {
        self.filter
    }

    /// Change the configured filter mask.
    pub fn set_filter(&mut self, filter: MessageMask) {
        self.filter = filter;
    }

    /// Make every message visible regardless of level and mask.
    ///
    /// Reserved for diagnostics that must reach the terminal.
    pub fn set_forced(&mut self, forced: bool) {
        self.forced = forced;
    }
}

impl Default for LevelGate {
    fn default() -> Self {
        Self::new(LogLevel::Info, MessageMask::all())
    }
}
