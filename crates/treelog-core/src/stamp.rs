#![forbid(unsafe_code)]

//! Timestamp sources for the announce stamp.
//!
//! The stamp width feeds the line geometry, so a source reports its width
//! once up front instead of the renderer measuring every stamp.

use std::fmt;

use chrono::format::{Item, StrftimeItems};
use chrono::{Local, NaiveDate};

use crate::error::{Error, Result};

/// Default pattern: `dd.MM.yyyy hh:mm:ss.zzz`.
pub const DEFAULT_STAMP_FORMAT: &str = "%d.%m.%Y %H:%M:%S%.3f";

/// Produces the text rendered between the stamp brackets.
pub trait StampSource: Send + Sync + fmt::Debug {
    /// Current stamp text.
    fn stamp(&self) -> String;

    /// Width of every stamp this source produces.
    fn width(&self) -> usize;
}

/// Local wall-clock time formatted with a chrono strftime pattern.
#[derive(Debug, Clone)]
pub struct LocalClock {
    format: String,
    width: usize,
}

impl LocalClock {
    /// Create a clock rendering `format`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidStampFormat`] if chrono rejects the pattern.
    pub fn new(format: &str) -> Result<Self> {
        if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
            return Err(Error::InvalidStampFormat(format.to_string()));
        }
        // Fixed-width fields make any instant representative.
        let sample = NaiveDate::from_ymd_opt(2000, 1, 1)
            .and_then(|date| date.and_hms_milli_opt(0, 0, 0, 0))
            .ok_or_else(|| Error::InvalidStampFormat(format.to_string()))?
            .format(format)
            .to_string();
        Ok(Self {
            format: format.to_string(),
            width: sample.chars().count(),
        })
    }

    /// The strftime pattern in use.
    #[must_use]
    pub fn format(&self) -> &str {
        &self.format
    }
}

impl Default for LocalClock {
    fn default() -> Self {
        Self {
            format: DEFAULT_STAMP_FORMAT.to_string(),
            width: 23,
        }
    }
}

impl StampSource for LocalClock {
    fn stamp(&self) -> String {
        Local::now().format(&self.format).to_string()
    }

    fn width(&self) -> usize {
        self.width
    }
}

/// Always renders the same text. Used for deterministic output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedStamp {
    text: String,
}

impl FixedStamp {
    /// Stamp that always reads `text`.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl StampSource for FixedStamp {
    fn stamp(&self) -> String {
        self.text.clone()
    }

    fn width(&self) -> usize {
        self.text.chars().count()
    }
}
