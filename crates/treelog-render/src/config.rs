#![forbid(unsafe_code)]

//! Renderer configuration.
//!
//! Defaults reproduce the classic layout: `Info` output level, every
//! category visible, `dd.MM.yyyy hh:mm:ss.zzz` stamps, 60-column fallback
//! width, auto-detected color and codepoint metrics.
//!
//! # Environment
//!
//! | Variable | Values |
//! |----------|--------|
//! | `TREELOG_LEVEL` | `info`, `workflow`, `debug`, `trace`, `deeptrace` or `0`-`4` |
//! | `TREELOG_MASK` | decimal or `0x` hexadecimal filter mask |
//! | `TREELOG_COLOR` | `auto`, `always`, `never` |
//! | `TREELOG_STAMP_FORMAT` | chrono strftime pattern |
//! | `TREELOG_WIDTH` | fallback content width (positive integer) |
//! | `TREELOG_METRIC` | `codepoints` or `cells` |

use std::env;
use std::str::FromStr;

use treelog_core::{
    ColorSupport, DEFAULT_FALLBACK_WIDTH, DEFAULT_STAMP_FORMAT, Error, LocalClock, LogLevel,
    MessageMask, Result,
};
use treelog_text::Metric;

/// When to emit color sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// Follow [`ColorSupport::detect`].
    #[default]
    Auto,
    /// Always emit color.
    Always,
    /// Never emit color.
    Never,
}

impl ColorMode {
    /// Resolve to a concrete decision.
    #[must_use]
    pub fn resolve(self) -> ColorSupport {
        match self {
            Self::Auto => ColorSupport::detect(),
            Self::Always => ColorSupport::fixed(true),
            Self::Never => ColorSupport::fixed(false),
        }
    }
}

impl FromStr for ColorMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "always" | "on" | "yes" => Ok(Self::Always),
            "never" | "off" | "no" => Ok(Self::Never),
            _ => Err(Error::InvalidColorMode(s.to_string())),
        }
    }
}

/// Configuration for a [`Registry`](crate::Registry).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RendererConfig {
    /// Most verbose level that is rendered.
    pub out_level: LogLevel,
    /// Categories that are rendered.
    pub filter_mask: MessageMask,
    /// chrono pattern for the announce stamp.
    pub stamp_format: String,
    /// Content width of lanes without a terminal.
    pub fallback_width: usize,
    /// Color policy.
    pub color: ColorMode,
    /// Column metric used for wrapping and padding.
    pub metric: Metric,
}

impl RendererConfig {
    /// Set the output level.
    #[must_use]
    pub fn out_level(mut self, level: LogLevel) -> Self {
        self.out_level = level;
        self
    }

    /// Set the filter mask.
    #[must_use]
    pub fn filter_mask(mut self, mask: MessageMask) -> Self {
        self.filter_mask = mask;
        self
    }

    /// Set the stamp pattern.
    #[must_use]
    pub fn stamp_format(mut self, format: impl Into<String>) -> Self {
        self.stamp_format = format.into();
        self
    }

    /// Set the fallback content width.
    #[must_use]
    pub fn fallback_width(mut self, width: usize) -> Self {
        self.fallback_width = width;
        self
    }

    /// Set the color policy.
    #[must_use]
    pub fn color(mut self, mode: ColorMode) -> Self {
        self.color = mode;
        self
    }

    /// Set the column metric.
    #[must_use]
    pub fn metric(mut self, metric: Metric) -> Self {
        self.metric = metric;
        self
    }

    /// Defaults overridden by `TREELOG_*` environment variables.
    ///
    /// # Errors
    ///
    /// The first variable that is set but cannot be parsed.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();
        if let Some(level) = lookup("TREELOG_LEVEL") {
            config.out_level = level.parse()?;
        }
        if let Some(mask) = lookup("TREELOG_MASK") {
            config.filter_mask = mask.parse()?;
        }
        if let Some(color) = lookup("TREELOG_COLOR") {
            config.color = color.parse()?;
        }
        if let Some(format) = lookup("TREELOG_STAMP_FORMAT") {
            LocalClock::new(&format)?;
            config.stamp_format = format;
        }
        if let Some(width) = lookup("TREELOG_WIDTH") {
            config.fallback_width = width
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|&w| w > 0)
                .ok_or(Error::InvalidWidth(width))?;
        }
        if let Some(metric) = lookup("TREELOG_METRIC") {
            config.metric = metric.parse().map_err(Error::InvalidMetric)?;
        }
        Ok(config)
    }
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            out_level: LogLevel::Info,
            filter_mask: MessageMask::all(),
            stamp_format: DEFAULT_STAMP_FORMAT.to_string(),
            fallback_width: DEFAULT_FALLBACK_WIDTH,
            color: ColorMode::Auto,
            metric: Metric::Codepoints,
        }
    }
}
