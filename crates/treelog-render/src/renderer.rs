#![forbid(unsafe_code)]

//! The public rendering handle.
//!
//! A [`Renderer`] pairs a registry with one lane. Every method locks the
//! lane once, performs one complete rendering operation and releases the
//! lock, so output from different threads interleaves per operation but
//! never inside one. Methods return `&Self` and chain:
//!
//! ```
//! use treelog_core::{ColorSupport, FixedColumns, FixedStamp};
//! use treelog_render::Registry;
//!
//! let registry = Registry::builder()
//!     .stamp(FixedStamp::new("12:00"))
//!     .width(FixedColumns(50))
//!     .color(ColorSupport::fixed(false))
//!     .capture()
//!     .build()
//!     .unwrap();
//! let out = registry.renderer();
//! out.announce().text("Loading").ok();
//!
//! let console = registry.console().unwrap().contents();
//! assert!(console.starts_with("\n[12:00]     Loading"));
//! assert!(console.ends_with("[  OK  ]"));
//! ```

use std::fmt;
use std::sync::Arc;

use treelog_core::{Error, LogLevel, MessageMask, Result, error, info};

use crate::ansi::{FAIL_COLOR, OK_COLOR};
use crate::histogram::HistStyle;
use crate::lane::Lane;
use crate::pen::Pen;
use crate::picture::PictureCell;
use crate::registry::Registry;

/// Diagnostic shown when the level stack is popped past its base.
pub const UNBALANCED_STACK_MESSAGE: &str = "Wrong message stack balance!";

/// Handle rendering into one lane of a registry.
#[derive(Clone)]
pub struct Renderer {
    registry: Arc<Registry>,
    lane: Arc<Lane>,
}

impl Renderer {
    pub(crate) fn new(registry: Arc<Registry>, lane: Arc<Lane>) -> Self {
        Self { registry, lane }
    }

    /// Renderer for the calling thread on the global registry.
    #[must_use]
    pub fn current() -> Self {
        Registry::global().renderer()
    }

    /// Registry this renderer belongs to.
    #[must_use]
    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    /// Lane this renderer writes to.
    #[must_use]
    pub fn lane(&self) -> &Arc<Lane> {
        &self.lane
    }

    fn with_pen<R>(&self, f: impl FnOnce(&mut Pen<'_>) -> R) -> R {
        let mut state = self.lane.lock();
        let mut pen = Pen::new(&mut state, &self.registry, &self.lane);
        f(&mut pen)
    }

    // ── scopes and brackets ─────────────────────────────────────────────

    /// Start a message: new line, tree connector when nested, stamp.
    pub fn announce(&self) -> &Self {
        self.with_pen(|pen| pen.announce());
        self
    }

    /// Close the current scope with a bracket holding `label`.
    pub fn brackets(&self, label: &str, color: u8) -> &Self {
        self.with_pen(|pen| pen.brackets(label, color));
        self
    }

    /// Close the current scope with a green `OK`.
    pub fn ok(&self) -> &Self {
        self.brackets("OK", OK_COLOR)
    }

    /// Close the current scope with a red `FAIL`.
    pub fn fail(&self) -> &Self {
        self.brackets("FAIL", FAIL_COLOR)
    }

    /// Spinner bracket at the right edge; the scope stays open.
    pub fn tick(&self) -> &Self {
        self.with_pen(|pen| pen.tick());
        self
    }

    /// Percentage bracket with spinner glyph; the scope stays open.
    ///
    /// `total` must be non-zero. Debug builds assert it; release builds
    /// ignore the call.
    pub fn percent(&self, cur: usize, total: usize) -> &Self {
        self.with_pen(|pen| pen.percent(cur, total));
        self
    }

    // ── text ────────────────────────────────────────────────────────────

    /// Print text, wrapping at the content width.
    pub fn text(&self, text: &str) -> &Self {
        self.bytes(text.as_bytes())
    }

    /// Print raw bytes; malformed UTF-8 is passed through.
    pub fn bytes(&self, bytes: &[u8]) -> &Self {
        self.with_pen(|pen| pen.print(bytes));
        self
    }

    /// Print any displayable value.
    pub fn display(&self, value: impl fmt::Display) -> &Self {
        if self.can_message() {
            self.text(&value.to_string());
        }
        self
    }

    /// Hard line break, re-indented to the current scope.
    pub fn newline(&self) -> &Self {
        self.with_pen(|pen| pen.newline());
        self
    }

    /// Print at most `width - 1` units of `text`, then fill to `width`.
    pub fn print_fixed(&self, text: &str, width: usize, filler: &str) -> &Self {
        self.with_pen(|pen| pen.print_fixed(text.as_bytes(), width, filler));
        self
    }

    /// Print `filler` `count` times.
    pub fn flood(&self, count: usize, filler: &str) -> &Self {
        self.with_pen(|pen| pen.flood(count, filler));
        self
    }

    /// Switch to SGR color `code`.
    pub fn color(&self, code: u8) -> &Self {
        self.with_pen(|pen| pen.color(code));
        self
    }

    /// Reset colors.
    pub fn no_color(&self) -> &Self {
        self.with_pen(|pen| pen.no_color());
        self
    }

    /// Flush the lane's sink.
    pub fn flush(&self) -> &Self {
        self.with_pen(|pen| {
            if pen.visible() {
                pen.flush();
            }
        });
        self
    }

    // ── visualizations ──────────────────────────────────────────────────

    /// Draw a picture, downsampled to the content width.
    pub fn draw(&self, picture: &[Vec<PictureCell>]) -> &Self {
        self.with_pen(|pen| pen.draw(picture));
        self
    }

    /// Draw a histogram of `values` in their given order.
    pub fn print_hist(&self, values: &[f64], style: HistStyle) -> &Self {
        self.with_pen(|pen| pen.print_hist(values, style));
        self
    }

    // ── gate ────────────────────────────────────────────────────────────

    /// Render following messages at `level`.
    pub fn push_level(&self, level: LogLevel) -> &Self {
        self.lane.lock().gate.push_level(level);
        self
    }

    /// Render following messages in category `mask`.
    pub fn push_mask(&self, mask: MessageMask) -> &Self {
        self.lane.lock().gate.push_mask(mask);
        self
    }

    /// Undo the latest push.
    ///
    /// An unbalanced pop is fatal: the diagnostic is shown on the console
    /// and the process exits.
    pub fn pop_level(&self) -> &Self {
        if let Err(err) = self.try_pop_level() {
            self.fatal(&err);
        }
        self
    }

    /// Undo the latest push, reporting an unbalanced pop as an error.
    ///
    /// # Errors
    ///
    /// [`Error::LevelUnderflow`] when no push is left to undo.
    pub fn try_pop_level(&self) -> Result<(LogLevel, MessageMask)> {
        self.lane.lock().gate.pop()
    }

    /// Most verbose level rendered by this lane.
    pub fn set_out_level(&self, level: LogLevel) -> &Self {
        self.lane.lock().gate.set_out_level(level);
        self
    }

    /// Current output level.
    #[must_use]
    pub fn out_level(&self) -> LogLevel {
        self.lane.lock().gate.out_level()
    }

    /// Categories rendered by this lane.
    pub fn set_filter_mask(&self, mask: MessageMask) -> &Self {
        self.lane.lock().gate.set_filter(mask);
        self
    }

    /// Current filter mask.
    #[must_use]
    pub fn filter_mask(&self) -> MessageMask {
        self.lane.lock().gate.filter()
    }

    /// Whether a message issued now would be rendered.
    #[must_use]
    pub fn can_message(&self) -> bool {
        self.lane.lock().gate.can_message()
    }

    // ── layout queries ──────────────────────────────────────────────────

    /// Number of open scopes, root included.
    #[must_use]
    pub fn scope_depth(&self) -> usize {
        self.lane.lock().scopes.depth()
    }

    /// Cursor column within the content area, indentation included.
    #[must_use]
    pub fn column(&self) -> usize {
        self.lane.lock().scopes.column()
    }

    /// Current content width of this lane.
    #[must_use]
    pub fn content_width(&self) -> usize {
        self.with_pen(|pen| pen.width())
    }

    // ── fatal path ──────────────────────────────────────────────────────

    /// Show `err` on the console lane regardless of level and mask, closed
    /// with `FAIL`. Does not exit.
    pub fn report_fatal(&self, err: &Error) {
        let message = match err {
            Error::LevelUnderflow => UNBALANCED_STACK_MESSAGE.to_string(),
            other => other.to_string(),
        };
        error!(error = %err, "fatal renderer error");
        let lane = self
            .registry
            .console()
            .unwrap_or_else(|| Arc::clone(&self.lane));
        let mut state = lane.lock();
        state.gate.set_forced(true);
        let mut pen = Pen::new(&mut state, &self.registry, &lane);
        pen.announce();
        pen.print(message.as_bytes());
        pen.brackets("FAIL", FAIL_COLOR);
        pen.flush();
        drop(pen);
        state.gate.set_forced(false);
    }

    /// Report `err` and terminate the process with status 1.
    pub fn fatal(&self, err: &Error) -> ! {
        self.report_fatal(err);
        info!("exiting after fatal renderer error");
        std::process::exit(1)
    }
}

impl fmt::Debug for Renderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Renderer").field("lane", &self.lane).finish()
    }
}
