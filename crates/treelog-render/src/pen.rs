#![forbid(unsafe_code)]

//! Lock-free rendering over a locked lane.
//!
//! A [`Pen`] borrows the state of a lane whose mutex the caller already
//! holds, so rendering operations can call each other freely without
//! relocking. Every public operation checks the gate first; a suppressed
//! operation writes nothing and leaves the layout state untouched.

use std::io;

use treelog_core::{BRACKET_WIDTH, Geometry, trace, warn};
use treelog_text::{Metric, length, line_end, measure, slice, split_line};

use crate::ansi::{self, BACKSPACE, OK_COLOR, PROGRESS_COLOR, STAMP_COLOR};
use crate::histogram::{HistStyle, histogram_rows};
use crate::lane::{Lane, LaneState};
use crate::picture::{EMPTY_GLYPH, PictureCell, Sampling};
use crate::registry::Registry;
use crate::scope::{CONNECTOR, INDENT_STEP};
use crate::tick::{center_label, percent_label};

/// Renders into one locked lane.
pub(crate) struct Pen<'a> {
    state: &'a mut LaneState,
    registry: &'a Registry,
    lane: &'a Lane,
    geometry: Geometry,
    metric: Metric,
    color: bool,
    width: usize,
}

impl<'a> Pen<'a> {
    pub(crate) fn new(state: &'a mut LaneState, registry: &'a Registry, lane: &'a Lane) -> Self {
        let geometry = registry.geometry();
        Self {
            width: geometry.content_width(lane.columns()),
            metric: registry.metric(),
            color: registry.color_enabled(),
            geometry,
            state,
            registry,
            lane,
        }
    }

    /// Content width for this operation.
    pub(crate) fn width(&self) -> usize {
        self.width
    }

    pub(crate) fn visible(&self) -> bool {
        self.state.gate.can_message()
    }

    // ── raw output ──────────────────────────────────────────────────────

    #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
    fn sink_failed(&self, op: &str, err: &io::Error) {
        warn!(lane = self.lane.id(), op, error = %err, "lane sink failed");
    }

    fn emit(&mut self, bytes: &[u8]) {
        if let Err(err) = self.state.sink.write_all(bytes) {
            self.sink_failed("write", &err);
        }
    }

    fn pad(&mut self, count: usize, byte: u8) {
        if count > 0 {
            self.emit(&vec![byte; count]);
        }
    }

    fn sgr(&mut self, code: u8) {
        if self.color {
            if let Err(err) = ansi::sgr_color(&mut self.state.sink, code) {
                self.sink_failed("write", &err);
            }
        }
    }

    fn sgr_reset(&mut self) {
        if self.color {
            if let Err(err) = ansi::sgr_reset(&mut self.state.sink) {
                self.sink_failed("write", &err);
            }
        }
    }

    /// Newline, then gutter and indentation of the current scope.
    fn line_break(&mut self) {
        self.emit(b"\n");
        self.pad(self.geometry.gutter() + self.state.scopes.indent(), b' ');
        self.state.scopes.line_start();
    }

    /// Write text at the cursor, wrapping at the content width.
    ///
    /// The first fragment of a line gets the room left after the cursor.
    /// Continuation lines start below the current scope's indent, so their
    /// budget is the content width minus that indent and tree-nested text
    /// never runs past the bracket column.
    fn put(&mut self, text: &[u8]) {
        if self.state.last_was_brackets {
            self.line_break();
        }
        self.state.last_was_brackets = false;

        let rest = self.block_width();
        let mut offset = 0;
        loop {
            let end = line_end(text, offset);
            let (line, hard_break) = match text[offset..end].strip_suffix(b"\n") {
                Some(line) => (line, true),
                None => (&text[offset..end], false),
            };
            let room = self.width.saturating_sub(self.state.scopes.column());
            for (j, fragment) in split_line(line, room, rest, self.metric).into_iter().enumerate() {
                if j > 0 {
                    self.line_break();
                }
                self.emit(fragment);
                self.state.scopes.advance(measure(fragment, self.metric));
            }
            if !hard_break {
                break;
            }
            self.line_break();
            offset = end;
        }
    }

    /// Start a fresh line unless the cursor already sits at its start.
    fn fresh_line(&mut self) {
        if !self.state.last_was_brackets && self.state.scopes.column() != self.state.scopes.indent() {
            self.line_break();
        }
    }

    /// Width available on a fresh line of the current scope.
    fn block_width(&self) -> usize {
        self.width.saturating_sub(self.state.scopes.indent()).max(1)
    }

    /// `[` + centered label + `]` in `color`.
    fn bracket(&mut self, label: &str, color: u8) {
        self.sgr(color);
        self.emit(b"[");
        self.emit(center_label(label).as_bytes());
        self.emit(b"]");
        self.sgr_reset();
    }

    /// Move to the bracket column: pad the current line, or start a new
    /// line when this one already ends in a bracket.
    fn to_bracket_column(&mut self) {
        if self.state.last_was_brackets {
            self.emit(b"\n");
            self.pad(self.geometry.gutter() + self.width, b' ');
        } else {
            let column = self.state.scopes.column();
            self.pad(self.width.saturating_sub(column), b' ');
        }
    }

    pub(crate) fn flush(&mut self) {
        if let Err(err) = self.state.sink.flush() {
            self.sink_failed("flush", &err);
        }
    }

    // ── operations ──────────────────────────────────────────────────────

    pub(crate) fn announce(&mut self) {
        if !self.visible() {
            return;
        }
        self.emit(b"\n");
        if !self.state.last_was_brackets || self.state.scopes.column() != 0 {
            let indent = self.state.scopes.open();
            self.pad(indent - INDENT_STEP, b' ');
            self.emit(CONNECTOR.as_bytes());
        }
        let stamp = self.registry.stamp();
        self.sgr(STAMP_COLOR);
        self.emit(b"[");
        self.emit(stamp.as_bytes());
        self.emit(b"]     ");
        self.sgr_reset();
        self.state.last_was_brackets = false;
    }

    pub(crate) fn print(&mut self, text: &[u8]) {
        if !self.visible() {
            return;
        }
        self.put(text);
        self.flush();
    }

    pub(crate) fn newline(&mut self) {
        if !self.visible() {
            return;
        }
        self.line_break();
        self.state.last_was_brackets = false;
    }

    pub(crate) fn brackets(&mut self, label: &str, color: u8) {
        if !self.visible() {
            return;
        }
        let drained = if self.lane.is_console() {
            self.registry.drain_finished()
        } else {
            Vec::new()
        };

        self.to_bracket_column();
        self.bracket(label, color);
        if self.state.scopes.close().is_err() {
            self.state.scopes.set_column(0);
        }
        self.state.last_was_brackets = true;
        self.flush();

        if !drained.is_empty() {
            self.announce();
            self.print(&drained);
            self.brackets("OK", OK_COLOR);
        }
    }

    /// Bracket at the right edge that keeps the scope open, with the
    /// cursor moved back onto it so the next update overwrites it.
    fn progress(&mut self, label: &str) {
        trace!(lane = self.lane.id(), label, "progress bracket");
        self.to_bracket_column();
        self.bracket(label, PROGRESS_COLOR);
        self.state.tick.advance();
        self.state.scopes.set_column(self.width);
        // A full-width line leaves the cursor on its last column.
        self.pad(BRACKET_WIDTH + 1, BACKSPACE);
        self.state.last_was_brackets = false;
        self.flush();
    }

    pub(crate) fn tick(&mut self) {
        if !self.visible() {
            return;
        }
        let glyph = self.state.tick.current();
        self.progress(&glyph.to_string());
    }

    pub(crate) fn percent(&mut self, cur: usize, total: usize) {
        if !self.visible() {
            return;
        }
        debug_assert!(total > 0, "percent total must be non-zero");
        if total == 0 {
            warn!(cur, "percent with zero total ignored");
            return;
        }
        let label = percent_label(self.state.tick.current(), cur, total);
        self.progress(&label);
    }

    pub(crate) fn color(&mut self, code: u8) {
        if self.visible() {
            self.sgr(code);
        }
    }

    pub(crate) fn no_color(&mut self) {
        if self.visible() {
            self.sgr_reset();
        }
    }

    fn cell(&mut self, cell: Option<&PictureCell>) {
        match cell.filter(|cell| !cell.is_empty()) {
            Some(cell) => {
                let mut buf = [0u8; 4];
                self.sgr(cell.color);
                self.put(cell.ch.encode_utf8(&mut buf).as_bytes());
                self.sgr_reset();
            }
            None => self.put(EMPTY_GLYPH.as_bytes()),
        }
    }

    pub(crate) fn draw(&mut self, picture: &[Vec<PictureCell>]) {
        if !self.visible() {
            return;
        }
        let Some(sampling) = Sampling::new(picture, self.block_width()) else {
            return;
        };
        self.fresh_line();
        for i in 0..sampling.rows {
            let row = &picture[sampling.src_row(i)];
            for j in 0..sampling.cols {
                self.cell(row.get(sampling.src_col(j)));
            }
            self.newline();
        }
        self.newline();
        self.flush();
    }

    pub(crate) fn print_hist(&mut self, values: &[f64], style: HistStyle) {
        if !self.visible() {
            return;
        }
        let rows = histogram_rows(values, self.block_width(), style);
        if rows.is_empty() {
            return;
        }
        self.fresh_line();
        for row in rows {
            self.put(row.as_bytes());
            self.line_break();
        }
        self.flush();
    }

    pub(crate) fn print_fixed(&mut self, text: &[u8], width: usize, filler: &str) {
        if !self.visible() {
            return;
        }
        let keep = length(text).min(width.saturating_sub(1));
        self.put(slice(text, 0, keep));
        self.put(filler.repeat(width - keep).as_bytes());
        self.flush();
    }

    pub(crate) fn flood(&mut self, count: usize, filler: &str) {
        if !self.visible() || count == 0 {
            return;
        }
        self.put(filler.repeat(count).as_bytes());
        self.flush();
    }
}
