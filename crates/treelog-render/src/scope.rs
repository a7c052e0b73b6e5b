#![forbid(unsafe_code)]

//! Scope stack and column tracking.
//!
//! Each open scope owns a frame holding its indentation and the column the
//! cursor reached inside it. Opening a scope draws a tree connector; closing
//! one returns to the parent's column, so a parent line can still be
//! finished with its own bracket after a nested block.
//!
//! ```text
//! [stamp]     outer
//! └───[stamp]     inner                 [  OK  ]
//!                                       [  OK  ]
//! ```

use treelog_core::{Error, Result};

/// Indentation added per nesting level.
pub const INDENT_STEP: usize = 4;

/// Connector drawn in front of a nested stamp.
pub const CONNECTOR: &str = "└───";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Frame {
    indent: usize,
    column: usize,
}

const ROOT: Frame = Frame {
    indent: 0,
    column: 0,
};

/// Stack of open scopes; the root scope is never removed.
#[derive(Debug, Clone)]
pub struct ScopeStack {
    frames: Vec<Frame>,
}

impl ScopeStack {
    /// A stack holding only the root scope.
    #[must_use]
    pub fn new() -> Self {
        Self { frames: vec![ROOT] }
    }

    fn top(&self) -> Frame {
        self.frames.last().copied().unwrap_or(ROOT)
    }

    fn top_mut(&mut self) -> &mut Frame {
        if self.frames.is_empty() {
            self.frames.push(ROOT);
        }
        let last = self.frames.len() - 1;
        &mut self.frames[last]
    }

    /// Number of open scopes, root included.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Indentation of the innermost scope.
    #[must_use]
    pub fn indent(&self) -> usize {
        self.top().indent
    }

    /// Current column, indentation included.
    #[must_use]
    pub fn column(&self) -> usize {
        self.top().column
    }

    /// Move the cursor to `column`.
    pub fn set_column(&mut self, column: usize) {
        self.top_mut().column = column;
    }

    /// Advance the cursor by `width` columns.
    pub fn advance(&mut self, width: usize) {
        let frame = self.top_mut();
        frame.column += width;
    }

    /// Place the cursor just after the indentation of a fresh line.
    pub fn line_start(&mut self) {
        let frame = self.top_mut();
        frame.column = frame.indent;
    }

    /// Open a nested scope and return its indentation.
    ///
    /// The caller draws `indent - INDENT_STEP` spaces and the connector; the
    /// cursor is placed right after them.
    pub fn open(&mut self) -> usize {
        let indent = INDENT_STEP * self.frames.len();
        self.frames.push(Frame {
            indent,
            column: indent,
        });
        indent
    }

    /// Close the innermost scope.
    ///
    /// # Errors
    ///
    /// [`Error::ScopeUnderflow`] when only the root scope is open; the stack
    /// is left unchanged.
    pub fn close(&mut self) -> Result<()> {
        if self.frames.len() <= 1 {
            return Err(Error::ScopeUnderflow);
        }
        self.frames.pop();
        Ok(())
    }
}

impl Default for ScopeStack {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_root() {
        let stack = ScopeStack::new();
        assert_eq!(stack.depth(), 1);
        assert_eq!(stack.indent(), 0);
        assert_eq!(stack.column(), 0);
    }

    #[test]
    fn open_indents_by_depth() {
        let mut stack = ScopeStack::new();
        assert_eq!(stack.open(), 4);
        assert_eq!(stack.column(), 4);
        assert_eq!(stack.open(), 8);
        assert_eq!(stack.depth(), 3);
    }

    #[test]
    fn close_restores_parent_column() {
        let mut stack = ScopeStack::new();
        stack.advance(11);
        stack.open();
        stack.advance(20);
        assert_eq!(stack.column(), 24);
        stack.close().unwrap();
        assert_eq!(stack.column(), 11);
    }

    #[test]
    fn root_cannot_close() {
        let mut stack = ScopeStack::new();
        assert!(matches!(stack.close(), Err(Error::ScopeUnderflow)));
        assert_eq!(stack.depth(), 1);
    }

    #[test]
    fn line_start_returns_to_indent() {
        let mut stack = ScopeStack::new();
        stack.open();
        stack.advance(9);
        stack.line_start();
        assert_eq!(stack.column(), 4);
    }

    #[test]
    fn connector_is_one_step_wide() {
        assert_eq!(CONNECTOR.chars().count(), INDENT_STEP);
    }
}
