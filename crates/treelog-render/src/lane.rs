#![forbid(unsafe_code)]

//! Output lanes.
//!
//! A lane is one thread's output destination together with all of that
//! thread's layout state. The console lane writes to the real terminal;
//! every other lane buffers in memory until the console lane drains it.

use std::fmt;
use std::io::{self, Write};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::ThreadId;

use treelog_core::{LevelGate, WidthProvider};

use crate::scope::ScopeStack;
use crate::tick::TickCursor;

/// Where a lane's bytes go.
///
/// Lanes never write to stdout directly; the console lane usually wraps
/// stdout in a [`LaneSink::Writer`], worker lanes and tests use
/// [`LaneSink::Memory`].
pub enum LaneSink {
    /// Write through to an `io::Write` implementation.
    Writer(Box<dyn Write + Send>),
    /// Accumulate in memory.
    Memory(Vec<u8>),
}

impl LaneSink {
    /// In-memory sink.
    #[must_use]
    pub fn memory() -> Self {
        Self::Memory(Vec::new())
    }

    /// Writer sink.
    pub fn writer<W: Write + Send + 'static>(w: W) -> Self {
        Self::Writer(Box::new(w))
    }

    /// Sink writing to the process's stdout.
    #[must_use]
    pub fn stdout() -> Self {
        Self::writer(io::stdout())
    }

    pub(crate) fn write_all(&mut self, bytes: &[u8]) -> io::Result<()> {
        match self {
            Self::Writer(w) => w.write_all(bytes),
            Self::Memory(buf) => {
                buf.extend_from_slice(bytes);
                Ok(())
            }
        }
    }

    pub(crate) fn flush(&mut self) -> io::Result<()> {
        match self {
            Self::Writer(w) => w.flush(),
            Self::Memory(_) => Ok(()),
        }
    }

    /// Buffered bytes, for memory sinks.
    #[must_use]
    pub fn buffered(&self) -> Option<&[u8]> {
        match self {
            Self::Memory(buf) => Some(buf),
            Self::Writer(_) => None,
        }
    }

    fn take(&mut self) -> Vec<u8> {
        match self {
            Self::Memory(buf) => std::mem::take(buf),
            Self::Writer(_) => Vec::new(),
        }
    }
}

impl io::Write for LaneSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        LaneSink::flush(self)
    }
}

impl fmt::Debug for LaneSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Writer(_) => f.debug_tuple("Writer").finish(),
            Self::Memory(buf) => f.debug_tuple("Memory").field(&buf.len()).finish(),
        }
    }
}

/// Mutable per-lane state, guarded by the lane's mutex.
#[derive(Debug)]
pub(crate) struct LaneState {
    pub(crate) sink: LaneSink,
    /// The last rendering action closed a bracket.
    pub(crate) last_was_brackets: bool,
    pub(crate) scopes: ScopeStack,
    pub(crate) gate: LevelGate,
    pub(crate) tick: TickCursor,
}

impl LaneState {
    pub(crate) fn new(sink: LaneSink, gate: LevelGate) -> Self {
        Self {
            sink,
            last_was_brackets: true,
            scopes: ScopeStack::new(),
            gate,
            tick: TickCursor::default(),
        }
    }
}

/// One thread's output lane.
pub struct Lane {
    id: usize,
    thread: ThreadId,
    console: bool,
    width: Option<Arc<dyn WidthProvider>>,
    state: Mutex<LaneState>,
}

impl Lane {
    pub(crate) fn new(
        id: usize,
        thread: ThreadId,
        width: Option<Arc<dyn WidthProvider>>,
        state: LaneState,
    ) -> Self {
        Self {
            id,
            thread,
            console: width.is_some(),
            width,
            state: Mutex::new(state),
        }
    }

    /// Creation order within the registry; the console lane is 0.
    #[must_use]
    pub fn id(&self) -> usize {
        self.id
    }

    /// Thread owning the lane.
    #[must_use]
    pub fn thread(&self) -> ThreadId {
        self.thread
    }

    /// True for the lane bound to the terminal.
    #[must_use]
    pub fn is_console(&self) -> bool {
        self.console
    }

    /// Terminal columns, for the console lane when they can be queried.
    #[must_use]
    pub fn columns(&self) -> Option<u16> {
        self.width.as_ref().and_then(|w| w.columns())
    }

    /// Lock the lane state, recovering from poisoning.
    pub(crate) fn lock(&self) -> MutexGuard<'_, LaneState> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Text buffered by a memory sink, decoded lossily.
    ///
    /// Writer sinks report an empty string.
    #[must_use]
    pub fn contents(&self) -> String {
        let state = self.lock();
        state
            .sink
            .buffered()
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
            .unwrap_or_default()
    }

    /// Take the buffer of a worker lane whose last action closed a bracket.
    pub(crate) fn take_finished(&self) -> Option<Vec<u8>> {
        if self.console {
            return None;
        }
        let mut state = self.lock();
        if !state.last_was_brackets {
            return None;
        }
        let text = state.sink.take();
        (!text.is_empty()).then_some(text)
    }
}

impl fmt::Debug for Lane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lane")
            .field("id", &self.id)
            .field("thread", &self.thread)
            .field("console", &self.console)
            .finish_non_exhaustive()
    }
}
