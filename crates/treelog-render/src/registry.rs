#![forbid(unsafe_code)]

//! Lane registry.
//!
//! The registry maps threads to lanes and holds everything lanes share:
//! configuration, line geometry, the stamp source and the color decision.
//! Its mutex guards lane creation and enumeration only; rendering locks the
//! individual lane.
//!
//! The first lane created is bound to the console sink and width provider.
//! Later lanes buffer in memory and are drained into the console lane when
//! it closes a bracket.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock};
use std::thread;

use treelog_core::{
    ColorSupport, Geometry, LevelGate, LocalClock, Result, StampSource, TerminalWidth,
    WidthProvider, debug, debug_span, warn,
};
use treelog_text::Metric;

use crate::config::RendererConfig;
use crate::lane::{Lane, LaneSink, LaneState};
use crate::renderer::Renderer;

static GLOBAL: OnceLock<Arc<Registry>> = OnceLock::new();

/// Process-wide or explicitly constructed set of lanes.
pub struct Registry {
    config: RendererConfig,
    geometry: Geometry,
    stamp: Arc<dyn StampSource>,
    color: ColorSupport,
    console_width: Arc<dyn WidthProvider>,
    console_sink: Mutex<Option<LaneSink>>,
    lanes: Mutex<Vec<Arc<Lane>>>,
}

impl Registry {
    /// Start building a registry.
    #[must_use]
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// The process-wide registry writing to stdout.
    ///
    /// Initialized on first use from `TREELOG_*` environment variables;
    /// invalid values are ignored with a warning.
    #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
    pub fn global() -> &'static Arc<Registry> {
        GLOBAL.get_or_init(|| {
            let config = RendererConfig::from_env().unwrap_or_else(|err| {
                warn!(error = %err, "invalid treelog environment, using defaults");
                RendererConfig::default()
            });
            let builder = Registry::builder().config(config);
            match LocalClock::new(&builder.config.stamp_format) {
                Ok(clock) => builder.assemble(Arc::new(clock)),
                Err(err) => {
                    warn!(error = %err, "invalid stamp format, using default");
                    builder.assemble(Arc::new(LocalClock::default()))
                }
            }
        })
    }

    /// Configuration the registry was built with.
    #[must_use]
    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    /// Line geometry shared by all lanes.
    #[must_use]
    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    /// Column metric used for wrapping.
    #[must_use]
    pub fn metric(&self) -> Metric {
        self.config.metric
    }

    /// Whether color sequences are emitted.
    #[must_use]
    pub fn color_enabled(&self) -> bool {
        self.color.enabled()
    }

    pub(crate) fn stamp(&self) -> String {
        self.stamp.stamp()
    }

    fn lock_lanes(&self) -> MutexGuard<'_, Vec<Arc<Lane>>> {
        match self.lanes.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Lane of the calling thread, created on first use.
    pub fn lane_for_current_thread(&self) -> Arc<Lane> {
        let thread = thread::current().id();
        let mut lanes = self.lock_lanes();
        if let Some(lane) = lanes.iter().find(|lane| lane.thread() == thread) {
            return Arc::clone(lane);
        }

        let id = lanes.len();
        let gate = LevelGate::new(self.config.out_level, self.config.filter_mask);
        let lane = if lanes.is_empty() {
            let sink = match self.console_sink.lock() {
                Ok(mut slot) => slot.take(),
                Err(poisoned) => poisoned.into_inner().take(),
            }
            .unwrap_or_else(LaneSink::stdout);
            Lane::new(
                id,
                thread,
                Some(Arc::clone(&self.console_width)),
                LaneState::new(sink, gate),
            )
        } else {
            Lane::new(id, thread, None, LaneState::new(LaneSink::memory(), gate))
        };
        debug!(lane = id, console = lane.is_console(), "created lane");
        let lane = Arc::new(lane);
        lanes.push(Arc::clone(&lane));
        lane
    }

    /// Renderer bound to the calling thread's lane.
    pub fn renderer(self: &Arc<Self>) -> Renderer {
        Renderer::new(Arc::clone(self), self.lane_for_current_thread())
    }

    /// Snapshot of all lanes in creation order.
    #[must_use]
    pub fn lanes(&self) -> Vec<Arc<Lane>> {
        self.lock_lanes().clone()
    }

    /// The console lane, once some thread has rendered.
    #[must_use]
    pub fn console(&self) -> Option<Arc<Lane>> {
        self.lock_lanes().iter().find(|lane| lane.is_console()).cloned()
    }

    /// Collect the buffers of finished worker lanes, in creation order.
    ///
    /// Called with the console lane locked; lanes are locked one at a time
    /// after the registry lock is released.
    pub(crate) fn drain_finished(&self) -> Vec<u8> {
        let span = debug_span!("drain_finished");
        let _guard = span.enter();
        let mut drained = Vec::new();
        for lane in self.lanes() {
            if let Some(text) = lane.take_finished() {
                debug!(lane = lane.id(), bytes = text.len(), "drained worker lane");
                drained.extend_from_slice(&text);
            }
        }
        drained
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("config", &self.config)
            .field("geometry", &self.geometry)
            .field("color", &self.color)
            .field("lanes", &self.lock_lanes().len())
            .finish_non_exhaustive()
    }
}

/// Builder for [`Registry`].
#[derive(Default)]
pub struct RegistryBuilder {
    config: RendererConfig,
    stamp: Option<Arc<dyn StampSource>>,
    width: Option<Arc<dyn WidthProvider>>,
    sink: Option<LaneSink>,
    color: Option<ColorSupport>,
}

impl RegistryBuilder {
    /// Use `config` instead of the defaults.
    #[must_use]
    pub fn config(mut self, config: RendererConfig) -> Self {
        self.config = config;
        self
    }

    /// Stamp source; defaults to local time in the configured format.
    #[must_use]
    pub fn stamp(mut self, stamp: impl StampSource + 'static) -> Self {
        self.stamp = Some(Arc::new(stamp));
        self
    }

    /// Width provider of the console lane; defaults to the real terminal.
    #[must_use]
    pub fn width(mut self, width: impl WidthProvider + 'static) -> Self {
        self.width = Some(Arc::new(width));
        self
    }

    /// Sink of the console lane; defaults to stdout.
    #[must_use]
    pub fn sink(mut self, sink: LaneSink) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Capture console output in memory, see [`Lane::contents`].
    #[must_use]
    pub fn capture(self) -> Self {
        self.sink(LaneSink::memory())
    }

    /// Color decision; defaults to the configured [`ColorMode`](crate::ColorMode).
    #[must_use]
    pub fn color(mut self, color: ColorSupport) -> Self {
        self.color = Some(color);
        self
    }

    /// Build the registry.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidStampFormat`](treelog_core::Error::InvalidStampFormat)
    /// when no stamp source was given and the configured format is invalid.
    pub fn build(mut self) -> Result<Arc<Registry>> {
        let stamp: Arc<dyn StampSource> = match self.stamp.take() {
            Some(stamp) => stamp,
            None => Arc::new(LocalClock::new(&self.config.stamp_format)?),
        };
        Ok(self.assemble(stamp))
    }

    fn assemble(self, default_stamp: Arc<dyn StampSource>) -> Arc<Registry> {
        let stamp = self.stamp.unwrap_or(default_stamp);
        let geometry = Geometry::new(stamp.width(), self.config.fallback_width);
        let color = self.color.unwrap_or_else(|| self.config.color.resolve());
        Arc::new(Registry {
            geometry,
            stamp,
            color,
            console_width: self.width.unwrap_or_else(|| Arc::new(TerminalWidth)),
            console_sink: Mutex::new(self.sink),
            lanes: Mutex::new(Vec::new()),
            config: self.config,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use treelog_core::{FixedColumns, FixedStamp};

    fn capture() -> Arc<Registry> {
        Registry::builder()
            .stamp(FixedStamp::new("12:00"))
            .width(FixedColumns(50))
            .color(ColorSupport::fixed(false))
            .capture()
            .build()
            .unwrap()
    }

    #[test]
    fn first_lane_is_console() {
        let registry = capture();
        let lane = registry.lane_for_current_thread();
        assert!(lane.is_console());
        assert_eq!(lane.id(), 0);
        assert_eq!(lane.columns(), Some(50));
    }

    #[test]
    fn same_thread_gets_same_lane() {
        let registry = capture();
        let a = registry.lane_for_current_thread();
        let b = registry.lane_for_current_thread();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(registry.lanes().len(), 1);
    }

    #[test]
    fn other_threads_get_buffered_lanes() {
        let registry = capture();
        let console = registry.lane_for_current_thread();
        let worker = {
            let registry = Arc::clone(&registry);
            std::thread::spawn(move || registry.lane_for_current_thread())
                .join()
                .unwrap()
        };
        assert!(!worker.is_console());
        assert_eq!(worker.id(), 1);
        assert_eq!(worker.columns(), None);
        assert!(Arc::ptr_eq(&registry.console().unwrap(), &console));
    }

    #[test]
    fn geometry_follows_stamp_width() {
        let registry = capture();
        assert_eq!(registry.geometry().gutter(), 12);
        assert_eq!(registry.geometry().content_width(Some(50)), 30);
    }

    #[test]
    fn invalid_stamp_format_fails_build() {
        let config = RendererConfig::default().stamp_format("%Q");
        assert!(Registry::builder().config(config).build().is_err());
    }

    #[test]
    fn explicit_stamp_skips_format_validation() {
        let config = RendererConfig::default().stamp_format("%Q");
        let registry = Registry::builder()
            .config(config)
            .stamp(FixedStamp::new("t"))
            .capture()
            .build();
        assert!(registry.is_ok());
    }

    #[test]
    fn console_is_none_before_first_lane() {
        assert!(capture().console().is_none());
    }
}
