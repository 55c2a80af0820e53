use std::ops::Range;

use crate::config::PLAYBACK;
use crate::models::{CandleSeries, RegimeLog, TradeLog};

use super::bounds::{AxisBounds, DataExtent, slice_bounds};
use super::cache::{ViewportState, ViewportStateCache};
use super::messages::{NavigateOp, StreamEvent};
use super::overlay::{OverlaySet, build_overlays};
use super::playback::{PlaybackController, PlaybackState};
use super::scheduler::FrameScheduler;
use super::viewport::ViewportWindow;

/// Which of the two chart variants is currently deriving the visible slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    /// Window slides behind the playback cursor; axis bounds are
    /// dataset-level so they stay put during the animation.
    Playback,
    /// Window follows an explicit scroll position; bounds follow the slice
    /// while auto-zoom is on.
    Manual,
}

/// Everything the external renderer gets to see.
pub enum RenderModel<'a> {
    /// Explicit sentinel for an empty dataset, not an empty-but-valid model.
    NoData,
    Chart(ChartFrame<'a>),
}

pub struct ChartFrame<'a> {
    pub symbol: &'a str,
    pub candles: &'a CandleSeries,
    pub visible: Range<usize>,
    pub bounds: AxisBounds,
    pub overlays: OverlaySet,
    /// Playback cursor index, present only while the playback variant is
    /// driving the window.
    pub cursor: Option<usize>,
    pub total_len: usize,
    pub playback: PlaybackState,
    pub mode: ViewMode,
    pub full_view: bool,
}

/// The streaming chart viewport and playback engine.
///
/// Owns the active symbol's stores, the playback state machine and the
/// window; hands the renderer one `RenderModel` per frame and exposes
/// nothing else. All mutation funnels through the operations below; slices,
/// bounds and overlays are derived, never stored ad hoc.
pub struct ChartEngine {
    symbol: String,

    candles: CandleSeries,
    trades: TradeLog,
    regimes: RegimeLog,

    controller: PlaybackController,
    viewport: ViewportWindow,
    mode: ViewMode,
    full_view: bool,

    extent: DataExtent,
    auto_zoom: bool,
    frozen_bounds: Option<AxisBounds>,
    last_bounds: AxisBounds,

    cache: ViewportStateCache,
    has_rendered: bool,

    dropped_events: usize,
    last_drop_reason: Option<String>,
}

impl ChartEngine {
    pub fn new(symbol: impl Into<String>, scheduler: Box<dyn FrameScheduler>) -> Self {
        Self {
            symbol: symbol.into(),
            candles: CandleSeries::new(),
            trades: TradeLog::new(),
            regimes: RegimeLog::new(),
            controller: PlaybackController::new(scheduler),
            viewport: ViewportWindow::at_tail(),
            mode: ViewMode::Manual,
            full_view: false,
            extent: DataExtent::new(),
            auto_zoom: true,
            frozen_bounds: None,
            last_bounds: AxisBounds::default(),
            cache: ViewportStateCache::default(),
            has_rendered: false,
            dropped_events: 0,
            last_drop_reason: None,
        }
    }

    // --- STREAM INPUT ---

    /// Merge one stream event into the stores. Malformed events are dropped
    /// with a diagnostic; ingestion never fails the session.
    pub fn append_event(&mut self, event: StreamEvent) {
        match event {
            StreamEvent::Candle(candle) => match self.candles.append(candle.clone()) {
                Ok(()) => self.extent.merge_candle(&candle),
                Err(e) => self.drop_event(format!("candle rejected: {}", e)),
            },
            StreamEvent::Trade(trade) => {
                if let Err(e) = self.trades.append(trade) {
                    self.drop_event(format!("trade rejected: {}", e));
                }
            }
            StreamEvent::RegimePeriod(period) => {
                if let Err(e) = self.regimes.append(period) {
                    self.drop_event(format!("regime period rejected: {}", e));
                }
            }
        }
    }

    // --- PLAYBACK ---

    pub fn play(&mut self) {
        if self.full_view {
            log::debug!("play ignored: full view freezes playback");
            return;
        }
        self.mode = ViewMode::Playback;
        self.controller.start();
    }

    pub fn pause(&mut self) {
        self.controller.pause();
    }

    /// Clear all three stores, reset the cursor and start playing again.
    /// The host is expected to re-feed the event stream.
    pub fn replay(&mut self) {
        self.candles.clear();
        self.trades.clear();
        self.regimes.clear();
        self.extent.reset();

        self.full_view = false;
        self.mode = ViewMode::Playback;
        self.has_rendered = false;
        self.controller.replay();
    }

    /// Deliver the due frame callback, if any. The host calls this once per
    /// rendered frame.
    pub fn pump(&mut self) {
        if let Some(handle) = self.controller.due_frame() {
            let len = self.candles.len();
            self.controller.on_frame(handle, len);
        }
    }

    pub fn dispose(&mut self) {
        self.controller.dispose();
    }

    // --- VIEWPORT ---

    pub fn set_full_view(&mut self, on: bool) {
        self.full_view = on;
        if on {
            self.controller.pause();
        }
    }

    pub fn set_window_size(&mut self, size: usize) {
        self.enter_manual();
        self.viewport.set_window_size(size, self.candles.len());
    }

    pub fn navigate(&mut self, op: NavigateOp) {
        self.enter_manual();
        self.viewport.navigate(op, self.candles.len());
    }

    /// Turning auto-zoom off freezes the last rendered bounds. Before the
    /// first frame there is nothing meaningful to snapshot; the freeze is
    /// deferred and `bounds_for` captures the first slice bounds instead.
    pub fn set_auto_zoom(&mut self, on: bool) {
        self.auto_zoom = on;
        self.frozen_bounds = (!on && self.has_rendered).then_some(self.last_bounds);
    }

    /// Any manual interaction drops playback into the scrolled variant,
    /// anchored where the sliding window currently is.
    fn enter_manual(&mut self) {
        if self.mode == ViewMode::Playback {
            let len = self.candles.len();
            let anchor = self
                .viewport
                .playback_slice(len, self.controller.cursor())
                .start;
            self.controller.pause();
            self.viewport.scroll_to(anchor, len);
            self.mode = ViewMode::Manual;
        }
    }

    // --- SYMBOL SWITCH ---

    /// Save/restore transaction on the viewport cache: write the outgoing
    /// symbol's state back, then load (or lazily create) the incoming one.
    /// Stores are cleared; the host re-feeds the new symbol's events.
    pub fn switch_symbol(&mut self, symbol: &str) {
        if symbol == self.symbol {
            return;
        }

        let outgoing = self.current_viewport_state();
        self.cache.insert(&self.symbol, outgoing);

        self.symbol = symbol.to_string();
        self.candles.clear();
        self.trades.clear();
        self.regimes.clear();
        self.extent.reset();
        self.controller.reset();
        self.mode = ViewMode::Manual;
        self.full_view = false;
        self.has_rendered = false;

        match self.cache.get(symbol) {
            Some(prev) => {
                self.viewport.restore(prev.start_index, prev.window_size);
                self.auto_zoom = prev.auto_zoom;
                self.last_bounds = prev.bounds;
                self.frozen_bounds = (!prev.auto_zoom).then_some(prev.bounds);

                #[cfg(debug_assertions)]
                log::info!("restored viewport for {}", symbol);
            }
            None => {
                self.viewport = ViewportWindow::at_tail();
                self.auto_zoom = true;
                self.frozen_bounds = None;
                self.last_bounds = AxisBounds::default();
            }
        }
    }

    pub fn current_viewport_state(&self) -> ViewportState {
        ViewportState {
            start_index: self.viewport.start_index(),
            window_size: self.viewport.window_size(),
            bounds: self.last_bounds,
            auto_zoom: self.auto_zoom,
        }
    }

    // --- RENDER MODEL ---

    pub fn render_model(&mut self) -> RenderModel<'_> {
        if self.candles.is_empty() {
            return RenderModel::NoData;
        }
        let len = self.candles.len();

        let visible = if self.full_view {
            self.viewport.full_slice(len)
        } else {
            match self.mode {
                ViewMode::Playback => self.viewport.playback_slice(len, self.controller.cursor()),
                ViewMode::Manual => self.viewport.manual_slice(len),
            }
        };

        let bounds = self.bounds_for(&visible);
        self.last_bounds = bounds;
        self.has_rendered = true;

        let first_ms = self.candles.time_at(visible.start);
        let last_ms = self.candles.time_at(visible.end - 1);
        let overlays = crate::trace_time!("Build overlays", 2000, {
            build_overlays(first_ms, last_ms, self.trades.all(), self.regimes.all())
        });

        let cursor = match self.mode {
            ViewMode::Playback => Some(self.controller.cursor()),
            ViewMode::Manual => None,
        };

        RenderModel::Chart(ChartFrame {
            symbol: &self.symbol,
            candles: &self.candles,
            visible,
            bounds,
            overlays,
            cursor,
            total_len: len,
            playback: self.controller.state(),
            mode: self.mode,
            full_view: self.full_view,
        })
    }

    /// Bounds policy, per chart variant:
    /// - playback and full view use the dataset-level extent (kept current
    ///   on every length change), so the axes do not jitter while the
    ///   window slides;
    /// - manual with auto-zoom recomputes from the visible slice;
    /// - manual without auto-zoom freezes the last computed bounds.
    fn bounds_for(&mut self, visible: &Range<usize>) -> AxisBounds {
        if self.full_view || self.mode == ViewMode::Playback {
            return self.extent.padded(PLAYBACK.price_pad_dataset);
        }

        if self.auto_zoom {
            slice_bounds(&self.candles, visible.clone(), PLAYBACK.price_pad_slice)
        } else if let Some(frozen) = self.frozen_bounds {
            frozen
        } else {
            let bounds = slice_bounds(&self.candles, visible.clone(), PLAYBACK.price_pad_slice);
            self.frozen_bounds = Some(bounds);
            bounds
        }
    }

    // --- DIAGNOSTICS & ACCESSORS ---

    fn drop_event(&mut self, reason: String) {
        log::warn!("[{}] dropped event: {}", self.symbol, reason);
        self.dropped_events += 1;
        self.last_drop_reason = Some(reason);
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn candle_count(&self) -> usize {
        self.candles.len()
    }

    pub fn trade_count(&self) -> usize {
        self.trades.len()
    }

    pub fn playback_state(&self) -> PlaybackState {
        self.controller.state()
    }

    pub fn cursor(&self) -> usize {
        self.controller.cursor()
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn full_view(&self) -> bool {
        self.full_view
    }

    pub fn auto_zoom(&self) -> bool {
        self.auto_zoom
    }

    pub fn window_size(&self) -> usize {
        self.viewport.window_size()
    }

    pub fn dropped_events(&self) -> usize {
        self.dropped_events
    }

    pub fn last_drop_reason(&self) -> Option<&str> {
        self.last_drop_reason.as_deref()
    }
}
