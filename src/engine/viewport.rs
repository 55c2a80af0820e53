use std::ops::Range;

use crate::config::PLAYBACK;

use super::messages::NavigateOp;

/// Windowing over the candle store.
///
/// Playback mode slides a fixed-width window behind the cursor; manual mode
/// scrolls an explicit `start_index`. The stored `start_index` is clamped
/// lazily when a slice is computed, so a restored viewport survives the
/// transient empty store while a symbol's events are re-fed.
#[derive(Debug, Clone)]
pub struct ViewportWindow {
    start_index: usize,
    window_size: usize,
}

impl Default for ViewportWindow {
    fn default() -> Self {
        Self {
            start_index: 0,
            window_size: PLAYBACK.manual_window_default,
        }
    }
}

impl ViewportWindow {
    pub fn new(window_size: usize) -> Self {
        Self {
            start_index: 0,
            window_size: window_size.max(1),
        }
    }

    /// A window that sticks to the newest candles. The oversized
    /// `start_index` clamps down to `max_start` on every slice, so the view
    /// follows the tail as data streams in.
    pub fn at_tail() -> Self {
        Self {
            start_index: usize::MAX,
            window_size: PLAYBACK.manual_window_default,
        }
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    pub fn start_index(&self) -> usize {
        self.start_index
    }

    /// Largest valid `start_index` for a dataset of `len` candles.
    pub fn max_start(&self, len: usize) -> usize {
        len.saturating_sub(self.window_size)
    }

    fn effective_start(&self, len: usize) -> usize {
        self.start_index.min(self.max_start(len))
    }

    /// Playback-paced slice: `[max(0, end - window), end)` with
    /// `end = cursor + 1`.
    pub fn playback_slice(&self, len: usize, cursor: usize) -> Range<usize> {
        if len == 0 {
            return 0..0;
        }
        let end = (cursor + 1).min(len);
        let start = end.saturating_sub(PLAYBACK.replay_window);
        start..end
    }

    /// Manual-scroll slice: `[start, min(start + window, len))`.
    pub fn manual_slice(&self, len: usize) -> Range<usize> {
        if len == 0 {
            return 0..0;
        }
        let start = self.effective_start(len);
        let end = (start + self.window_size).min(len);
        start..end
    }

    pub fn full_slice(&self, len: usize) -> Range<usize> {
        0..len
    }

    /// Clamp an arbitrary requested width into `[1, len]` (or just `>= 1`
    /// while the store is still empty) and reclamp the scroll position.
    pub fn set_window_size(&mut self, requested: usize, len: usize) {
        let mut size = requested.max(1);
        if len > 0 {
            size = size.min(len);
        }
        self.window_size = size;
        if len > 0 {
            self.start_index = self.effective_start(len);
        }
    }

    /// Apply one navigation op. Boundary hits clamp silently; that is
    /// normal behavior, not an error.
    pub fn navigate(&mut self, op: NavigateOp, len: usize) {
        if len == 0 {
            return;
        }
        let max_start = self.max_start(len);
        let current = self.effective_start(len);

        self.start_index = match op {
            NavigateOp::StepLeft => current.saturating_sub(1),
            NavigateOp::StepRight => (current + 1).min(max_start),
            NavigateOp::JumpLeft => current.saturating_sub(self.window_size),
            NavigateOp::JumpRight => (current + self.window_size).min(max_start),
            NavigateOp::ToStart => 0,
            NavigateOp::ToEnd => max_start,
        };
    }

    /// Jump the scroll position so the window starts at `start` (clamped).
    /// Used when dropping out of playback into manual mode, so the view
    /// does not teleport.
    pub fn scroll_to(&mut self, start: usize, len: usize) {
        self.start_index = start.min(self.max_start(len));
    }

    pub fn restore(&mut self, start_index: usize, window_size: usize) {
        self.start_index = start_index;
        self.window_size = window_size.max(1);
    }
}
