use strum_macros::Display;

use super::scheduler::{FrameHandle, FrameScheduler};

/// Playback state machine: `Idle → Playing → Paused → Completed`, with
/// replay as a transient reset back into `Playing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum PlaybackState {
    Idle,
    Playing,
    Paused,
    Completed,
}

/// Frame-paced cursor driver.
///
/// Owns the scheduler capability and at most one live frame handle. Every
/// transition that moves the cursor cancels the pending handle first; a
/// late delivery of a cancelled handle is detected in `on_frame` and
/// dropped. Skipping that cancellation was the classic bug in ad hoc
/// implementations: a stale tick fires right after `replay()` and advances
/// the just-reset cursor.
pub struct PlaybackController {
    state: PlaybackState,
    cursor: usize,
    pending: Option<FrameHandle>,
    scheduler: Box<dyn FrameScheduler>,
}

impl PlaybackController {
    pub fn new(scheduler: Box<dyn FrameScheduler>) -> Self {
        Self {
            state: PlaybackState::Idle,
            cursor: 0,
            pending: None,
            scheduler,
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Index of the most recently revealed candle.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn has_pending_frame(&self) -> bool {
        self.pending.is_some()
    }

    /// Begin or resume playback. No-op when already `Playing` or `Completed`.
    pub fn start(&mut self) {
        match self.state {
            PlaybackState::Idle | PlaybackState::Paused => {
                self.state = PlaybackState::Playing;
                self.arm();
            }
            PlaybackState::Playing | PlaybackState::Completed => {}
        }
    }

    /// Suspend playback, keeping the cursor where it is.
    pub fn pause(&mut self) {
        if self.state == PlaybackState::Playing {
            self.cancel_pending();
            self.state = PlaybackState::Paused;
        }
    }

    /// Reset the cursor to 0 and start playing, from any state. The caller
    /// is responsible for clearing the data stores.
    pub fn replay(&mut self) {
        self.cancel_pending();
        self.cursor = 0;
        self.state = PlaybackState::Playing;
        self.arm();
    }

    /// Hard reset to `Idle` (used on symbol switch).
    pub fn reset(&mut self) {
        self.cancel_pending();
        self.cursor = 0;
        self.state = PlaybackState::Idle;
    }

    /// Cancel any outstanding frame. Idempotent, callable from any state.
    pub fn dispose(&mut self) {
        self.cancel_pending();
    }

    /// Poll the scheduler for a due frame. The host calls this once per
    /// rendered frame and feeds the result straight into `on_frame`.
    pub fn due_frame(&mut self) -> Option<FrameHandle> {
        self.scheduler.due()
    }

    /// Deliver one frame callback. Stale handles (anything that is not the
    /// single pending one) are dropped without touching the cursor.
    pub fn on_frame(&mut self, handle: FrameHandle, len: usize) {
        if self.pending != Some(handle) {
            log::trace!("playback: dropping stale frame {:?}", handle);
            return;
        }
        self.pending = None;

        if self.state != PlaybackState::Playing {
            return;
        }
        self.tick(len);
    }

    /// Advance the cursor by exactly one unit. Reaching `len - 1` completes
    /// playback and stops scheduling further frames.
    fn tick(&mut self, len: usize) {
        if len == 0 {
            // Nothing to reveal yet; keep waiting for data.
            self.arm();
            return;
        }

        if self.cursor < len - 1 {
            self.cursor += 1;
        }

        if self.cursor >= len - 1 {
            self.state = PlaybackState::Completed;

            #[cfg(debug_assertions)]
            log::info!("playback: completed at cursor {}", self.cursor);
        } else {
            self.arm();
        }
    }

    fn arm(&mut self) {
        self.cancel_pending();
        self.pending = Some(self.scheduler.schedule());
    }

    fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel(handle);
        }
    }
}
