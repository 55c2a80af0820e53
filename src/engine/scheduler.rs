//! Cancellable frame-callback abstraction.
//!
//! The platform animation callback (vsync repaint on native, rAF on web) is
//! modeled as a capability with exactly three verbs: arm one frame, cancel
//! it, and poll which armed frame is due. The playback controller owns at
//! most one live handle at a time and validates every delivery against it,
//! so a callback that was cancelled mid-flight can never advance a cursor
//! that has since been reset.

/// Token identifying one scheduled frame. Handles are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHandle(u64);

pub trait FrameScheduler {
    /// Arm a frame callback. Re-arming replaces any previously armed frame.
    fn schedule(&mut self) -> FrameHandle;

    /// Disarm `handle` if it is still pending. Cancelling an already fired
    /// or foreign handle is a no-op.
    fn cancel(&mut self, handle: FrameHandle);

    /// The handle due this frame, if any. Polled by the host driver once
    /// per rendered frame; a handle is delivered at most once.
    fn due(&mut self) -> Option<FrameHandle>;
}

/// Plain scheduler for hosts that drive frames themselves (tests, headless
/// runs). The egui host wraps this with a repaint request, see the ui crate
/// module.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: u64,
    armed: Option<FrameHandle>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FrameScheduler for ManualScheduler {
    fn schedule(&mut self) -> FrameHandle {
        self.next_id += 1;
        let handle = FrameHandle(self.next_id);
        self.armed = Some(handle);
        handle
    }

    fn cancel(&mut self, handle: FrameHandle) {
        if self.armed == Some(handle) {
            self.armed = None;
        }
    }

    fn due(&mut self) -> Option<FrameHandle> {
        self.armed.take()
    }
}
