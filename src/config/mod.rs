//! Configuration module for the replay-scope application.

mod playback;

// Can't be private because the UI reaches into it directly.
pub mod plot;

pub use playback::{PLAYBACK, PlaybackConfig};

/// Gate for the `trace_time!` perf probes.
pub const LOG_PERFORMANCE: bool = cfg!(debug_assertions);
