//! Playback engine and viewport tuning knobs.

/// Everything that shapes how the replay window behaves.
pub struct PlaybackConfig {
    /// Sliding window width while the replay animation is running.
    /// Fixed for the session; not user adjustable in playback mode.
    pub replay_window: usize,

    /// Default window width for manual scrolling.
    pub manual_window_default: usize,

    /// The window widths offered in the manual-mode selector.
    pub manual_window_choices: &'static [usize],

    /// Price padding for per-slice (manual / auto-zoom) bounds.
    pub price_pad_slice: f64,

    /// Price padding for dataset-level (playback) bounds.
    /// Wider than the slice padding: playback bounds are recomputed only on
    /// dataset growth and must tolerate candles drifting outside the
    /// initially visible slice.
    pub price_pad_dataset: f64,

    /// Headroom multiplier on the volume axis. Lower bound is always 0.
    pub volume_headroom: f64,

    /// Symmetric expansion applied when a slice is flat or single-point,
    /// so the axis range is never empty or inverted.
    pub flat_pad: f64,

    /// Axis range reported for an empty slice.
    pub fallback_price_range: (f64, f64),

    /// Max entries in the per-symbol viewport cache before LRU eviction.
    pub cache_capacity: usize,
}

pub static PLAYBACK: PlaybackConfig = PlaybackConfig {
    replay_window: 120,
    manual_window_default: 120,
    manual_window_choices: &[60, 120, 240, 480],
    price_pad_slice: 0.05,
    price_pad_dataset: 0.10,
    volume_headroom: 1.10,
    flat_pad: 0.5,
    fallback_price_range: (0.0, 1.0),
    cache_capacity: 64,
};
