use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::config::PLAYBACK;
use crate::domain::CandlePoint;
use crate::models::CandleSeries;

/// Padded axis ranges handed to the renderer. Always finite, never
/// inverted; the volume axis is anchored at 0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisBounds {
    pub price_min: f64,
    pub price_max: f64,
    pub volume_max: f64,
}

impl Default for AxisBounds {
    fn default() -> Self {
        let (lo, hi) = PLAYBACK.fallback_price_range;
        Self {
            price_min: lo,
            price_max: hi,
            volume_max: 1.0,
        }
    }
}

/// Raw (unpadded) extent of a set of candles. Kept incrementally by the
/// engine so dataset-level bounds are O(1) per append instead of a rescan.
/// Membership-only: merging the same candles in any order yields the same
/// extent.
#[derive(Debug, Clone, Copy, Default)]
pub struct DataExtent {
    price_min: f64,
    price_max: f64,
    volume_max: f64,
    populated: bool,
}

impl DataExtent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn merge_candle(&mut self, candle: &CandlePoint) {
        if !self.populated {
            self.price_min = candle.low;
            self.price_max = candle.high;
            self.volume_max = candle.volume;
            self.populated = true;
            return;
        }
        self.price_min = self.price_min.min(candle.low);
        self.price_max = self.price_max.max(candle.high);
        self.volume_max = self.volume_max.max(candle.volume);
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn padded(&self, pad_factor: f64) -> AxisBounds {
        if !self.populated {
            return AxisBounds::default();
        }
        pad(self.price_min, self.price_max, self.volume_max, pad_factor)
    }
}

/// Pure per-slice bounds: scan `range` of the series and pad.
pub fn slice_bounds(series: &CandleSeries, range: Range<usize>, pad_factor: f64) -> AxisBounds {
    if range.is_empty() || range.end > series.len() {
        return AxisBounds::default();
    }

    let mut price_min = f64::INFINITY;
    let mut price_max = f64::NEG_INFINITY;
    let mut volume_max: f64 = 0.0;

    for idx in range {
        price_min = price_min.min(series.low_prices[idx]);
        price_max = price_max.max(series.high_prices[idx]);
        volume_max = volume_max.max(series.volumes[idx]);
    }

    if !price_min.is_finite() || !price_max.is_finite() {
        return AxisBounds::default();
    }

    pad(price_min, price_max, volume_max, pad_factor)
}

fn pad(price_min: f64, price_max: f64, volume_max: f64, pad_factor: f64) -> AxisBounds {
    let spread = price_max - price_min;

    let (lo, hi) = if spread <= f64::EPSILON {
        // Flat or single-point slice: expand symmetrically so the range is
        // never empty or inverted.
        (price_min - PLAYBACK.flat_pad, price_max + PLAYBACK.flat_pad)
    } else {
        let pad = spread * pad_factor;
        (price_min - pad, price_max + pad)
    };

    let volume_max = if volume_max > 0.0 {
        volume_max * PLAYBACK.volume_headroom
    } else {
        1.0
    };

    AxisBounds {
        price_min: lo,
        price_max: hi,
        volume_max,
    }
}
