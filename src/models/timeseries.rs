use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::domain::{CandlePoint, RegimeLabel};

// ============================================================================
// CandleSeries: append-only time series for one symbol
// ============================================================================

/// Column-oriented storage so bounds scans touch only the arrays they need.
/// Strictly append-only: no in-place edits, no deletes, strictly increasing
/// timestamps.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CandleSeries {
    pub timestamps: Vec<i64>,

    // Prices
    pub open_prices: Vec<f64>,
    pub high_prices: Vec<f64>,
    pub low_prices: Vec<f64>,
    pub close_prices: Vec<f64>,

    pub volumes: Vec<f64>,

    pub regime_labels: Vec<RegimeLabel>,
    pub indicators: Vec<Option<f64>>,
}

impl CandleSeries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one candle. Rejects non-finite payloads and any timestamp that
    /// does not strictly advance the series.
    pub fn append(&mut self, candle: CandlePoint) -> Result<()> {
        if !candle.is_finite() {
            return Err(anyhow!(
                "candle at {} contains non-finite values",
                candle.time_ms
            ));
        }
        if let Some(&last_ts) = self.timestamps.last() {
            if candle.time_ms <= last_ts {
                return Err(anyhow!(
                    "candle time {} does not advance past {}",
                    candle.time_ms,
                    last_ts
                ));
            }
        }

        self.timestamps.push(candle.time_ms);
        self.open_prices.push(candle.open);
        self.high_prices.push(candle.high);
        self.low_prices.push(candle.low);
        self.close_prices.push(candle.close);
        self.volumes.push(candle.volume);
        self.regime_labels.push(candle.regime_label);
        self.indicators.push(candle.indicator);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    pub fn get_candle(&self, idx: usize) -> CandlePoint {
        CandlePoint {
            time_ms: self.timestamps[idx],
            open: self.open_prices[idx],
            high: self.high_prices[idx],
            low: self.low_prices[idx],
            close: self.close_prices[idx],
            volume: self.volumes[idx],
            regime_label: self.regime_labels[idx],
            indicator: self.indicators[idx],
        }
    }

    pub fn time_at(&self, idx: usize) -> i64 {
        self.timestamps[idx]
    }

    /// Index of the candle whose bucket contains `time_ms`, i.e. the last
    /// candle at or before the timestamp.
    pub fn index_at_or_before(&self, time_ms: i64) -> Option<usize> {
        match self.timestamps.binary_search(&time_ms) {
            Ok(i) => Some(i),
            Err(0) => None,
            Err(i) => Some(i - 1),
        }
    }

    pub fn clear(&mut self) {
        self.timestamps.clear();
        self.open_prices.clear();
        self.high_prices.clear();
        self.low_prices.clear();
        self.close_prices.clear();
        self.volumes.clear();
        self.regime_labels.clear();
        self.indicators.clear();
    }
}
