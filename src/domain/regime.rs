use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RegimeKind {
    Momentum,
    Consolidation,
}

/// A labeled time interval overlaid on the chart as a background band.
/// Periods of the same kind may be non-contiguous; overlap across kinds
/// is permitted and not deduplicated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegimePeriod {
    pub start_time_ms: i64,
    pub end_time_ms: i64,
    pub kind: RegimeKind,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_price: Option<f64>,
}

impl RegimePeriod {
    pub fn validate(&self) -> Result<()> {
        if self.start_time_ms > self.end_time_ms {
            return Err(anyhow!(
                "regime period start {} is after end {}",
                self.start_time_ms,
                self.end_time_ms
            ));
        }
        Ok(())
    }

    /// Interval-overlap test against the visible window `[first, last]`.
    pub fn overlaps(&self, first_visible_ms: i64, last_visible_ms: i64) -> bool {
        self.start_time_ms <= last_visible_ms && self.end_time_ms >= first_visible_ms
    }
}
