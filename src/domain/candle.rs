use serde::{Deserialize, Serialize};

/// Per-candle regime tag delivered alongside the OHLCV payload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RegimeLabel {
    #[default]
    None,
    Detected,
    Consolidation,
    InPosition,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum CandleType {
    Bullish,
    Bearish,
}

/// One OHLCV-style time-bucketed price sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandlePoint {
    pub time_ms: i64,

    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,

    #[serde(default)]
    pub regime_label: RegimeLabel,

    /// Optional pre-computed indicator value (e.g. a moving average).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indicator: Option<f64>,
}

impl CandlePoint {
    pub fn new(time_ms: i64, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        CandlePoint {
            time_ms,
            open,
            high,
            low,
            close,
            volume,
            regime_label: RegimeLabel::None,
            indicator: None,
        }
    }

    pub fn get_type(&self) -> CandleType {
        if self.close >= self.open {
            CandleType::Bullish
        } else {
            CandleType::Bearish
        }
    }

    /// Returns the low and high of the candle body as a tuple
    pub fn body_range(&self) -> (f64, f64) {
        match self.get_type() {
            CandleType::Bullish => (self.open, self.close),
            CandleType::Bearish => (self.close, self.open),
        }
    }

    /// True when every numeric field is finite. NaN candles never enter a store.
    pub fn is_finite(&self) -> bool {
        self.open.is_finite()
            && self.high.is_finite()
            && self.low.is_finite()
            && self.close.is_finite()
            && self.volume.is_finite()
    }
}
