use std::fmt;

use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeDirection {
    Long,
    Short,
}

impl fmt::Display for TradeDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeDirection::Long => write!(f, "LONG"),
            TradeDirection::Short => write!(f, "SHORT"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TradeStatus {
    Open,
    Closed,
}

/// Why a closed trade ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExitReason {
    TargetHit,
    StopHit,
    Timeout,
    EndOfReplay,
}

impl ExitReason {
    /// Forced closes get a distinguished marker; target/stop are signal-driven.
    pub fn is_forced(&self) -> bool {
        matches!(self, ExitReason::Timeout | ExitReason::EndOfReplay)
    }
}

impl fmt::Display for ExitReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitReason::TargetHit => write!(f, "Target"),
            ExitReason::StopHit => write!(f, "Stop"),
            ExitReason::Timeout => write!(f, "Timeout"),
            ExitReason::EndOfReplay => write!(f, "Final Close"),
        }
    }
}

/// One entry (and optionally its exit) delivered by the backtest stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    pub entry_time_ms: i64,
    pub entry_price: f64,
    pub direction: TradeDirection,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exit_time_ms: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exit_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pnl_pct: Option<f64>,

    pub status: TradeStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exit_reason: Option<ExitReason>,
}

impl TradeRecord {
    /// Structural invariants: a present exit implies `Closed` and a
    /// non-inverted time range; an absent exit implies `Open`.
    pub fn validate(&self) -> Result<()> {
        match self.exit_time_ms {
            Some(exit_ms) => {
                if exit_ms < self.entry_time_ms {
                    return Err(anyhow!(
                        "trade exit {} precedes entry {}",
                        exit_ms,
                        self.entry_time_ms
                    ));
                }
                if self.status != TradeStatus::Closed {
                    return Err(anyhow!("trade has an exit time but status is OPEN"));
                }
            }
            None => {
                if self.status != TradeStatus::Open {
                    return Err(anyhow!("trade has no exit time but status is CLOSED"));
                }
            }
        }
        Ok(())
    }
}
