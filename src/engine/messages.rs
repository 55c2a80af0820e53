use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

use crate::domain::{CandlePoint, RegimePeriod, TradeRecord};

/// The input boundary: one typed event from the upstream detector/backtest.
/// The union is closed; unknown kinds fail deserialization at the feed and
/// never reach the stores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "payload", rename_all = "camelCase")]
pub enum StreamEvent {
    Candle(CandlePoint),
    Trade(TradeRecord),
    RegimePeriod(RegimePeriod),
}

/// Manual-mode navigation operations. All of them clamp; none of them error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum NavigateOp {
    #[strum(serialize = "◀ Step")]
    StepLeft,
    #[strum(serialize = "Step ▶")]
    StepRight,
    #[strum(serialize = "◀◀ Page")]
    JumpLeft,
    #[strum(serialize = "Page ▶▶")]
    JumpRight,
    #[strum(serialize = "|◀ Start")]
    ToStart,
    #[strum(serialize = "End ▶|")]
    ToEnd,
}
