mod candle;
mod regime;
mod trade;

pub use candle::{CandlePoint, CandleType, RegimeLabel};
pub use regime::{RegimeKind, RegimePeriod};
pub use trade::{ExitReason, TradeDirection, TradeRecord, TradeStatus};
