mod stores;
mod timeseries;

pub use stores::{RegimeLog, TradeLog};
pub use timeseries::CandleSeries;
