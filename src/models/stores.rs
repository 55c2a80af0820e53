use anyhow::Result;

use crate::domain::{RegimePeriod, TradeRecord};

// ============================================================================
// Append-only logs for the trade / regime halves of the event stream
// ============================================================================

/// Ordered, append-only list of trade records. Insertion order is the
/// rendering order; records are assumed duplicate-free by the producer.
#[derive(Debug, Clone, Default)]
pub struct TradeLog {
    records: Vec<TradeRecord>,
}

impl TradeLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, record: TradeRecord) -> Result<()> {
        record.validate()?;
        self.records.push(record);
        Ok(())
    }

    pub fn all(&self) -> &[TradeRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }
}

/// Ordered, append-only list of labeled market-regime periods.
#[derive(Debug, Clone, Default)]
pub struct RegimeLog {
    periods: Vec<RegimePeriod>,
}

impl RegimeLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, period: RegimePeriod) -> Result<()> {
        period.validate()?;
        self.periods.push(period);
        Ok(())
    }

    pub fn all(&self) -> &[RegimePeriod] {
        &self.periods
    }

    pub fn len(&self) -> usize {
        self.periods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    pub fn clear(&mut self) {
        self.periods.clear();
    }
}
