#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use replay_scope::domain::{
    CandlePoint, ExitReason, RegimeKind, RegimePeriod, TradeDirection, TradeRecord, TradeStatus,
};
use replay_scope::engine::{FrameHandle, FrameScheduler, ManualScheduler, StreamEvent};

pub const T0: i64 = 1_700_000_000_000;
pub const STEP_MS: i64 = 60_000;

/// Timestamp of candle `i` in the test grid.
pub fn at(i: usize) -> i64 {
    T0 + i as i64 * STEP_MS
}

pub fn make_candle(i: usize, base: f64) -> CandlePoint {
    CandlePoint::new(at(i), base, base + 2.0, base - 1.0, base + 1.0, 100.0)
}

pub fn make_candles(n: usize) -> Vec<CandlePoint> {
    (0..n).map(|i| make_candle(i, 100.0 + i as f64)).collect()
}

pub fn candle_events(n: usize) -> Vec<StreamEvent> {
    make_candles(n).into_iter().map(StreamEvent::Candle).collect()
}

pub fn make_closed_trade(entry_i: usize, exit_i: usize, pnl_pct: f64) -> TradeRecord {
    TradeRecord {
        entry_time_ms: at(entry_i),
        entry_price: 100.0,
        direction: TradeDirection::Long,
        exit_time_ms: Some(at(exit_i)),
        exit_price: Some(100.0 * (1.0 + pnl_pct / 100.0)),
        pnl_pct: Some(pnl_pct),
        status: TradeStatus::Closed,
        exit_reason: Some(if pnl_pct >= 0.0 {
            ExitReason::TargetHit
        } else {
            ExitReason::StopHit
        }),
    }
}

pub fn make_open_trade(entry_i: usize) -> TradeRecord {
    TradeRecord {
        entry_time_ms: at(entry_i),
        entry_price: 100.0,
        direction: TradeDirection::Short,
        exit_time_ms: None,
        exit_price: None,
        pnl_pct: None,
        status: TradeStatus::Open,
        exit_reason: None,
    }
}

pub fn make_regime(start_i: usize, end_i: usize, kind: RegimeKind) -> RegimePeriod {
    RegimePeriod {
        start_time_ms: at(start_i),
        end_time_ms: at(end_i),
        kind,
        start_price: None,
        end_price: None,
    }
}

// ============================================================================
// Scheduler instrumentation
// ============================================================================

#[derive(Debug, Default)]
pub struct SchedStats {
    pub scheduled: usize,
    pub cancelled: usize,
    /// Times `schedule` was called while a frame was already armed without
    /// an intervening cancel or delivery.
    pub armed_while_armed: usize,
}

/// Wraps `ManualScheduler` and records scheduling behavior through a shared
/// stats handle the test keeps after the scheduler moves into the controller.
pub struct CountingScheduler {
    inner: ManualScheduler,
    shadow: Option<FrameHandle>,
    stats: Rc<RefCell<SchedStats>>,
}

impl CountingScheduler {
    pub fn new() -> (Self, Rc<RefCell<SchedStats>>) {
        let stats = Rc::new(RefCell::new(SchedStats::default()));
        let scheduler = Self {
            inner: ManualScheduler::new(),
            shadow: None,
            stats: Rc::clone(&stats),
        };
        (scheduler, stats)
    }
}

impl FrameScheduler for CountingScheduler {
    fn schedule(&mut self) -> FrameHandle {
        let mut stats = self.stats.borrow_mut();
        stats.scheduled += 1;
        if self.shadow.is_some() {
            stats.armed_while_armed += 1;
        }
        drop(stats);

        let handle = self.inner.schedule();
        self.shadow = Some(handle);
        handle
    }

    fn cancel(&mut self, handle: FrameHandle) {
        if self.shadow == Some(handle) {
            self.shadow = None;
            self.stats.borrow_mut().cancelled += 1;
        }
        self.inner.cancel(handle);
    }

    fn due(&mut self) -> Option<FrameHandle> {
        let due = self.inner.due();
        if due.is_some() {
            self.shadow = None;
        }
        due
    }
}
