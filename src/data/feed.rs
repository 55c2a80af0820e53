use std::collections::hash_map::DefaultHasher;
use std::fs;
use std::hash::{Hash, Hasher};
use std::path::Path;

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::domain::{
    CandlePoint, ExitReason, RegimeKind, RegimeLabel, RegimePeriod, TradeDirection, TradeRecord,
    TradeStatus,
};
use crate::engine::StreamEvent;
use crate::utils::{AppInstant, TimeUtils};

/// Default candle spacing for generated sessions.
pub const DEFAULT_INTERVAL_MS: i64 = TimeUtils::MS_IN_15_MIN;

/// How often the feed releases a batch, and how many events per batch.
/// Tuned so a 2000-candle session streams in well under a minute while
/// still looking live.
const EMIT_INTERVAL_MS: u128 = 30;
const EMIT_BATCH: usize = 8;

/// An event source for one symbol. Both variants hold a fully ordered
/// script and trickle it out so the chart fills in like a live stream.
pub enum Feed {
    File(FileFeed),
    Synthetic(SyntheticFeed),
}

impl Feed {
    pub fn poll(&mut self) -> Vec<StreamEvent> {
        match self {
            Feed::File(feed) => feed.script.poll(),
            Feed::Synthetic(feed) => feed.script.poll(),
        }
    }

    /// Restart the stream from the beginning (used by replay).
    pub fn rewind(&mut self) {
        match self {
            Feed::File(feed) => feed.script.rewind(),
            Feed::Synthetic(feed) => feed.script.rewind(),
        }
    }

    /// Hand over everything left in the script at once, bypassing pacing.
    /// Used when a symbol switch restores a session that was already
    /// streamed in full.
    pub fn drain(&mut self) -> Vec<StreamEvent> {
        match self {
            Feed::File(feed) => feed.script.drain(),
            Feed::Synthetic(feed) => feed.script.drain(),
        }
    }

    pub fn is_exhausted(&self) -> bool {
        match self {
            Feed::File(feed) => feed.script.is_exhausted(),
            Feed::Synthetic(feed) => feed.script.is_exhausted(),
        }
    }
}

/// Ordered event list plus a pacing cursor.
struct EventScript {
    events: Vec<StreamEvent>,
    cursor: usize,
    last_emit: Option<AppInstant>,
}

impl EventScript {
    fn new(events: Vec<StreamEvent>) -> Self {
        Self {
            events,
            cursor: 0,
            last_emit: None,
        }
    }

    fn poll(&mut self) -> Vec<StreamEvent> {
        if self.cursor >= self.events.len() {
            return Vec::new();
        }

        if let Some(last) = &self.last_emit {
            if last.elapsed().as_millis() < EMIT_INTERVAL_MS {
                return Vec::new();
            }
        }
        self.last_emit = Some(AppInstant::now());

        let end = (self.cursor + EMIT_BATCH).min(self.events.len());
        let batch = self.events[self.cursor..end].to_vec();
        self.cursor = end;
        batch
    }

    fn rewind(&mut self) {
        self.cursor = 0;
        self.last_emit = None;
    }

    fn drain(&mut self) -> Vec<StreamEvent> {
        let rest = self.events[self.cursor..].to_vec();
        self.cursor = self.events.len();
        rest
    }

    fn is_exhausted(&self) -> bool {
        self.cursor >= self.events.len()
    }
}

// ============================================================================
// File-backed feed: JSON lines, one StreamEvent per line
// ============================================================================

pub struct FileFeed {
    script: EventScript,
    pub skipped_lines: usize,
}

impl FileFeed {
    pub fn open(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading event file {}", path.display()))?;

        let mut events = Vec::new();
        let mut skipped_lines = 0;

        for (line_no, line) in raw.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match serde_json::from_str::<StreamEvent>(line) {
                Ok(event) => events.push(event),
                Err(e) => {
                    skipped_lines += 1;
                    log::warn!("{}:{}: skipping bad event: {}", path.display(), line_no + 1, e);
                }
            }
        }

        log::info!(
            "loaded {} events from {} ({} lines skipped)",
            events.len(),
            path.display(),
            skipped_lines
        );

        Ok(Self {
            script: EventScript::new(events),
            skipped_lines,
        })
    }
}

// ============================================================================
// Synthetic feed: deterministic per-symbol random walk with trades/regimes
// ============================================================================

pub struct SyntheticFeed {
    script: EventScript,
}

impl SyntheticFeed {
    pub fn new(symbol: &str, candle_count: usize, interval_ms: i64) -> Self {
        let mut rng = StdRng::seed_from_u64(symbol_seed(symbol));
        let events = generate_session(&mut rng, candle_count, interval_ms);
        Self {
            script: EventScript::new(events),
        }
    }
}

/// Same symbol, same script. Switching away and back replays identical data.
fn symbol_seed(symbol: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    symbol.hash(&mut hasher);
    hasher.finish()
}

fn generate_session(rng: &mut StdRng, candle_count: usize, interval_ms: i64) -> Vec<StreamEvent> {
    if candle_count == 0 {
        return Vec::new();
    }

    let start_ms = 1_700_000_000_000;
    let mut price: f64 = rng.random_range(20.0..500.0);
    let base_volume = rng.random_range(1_000.0..50_000.0);

    let mut candles: Vec<CandlePoint> = Vec::with_capacity(candle_count);
    // Extra events keyed by the candle index after which they are emitted.
    let mut extras: Vec<Vec<StreamEvent>> = vec![Vec::new(); candle_count];

    // Regime schedule: alternating momentum/consolidation stretches with
    // quiet gaps between them.
    let mut regime_at = vec![None::<RegimeKind>; candle_count];
    let mut idx = rng.random_range(5..20);
    let mut kind = RegimeKind::Momentum;
    while idx < candle_count {
        let span = rng.random_range(10..25).min(candle_count - idx);
        for slot in &mut regime_at[idx..idx + span] {
            *slot = Some(kind);
        }
        idx += span + rng.random_range(8..30);
        kind = match kind {
            RegimeKind::Momentum => RegimeKind::Consolidation,
            RegimeKind::Consolidation => RegimeKind::Momentum,
        };
    }

    let mut open_regime: Option<(usize, RegimeKind, f64)> = None;
    let mut position: Option<(usize, f64, TradeDirection, usize)> = None;

    for i in 0..candle_count {
        let time_ms = start_ms + i as i64 * interval_ms;
        let regime = regime_at[i];

        // Momentum stretches trend, consolidation chops, gaps drift.
        let drift = match regime {
            Some(RegimeKind::Momentum) => price * 0.0015,
            Some(RegimeKind::Consolidation) => 0.0,
            None => price * rng.random_range(-0.0005..0.0005),
        };
        let noise = price * rng.random_range(-0.004..0.004);

        let open = price;
        let close = (open + drift + noise).max(0.01);
        let wick = price * rng.random_range(0.0..0.003);
        let high = open.max(close) + wick;
        let low = (open.min(close) - wick).max(0.005);
        let volume = base_volume * rng.random_range(0.4..1.8);
        price = close;

        let label = match (regime, position.is_some()) {
            (_, true) => RegimeLabel::InPosition,
            (Some(RegimeKind::Momentum), _) => RegimeLabel::Detected,
            (Some(RegimeKind::Consolidation), _) => RegimeLabel::Consolidation,
            (None, _) => RegimeLabel::None,
        };

        let mut candle = CandlePoint::new(time_ms, open, high, low, close, volume);
        candle.regime_label = label;
        if i >= 20 {
            let sum: f64 = candles[i - 20..i].iter().map(|c| c.close).sum();
            candle.indicator = Some(sum / 20.0);
        }
        candles.push(candle);

        // Regime period bookkeeping: emit the period event when it ends.
        match (open_regime, regime) {
            (None, Some(k)) => open_regime = Some((i, k, open)),
            (Some((start_idx, k, start_price)), current) if current != Some(k) => {
                let period = RegimePeriod {
                    start_time_ms: start_ms + start_idx as i64 * interval_ms,
                    end_time_ms: start_ms + (i - 1) as i64 * interval_ms,
                    kind: k,
                    start_price: Some(start_price),
                    end_price: Some(close),
                };
                extras[i].push(StreamEvent::RegimePeriod(period));
                open_regime = current.map(|nk| (i, nk, open));
            }
            _ => {}
        }

        // Enter shortly after a momentum regime starts, exit on target,
        // stop or timeout.
        match position {
            None => {
                if regime == Some(RegimeKind::Momentum) && rng.random_range(0.0..1.0) < 0.25 {
                    let direction = if drift >= 0.0 {
                        TradeDirection::Long
                    } else {
                        TradeDirection::Short
                    };
                    let hold = rng.random_range(5..15);
                    position = Some((i, close, direction, hold));
                }
            }
            Some((entry_idx, entry_price, direction, hold)) => {
                let signed_move = match direction {
                    TradeDirection::Long => (close - entry_price) / entry_price,
                    TradeDirection::Short => (entry_price - close) / entry_price,
                };
                let pnl_pct = signed_move * 100.0;
                let timed_out = i - entry_idx >= hold;

                let reason = if pnl_pct >= 1.0 {
                    Some(ExitReason::TargetHit)
                } else if pnl_pct <= -1.0 {
                    Some(ExitReason::StopHit)
                } else if timed_out {
                    Some(ExitReason::Timeout)
                } else if i == candle_count - 1 {
                    Some(ExitReason::EndOfReplay)
                } else {
                    None
                };

                if let Some(reason) = reason {
                    let trade = TradeRecord {
                        entry_time_ms: start_ms + entry_idx as i64 * interval_ms,
                        entry_price,
                        direction,
                        exit_time_ms: Some(time_ms),
                        exit_price: Some(close),
                        pnl_pct: Some(pnl_pct),
                        status: TradeStatus::Closed,
                        exit_reason: Some(reason),
                    };
                    extras[i].push(StreamEvent::Trade(trade));
                    position = None;
                }
            }
        }
    }

    // A regime still open at the end closes at the last candle.
    if let Some((start_idx, k, start_price)) = open_regime {
        let period = RegimePeriod {
            start_time_ms: start_ms + start_idx as i64 * interval_ms,
            end_time_ms: start_ms + (candle_count - 1) as i64 * interval_ms,
            kind: k,
            start_price: Some(start_price),
            end_price: Some(price),
        };
        extras[candle_count - 1].push(StreamEvent::RegimePeriod(period));
    }

    // A position still open at the end streams as a dangling OPEN trade.
    if let Some((entry_idx, entry_price, direction, _)) = position {
        let trade = TradeRecord {
            entry_time_ms: start_ms + entry_idx as i64 * interval_ms,
            entry_price,
            direction,
            exit_time_ms: None,
            exit_price: None,
            pnl_pct: None,
            status: TradeStatus::Open,
            exit_reason: None,
        };
        extras[candle_count - 1].push(StreamEvent::Trade(trade));
    }

    let mut events = Vec::with_capacity(candle_count + candle_count / 8);
    for (i, candle) in candles.into_iter().enumerate() {
        events.push(StreamEvent::Candle(candle));
        events.append(&mut extras[i]);
    }

    #[cfg(debug_assertions)]
    log::info!(
        "synthetic session: {} events over {}",
        events.len(),
        TimeUtils::interval_to_string(interval_ms)
    );

    events
}
