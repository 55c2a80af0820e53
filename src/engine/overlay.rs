use eframe::egui::Color32;

use crate::config::plot::PLOT_CONFIG;
use crate::domain::{RegimeKind, RegimePeriod, TradeDirection, TradeRecord};

// ============================================================================
// Overlay descriptors: what the renderer draws on top of the candles
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
    Entry,
    Exit,
}

/// One annotation anchored to a (time, price) point.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeMarker {
    pub kind: MarkerKind,
    pub time_ms: i64,
    pub price: f64,
    pub direction: TradeDirection,
    pub label: String,
    pub color: Color32,
    /// Vertical offset from the price point, in pixels. Negative = below.
    pub y_offset_px: f32,
}

/// One full-vertical-extent translucent rectangle behind the candles.
#[derive(Debug, Clone, PartialEq)]
pub struct RegimeBand {
    pub start_time_ms: i64,
    pub end_time_ms: i64,
    pub kind: RegimeKind,
    pub color: Color32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverlaySet {
    pub markers: Vec<TradeMarker>,
    pub bands: Vec<RegimeBand>,
}

// ============================================================================
// Builder: pure function of (visible interval, full stores)
// ============================================================================

/// Derive the overlays visible in `[first_visible_ms, last_visible_ms]`.
///
/// Entry and exit markers of one trade filter independently, so either end
/// can enter or leave the view on its own as the window slides. Regime
/// bands use interval overlap. Output preserves store insertion order and
/// performs no deduplication.
pub fn build_overlays(
    first_visible_ms: i64,
    last_visible_ms: i64,
    trades: &[TradeRecord],
    regimes: &[RegimePeriod],
) -> OverlaySet {
    let mut markers = Vec::new();

    for trade in trades {
        let in_view = |t: i64| t >= first_visible_ms && t <= last_visible_ms;

        if in_view(trade.entry_time_ms) {
            markers.push(entry_marker(trade));
        }

        if let (Some(exit_ms), Some(exit_price)) = (trade.exit_time_ms, trade.exit_price) {
            if in_view(exit_ms) {
                markers.push(exit_marker(trade, exit_ms, exit_price));
            }
        }
    }

    let bands = regimes
        .iter()
        .filter(|p| p.overlaps(first_visible_ms, last_visible_ms))
        .map(|p| RegimeBand {
            start_time_ms: p.start_time_ms,
            end_time_ms: p.end_time_ms,
            kind: p.kind,
            color: band_color(p.kind),
        })
        .collect();

    OverlaySet { markers, bands }
}

fn entry_marker(trade: &TradeRecord) -> TradeMarker {
    let color = match trade.direction {
        TradeDirection::Long => PLOT_CONFIG.color_long,
        TradeDirection::Short => PLOT_CONFIG.color_short,
    };

    TradeMarker {
        kind: MarkerKind::Entry,
        time_ms: trade.entry_time_ms,
        price: trade.entry_price,
        direction: trade.direction,
        label: format!("{}", trade.direction),
        color,
        y_offset_px: -PLOT_CONFIG.marker_offset_px,
    }
}

fn exit_marker(trade: &TradeRecord, exit_ms: i64, exit_price: f64) -> TradeMarker {
    let forced = trade.exit_reason.map(|r| r.is_forced()).unwrap_or(false);

    let color = if forced {
        PLOT_CONFIG.color_forced_exit
    } else if trade.pnl_pct.unwrap_or(0.0) >= 0.0 {
        PLOT_CONFIG.color_profit
    } else {
        PLOT_CONFIG.color_loss
    };

    let mut label = match trade.exit_reason {
        Some(reason) => format!("{}", reason),
        None => "Exit".to_string(),
    };
    if let Some(pnl) = trade.pnl_pct {
        label = format!("{} {:+.2}%", label, pnl);
    }

    TradeMarker {
        kind: MarkerKind::Exit,
        time_ms: exit_ms,
        price: exit_price,
        direction: trade.direction,
        label,
        color,
        y_offset_px: PLOT_CONFIG.marker_offset_px,
    }
}

fn band_color(kind: RegimeKind) -> Color32 {
    let base = match kind {
        RegimeKind::Momentum => PLOT_CONFIG.regime_momentum_color,
        RegimeKind::Consolidation => PLOT_CONFIG.regime_consolidation_color,
    };
    base.linear_multiply(PLOT_CONFIG.band_fill_opacity_pct)
}
