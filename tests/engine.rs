mod common;

use common::{at, candle_events, make_candle, make_candles, make_closed_trade};
use replay_scope::config::PLAYBACK;
use replay_scope::domain::{TradeStatus, TradeDirection};
use replay_scope::engine::slice_bounds;
use replay_scope::models::CandleSeries;
use replay_scope::engine::{
    AxisBounds, ChartEngine, ManualScheduler, NavigateOp, PlaybackState, RenderModel, StreamEvent,
    ViewMode, ViewportState, ViewportStateCache,
};

fn engine() -> ChartEngine {
    ChartEngine::new("AAA", Box::new(ManualScheduler::new()))
}

fn feed_candles(engine: &mut ChartEngine, n: usize) {
    for event in candle_events(n) {
        engine.append_event(event);
    }
}

fn chart_bounds(engine: &mut ChartEngine) -> AxisBounds {
    match engine.render_model() {
        RenderModel::Chart(frame) => frame.bounds,
        RenderModel::NoData => panic!("expected chart"),
    }
}

fn visible_range(engine: &mut ChartEngine) -> std::ops::Range<usize> {
    match engine.render_model() {
        RenderModel::Chart(frame) => frame.visible,
        RenderModel::NoData => panic!("expected chart"),
    }
}

#[test]
fn empty_engine_renders_no_data() {
    let mut engine = engine();
    assert!(matches!(engine.render_model(), RenderModel::NoData));
}

#[test]
fn streamed_candles_show_up_in_the_frame() {
    let mut engine = engine();
    feed_candles(&mut engine, 10);

    match engine.render_model() {
        RenderModel::Chart(frame) => {
            assert_eq!(frame.total_len, 10);
            assert_eq!(frame.visible, 0..10);
            assert_eq!(frame.mode, ViewMode::Manual);
            assert_eq!(frame.cursor, None);
            assert_eq!(frame.symbol, "AAA");
        }
        RenderModel::NoData => panic!("expected chart"),
    }
}

#[test]
fn window_of_two_over_three_candles() {
    let mut engine = engine();
    feed_candles(&mut engine, 3);

    engine.set_window_size(2);
    engine.navigate(NavigateOp::ToStart);
    assert_eq!(visible_range(&mut engine), 0..2);

    engine.navigate(NavigateOp::StepRight);
    assert_eq!(visible_range(&mut engine), 1..3);

    // Right edge: clamps, does not error.
    engine.navigate(NavigateOp::StepRight);
    assert_eq!(visible_range(&mut engine), 1..3);
}

#[test]
fn playback_reveals_one_candle_per_frame() {
    let mut engine = engine();
    feed_candles(&mut engine, 10);

    engine.play();
    assert_eq!(engine.playback_state(), PlaybackState::Playing);
    assert_eq!(visible_range(&mut engine), 0..1);

    engine.pump();
    assert_eq!(engine.cursor(), 1);
    assert_eq!(visible_range(&mut engine), 0..2);

    engine.pump();
    assert_eq!(visible_range(&mut engine), 0..3);
}

#[test]
fn playback_completes_at_the_end() {
    let mut engine = engine();
    feed_candles(&mut engine, 5);

    engine.play();
    for _ in 0..10 {
        engine.pump();
    }

    assert_eq!(engine.playback_state(), PlaybackState::Completed);
    assert_eq!(engine.cursor(), 4);
    assert_eq!(visible_range(&mut engine), 0..5);
}

#[test]
fn manual_interaction_pauses_playback() {
    let mut engine = engine();
    feed_candles(&mut engine, 50);

    engine.play();
    engine.pump();
    engine.pump();

    engine.navigate(NavigateOp::StepLeft);
    assert_eq!(engine.playback_state(), PlaybackState::Paused);
    assert_eq!(engine.mode(), ViewMode::Manual);
}

#[test]
fn changing_window_size_pauses_playback() {
    let mut engine = engine();
    feed_candles(&mut engine, 50);

    engine.play();
    engine.pump();
    engine.set_window_size(20);

    assert_eq!(engine.playback_state(), PlaybackState::Paused);
    assert_eq!(engine.window_size(), 20);
}

#[test]
fn replay_clears_stores_and_restarts() {
    let mut engine = engine();
    feed_candles(&mut engine, 20);
    engine.append_event(StreamEvent::Trade(make_closed_trade(2, 5, 1.0)));
    engine.play();
    engine.pump();
    engine.pump();

    engine.replay();
    assert_eq!(engine.candle_count(), 0);
    assert_eq!(engine.trade_count(), 0);
    assert_eq!(engine.cursor(), 0);
    assert_eq!(engine.playback_state(), PlaybackState::Playing);
    assert!(matches!(engine.render_model(), RenderModel::NoData));

    // The host re-feeds and playback proceeds from the top.
    feed_candles(&mut engine, 20);
    engine.pump();
    assert_eq!(engine.cursor(), 1);
}

#[test]
fn full_view_shows_everything_and_freezes_playback() {
    let mut engine = engine();
    feed_candles(&mut engine, 30);

    engine.play();
    engine.pump();
    engine.set_full_view(true);
    assert_eq!(engine.playback_state(), PlaybackState::Paused);

    // Play is a no-op while the full view is up.
    engine.play();
    assert_eq!(engine.playback_state(), PlaybackState::Paused);
    assert_eq!(visible_range(&mut engine), 0..30);

    engine.set_full_view(false);
    engine.play();
    assert_eq!(engine.playback_state(), PlaybackState::Playing);
}

#[test]
fn malformed_events_are_dropped_not_fatal() {
    let mut engine = engine();

    let mut nan_candle = make_candle(0, 100.0);
    nan_candle.close = f64::NAN;
    engine.append_event(StreamEvent::Candle(nan_candle));
    assert_eq!(engine.candle_count(), 0);
    assert_eq!(engine.dropped_events(), 1);

    feed_candles(&mut engine, 5);

    // Timestamp that does not advance.
    engine.append_event(StreamEvent::Candle(make_candle(4, 100.0)));
    assert_eq!(engine.candle_count(), 5);
    assert_eq!(engine.dropped_events(), 2);

    // Trade whose exit precedes its entry.
    let mut bad_trade = make_closed_trade(10, 12, 1.0);
    bad_trade.exit_time_ms = Some(at(8));
    engine.append_event(StreamEvent::Trade(bad_trade));
    assert_eq!(engine.trade_count(), 0);
    assert_eq!(engine.dropped_events(), 3);
    assert!(engine.last_drop_reason().is_some());

    // A trade claiming CLOSED without an exit is inconsistent too.
    let mut inconsistent = make_closed_trade(1, 2, 1.0);
    inconsistent.exit_time_ms = None;
    inconsistent.exit_price = None;
    assert_eq!(inconsistent.status, TradeStatus::Closed);
    engine.append_event(StreamEvent::Trade(inconsistent));
    assert_eq!(engine.dropped_events(), 4);
}

#[test]
fn playback_bounds_stay_put_while_the_window_slides() {
    let mut engine = engine();
    feed_candles(&mut engine, 200);

    engine.play();
    let early = chart_bounds(&mut engine);
    for _ in 0..50 {
        engine.pump();
    }
    let later = chart_bounds(&mut engine);

    assert_eq!(early, later, "dataset-level bounds must not follow the cursor");
}

#[test]
fn playback_bounds_extend_when_data_arrives() {
    let mut engine = engine();
    feed_candles(&mut engine, 50);
    engine.play();
    let before = chart_bounds(&mut engine);

    // A new high raises the dataset extent.
    let mut spike = make_candle(50, 400.0);
    spike.high = 500.0;
    engine.append_event(StreamEvent::Candle(spike));
    let after = chart_bounds(&mut engine);

    assert!(after.price_max > before.price_max);
}

#[test]
fn manual_bounds_follow_the_slice_until_zoom_is_frozen() {
    let mut engine = engine();
    feed_candles(&mut engine, 100);

    engine.set_window_size(20);
    engine.navigate(NavigateOp::ToStart);
    let at_start = chart_bounds(&mut engine);

    engine.navigate(NavigateOp::ToEnd);
    let at_end = chart_bounds(&mut engine);
    assert_ne!(at_start, at_end, "auto-zoom tracks the visible slice");

    // Freeze, move, bounds stay.
    engine.set_auto_zoom(false);
    engine.navigate(NavigateOp::ToStart);
    assert_eq!(chart_bounds(&mut engine), at_end);

    // Unfreeze, bounds follow again.
    engine.set_auto_zoom(true);
    assert_eq!(chart_bounds(&mut engine), at_start);
}

#[test]
fn freezing_zoom_before_first_render_uses_data_bounds() {
    let mut engine = engine();
    feed_candles(&mut engine, 50);
    engine.set_window_size(20);
    engine.navigate(NavigateOp::ToStart);

    // Freeze before anything was rendered: the first frame must capture
    // slice-derived bounds, not the fallback placeholder.
    engine.set_auto_zoom(false);
    let frozen = chart_bounds(&mut engine);
    assert_ne!(frozen, AxisBounds::default());

    let mut series = CandleSeries::new();
    for candle in make_candles(50) {
        series.append(candle).unwrap();
    }
    let expected = slice_bounds(&series, 0..20, PLAYBACK.price_pad_slice);
    assert_eq!(frozen, expected);

    // And it really is frozen from here on.
    engine.navigate(NavigateOp::ToEnd);
    assert_eq!(chart_bounds(&mut engine), frozen);
}

#[test]
fn timing_macro_passes_the_block_value_through() {
    let value = replay_scope::trace_time!("overlay pass", 10_000, { 40 + 2 });
    assert_eq!(value, 42);
}

#[test]
fn switching_symbols_preserves_viewport_state() {
    let mut engine = engine();
    feed_candles(&mut engine, 100);

    engine.set_window_size(60);
    engine.navigate(NavigateOp::ToEnd);
    engine.set_auto_zoom(false);
    let _ = engine.render_model();
    let saved = engine.current_viewport_state();

    engine.switch_symbol("BBB");
    assert_eq!(engine.candle_count(), 0);
    assert_eq!(engine.playback_state(), PlaybackState::Idle);
    assert!(engine.auto_zoom(), "fresh symbol starts with defaults");
    feed_candles(&mut engine, 40);
    let _ = engine.render_model();

    engine.switch_symbol("AAA");
    assert_eq!(engine.current_viewport_state(), saved);
    assert_eq!(engine.window_size(), 60);
    assert!(!engine.auto_zoom());

    // The store is empty until the host re-feeds; the restored window must
    // survive that transient and clamp only at slice time.
    assert!(matches!(engine.render_model(), RenderModel::NoData));
    feed_candles(&mut engine, 100);
    let visible = visible_range(&mut engine);
    assert_eq!(visible.len(), 60);
    assert_eq!(visible.end, 100);
}

#[test]
fn switching_to_the_same_symbol_is_a_no_op() {
    let mut engine = engine();
    feed_candles(&mut engine, 10);
    engine.switch_symbol("AAA");
    assert_eq!(engine.candle_count(), 10);
}

#[test]
fn exit_markers_only_render_inside_the_window() {
    let mut engine = engine();
    feed_candles(&mut engine, 100);
    engine.append_event(StreamEvent::Trade(make_closed_trade(10, 80, 2.0)));

    engine.set_window_size(20);
    engine.navigate(NavigateOp::ToStart);

    match engine.render_model() {
        RenderModel::Chart(frame) => {
            assert_eq!(frame.overlays.markers.len(), 1);
            assert_eq!(frame.overlays.markers[0].direction, TradeDirection::Long);
        }
        RenderModel::NoData => panic!("expected chart"),
    }

    engine.navigate(NavigateOp::ToEnd);
    match engine.render_model() {
        RenderModel::Chart(frame) => {
            assert_eq!(frame.overlays.markers.len(), 1);
            assert_eq!(frame.overlays.markers[0].time_ms, at(80));
        }
        RenderModel::NoData => panic!("expected chart"),
    }
}

// ============================================================================
// Viewport state cache
// ============================================================================

fn state(start: usize) -> ViewportState {
    ViewportState {
        start_index: start,
        window_size: 120,
        bounds: AxisBounds::default(),
        auto_zoom: true,
    }
}

#[test]
fn cache_evicts_least_recently_used() {
    let mut cache = ViewportStateCache::with_capacity(2);
    cache.insert("AAA", state(1));
    cache.insert("BBB", state(2));

    // Touch AAA so BBB becomes the eviction candidate.
    assert!(cache.get("AAA").is_some());
    cache.insert("CCC", state(3));

    assert_eq!(cache.len(), 2);
    assert!(cache.get("BBB").is_none());
    assert!(cache.get("AAA").is_some());
    assert!(cache.get("CCC").is_some());
}

#[test]
fn cache_update_does_not_evict() {
    let mut cache = ViewportStateCache::with_capacity(2);
    cache.insert("AAA", state(1));
    cache.insert("BBB", state(2));
    cache.insert("AAA", state(9));

    assert_eq!(cache.len(), 2);
    assert_eq!(cache.get("AAA").map(|s| s.start_index), Some(9));
    assert!(cache.get("BBB").is_some());
}
