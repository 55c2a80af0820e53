use eframe::egui::{Color32, RichText, Stroke, Ui, Vec2b};
use egui_plot::{
    Axis, AxisHints, Line, MarkerShape, Plot, PlotPoint, PlotPoints, Points, Polygon, Text, VLine,
};

use crate::config::plot::PLOT_CONFIG;
use crate::domain::{CandleType, TradeDirection};
use crate::engine::{ChartFrame, MarkerKind, OverlaySet};
use crate::utils::epoch_ms_to_date_string;

/// Renders one `ChartFrame`. The x-axis is the candle index; the axis
/// formatter maps indices back to timestamps so the labels read as dates.
/// All interaction is disabled: the engine owns the window, the plot just
/// draws it.
pub struct PlotView;

impl PlotView {
    pub fn show(ui: &mut Ui, frame: &ChartFrame) {
        let visible = frame.visible.clone();
        let bounds = frame.bounds;

        let timestamps = frame.candles.timestamps.clone();
        let time_axis = AxisHints::new(Axis::X).label("Time").formatter(
            move |mark, _range| match timestamps.get(mark.value.round().max(0.0) as usize) {
                Some(&ts) => epoch_ms_to_date_string(ts),
                None => String::new(),
            },
        );

        Plot::new("chart_plot")
            .custom_x_axes(vec![time_axis])
            .label_formatter(|_, _| String::new())
            .allow_double_click_reset(false)
            .allow_scroll(false)
            .allow_drag(Vec2b { x: false, y: false })
            .allow_zoom(Vec2b { x: false, y: false })
            .show(ui, |plot_ui| {
                plot_ui.set_plot_bounds_x(visible.start as f64 - 0.5..=visible.end as f64 - 0.5);
                plot_ui.set_plot_bounds_y(bounds.price_min..=bounds.price_max);

                draw_regime_bands(plot_ui, frame);
                draw_volume_strip(plot_ui, frame);
                draw_candles(plot_ui, frame);
                draw_indicator(plot_ui, frame);
                draw_markers(plot_ui, frame);

                if let Some(cursor) = frame.cursor {
                    plot_ui.vline(
                        VLine::new("", cursor as f64)
                            .color(PLOT_CONFIG.cursor_line_color)
                            .width(PLOT_CONFIG.cursor_line_width),
                    );
                }
            });
    }
}

// ============================================================================
// Layers, back to front
// ============================================================================

fn draw_regime_bands(plot_ui: &mut egui_plot::PlotUi, frame: &ChartFrame) {
    let series = frame.candles;
    let (y_min, y_max) = (frame.bounds.price_min, frame.bounds.price_max);

    for band in &frame.overlays.bands {
        // Bands arrive in time coordinates; map them onto the index axis.
        let x_start = series
            .index_at_or_before(band.start_time_ms)
            .unwrap_or(frame.visible.start) as f64
            - 0.5;
        let x_end = series
            .index_at_or_before(band.end_time_ms)
            .unwrap_or(frame.visible.start) as f64
            + 0.5;

        let pts = vec![
            [x_start, y_min],
            [x_end, y_min],
            [x_end, y_max],
            [x_start, y_max],
        ];
        plot_ui.polygon(
            Polygon::new("", PlotPoints::new(pts))
                .fill_color(band.color)
                .stroke(Stroke::NONE),
        );
    }
}

fn draw_volume_strip(plot_ui: &mut egui_plot::PlotUi, frame: &ChartFrame) {
    let series = frame.candles;
    let bounds = frame.bounds;
    if bounds.volume_max <= 0.0 {
        return;
    }

    let strip_height =
        (bounds.price_max - bounds.price_min) * PLOT_CONFIG.volume_strip_height_pct;
    let half_w = PLOT_CONFIG.candle_width_pct / 2.0;

    for idx in frame.visible.clone() {
        let volume = series.volumes[idx];
        let bar_top = bounds.price_min + (volume / bounds.volume_max) * strip_height;
        if bar_top <= bounds.price_min {
            continue;
        }

        let x = idx as f64;
        let pts = vec![
            [x - half_w, bounds.price_min],
            [x + half_w, bounds.price_min],
            [x + half_w, bar_top],
            [x - half_w, bar_top],
        ];
        plot_ui.polygon(
            Polygon::new("", PlotPoints::new(pts))
                .fill_color(PLOT_CONFIG.volume_bar_color.linear_multiply(0.6))
                .stroke(Stroke::NONE),
        );
    }
}

fn draw_candles(plot_ui: &mut egui_plot::PlotUi, frame: &ChartFrame) {
    let series = frame.candles;

    for idx in frame.visible.clone() {
        let x = idx as f64;
        let candle = series.get_candle(idx);

        let color = match candle.get_type() {
            CandleType::Bullish => PLOT_CONFIG.candle_bullish_color,
            CandleType::Bearish => PLOT_CONFIG.candle_bearish_color,
        };

        if candle.high > candle.low {
            draw_wick_line(plot_ui, x, candle.high, candle.low, color);
        }

        let (body_bot, body_top_raw) = candle.body_range();
        // Doji check
        let body_top = if (body_top_raw - body_bot).abs() < f64::EPSILON {
            body_bot * 1.0001
        } else {
            body_top_raw
        };
        draw_body_rect(plot_ui, x, body_top, body_bot, color);
    }
}

fn draw_indicator(plot_ui: &mut egui_plot::PlotUi, frame: &ChartFrame) {
    let series = frame.candles;

    let points: Vec<[f64; 2]> = frame
        .visible
        .clone()
        .filter_map(|idx| series.indicators[idx].map(|v| [idx as f64, v]))
        .collect();

    if points.len() >= 2 {
        plot_ui.line(
            Line::new("", PlotPoints::new(points))
                .color(Color32::from_gray(170))
                .width(1.0),
        );
    }
}

fn draw_markers(plot_ui: &mut egui_plot::PlotUi, frame: &ChartFrame) {
    let series = frame.candles;
    let OverlaySet { markers, .. } = &frame.overlays;

    // Pixel offsets convert to value units through the current plot height.
    let plot_height_px = plot_ui.transform().frame().height() as f64;
    let value_per_px = if plot_height_px > 0.0 {
        (frame.bounds.price_max - frame.bounds.price_min) / plot_height_px
    } else {
        0.0
    };

    for marker in markers {
        let Some(idx) = series.index_at_or_before(marker.time_ms) else {
            continue;
        };
        let x = idx as f64;
        let label_y = marker.price + marker.y_offset_px as f64 * value_per_px;

        let shape = match (marker.kind, marker.direction) {
            (MarkerKind::Entry, TradeDirection::Long) => MarkerShape::Up,
            (MarkerKind::Entry, TradeDirection::Short) => MarkerShape::Down,
            (MarkerKind::Exit, _) => MarkerShape::Diamond,
        };

        plot_ui.points(
            Points::new("", PlotPoints::new(vec![[x, marker.price]]))
                .shape(shape)
                .radius(5.0)
                .color(marker.color),
        );
        plot_ui.text(Text::new(
            "",
            PlotPoint::new(x, label_y),
            RichText::new(marker.label.clone())
                .color(marker.color)
                .strong(),
        ));
    }
}

#[inline]
fn draw_wick_line(ui: &mut egui_plot::PlotUi, x: f64, top: f64, bottom: f64, color: Color32) {
    ui.line(
        Line::new("", PlotPoints::new(vec![[x, bottom], [x, top]]))
            .color(color)
            .width(PLOT_CONFIG.candle_wick_width),
    );
}

#[inline]
fn draw_body_rect(ui: &mut egui_plot::PlotUi, x: f64, top: f64, bottom: f64, color: Color32) {
    let half_w = PLOT_CONFIG.candle_width_pct / 2.0;
    let pts = vec![
        [x - half_w, bottom],
        [x + half_w, bottom],
        [x + half_w, top],
        [x - half_w, top],
    ];
    ui.polygon(
        Polygon::new("", PlotPoints::new(pts))
            .fill_color(color)
            .stroke(Stroke::NONE),
    );
}
