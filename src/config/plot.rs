//! Plot visualization configuration

use eframe::egui::Color32;

pub struct PlotConfig {
    // --- CANDLESTICKS ---
    pub candle_bullish_color: Color32,
    pub candle_bearish_color: Color32,
    pub candle_width_pct: f64,  // 0.0 to 1.0 (relative to one index step)
    pub candle_wick_width: f32, // Pixels

    // --- TRADE MARKERS ---
    pub color_long: Color32,
    pub color_short: Color32,
    pub color_profit: Color32,
    pub color_loss: Color32,
    /// Exits that were forced (timeout, end of replay) rather than signal-driven.
    pub color_forced_exit: Color32,
    /// Vertical offset between a marker and its price point, in pixels.
    pub marker_offset_px: f32,

    // --- REGIME BANDS ---
    pub regime_momentum_color: Color32,
    pub regime_consolidation_color: Color32,
    /// Opacity applied to regime band fills (0.0 = invisible, 1.0 = opaque).
    pub band_fill_opacity_pct: f32,

    // --- MISC CHART ---
    pub cursor_line_color: Color32,
    pub cursor_line_width: f32,
    pub volume_bar_color: Color32,
    /// Share of the plot height reserved for the volume strip at the bottom.
    pub volume_strip_height_pct: f64,
}

pub static PLOT_CONFIG: PlotConfig = PlotConfig {
    candle_bullish_color: Color32::from_rgb(0, 180, 120),
    candle_bearish_color: Color32::from_rgb(220, 60, 70),
    candle_width_pct: 0.7,
    candle_wick_width: 1.0,

    color_long: Color32::from_rgb(80, 200, 120),
    color_short: Color32::from_rgb(240, 100, 100),
    color_profit: Color32::from_rgb(110, 220, 130),
    color_loss: Color32::from_rgb(230, 90, 90),
    color_forced_exit: Color32::from_rgb(250, 170, 50),
    marker_offset_px: 14.0,

    regime_momentum_color: Color32::from_rgb(70, 130, 220),
    regime_consolidation_color: Color32::from_rgb(180, 140, 60),
    band_fill_opacity_pct: 0.15,

    cursor_line_color: Color32::from_rgb(230, 230, 230),
    cursor_line_width: 1.5,
    volume_bar_color: Color32::from_rgb(90, 100, 130),
    volume_strip_height_pct: 0.15,
};
