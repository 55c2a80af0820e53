use std::collections::HashMap;
use std::time::Duration;

use eframe::egui::{CentralPanel, ComboBox, Context, RichText, TopBottomPanel};
use strum::IntoEnumIterator;

use crate::Cli;
use crate::config::PLAYBACK;
use crate::data::{DEFAULT_INTERVAL_MS, Feed, FileFeed, SyntheticFeed};
use crate::engine::{
    ChartEngine, FrameHandle, FrameScheduler, ManualScheduler, NavigateOp, PlaybackState,
    RenderModel,
};
use crate::ui::plot_view::PlotView;

const SYNTHETIC_CANDLES: usize = 2_000;

/// Frame scheduler bound to the egui repaint loop: arming a frame requests
/// a repaint, and the armed handle becomes due on the next `update`.
struct RepaintScheduler {
    inner: ManualScheduler,
    ctx: Context,
}

impl FrameScheduler for RepaintScheduler {
    fn schedule(&mut self) -> FrameHandle {
        self.ctx.request_repaint();
        self.inner.schedule()
    }

    fn cancel(&mut self, handle: FrameHandle) {
        self.inner.cancel(handle);
    }

    fn due(&mut self) -> Option<FrameHandle> {
        self.inner.due()
    }
}

pub struct ReplayApp {
    engine: ChartEngine,
    feeds: HashMap<String, Feed>,
    symbols: Vec<String>,
}

impl ReplayApp {
    pub fn new(cc: &eframe::CreationContext<'_>, args: Cli) -> Self {
        let interval_ms = args.interval_ms.unwrap_or(DEFAULT_INTERVAL_MS);

        let mut symbols = args.symbols.clone();
        let mut feeds: HashMap<String, Feed> = symbols
            .iter()
            .map(|sym| {
                let feed = SyntheticFeed::new(sym, SYNTHETIC_CANDLES, interval_ms);
                (sym.clone(), Feed::Synthetic(feed))
            })
            .collect();

        // An event file becomes one extra symbol named after the file.
        if let Some(path) = &args.events {
            match FileFeed::open(path) {
                Ok(feed) => {
                    let name = path
                        .file_stem()
                        .map(|s| s.to_string_lossy().into_owned())
                        .unwrap_or_else(|| "FILE".to_string());
                    symbols.insert(0, name.clone());
                    feeds.insert(name, Feed::File(feed));
                }
                Err(e) => log::error!("failed to load event file: {:#}", e),
            }
        }

        let scheduler = RepaintScheduler {
            inner: ManualScheduler::new(),
            ctx: cc.egui_ctx.clone(),
        };
        let first = symbols.first().cloned().unwrap_or_else(|| "BTCUSDT".into());
        let engine = ChartEngine::new(first, Box::new(scheduler));

        Self {
            engine,
            feeds,
            symbols,
        }
    }

    fn poll_feed(&mut self, ctx: &Context) {
        let Some(feed) = self.feeds.get_mut(self.engine.symbol()) else {
            return;
        };

        for event in feed.poll() {
            self.engine.append_event(event);
        }

        // Keep frames coming while the stream is still trickling in.
        if !feed.is_exhausted() {
            ctx.request_repaint_after(Duration::from_millis(30));
        }
    }

    fn controls(&mut self, ctx: &Context) {
        TopBottomPanel::top("controls").show(ctx, |ui| {
            ui.horizontal(|ui| {
                match self.engine.playback_state() {
                    PlaybackState::Playing => {
                        if ui.button("⏸ Pause").clicked() {
                            self.engine.pause();
                        }
                    }
                    _ => {
                        if ui.button("▶ Play").clicked() {
                            self.engine.play();
                        }
                    }
                }

                if ui.button("⟲ Replay").clicked() {
                    self.engine.replay();
                    if let Some(feed) = self.feeds.get_mut(self.engine.symbol()) {
                        feed.rewind();
                    }
                }

                ui.separator();

                let mut full_view = self.engine.full_view();
                if ui.toggle_value(&mut full_view, "Full view").changed() {
                    self.engine.set_full_view(full_view);
                }

                let mut auto_zoom = self.engine.auto_zoom();
                if ui.toggle_value(&mut auto_zoom, "Auto zoom").changed() {
                    self.engine.set_auto_zoom(auto_zoom);
                }

                ui.separator();

                let mut window_size = self.engine.window_size();
                ComboBox::from_label("Window")
                    .selected_text(format!("{}", window_size))
                    .show_ui(ui, |ui| {
                        for &choice in PLAYBACK.manual_window_choices {
                            ui.selectable_value(&mut window_size, choice, format!("{}", choice));
                        }
                    });
                if window_size != self.engine.window_size() {
                    self.engine.set_window_size(window_size);
                }

                for op in NavigateOp::iter() {
                    if ui.button(op.to_string()).clicked() {
                        self.engine.navigate(op);
                    }
                }

                ui.separator();

                let mut selected = self.engine.symbol().to_string();
                ComboBox::from_label("Symbol")
                    .selected_text(selected.clone())
                    .show_ui(ui, |ui| {
                        for sym in &self.symbols {
                            ui.selectable_value(&mut selected, sym.clone(), sym);
                        }
                    });
                if selected != self.engine.symbol() {
                    self.engine.switch_symbol(&selected);
                    // Re-feed in one shot so the restored viewport lands on
                    // a fully populated store.
                    if let Some(feed) = self.feeds.get_mut(&selected) {
                        feed.rewind();
                        for event in feed.drain() {
                            self.engine.append_event(event);
                        }
                    }
                }
            });
        });
    }

    fn status_bar(&self, ctx: &Context) {
        TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(format!(
                    "{} | {} | {} candles, {} trades",
                    self.engine.symbol(),
                    self.engine.playback_state(),
                    self.engine.candle_count(),
                    self.engine.trade_count(),
                ));
                if self.engine.dropped_events() > 0 {
                    ui.label(
                        RichText::new(format!("dropped: {}", self.engine.dropped_events()))
                            .color(eframe::egui::Color32::YELLOW),
                    );
                }
            });
        });
    }
}

impl eframe::App for ReplayApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.poll_feed(ctx);
        self.engine.pump();

        self.controls(ctx);
        self.status_bar(ctx);

        CentralPanel::default().show(ctx, |ui| match self.engine.render_model() {
            RenderModel::NoData => {
                ui.centered_and_justified(|ui| {
                    ui.label(RichText::new("Waiting for data…").weak());
                });
            }
            RenderModel::Chart(frame) => {
                PlotView::show(ui, &frame);
            }
        });
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.engine.dispose();
    }
}
