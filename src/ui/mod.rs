mod app;
mod plot_view;

pub use app::ReplayApp;
pub use plot_view::PlotView;
