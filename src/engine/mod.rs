mod bounds;
mod cache;
mod core;
mod messages;
mod overlay;
mod playback;
mod scheduler;
mod viewport;

pub use bounds::{AxisBounds, DataExtent, slice_bounds};
pub use cache::{ViewportState, ViewportStateCache};
pub use self::core::{ChartEngine, ChartFrame, RenderModel, ViewMode};
pub use messages::{NavigateOp, StreamEvent};
pub use overlay::{MarkerKind, OverlaySet, RegimeBand, TradeMarker, build_overlays};
pub use playback::{PlaybackController, PlaybackState};
pub use scheduler::{FrameHandle, FrameScheduler, ManualScheduler};
pub use viewport::ViewportWindow;
