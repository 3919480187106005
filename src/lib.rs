//! Gaze Overlay Library
//!
//! Head-tracked interaction engine for floating overlay windows on a
//! pass-through camera view: orientation tracking, stereo projection, gaze
//! hit testing, dwell selection and drag/resize gestures.

pub mod config;
pub mod cursor;
pub mod error;
pub mod input;
pub mod plugin;
pub mod projection;
pub mod render;
pub mod state;
pub mod tracking;
pub mod ui;
pub mod window;

// Re-export commonly used types
pub use config::EngineConfig;
pub use error::{ConfigError, TrackingError, TrackingResult};
pub use input::{ActivationOutcome, ButtonEdge, GazeEvent, GazeInputEngine};
pub use plugin::{GazeInteractionPlugin, GazeSet};
pub use projection::{ScreenSize, SpatialProjector};
pub use render::{ProjectedWindow, ProjectedWindows};
pub use state::{StoreError, WindowStore};
pub use tracking::{HeadPose, OrientationTracker, SamplingRate};
pub use ui::{ViewMode, ViewState};
pub use window::{OverlayWindowData, WindowRegistry};
