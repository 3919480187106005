//! Gaze input handling
//!
//! - Gaze marker computation from head orientation
//! - Dwell and button-edge selection
//! - Drag and resize of the selected window
//! - Outbound event queue for the coordinating layer

pub mod engine;
pub mod events;

pub use engine::GazeInputEngine;
pub use events::{ActivationOutcome, ButtonEdge, GazeEvent};
