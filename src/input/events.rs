use bevy::prelude::*;

/// Notifications the engine queues for the coordinating layer
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub enum GazeEvent {
    /// A window became the active selection, by button or dwell
    WindowSelected(String),
    /// The active selection was released
    WindowDeselected,
    /// Two activations arrived inside the double-activation window
    ModeToggled,
    /// Gaze rested on a window past the dwell threshold
    DwellActivated(String),
}

/// The single activation surface: a screen tap or controller button edge
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonEdge {
    Down,
    Up,
}

/// What a button-down edge resolved to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivationOutcome {
    /// Second activation inside the window; view mode toggled, nothing grabbed
    DoubleActivation,
    /// The window under the gaze was grabbed for drag and resize
    Selected(String),
    /// Nothing under the gaze
    Missed,
}
