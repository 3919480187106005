use bevy::prelude::Resource;
use bevy::log::{debug, info};

use crate::input::GazeEvent;

/// What the pass-through view currently shows
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy)]
pub enum ViewMode {
    CameraOnly,
    #[default]
    CameraWithOverlays,
    OverlaysOnly,
}

impl ViewMode {
    /// Next mode in the toggle cycle
    pub fn next(self) -> Self {
        match self {
            ViewMode::CameraOnly => ViewMode::CameraWithOverlays,
            ViewMode::CameraWithOverlays => ViewMode::OverlaysOnly,
            ViewMode::OverlaysOnly => ViewMode::CameraOnly,
        }
    }

    pub fn shows_overlays(self) -> bool {
        !matches!(self, ViewMode::CameraOnly)
    }
}

/// Coordinator-owned view state. Command handlers read the selected window
/// from here; the engine never talks to them directly.
#[derive(Debug, Default, Resource)]
pub struct ViewState {
    pub view_mode: ViewMode,
    pub selected_window_id: Option<String>,
}

impl ViewState {
    pub fn toggle_view_mode(&mut self) {
        self.view_mode = self.view_mode.next();
        info!("View mode now {:?}", self.view_mode);
    }

    pub fn select_window(&mut self, id: Option<String>) {
        if self.selected_window_id != id {
            debug!("Selected window changed to {:?}", id);
        }
        self.selected_window_id = id;
    }

    /// Fold one engine event into the view state
    pub fn apply(&mut self, event: &GazeEvent) {
        match event {
            GazeEvent::WindowSelected(id) => self.select_window(Some(id.clone())),
            GazeEvent::WindowDeselected => self.select_window(None),
            GazeEvent::ModeToggled => self.toggle_view_mode(),
            GazeEvent::DwellActivated(_) => {}
        }
    }
}
