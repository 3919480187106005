//! View state shared with the outer application layer

pub mod state;

pub use state::{ViewMode, ViewState};
