//! Widgets used by the application views

pub mod preview;
pub mod selection_overlay;

pub use preview::Preview;
pub use selection_overlay::SelectionCanvas;
