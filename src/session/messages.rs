//! Message types for the application update loop
//!
//! Msg wraps one sub-enum per concern so handlers can be split the same way.

use std::path::PathBuf;

use iced::window;

use crate::domain::Point;
use crate::session::state::CoordinateField;

/// Region selection messages
#[derive(Debug, Clone)]
pub enum SelectMsg {
    /// "Select Area" pressed: arm the overlay
    Start,
    /// Pointer moved over the overlay, surface coordinates
    PointerMoved(Point),
    /// Left button went down on the overlay
    PointerPressed(Point),
    /// Left button went up on the overlay
    PointerReleased(Point),
    /// Escape pressed
    Cancel,
    /// "Update" pressed next to the coordinate fields
    ApplyManual,
}

/// Screenshot messages
#[derive(Debug, Clone)]
pub enum CaptureMsg {
    /// "Take Screenshot" pressed
    Take,
    /// Main window is hidden and the settle delay elapsed
    Settled,
}

/// Settings view messages
#[derive(Debug, Clone)]
pub enum SettingsMsg {
    Open,
    Back,
    MasterFolderChanged(String),
    Browse,
    FolderPicked(Option<PathBuf>),
}

/// Window lifecycle messages
#[derive(Debug, Clone)]
pub enum WindowMsg {
    Opened(window::Id),
    Moved(window::Id, iced::Point),
    /// Position queried after opening, `None` where the platform cannot tell
    Positioned(window::Id, Option<iced::Point>),
    Resized(window::Id, iced::Size),
    Closed(window::Id),
}

#[derive(Debug, Clone)]
pub enum Msg {
    Select(SelectMsg),
    Capture(CaptureMsg),
    Settings(SettingsMsg),
    Window(WindowMsg),
    FolderNameChanged(String),
    CoordinateChanged(CoordinateField, String),
}

impl Msg {
    pub fn select(msg: SelectMsg) -> Self {
        Msg::Select(msg)
    }

    pub fn capture(msg: CaptureMsg) -> Self {
        Msg::Capture(msg)
    }

    pub fn settings(msg: SettingsMsg) -> Self {
        Msg::Settings(msg)
    }

    pub fn window(msg: WindowMsg) -> Self {
        Msg::Window(msg)
    }
}
