//! Message types for the editing session

use std::path::PathBuf;

use crate::domain::Position;

/// Pointer input on the placement surface, in base-image pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    Pressed(Position),
    Moved(Position),
    Released,
}

/// File browser interactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowserMsg {
    /// Navigate into a directory
    Enter(PathBuf),
    /// Select a file
    Select(PathBuf),
    /// Navigate to the parent directory
    GoUp,
    /// Re-read the current directory
    Refresh,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Use the browser selection as the base image
    OpenBaseImage,
    /// Add the browser selection as a new signature
    AddSignature,
    /// Flatten and write the output image
    SaveImage,
    /// Show or hide the file browser
    ToggleFileChooser,
    Browser(BrowserMsg),
    Pointer(PointerEvent),
}

impl Msg {
    pub fn enter(path: PathBuf) -> Self {
        Msg::Browser(BrowserMsg::Enter(path))
    }

    pub fn select(path: PathBuf) -> Self {
        Msg::Browser(BrowserMsg::Select(path))
    }

    pub fn go_up() -> Self {
        Msg::Browser(BrowserMsg::GoUp)
    }

    pub fn refresh() -> Self {
        Msg::Browser(BrowserMsg::Refresh)
    }
}
