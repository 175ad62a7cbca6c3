//! Widgets and view builders
//!
//! - `placement_surface`: base image with draggable signatures
//! - `file_browser`: the toggleable file chooser panel
//! - `toolbar`: the action row

pub mod file_browser;
pub mod placement_surface;
pub mod toolbar;
