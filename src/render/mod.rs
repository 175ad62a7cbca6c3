//! Output rendering
//!
//! This module contains:
//! - The compositor that flattens a composition into a PNG (composite.rs)
//! - Preview decoding for the on-screen surface (preview.rs)

pub mod composite;
pub mod preview;

pub use composite::{RenderError, render};
