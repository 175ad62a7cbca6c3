//! Pure domain types with minimal dependencies
//!
//! This module contains the composition model and drag handling.
//! Types here should have no framework dependencies (cosmic, iced, etc.)
//! so they can be driven from tests and from the UI alike.

pub mod composition;
pub mod drag;
pub mod geometry;
pub mod placement;

pub use composition::*;
pub use drag::*;
pub use geometry::*;
pub use placement::*;
