//! Editing session module
//!
//! This module contains:
//! - Session state (composition, file browser, drag capture, previews)
//! - Message types for user interactions
//! - Message handlers
//! - Keyboard shortcuts

pub mod handlers;
pub mod messages;
pub mod shortcuts;
pub mod state;
