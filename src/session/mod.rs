//! Screenshot session management module
//!
//! This module contains:
//! - Transient UI state and its snapshot/restore
//! - Message types for the update loop
//! - Keyboard shortcuts

pub mod messages;
pub mod shortcuts;
pub mod state;
