//! Pure domain types with minimal dependencies
//!
//! Types here have no framework dependencies (iced, xcap, ...) so they can be
//! exercised without a display.

pub mod geometry;
pub mod selection;

pub use geometry::*;
pub use selection::*;
