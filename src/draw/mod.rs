//! Drawing primitives (Cairo-based).
//!
//! This module defines the raster side of the widget:
//! - [`Color`]: RGBA color representation with predefined palette constants
//! - [`Surface`]: the raster backing store with background fill, segment
//!   stroking, PNG export, and pixel readback

pub mod color;
pub mod surface;

// Re-export commonly used types at module level
pub use color::Color;
pub use surface::{Surface, SurfaceError};

// Re-export palette constants for public API
pub use color::{BLACK, BLUE, GREEN, ORANGE, RED, WHITE, YELLOW};
