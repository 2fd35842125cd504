//! Input handling: pointer events, tool selection, and the widget state
//! machine that turns pointer positions into committed stroke segments.

pub mod events;
pub mod state;
pub mod tool;

// Re-export commonly used types at module level
pub use events::PointerEvent;
pub use state::{PadState, StrokeState};
pub use tool::Tool;
