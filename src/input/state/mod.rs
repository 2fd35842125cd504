//! Widget state management: stroke tracking and tool state.

mod core;
mod pointer;


pub use core::{PadState, StrokeState};
