//! Backend-neutral pointer event types.
//!
//! Host shells (the demo window, an embedding application) map their native
//! mouse/touch events to these values for unified input handling. The shell
//! is also responsible for suppressing its platform's default gestures
//! (scrolling, selection) while forwarding these events.

use crate::util::Position;

/// A discrete pointer event with an optionally resolved position.
///
/// `position` is `None` when the triggering event carried no usable
/// coordinate (e.g. a malformed touch event with an empty contact list).
/// Handlers hold the last committed position in that case instead of
/// jumping to an origin default.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Primary contact pressed down.
    Down { position: Option<Position> },
    /// Contact moved while down (or hovered; ignored unless a stroke is active).
    Move { position: Option<Position> },
    /// Primary contact released.
    Up,
    /// Contact left the surface area.
    Leave,
    /// Contact cancelled by the platform.
    Cancel,
}
