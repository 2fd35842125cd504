//! Pointer event handling: the stroke tracker.

use crate::input::events::PointerEvent;
use crate::util::Position;

use super::{PadState, StrokeState};

impl PadState {
    /// Processes a pointer event, advancing the stroke state machine.
    ///
    /// # Behavior
    /// - `Down` with a position: begins a stroke (no pixels are written yet;
    ///   the position becomes the anchor for the first segment)
    /// - `Move` with a position while active: commits one line segment and
    ///   advances the anchor
    /// - `Move`/`Down` without a resolvable position: held, never remapped
    ///   to an origin default
    /// - `Up`/`Leave`/`Cancel`: ends the stroke; idempotent when already idle
    ///
    /// All events are ignored while no surface exists.
    pub fn on_pointer_event(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Down {
                position: Some(position),
            } => self.begin_stroke(position),
            PointerEvent::Down { position: None } => {
                // No coordinate to anchor a stroke on; stay idle.
                log::debug!("Ignoring pointer-down without a resolvable position");
            }
            PointerEvent::Move {
                position: Some(position),
            } => self.continue_stroke(position),
            PointerEvent::Move { position: None } => {
                // Hold the last committed position.
            }
            PointerEvent::Up | PointerEvent::Leave | PointerEvent::Cancel => self.end_stroke(),
        }
    }

    fn begin_stroke(&mut self, position: Position) {
        if self.surface().is_none() {
            return;
        }
        self.state = StrokeState::Active { last: position };
    }

    fn continue_stroke(&mut self, position: Position) {
        let StrokeState::Active { last } = self.state else {
            return;
        };

        let color = self.stroke_color();
        let width = self.brush_width();
        let Some(surface) = self.surface_mut() else {
            return;
        };

        match surface.stroke_segment(last, position, color, width) {
            Ok(()) => {
                self.state = StrokeState::Active { last: position };
                self.needs_redraw = true;
            }
            Err(err) => log::error!("Failed to commit stroke segment: {err}"),
        }
    }

    fn end_stroke(&mut self) {
        // Idempotent: ending while idle is a no-op, not an error.
        self.state = StrokeState::Idle;
    }
}
