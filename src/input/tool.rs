//! Drawing tool selection.

/// Drawing tool selection.
///
/// A closed set: exactly one tool is active at a time, selected by discrete
/// toolbar events. The selection persists across strokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tool {
    /// Freehand marking with the current brush color (default)
    #[default]
    Mark,
    /// Erasing - paints the background color regardless of the brush color
    Erase,
}
