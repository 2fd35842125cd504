//! Widget state: surface ownership, tool parameters, stroke state machine.

use crate::draw::{Color, Surface};
use crate::input::tool::Tool;
use crate::util::Position;

/// Current stroke state machine.
///
/// Two states make the "ignore continue/end while idle" invariant explicit:
/// a position update only reaches the surface while `Active`, and `last` is
/// always the endpoint of the most recently committed segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StrokeState {
    /// Not drawing - waiting for a pointer-down
    Idle,
    /// A stroke is in progress (pointer held down)
    Active {
        /// Endpoint of the most recently committed segment
        last: Position,
    },
}

/// Main widget state: the raster surface plus everything the stroke
/// tracker reads while committing segments.
///
/// Constructed once at widget initialization and threaded through the host
/// shell's event handlers; there is no free-floating module state. All
/// mutation happens on the UI thread in response to discrete input events.
pub struct PadState {
    /// The raster backing store; `None` until the first valid resize
    surface: Option<Surface>,
    /// Background fill color, also the erase color
    background: Color,
    /// Device-pixel scale applied to newly allocated surfaces
    scale: f64,
    /// Currently selected tool
    current_tool: Tool,
    /// Current brush color (ignored while erasing, but still stored)
    current_color: Color,
    /// Current brush width in logical pixels
    brush_width: f64,
    /// Lower bound for the brush width
    min_width: f64,
    /// Upper bound for the brush width
    max_width: f64,
    /// Current stroke state machine
    pub state: StrokeState,
    /// Whether the host shell needs to re-present the surface
    pub needs_redraw: bool,
}

impl PadState {
    /// Creates a new widget state with the given defaults.
    ///
    /// No surface is allocated yet: call [`PadState::resize`] with the
    /// initial layout size. Until then all drawing input is ignored.
    ///
    /// # Arguments
    /// * `background` - Background fill color (and erase color)
    /// * `color` - Initial brush color
    /// * `brush_width` - Initial brush width, clamped to `width_bounds`
    /// * `width_bounds` - Inclusive `(min, max)` bounds for the brush width
    /// * `scale` - Device-pixel scale factor for the backing store
    pub fn with_defaults(
        background: Color,
        color: Color,
        brush_width: f64,
        width_bounds: (f64, f64),
        scale: f64,
    ) -> Self {
        let (min_width, max_width) = width_bounds;
        Self {
            surface: None,
            background,
            scale,
            current_tool: Tool::default(),
            current_color: color,
            brush_width: brush_width.clamp(min_width, max_width),
            min_width,
            max_width,
            state: StrokeState::Idle,
            needs_redraw: false,
        }
    }

    /// The current surface, if one has been allocated.
    pub fn surface(&self) -> Option<&Surface> {
        self.surface.as_ref()
    }

    /// Mutable access to the current surface (pixel readback, presentation).
    pub fn surface_mut(&mut self) -> Option<&mut Surface> {
        self.surface.as_mut()
    }

    /// The currently selected tool.
    pub fn current_tool(&self) -> Tool {
        self.current_tool
    }

    /// The current brush color.
    pub fn current_color(&self) -> Color {
        self.current_color
    }

    /// The current brush width.
    pub fn brush_width(&self) -> f64 {
        self.brush_width
    }

    /// The background fill color.
    pub fn background(&self) -> Color {
        self.background
    }

    /// Recreates the surface at a new layout size.
    ///
    /// Destructive: prior content is lost and the surface comes back fully
    /// repainted with the background color. An in-flight stroke is reset to
    /// idle because its backing store no longer exists. Zero-sized requests
    /// are skipped silently - they only occur transiently during layout.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            log::debug!("Skipping resize to degenerate {width}x{height} viewport");
            return;
        }

        match Surface::new(width, height, self.scale, self.background) {
            Ok(surface) => {
                self.surface = Some(surface);
                self.state = StrokeState::Idle;
                self.needs_redraw = true;
                log::debug!("Surface resized to {width}x{height}");
            }
            Err(err) => {
                log::error!("Failed to allocate {width}x{height} surface: {err}");
            }
        }
    }

    /// Refills the surface with the background color, keeping dimensions.
    pub fn clear(&mut self) {
        if let Some(surface) = self.surface.as_mut() {
            match surface.clear() {
                Ok(()) => self.needs_redraw = true,
                Err(err) => log::error!("Failed to clear surface: {err}"),
            }
        }
    }

    /// Selects the active tool.
    pub fn select_tool(&mut self, tool: Tool) {
        self.current_tool = tool;
        log::debug!("Tool selected: {tool:?}");
    }

    /// Sets the brush color.
    ///
    /// The color is stored even while the erase tool is active - erasing
    /// always paints the background color, but the selection persists and
    /// applies once the mark tool is reselected.
    pub fn select_color(&mut self, color: Color) {
        self.current_color = color;
    }

    /// Sets the brush width, clamped to the configured bounds.
    ///
    /// Out-of-range values are clamped rather than rejected so a zero or
    /// negative width can never reach the stroke tracker.
    pub fn set_brush_width(&mut self, width: f64) {
        let clamped = width.clamp(self.min_width, self.max_width);
        if clamped != width {
            log::debug!(
                "Brush width {width:.1} clamped to {clamped:.1} ({:.1}-{:.1})",
                self.min_width,
                self.max_width
            );
        }
        self.brush_width = clamped;
    }

    /// The effective stroke color for the active tool.
    ///
    /// Erase substitutes the background color for the brush color; this is
    /// the only difference between the two tools.
    pub(crate) fn stroke_color(&self) -> Color {
        match self.current_tool {
            Tool::Mark => self.current_color,
            Tool::Erase => self.background,
        }
    }
}
