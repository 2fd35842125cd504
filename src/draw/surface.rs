//! Raster backing store for the sketch area (Cairo-based).
//!
//! The surface owns the pixels. It is created at a fixed size, filled with
//! the background color, and mutated only by [`Surface::stroke_segment`] and
//! [`Surface::clear`]. Resizing is handled one level up by recreating the
//! surface: the widget is a short-lived capture tool, so content loss on
//! resize is accepted rather than re-rastering history.

use super::color::Color;
use crate::util::Position;
use cairo::{Context, Format, ImageSurface, LineCap, LineJoin};
use thiserror::Error;

/// Errors that can occur during surface operations.
#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("refusing to allocate degenerate {0}x{1} surface")]
    DegenerateSize(u32, u32),

    #[error("cairo operation failed: {0}")]
    Cairo(#[from] cairo::Error),

    #[error("PNG encoding failed: {0}")]
    Png(#[from] cairo::IoError),

    #[error("surface pixels are borrowed elsewhere: {0}")]
    Borrow(#[from] cairo::BorrowError),

    #[error("pixel ({0}, {1}) is outside the surface")]
    OutOfBounds(u32, u32),
}

/// A 2D raster buffer with a background fill color.
///
/// Coordinates given to drawing operations are logical (surface-local);
/// the backing store may be larger when a device-pixel `scale` factor is
/// configured. Pixel readback operates on device pixels.
pub struct Surface {
    surface: ImageSurface,
    width: u32,
    height: u32,
    scale: f64,
    background: Color,
}

impl Surface {
    /// Allocates a backing store and fills it with the background color.
    ///
    /// `width`/`height` are logical dimensions; the backing store is scaled
    /// by `scale` (display pixel density). Zero-sized requests are refused
    /// with [`SurfaceError::DegenerateSize`].
    pub fn new(
        width: u32,
        height: u32,
        scale: f64,
        background: Color,
    ) -> Result<Self, SurfaceError> {
        if width == 0 || height == 0 {
            return Err(SurfaceError::DegenerateSize(width, height));
        }

        let device_width = ((f64::from(width) * scale).round() as i32).max(1);
        let device_height = ((f64::from(height) * scale).round() as i32).max(1);

        let surface = ImageSurface::create(Format::Rgb24, device_width, device_height)?;

        let mut this = Self {
            surface,
            width,
            height,
            scale,
            background,
        };
        this.clear()?;

        log::debug!(
            "Allocated {}x{} surface (backing store {}x{}, scale {:.2})",
            width,
            height,
            device_width,
            device_height,
            scale
        );

        Ok(this)
    }

    /// Logical width in surface-local units.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Logical height in surface-local units.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Backing store width in device pixels.
    pub fn device_width(&self) -> u32 {
        self.surface.width() as u32
    }

    /// Backing store height in device pixels.
    pub fn device_height(&self) -> u32 {
        self.surface.height() as u32
    }

    /// The configured background fill color.
    pub fn background(&self) -> Color {
        self.background
    }

    /// Refills the entire backing store with the background color.
    ///
    /// Dimensions are unchanged; the result is indistinguishable from a
    /// freshly allocated surface of the same size.
    pub fn clear(&mut self) -> Result<(), SurfaceError> {
        let ctx = self.context()?;
        ctx.set_source_rgb(self.background.r, self.background.g, self.background.b);
        ctx.paint()?;
        drop(ctx);
        self.surface.flush();
        Ok(())
    }

    /// Commits a single line segment from `from` to `to`.
    ///
    /// This is the only freehand pixel-writing primitive. Round caps and
    /// joins make consecutive segments render as one smooth stroke at
    /// typical pointer sampling rates.
    pub fn stroke_segment(
        &mut self,
        from: Position,
        to: Position,
        color: Color,
        width: f64,
    ) -> Result<(), SurfaceError> {
        let ctx = self.context()?;
        ctx.set_source_rgba(color.r, color.g, color.b, color.a);
        ctx.set_line_width(width);
        ctx.set_line_cap(LineCap::Round);
        ctx.set_line_join(LineJoin::Round);

        ctx.move_to(from.x, from.y);
        ctx.line_to(to.x, to.y);
        ctx.stroke()?;

        drop(ctx);
        self.surface.flush();
        Ok(())
    }

    /// Encodes the current raster content as PNG bytes.
    ///
    /// Purely a read: calling this twice without intervening mutation
    /// yields identical payloads.
    pub fn to_png(&self) -> Result<Vec<u8>, SurfaceError> {
        self.surface.flush();
        let mut png = Vec::new();
        self.surface.write_to_png(&mut png)?;
        Ok(png)
    }

    /// Reads back a single device pixel as an opaque color.
    pub fn pixel_at(&mut self, x: u32, y: u32) -> Result<Color, SurfaceError> {
        if x >= self.device_width() || y >= self.device_height() {
            return Err(SurfaceError::OutOfBounds(x, y));
        }

        self.surface.flush();
        let stride = self.surface.stride() as usize;
        let data = self.surface.data()?;

        let offset = y as usize * stride + x as usize * 4;
        let word = u32::from_ne_bytes([
            data[offset],
            data[offset + 1],
            data[offset + 2],
            data[offset + 3],
        ]);

        Ok(unpack_rgb24(word))
    }

    /// Copies the backing store into a packed `0RGB` row-major buffer.
    ///
    /// The demo shell presents this buffer directly; dimensions are
    /// [`Surface::device_width`] x [`Surface::device_height`].
    pub fn to_buffer(&mut self) -> Result<Vec<u32>, SurfaceError> {
        self.surface.flush();
        let width = self.device_width() as usize;
        let height = self.device_height() as usize;
        let stride = self.surface.stride() as usize;
        let data = self.surface.data()?;

        let mut buffer = Vec::with_capacity(width * height);
        for y in 0..height {
            let row = &data[y * stride..y * stride + width * 4];
            for px in row.chunks_exact(4) {
                let word = u32::from_ne_bytes([px[0], px[1], px[2], px[3]]);
                buffer.push(word & 0x00ff_ffff);
            }
        }

        Ok(buffer)
    }

    /// Creates a drawing context with the logical-to-device scale applied.
    fn context(&self) -> Result<Context, SurfaceError> {
        let ctx = Context::new(&self.surface)?;
        ctx.scale(self.scale, self.scale);
        Ok(ctx)
    }
}

/// Unpacks a native-endian RGB24 word (upper byte unused) into a [`Color`].
fn unpack_rgb24(word: u32) -> Color {
    Color {
        r: f64::from((word >> 16) & 0xff) / 255.0,
        g: f64::from((word >> 8) & 0xff) / 255.0,
        b: f64::from(word & 0xff) / 255.0,
        a: 1.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::{RED, WHITE};

    #[test]
    fn new_surface_is_filled_with_background() {
        let mut surface = Surface::new(10, 10, 1.0, WHITE).unwrap();
        assert_eq!(surface.pixel_at(0, 0).unwrap(), WHITE);
        assert_eq!(surface.pixel_at(9, 9).unwrap(), WHITE);
    }

    #[test]
    fn zero_size_allocation_is_refused() {
        assert!(matches!(
            Surface::new(0, 10, 1.0, WHITE),
            Err(SurfaceError::DegenerateSize(0, 10))
        ));
        assert!(matches!(
            Surface::new(10, 0, 1.0, WHITE),
            Err(SurfaceError::DegenerateSize(10, 0))
        ));
    }

    #[test]
    fn stroke_segment_writes_the_requested_color() {
        let mut surface = Surface::new(40, 40, 1.0, WHITE).unwrap();
        surface
            .stroke_segment(
                Position::new(5.0, 20.0),
                Position::new(35.0, 20.0),
                RED,
                6.0,
            )
            .unwrap();

        // Pixel centers well inside the stroke are fully covered.
        assert_eq!(surface.pixel_at(20, 20).unwrap(), RED);
        // Far away from the stroke the background is untouched.
        assert_eq!(surface.pixel_at(20, 5).unwrap(), WHITE);
    }

    #[test]
    fn scale_factor_grows_the_backing_store() {
        let surface = Surface::new(10, 10, 2.0, WHITE).unwrap();
        assert_eq!(surface.width(), 10);
        assert_eq!(surface.device_width(), 20);
        assert_eq!(surface.device_height(), 20);
    }

    #[test]
    fn buffer_matches_device_dimensions() {
        let mut surface = Surface::new(8, 4, 1.0, WHITE).unwrap();
        let buffer = surface.to_buffer().unwrap();
        assert_eq!(buffer.len(), 8 * 4);
        assert!(buffer.iter().all(|&px| px == 0x00ff_ffff));
    }

    #[test]
    fn pixel_readback_rejects_out_of_bounds() {
        let mut surface = Surface::new(8, 8, 1.0, WHITE).unwrap();
        assert!(matches!(
            surface.pixel_at(8, 0),
            Err(SurfaceError::OutOfBounds(8, 0))
        ));
    }
}
