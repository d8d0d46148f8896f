//! Per-pixel drawing capability

use crate::error::SurfaceError;
use crate::geometry::{clip, BlitWindow, Rect};
use crate::pixel::{Level, PixelFormat};
use crate::source::PixelSource;

/// Something pixels can be read from and written to
///
/// This is the whole capability compositing and glyph stamping need. The
/// area operations have per-pixel default implementations; storage that
/// can do better (whole-byte fills, row copies) overrides them.
pub trait PixelTarget {
    /// Addressable area, always anchored at (0, 0)
    fn bounds(&self) -> Rect;

    /// Packing convention and polarity
    fn format(&self) -> PixelFormat;

    /// Read one pixel
    fn get(&self, x: i32, y: i32) -> Result<Level, SurfaceError>;

    /// Write one pixel without disturbing its neighbours
    fn set(&mut self, x: i32, y: i32, level: Level) -> Result<(), SurfaceError>;

    /// Set every pixel of `area` (after clipping) to `level`
    ///
    /// Returns the clipped rectangle that was written.
    fn fill_rect(&mut self, area: Rect, level: Level) -> Option<Rect> {
        let area = clip(area, self.bounds())?;
        for y in area.y..(area.bottom() as i32) {
            for x in area.x..(area.right() as i32) {
                self.set(x, y, level).ok()?;
            }
        }
        Some(area)
    }

    /// Copy `window` from `source`, skipping pixels equal to `key`
    ///
    /// Returns the destination rectangle, or `None` (writing nothing) when
    /// the window wasn't clipped for this source and these bounds.
    fn copy_window(
        &mut self,
        window: &BlitWindow,
        source: &PixelSource<'_>,
        key: Option<Level>,
    ) -> Option<Rect> {
        if !window.fits(source.size(), self.bounds()) {
            warn!("blit window does not fit source or target");
            return None;
        }
        blit_pixels(self, window, source, key)
    }
}

/// Pixel-by-pixel copy shared by all targets
pub(crate) fn blit_pixels<T: PixelTarget + ?Sized>(
    target: &mut T,
    window: &BlitWindow,
    source: &PixelSource<'_>,
    key: Option<Level>,
) -> Option<Rect> {
    let dest = window.dest();
    for row in 0..dest.height {
        let sy = window.src_y() + row;
        let dy = dest.y + row as i32;
        for col in 0..dest.width {
            let level = source.get(window.src_x() + col, sy)?;
            if key == Some(level) {
                continue;
            }
            target.set(dest.x + col as i32, dy, level).ok()?;
        }
    }
    Some(dest)
}
