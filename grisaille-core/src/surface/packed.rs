//! Two-pixels-per-byte storage

#[cfg(feature = "alloc")]
use alloc::vec::Vec;

use crate::config::PanelConfig;
use crate::error::SurfaceError;
use crate::geometry::{clip, BlitWindow, Rect, RegionClipper};
use crate::pixel::{Level, PixelFormat};
use crate::source::{PixelSource, SourceFormat};

use super::region::RegionView;
use super::target::{blit_pixels, PixelTarget};

/// Bytes needed for a `width` x `height` packed surface
///
/// Returns `None` for zero dimensions or if the size overflows `usize`.
pub const fn buffer_len(width: u32, height: u32) -> Option<usize> {
    if width == 0 || height == 0 {
        return None;
    }
    (width as usize).div_ceil(2).checked_mul(height as usize)
}

/// Packed 4-bit grayscale framebuffer
///
/// Rows are `ceil(width / 2)` bytes. With an odd width the spare nibble at
/// the end of each row is padding; area operations never write it, `fill`
/// does.
#[derive(Debug, Clone)]
pub struct PackedSurface<B> {
    buffer: B,
    width: u32,
    height: u32,
    stride: usize,
    format: PixelFormat,
}

impl<B> PackedSurface<B>
where
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    /// Wrap existing storage
    ///
    /// The buffer contents are kept as-is. Fails with `InvalidDimensions`
    /// for a zero width/height and `InvalidBuffer` if the buffer length is
    /// not exactly [`buffer_len`].
    pub fn new(buffer: B, width: u32, height: u32, format: PixelFormat) -> Result<Self, SurfaceError> {
        let expected = buffer_len(width, height).ok_or(SurfaceError::InvalidDimensions)?;
        let actual = buffer.as_ref().len();
        if actual != expected {
            return Err(SurfaceError::InvalidBuffer { expected, actual });
        }

        debug!("surface {}x{} over {} bytes", width, height, actual);

        Ok(Self {
            buffer,
            width,
            height,
            stride: (width as usize).div_ceil(2),
            format,
        })
    }

    /// Wrap storage sized for a panel configuration
    pub fn for_panel(buffer: B, config: &PanelConfig) -> Result<Self, SurfaceError> {
        Self::new(buffer, config.width, config.height, config.format)
    }

    /// Surface width in pixels
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Surface height in pixels
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Bytes per row
    pub const fn stride(&self) -> usize {
        self.stride
    }

    /// Packing convention and polarity
    pub const fn format(&self) -> PixelFormat {
        self.format
    }

    /// Full surface rectangle
    pub const fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }

    /// Clipper for this surface's bounds
    pub const fn clipper(&self) -> RegionClipper {
        RegionClipper::new(self.bounds())
    }

    /// Raw packed bytes (whole-surface snapshot for a full refresh)
    pub fn as_bytes(&self) -> &[u8] {
        self.buffer.as_ref()
    }

    /// Release the backing storage
    pub fn into_inner(self) -> B {
        self.buffer
    }

    /// Read one pixel
    pub fn get(&self, x: i32, y: i32) -> Result<Level, SurfaceError> {
        let (ux, uy) = self.check(x, y)?;
        let byte = self.buffer.as_ref()[self.index(ux, uy)];
        Ok(self.format.order.read(byte, ux))
    }

    /// Write one pixel
    ///
    /// Read-modify-write on the shared byte: only this pixel's nibble
    /// changes.
    pub fn set(&mut self, x: i32, y: i32, level: Level) -> Result<(), SurfaceError> {
        let (ux, uy) = self.check(x, y)?;
        self.put(ux, uy, level);
        Ok(())
    }

    /// Set every pixel to `level`, one byte write per pixel pair
    pub fn fill(&mut self, level: Level) {
        self.buffer.as_mut().fill(level.packed_pair());
    }

    /// Set every pixel of `area` (after clipping) to `level`
    ///
    /// Whole bytes are filled directly; only an odd leading column or a
    /// trailing column sharing its byte with a pixel outside the area goes
    /// through read-modify-write.
    pub fn fill_rect(&mut self, area: Rect, level: Level) -> Option<Rect> {
        let area = clip(area, self.bounds())?;
        let x0 = area.x as u32;
        let x1 = x0 + area.width;
        let pair = level.packed_pair();

        for y in area.y as u32..area.bottom() as u32 {
            let mut x = x0;
            if x & 1 == 1 {
                self.put(x, y, level);
                x += 1;
            }

            let whole_end = x1 & !1;
            if whole_end > x {
                let start = self.index(x, y);
                let end = self.index(whole_end, y);
                self.buffer.as_mut()[start..end].fill(pair);
                x = whole_end;
            }

            if x < x1 {
                self.put(x, y, level);
            }
        }

        Some(area)
    }

    /// Byte-aligned view of `area` for a partial refresh
    ///
    /// The clipped area is widened to whole bytes (even left edge, even or
    /// surface-width right edge). Returns `None` if nothing is visible.
    pub fn region(&self, area: Rect) -> Option<RegionView<'_>> {
        let area = clip(area, self.bounds())?.byte_aligned();
        let x0 = area.x as u32;
        let x1 = (area.right() as u32).min(self.width);

        let first_byte = self.index(x0, area.y as u32);
        let row_bytes = (x1 as usize).div_ceil(2) - (x0 / 2) as usize;

        Some(RegionView::new(
            Rect::new(x0 as i32, area.y, x1 - x0, area.height),
            self.buffer.as_ref(),
            self.stride,
            first_byte,
            row_bytes,
            self.format,
        ))
    }

    /// View of the whole surface for a full refresh
    pub fn full(&self) -> RegionView<'_> {
        RegionView::new(
            self.bounds(),
            self.buffer.as_ref(),
            self.stride,
            0,
            self.stride,
            self.format,
        )
    }

    fn check(&self, x: i32, y: i32) -> Result<(u32, u32), SurfaceError> {
        match (u32::try_from(x), u32::try_from(y)) {
            (Ok(ux), Ok(uy)) if ux < self.width && uy < self.height => Ok((ux, uy)),
            _ => Err(SurfaceError::OutOfBounds { x, y }),
        }
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.stride + (x / 2) as usize
    }

    #[inline]
    fn put(&mut self, x: u32, y: u32, level: Level) {
        let i = self.index(x, y);
        let order = self.format.order;
        let buf = self.buffer.as_mut();
        buf[i] = order.write(buf[i], x, level);
    }

    /// Row copy for packed sources whose nibbles line up with ours
    ///
    /// Returns false (having written nothing) when the fast path doesn't
    /// apply. The window must already fit both the source and this surface.
    fn copy_aligned(&mut self, window: &BlitWindow, source: &PixelSource<'_>) -> bool {
        let SourceFormat::PackedNibble(order) = source.format() else {
            return false;
        };
        let dest = window.dest();
        let (src_x, src_y) = (window.src_x(), window.src_y());
        if order != self.format.order || (dest.x as u32 ^ src_x) & 1 != 0 {
            return false;
        }

        let x0 = dest.x as u32;
        let x1 = x0 + dest.width;
        let head = x0 & 1 == 1;
        let whole_start = if head { x0 + 1 } else { x0 };
        let whole_end = x1 & !1;
        let tail = whole_end < x1 && whole_end >= whole_start;

        for row in 0..dest.height {
            let sy = src_y + row;
            let dy = dest.y as u32 + row;

            if head {
                self.put(x0, dy, source.level_at(src_x, sy));
            }

            if whole_end > whole_start {
                let src_start = sy as usize * source.stride()
                    + ((src_x + (whole_start - x0)) / 2) as usize;
                let len = ((whole_end - whole_start) / 2) as usize;
                let start = self.index(whole_start, dy);
                self.buffer.as_mut()[start..start + len]
                    .copy_from_slice(&source.data()[src_start..src_start + len]);
            }

            if tail {
                self.put(whole_end, dy, source.level_at(src_x + (whole_end - x0), sy));
            }
        }

        true
    }
}

#[cfg(feature = "alloc")]
impl PackedSurface<Vec<u8>> {
    /// Allocate a surface cleared to the lightest level
    ///
    /// Allocation failure is reported here, once, as `AllocationFailed`.
    pub fn allocate(width: u32, height: u32, format: PixelFormat) -> Result<Self, SurfaceError> {
        let len = buffer_len(width, height).ok_or(SurfaceError::InvalidDimensions)?;

        let mut buffer = Vec::new();
        buffer.try_reserve_exact(len).map_err(|_| {
            warn!("cannot allocate {} byte framebuffer", len);
            SurfaceError::AllocationFailed
        })?;
        buffer.resize(len, format.polarity.lightest().packed_pair());

        info!("allocated {}x{} framebuffer ({} bytes)", width, height, len);
        Self::new(buffer, width, height, format)
    }

    /// Allocate a surface for a panel configuration
    pub fn allocate_for_panel(config: &PanelConfig) -> Result<Self, SurfaceError> {
        Self::allocate(config.width, config.height, config.format)
    }
}

impl<B> PixelTarget for PackedSurface<B>
where
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    fn bounds(&self) -> Rect {
        PackedSurface::bounds(self)
    }

    fn format(&self) -> PixelFormat {
        self.format
    }

    fn get(&self, x: i32, y: i32) -> Result<Level, SurfaceError> {
        PackedSurface::get(self, x, y)
    }

    fn set(&mut self, x: i32, y: i32, level: Level) -> Result<(), SurfaceError> {
        PackedSurface::set(self, x, y, level)
    }

    fn fill_rect(&mut self, area: Rect, level: Level) -> Option<Rect> {
        PackedSurface::fill_rect(self, area, level)
    }

    fn copy_window(
        &mut self,
        window: &BlitWindow,
        source: &PixelSource<'_>,
        key: Option<Level>,
    ) -> Option<Rect> {
        if !window.fits(source.size(), PackedSurface::bounds(self)) {
            warn!("blit window does not fit source or surface");
            return None;
        }
        if key.is_none() && self.copy_aligned(window, source) {
            return Some(window.dest());
        }
        blit_pixels(self, window, source, key)
    }
}
