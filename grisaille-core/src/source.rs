//! Borrowed pixel sources
//!
//! Images arrive already decoded, either packed two pixels per byte (the
//! panel's native layout) or one level per byte (glyph bitmaps). The format
//! is always stated by the caller, never inferred from the buffer.

use crate::error::SurfaceError;
use crate::geometry::{Point, Rect, Size};
use crate::pixel::{Level, NibbleOrder, PixelFormat, Polarity};
use crate::surface::RegionView;

/// Layout of a source buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SourceFormat {
    /// Two pixels per byte, rows padded to a whole byte
    PackedNibble(NibbleOrder),
    /// One level (0..=15) per byte
    BytePerPixel,
}

impl SourceFormat {
    /// Bytes per row for `width` pixels
    pub const fn stride(self, width: u32) -> usize {
        match self {
            SourceFormat::PackedNibble(_) => (width as usize).div_ceil(2),
            SourceFormat::BytePerPixel => width as usize,
        }
    }

    /// Total bytes for a `width` x `height` image, `None` on overflow
    pub const fn buffer_len(self, width: u32, height: u32) -> Option<usize> {
        self.stride(width).checked_mul(height as usize)
    }
}

/// A read-only view of an external image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelSource<'a> {
    width: u32,
    height: u32,
    format: SourceFormat,
    stride: usize,
    data: &'a [u8],
}

impl<'a> PixelSource<'a> {
    /// Wrap a buffer of the given format
    ///
    /// Fails with `InvalidBuffer` if the length doesn't match the geometry,
    /// and with `InvalidLevel` if a byte-per-pixel buffer holds a value
    /// above 15.
    pub fn new(
        width: u32,
        height: u32,
        format: SourceFormat,
        data: &'a [u8],
    ) -> Result<Self, SurfaceError> {
        let expected = format
            .buffer_len(width, height)
            .ok_or(SurfaceError::InvalidDimensions)?;

        if data.len() != expected {
            return Err(SurfaceError::InvalidBuffer {
                expected,
                actual: data.len(),
            });
        }

        if format == SourceFormat::BytePerPixel {
            if let Some(&bad) = data.iter().find(|&&b| b > 15) {
                trace!("byte-per-pixel source holds level {}", bad);
                return Err(SurfaceError::InvalidLevel(bad));
            }
        }

        Ok(Self {
            width,
            height,
            format,
            stride: format.stride(width),
            data,
        })
    }

    /// Packed image in the default (even-low) nibble order
    pub fn packed(width: u32, height: u32, data: &'a [u8]) -> Result<Self, SurfaceError> {
        Self::new(
            width,
            height,
            SourceFormat::PackedNibble(NibbleOrder::default()),
            data,
        )
    }

    /// One-level-per-byte bitmap
    pub fn byte_per_pixel(width: u32, height: u32, data: &'a [u8]) -> Result<Self, SurfaceError> {
        Self::new(width, height, SourceFormat::BytePerPixel, data)
    }

    /// Image width in pixels
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Image size
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Buffer layout
    pub const fn format(&self) -> SourceFormat {
        self.format
    }

    /// Bytes per row
    pub const fn stride(&self) -> usize {
        self.stride
    }

    /// Raw buffer
    pub const fn data(&self) -> &'a [u8] {
        self.data
    }

    /// Level at (x, y), `None` outside the image
    pub fn get(&self, x: u32, y: u32) -> Option<Level> {
        if x < self.width && y < self.height {
            Some(self.level_at(x, y))
        } else {
            None
        }
    }

    /// Level at (x, y); callers guarantee the coordinate is inside
    #[inline]
    pub(crate) fn level_at(&self, x: u32, y: u32) -> Level {
        let row = y as usize * self.stride;
        match self.format {
            SourceFormat::PackedNibble(order) => {
                order.read(self.data[row + (x / 2) as usize], x)
            }
            SourceFormat::BytePerPixel => Level::from_low_nibble(self.data[row + x as usize]),
        }
    }

    /// Row `y` of a packed image as raw bytes
    pub fn packed_row(&self, y: u32) -> Option<&'a [u8]> {
        match self.format {
            SourceFormat::PackedNibble(_) if y < self.height => {
                let start = y as usize * self.stride;
                self.data.get(start..start + self.stride)
            }
            _ => None,
        }
    }

    /// Refresh view of a packed image placed at `origin`
    ///
    /// Used to push an asset straight to the panel without compositing it
    /// into the surface first. Returns `None` for byte-per-pixel sources,
    /// which the panel can't decode, and for empty images.
    pub fn region_at(&self, origin: Point, polarity: Polarity) -> Option<RegionView<'a>> {
        let SourceFormat::PackedNibble(order) = self.format else {
            return None;
        };
        if self.size().is_empty() {
            return None;
        }

        Some(RegionView::new(
            Rect::at(origin, self.size()),
            self.data,
            self.stride,
            0,
            self.stride,
            PixelFormat::new(order, polarity),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_packed_length_rounds_rows_up() {
        // 5 pixels need 3 bytes per row
        assert_eq!(SourceFormat::PackedNibble(NibbleOrder::EvenLow).buffer_len(5, 2), Some(6));
        assert!(PixelSource::packed(5, 2, &[0u8; 6]).is_ok());
        assert_eq!(
            PixelSource::packed(5, 2, &[0u8; 5]),
            Err(SurfaceError::InvalidBuffer {
                expected: 6,
                actual: 5
            })
        );
    }

    #[test]
    fn test_byte_per_pixel_length() {
        assert!(PixelSource::byte_per_pixel(3, 3, &[0u8; 9]).is_ok());
        assert!(matches!(
            PixelSource::byte_per_pixel(3, 3, &[0u8; 10]),
            Err(SurfaceError::InvalidBuffer { expected: 9, .. })
        ));
    }

    #[test]
    fn test_byte_per_pixel_rejects_wide_values() {
        let data = [0, 15, 16, 0];
        let err = PixelSource::byte_per_pixel(2, 2, &data).unwrap_err();
        assert_eq!(err, SurfaceError::InvalidLevel(16));
        assert_eq!(err.to_string(), "level 16 exceeds 15");
    }

    #[test]
    fn test_packed_read_order() {
        let low = PixelSource::packed(2, 1, &[0x4B]).unwrap();
        assert_eq!(low.get(0, 0), Level::new(0xB));
        assert_eq!(low.get(1, 0), Level::new(0x4));

        let high = PixelSource::new(
            2,
            1,
            SourceFormat::PackedNibble(NibbleOrder::EvenHigh),
            &[0x4B],
        )
        .unwrap();
        assert_eq!(high.get(0, 0), Level::new(0x4));
        assert_eq!(high.get(2, 0), None);
    }

    #[test]
    fn test_region_at() {
        let data = [0x11, 0x22, 0x33, 0x44];
        let img = PixelSource::packed(4, 2, &data).unwrap();
        let view = img.region_at(Point::new(7, 9), Polarity::default()).unwrap();
        assert_eq!(view.area(), Rect::new(7, 9, 4, 2));
        let rows: Vec<&[u8]> = view.rows().collect();
        assert_eq!(rows, vec![&[0x11u8, 0x22][..], &[0x33u8, 0x44][..]]);

        let glyph = PixelSource::byte_per_pixel(1, 1, &[3]).unwrap();
        assert!(glyph.region_at(Point::new(0, 0), Polarity::default()).is_none());
    }
}
