//! Glyph stamping
//!
//! Rasterization and font metrics live outside the framebuffer. A stamper
//! only needs per-pixel access to the target, which every
//! [`PixelTarget`] provides; moving the cursor between glyphs is the
//! caller's job.

use grisaille_core::{
    Compositor, Level, PixelSource, PixelTarget, Point, Polarity, Rect, RegionClipper,
};

/// Stamping errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GlyphError {
    /// No glyph for this character
    Missing(char),
    /// Glyph bitmap doesn't match its declared size or holds a level above 15
    InvalidBitmap(char),
}

/// Result of stamping one glyph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GlyphMetrics {
    /// Horizontal pen advance
    pub advance: i32,
    /// Surface pixels written, `None` if the glyph was blank or off-surface
    pub drawn: Option<Rect>,
}

/// Draws glyph bitmaps onto a pixel target
pub trait GlyphStamper {
    /// Distance between baselines
    fn line_height(&self) -> u32;

    /// Stamp `ch` with its pen position (on the baseline) at `pen`
    fn stamp<T: PixelTarget + ?Sized>(
        &self,
        target: &mut T,
        ch: char,
        pen: Point,
    ) -> Result<GlyphMetrics, GlyphError>;
}

/// One glyph of a [`BitmapFont`]
///
/// `bitmap` holds one brightness level per byte (0 = black ink,
/// 15 = bare paper); bare paper is never written to the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph<'a> {
    /// Character this glyph draws
    pub code: char,
    /// Bitmap width
    pub width: u32,
    /// Bitmap height
    pub height: u32,
    /// Offset from the pen to the bitmap's left edge
    pub left: i32,
    /// Distance from the baseline up to the bitmap's top edge
    pub top: i32,
    /// Pen advance after this glyph
    pub advance: i32,
    /// `width * height` brightness levels, row-major
    pub bitmap: &'a [u8],
}

/// Font made of pre-rendered glyph bitmaps
#[derive(Debug, Clone, Copy)]
pub struct BitmapFont<'a> {
    glyphs: &'a [Glyph<'a>],
    line_height: u32,
    fallback: Option<char>,
}

impl<'a> BitmapFont<'a> {
    /// Create a font from a glyph table
    pub const fn new(glyphs: &'a [Glyph<'a>], line_height: u32) -> Self {
        Self {
            glyphs,
            line_height,
            fallback: None,
        }
    }

    /// Draw `fallback` for characters the table lacks
    pub const fn with_fallback(mut self, fallback: char) -> Self {
        self.fallback = Some(fallback);
        self
    }

    /// Look up the glyph for `ch`
    pub fn glyph(&self, ch: char) -> Option<&Glyph<'a>> {
        let find = |c: char| self.glyphs.iter().find(|g| g.code == c);
        find(ch).or_else(|| self.fallback.and_then(find))
    }
}

impl GlyphStamper for BitmapFont<'_> {
    fn line_height(&self) -> u32 {
        self.line_height
    }

    fn stamp<T: PixelTarget + ?Sized>(
        &self,
        target: &mut T,
        ch: char,
        pen: Point,
    ) -> Result<GlyphMetrics, GlyphError> {
        let glyph = self.glyph(ch).ok_or(GlyphError::Missing(ch))?;
        let source = PixelSource::byte_per_pixel(glyph.width, glyph.height, glyph.bitmap)
            .map_err(|_| GlyphError::InvalidBitmap(ch))?;
        let origin = pen.offset(glyph.left, -glyph.top);

        let drawn = match target.format().polarity {
            // Brightness is the stored level: copy, keyed on bare paper
            Polarity::ZeroIsDark => target.blit_keyed(origin, &source, Level::MAX),
            Polarity::ZeroIsLight => stamp_inverted(target, origin, &source),
        };

        Ok(GlyphMetrics {
            advance: glyph.advance,
            drawn,
        })
    }
}

/// Per-pixel stamping for targets where level 0 is white
fn stamp_inverted<T: PixelTarget + ?Sized>(
    target: &mut T,
    origin: Point,
    source: &PixelSource<'_>,
) -> Option<Rect> {
    let window = RegionClipper::new(target.bounds()).clip_blit(origin, source.size())?;
    let dest = window.dest();
    for row in 0..dest.height {
        for col in 0..dest.width {
            let Some(brightness) = source.get(window.src_x() + col, window.src_y() + row) else {
                continue;
            };
            if brightness == Level::MAX {
                continue;
            }
            let level = Polarity::ZeroIsLight.from_brightness(brightness);
            target
                .set(dest.x + col as i32, dest.y + row as i32, level)
                .ok()?;
        }
    }
    Some(dest)
}
