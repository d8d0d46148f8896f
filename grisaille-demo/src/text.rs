//! Multi-line text on top of a glyph stamper

use grisaille_core::{PixelTarget, Point, Rect};
use grisaille_display::{GlyphError, GlyphStamper};

/// Pen that stamps strings glyph by glyph
///
/// `\n` returns the pen to the column it started at and moves it down one
/// line. Characters the font lacks are skipped.
pub struct TextWriter<'f, F> {
    font: &'f F,
    left: i32,
    cursor: Point,
}

impl<'f, F: GlyphStamper> TextWriter<'f, F> {
    /// Start writing with the pen at `cursor`
    pub fn new(font: &'f F, cursor: Point) -> Self {
        Self {
            font,
            left: cursor.x,
            cursor,
        }
    }

    /// Current pen position
    pub fn cursor(&self) -> Point {
        self.cursor
    }

    /// Stamp `text`, returning the area written
    pub fn write<T: PixelTarget + ?Sized>(
        &mut self,
        target: &mut T,
        text: &str,
    ) -> Result<Option<Rect>, GlyphError> {
        let mut drawn: Option<Rect> = None;
        for ch in text.chars() {
            if ch == '\n' {
                self.newline();
                continue;
            }
            match self.font.stamp(target, ch, self.cursor) {
                Ok(metrics) => {
                    self.cursor = self.cursor.offset(metrics.advance, 0);
                    drawn = match (drawn, metrics.drawn) {
                        (Some(a), Some(b)) => Some(a.union(&b)),
                        (a, b) => a.or(b),
                    };
                }
                Err(GlyphError::Missing(_)) => {
                    trace!("no glyph, skipped");
                }
                Err(e) => return Err(e),
            }
        }
        Ok(drawn)
    }

    /// Stamp `text` and move to the next line
    pub fn writeln<T: PixelTarget + ?Sized>(
        &mut self,
        target: &mut T,
        text: &str,
    ) -> Result<Option<Rect>, GlyphError> {
        let drawn = self.write(target, text)?;
        self.newline();
        Ok(drawn)
    }

    fn newline(&mut self) {
        let step = i32::try_from(self.font.line_height()).unwrap_or(i32::MAX);
        self.cursor = Point::new(self.left, self.cursor.y.saturating_add(step));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grisaille_core::surface::buffer_len;
    use grisaille_core::{Level, PackedSurface, PixelFormat};
    use grisaille_display::{BitmapFont, Glyph};

    const BLOCK: [u8; 4] = [0; 4];

    const GLYPHS: [Glyph<'static>; 1] = [Glyph {
        code: 'a',
        width: 2,
        height: 2,
        left: 0,
        top: 2,
        advance: 3,
        bitmap: &BLOCK,
    }];

    fn surface() -> PackedSurface<Vec<u8>> {
        PackedSurface::new(vec![0xFF; buffer_len(16, 16).unwrap()], 16, 16, PixelFormat::default())
            .unwrap()
    }

    #[test]
    fn test_advance_and_newline() {
        let font = BitmapFont::new(&GLYPHS, 4);
        let mut s = surface();
        let mut writer = TextWriter::new(&font, Point::new(1, 3));

        let drawn = writer.write(&mut s, "aa\na").unwrap();
        assert_eq!(drawn, Some(Rect::new(1, 1, 5, 6)));
        assert_eq!(writer.cursor(), Point::new(4, 7));

        assert_eq!(s.get(1, 1).unwrap(), Level::MIN);
        assert_eq!(s.get(3, 1).unwrap(), Level::MAX);
        assert_eq!(s.get(4, 2).unwrap(), Level::MIN);
        assert_eq!(s.get(2, 6).unwrap(), Level::MIN);
    }

    #[test]
    fn test_missing_glyphs_skipped() {
        let font = BitmapFont::new(&GLYPHS, 4);
        let mut s = surface();
        let mut writer = TextWriter::new(&font, Point::new(0, 2));
        let drawn = writer.writeln(&mut s, "\u{27b8} a").unwrap();
        assert_eq!(drawn, Some(Rect::new(0, 0, 2, 2)));
        assert_eq!(writer.cursor(), Point::new(0, 6));
    }

    #[test]
    fn test_nothing_drawn() {
        let font = BitmapFont::new(&GLYPHS, 4);
        let mut s = surface();
        let mut writer = TextWriter::new(&font, Point::new(0, 2));
        assert_eq!(writer.write(&mut s, "zz").unwrap(), None);
    }
}
