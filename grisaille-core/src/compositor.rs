//! Compositing primitives
//!
//! Lines, blits and area clears on top of any [`PixelTarget`]. Every
//! primitive clips first and silently does nothing when the request lies
//! entirely off the surface; the return value is the rectangle actually
//! written, which callers feed into damage tracking.
//!
//! The compositor keeps no state of its own.

use crate::geometry::{Point, Rect, RegionClipper};
use crate::pixel::Level;
use crate::source::PixelSource;
use crate::surface::PixelTarget;

/// Drawing primitives for pixel targets
///
/// Blanket-implemented for every [`PixelTarget`].
pub trait Compositor: PixelTarget {
    /// Draw `length` pixels to the right of (x, y)
    fn draw_hline(&mut self, x: i32, y: i32, length: u32, level: Level) -> Option<Rect> {
        let span = RegionClipper::new(self.bounds()).clip_row(x, y, length)?;
        self.fill_rect(span, level)
    }

    /// Draw `length` pixels downward from (x, y)
    fn draw_vline(&mut self, x: i32, y: i32, length: u32, level: Level) -> Option<Rect> {
        let span = RegionClipper::new(self.bounds()).clip_column(x, y, length)?;
        self.fill_rect(span, level)
    }

    /// Draw a one-pixel outline of `rect`
    fn draw_rect(&mut self, rect: Rect, level: Level) -> Option<Rect> {
        if rect.is_empty() {
            return None;
        }
        // Far edges past i32::MAX are off-surface anyway
        let bottom = i32::try_from(rect.bottom() - 1).unwrap_or(i32::MAX);
        let right = i32::try_from(rect.right() - 1).unwrap_or(i32::MAX);

        let edges = [
            self.draw_hline(rect.x, rect.y, rect.width, level),
            self.draw_hline(rect.x, bottom, rect.width, level),
            self.draw_vline(rect.x, rect.y, rect.height, level),
            self.draw_vline(right, rect.y, rect.height, level),
        ];
        edges
            .into_iter()
            .flatten()
            .reduce(|acc, edge| acc.union(&edge))
    }

    /// Copy `source` with its top-left corner at `origin`
    ///
    /// Parts outside the surface are dropped; the visible part lands
    /// exactly where it would on an unbounded surface.
    fn blit(&mut self, origin: Point, source: &PixelSource<'_>) -> Option<Rect> {
        let window = RegionClipper::new(self.bounds()).clip_blit(origin, source.size())?;
        self.copy_window(&window, source, None)
    }

    /// Like [`blit`](Self::blit), leaving pixels where the source equals `key`
    fn blit_keyed(&mut self, origin: Point, source: &PixelSource<'_>, key: Level) -> Option<Rect> {
        let window = RegionClipper::new(self.bounds()).clip_blit(origin, source.size())?;
        self.copy_window(&window, source, Some(key))
    }

    /// Reset `rect` to the blank (lightest) level
    fn clear_area(&mut self, rect: Rect) -> Option<Rect> {
        let blank = self.format().polarity.lightest();
        self.fill_rect(rect, blank)
    }

    /// Set every pixel of `rect` to `level`, leaving the rest untouched
    fn clear_area_with(&mut self, rect: Rect, level: Level) -> Option<Rect> {
        self.fill_rect(rect, level)
    }
}

impl<T: PixelTarget + ?Sized> Compositor for T {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SurfaceError;
    use crate::geometry::clip;
    use crate::pixel::{NibbleOrder, PixelFormat, Polarity};
    use crate::surface::{buffer_len, PackedSurface};
    use proptest::prelude::*;

    fn lvl(v: u8) -> Level {
        Level::new(v).unwrap()
    }

    fn surface(width: u32, height: u32) -> PackedSurface<Vec<u8>> {
        let len = buffer_len(width, height).unwrap();
        PackedSurface::new(vec![0xFF; len], width, height, PixelFormat::default()).unwrap()
    }

    fn checksum(s: &PackedSurface<Vec<u8>>) -> u64 {
        s.as_bytes()
            .iter()
            .fold(0u64, |acc, &b| acc.wrapping_mul(131).wrapping_add(b as u64))
    }

    /// Minimal target without any fast paths
    struct Grid {
        w: u32,
        h: u32,
        cells: Vec<Level>,
    }

    impl PixelTarget for Grid {
        fn bounds(&self) -> Rect {
            Rect::new(0, 0, self.w, self.h)
        }

        fn format(&self) -> PixelFormat {
            PixelFormat::new(NibbleOrder::EvenLow, Polarity::ZeroIsLight)
        }

        fn get(&self, x: i32, y: i32) -> Result<Level, SurfaceError> {
            if self.bounds().contains(x, y) {
                Ok(self.cells[(y as u32 * self.w + x as u32) as usize])
            } else {
                Err(SurfaceError::OutOfBounds { x, y })
            }
        }

        fn set(&mut self, x: i32, y: i32, level: Level) -> Result<(), SurfaceError> {
            if self.bounds().contains(x, y) {
                self.cells[(y as u32 * self.w + x as u32) as usize] = level;
                Ok(())
            } else {
                Err(SurfaceError::OutOfBounds { x, y })
            }
        }
    }

    #[test]
    fn test_reference_scenario() {
        let mut s = surface(100, 100);

        assert_eq!(s.draw_hline(20, 20, 60, lvl(0)), Some(Rect::new(20, 20, 60, 1)));
        for x in 20..80 {
            assert_eq!(s.get(x, 20).unwrap(), lvl(0));
        }
        assert_eq!(s.get(19, 20).unwrap(), lvl(15));
        assert_eq!(s.get(80, 20).unwrap(), lvl(15));

        let block = [3u8; 25];
        let src = PixelSource::byte_per_pixel(5, 5, &block).unwrap();
        s.blit(Point::new(10, 10), &src);
        assert_eq!(s.get(12, 12).unwrap(), lvl(3));

        s.clear_area_with(Rect::new(0, 0, 100, 100), lvl(15));
        for y in 0..100 {
            for x in 0..100 {
                assert_eq!(s.get(x, y).unwrap(), lvl(15));
            }
        }
    }

    #[test]
    fn test_vline_odd_column_keeps_neighbours() {
        let mut s = surface(10, 10);
        s.draw_vline(3, 2, 5, lvl(1));
        for y in 0..10 {
            let expected = if (2..7).contains(&y) { lvl(1) } else { lvl(15) };
            assert_eq!(s.get(3, y).unwrap(), expected);
            assert_eq!(s.get(2, y).unwrap(), lvl(15));
            assert_eq!(s.get(4, y).unwrap(), lvl(15));
        }
    }

    #[test]
    fn test_lines_outside_are_noops() {
        let mut s = surface(20, 20);
        let before = checksum(&s);
        assert_eq!(s.draw_hline(0, 20, 10, lvl(0)), None);
        assert_eq!(s.draw_hline(-30, 5, 30, lvl(0)), None);
        assert_eq!(s.draw_vline(20, 0, 10, lvl(0)), None);
        assert_eq!(s.draw_vline(3, -10, 10, lvl(0)), None);
        assert_eq!(s.draw_hline(2, 2, 0, lvl(0)), None);
        assert_eq!(checksum(&s), before);
    }

    #[test]
    fn test_hline_clipped_on_both_sides() {
        let mut s = surface(10, 4);
        assert_eq!(s.draw_hline(-5, 1, 100, lvl(2)), Some(Rect::new(0, 1, 10, 1)));
        assert!((0..10).all(|x| s.get(x, 1).unwrap() == lvl(2)));
        assert!((0..10).all(|x| s.get(x, 0).unwrap() == lvl(15)));
    }

    #[test]
    fn test_draw_rect_outline() {
        let mut s = surface(12, 12);
        let touched = s.draw_rect(Rect::new(2, 2, 5, 4), lvl(0));
        assert_eq!(touched, Some(Rect::new(2, 2, 5, 4)));
        assert_eq!(s.get(2, 2).unwrap(), lvl(0));
        assert_eq!(s.get(6, 5).unwrap(), lvl(0));
        assert_eq!(s.get(4, 3).unwrap(), lvl(15));
        assert_eq!(s.draw_rect(Rect::new(1, 1, 0, 3), lvl(0)), None);
    }

    #[test]
    fn test_blit_straddling_right_bottom_edges() {
        let mut s = surface(10, 10);
        let data: Vec<u8> = (0..16).map(|i| (i % 15) as u8).collect();
        let src = PixelSource::byte_per_pixel(4, 4, &data).unwrap();

        assert_eq!(s.blit(Point::new(8, 7), &src), Some(Rect::new(8, 7, 2, 3)));
        for y in 0..3u32 {
            for x in 0..2u32 {
                assert_eq!(
                    s.get(8 + x as i32, 7 + y as i32).unwrap(),
                    src.get(x, y).unwrap()
                );
            }
        }
        // Nothing left of the blit changed
        for y in 0..10 {
            for x in 0..8 {
                assert_eq!(s.get(x, y).unwrap(), lvl(15));
            }
        }
    }

    #[test]
    fn test_blit_clipped_left_skips_source_columns() {
        let mut s = surface(8, 4);
        // Columns hold their own index
        let data: Vec<u8> = (0..24).map(|i| (i % 6) as u8).collect();
        let src = PixelSource::byte_per_pixel(6, 4, &data).unwrap();

        s.blit(Point::new(-2, 0), &src);
        for x in 0..4 {
            assert_eq!(s.get(x, 0).unwrap(), lvl(x as u8 + 2));
        }
        assert_eq!(s.get(4, 0).unwrap(), lvl(15));
    }

    #[test]
    fn test_blit_packed_source() {
        let mut s = surface(10, 3);
        // 3x2 packed image, EvenLow: row bytes (p0|p1<<4), (p2)
        let data = [0x21, 0x03, 0x54, 0x06];
        let src = PixelSource::packed(3, 2, &data).unwrap();
        s.blit(Point::new(5, 1), &src);
        assert_eq!(s.get(5, 1).unwrap(), lvl(1));
        assert_eq!(s.get(6, 1).unwrap(), lvl(2));
        assert_eq!(s.get(7, 1).unwrap(), lvl(3));
        assert_eq!(s.get(7, 2).unwrap(), lvl(6));
        // Padding nibble of the source is never copied
        assert_eq!(s.get(8, 1).unwrap(), lvl(15));
        assert_eq!(s.get(4, 1).unwrap(), lvl(15));
    }

    #[test]
    fn test_blit_fully_outside() {
        let mut s = surface(10, 10);
        let src = PixelSource::byte_per_pixel(2, 2, &[0; 4]).unwrap();
        let before = checksum(&s);
        assert_eq!(s.blit(Point::new(10, 0), &src), None);
        assert_eq!(s.blit(Point::new(-2, -2), &src), None);
        assert_eq!(checksum(&s), before);
    }

    #[test]
    fn test_blit_keyed_leaves_background() {
        let mut s = surface(4, 1);
        s.fill(lvl(9));
        let glyph = PixelSource::byte_per_pixel(4, 1, &[0, 5, 0, 7]).unwrap();
        s.blit_keyed(Point::new(0, 0), &glyph, lvl(0));
        let row: Vec<u8> = (0..4).map(|x| s.get(x, 0).unwrap().value()).collect();
        assert_eq!(row, vec![9, 5, 9, 7]);
    }

    #[test]
    fn test_clear_area_uses_polarity() {
        let mut s = surface(6, 6);
        s.fill(lvl(0));
        s.clear_area(Rect::new(1, 1, 2, 2));
        assert_eq!(s.get(1, 1).unwrap(), lvl(15));
        assert_eq!(s.get(0, 0).unwrap(), lvl(0));

        let mut grid = Grid {
            w: 4,
            h: 4,
            cells: vec![lvl(7); 16],
        };
        grid.clear_area(Rect::new(0, 0, 2, 2));
        assert_eq!(grid.get(1, 1).unwrap(), lvl(0));
        assert_eq!(grid.get(2, 2).unwrap(), lvl(7));
    }

    #[test]
    fn test_generic_target_blit_and_lines() {
        let mut grid = Grid {
            w: 5,
            h: 5,
            cells: vec![lvl(0); 25],
        };
        grid.draw_hline(-1, 4, 3, lvl(4));
        assert_eq!(grid.get(0, 4).unwrap(), lvl(4));
        assert_eq!(grid.get(1, 4).unwrap(), lvl(4));
        assert_eq!(grid.get(2, 4).unwrap(), lvl(0));

        let src = PixelSource::packed(2, 2, &[0x98, 0xBA]).unwrap();
        grid.blit(Point::new(4, 3), &src);
        assert_eq!(grid.get(4, 3).unwrap(), lvl(8));
        assert_eq!(grid.get(4, 4).unwrap(), lvl(0xA));
    }

    #[test]
    fn test_generic_target_rejects_mismatched_window() {
        let mut grid = Grid {
            w: 8,
            h: 8,
            cells: vec![lvl(3); 64],
        };
        let window = RegionClipper::new(grid.bounds())
            .clip_blit(Point::new(0, 0), crate::geometry::Size::new(8, 8))
            .unwrap();
        let src = PixelSource::packed(2, 2, &[0x11, 0x11]).unwrap();

        assert_eq!(grid.copy_window(&window, &src, None), None);
        assert!(grid.cells.iter().all(|&c| c == lvl(3)));

        let fitting = RegionClipper::new(grid.bounds())
            .clip_blit(Point::new(7, 7), src.size())
            .unwrap();
        assert_eq!(grid.copy_window(&fitting, &src, None), Some(Rect::new(7, 7, 1, 1)));
        assert_eq!(grid.get(7, 7).unwrap(), lvl(1));
    }

    proptest! {
        #[test]
        fn prop_clear_area_complement_unchanged(
            x in -20i32..60, y in -20i32..60, w in 0u32..70, h in 0u32..70, v in 0u8..16,
        ) {
            let mut s = surface(40, 30);
            for py in 0..30 {
                for px in 0..40 {
                    s.set(px, py, lvl(((px * 7 + py * 3) % 16) as u8)).unwrap();
                }
            }
            let area = Rect::new(x, y, w, h);
            let mut outside = Vec::new();
            for py in 0..30 {
                for px in 0..40 {
                    if !area.contains(px, py) {
                        outside.push(s.get(px, py).unwrap());
                    }
                }
            }

            s.clear_area_with(area, lvl(v));

            let mut after = Vec::new();
            for py in 0..30 {
                for px in 0..40 {
                    if area.contains(px, py) {
                        prop_assert_eq!(s.get(px, py).unwrap(), lvl(v));
                    } else {
                        after.push(s.get(px, py).unwrap());
                    }
                }
            }
            prop_assert_eq!(outside, after);
        }

        #[test]
        fn prop_blit_matches_source(ox in -12i32..24, oy in -12i32..24, w in 1u32..12, h in 1u32..12) {
            let mut s = surface(17, 15);
            let data: Vec<u8> = (0..(w * h)).map(|i| (i % 13) as u8).collect();
            let src = PixelSource::byte_per_pixel(w, h, &data).unwrap();
            s.blit(Point::new(ox, oy), &src);

            for py in 0..15i32 {
                for px in 0..17i32 {
                    let (sx, sy) = (px - ox, py - oy);
                    let expected = if sx >= 0 && sy >= 0 && (sx as u32) < w && (sy as u32) < h {
                        src.get(sx as u32, sy as u32).unwrap()
                    } else {
                        lvl(15)
                    };
                    prop_assert_eq!(s.get(px, py).unwrap(), expected);
                }
            }
        }

        #[test]
        fn prop_packed_blit_matches_source(ox in -9i32..20, oy in -5i32..10, w in 1u32..10, h in 1u32..6) {
            let mut s = surface(16, 8);
            let stride = w.div_ceil(2);
            let data: Vec<u8> = (0..(stride * h)).map(|i| (i as u8).wrapping_mul(53)).collect();
            let src = PixelSource::packed(w, h, &data).unwrap();
            let drawn = s.blit(Point::new(ox, oy), &src);
            prop_assert_eq!(drawn, clip(Rect::new(ox, oy, w, h), s.bounds()));

            for py in 0..8i32 {
                for px in 0..16i32 {
                    let (sx, sy) = (px - ox, py - oy);
                    let expected = if sx >= 0 && sy >= 0 && (sx as u32) < w && (sy as u32) < h {
                        src.get(sx as u32, sy as u32).unwrap()
                    } else {
                        lvl(15)
                    };
                    prop_assert_eq!(s.get(px, py).unwrap(), expected);
                }
            }
        }
    }
}
