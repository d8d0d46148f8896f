//! `embedded-graphics` drawing on packed surfaces
//!
//! `Gray4` luma is a brightness (0 = black); the surface polarity decides
//! the stored level. Points off the surface are skipped, so primitives and
//! fonts from the ecosystem clip the same way the compositor does.

use core::convert::Infallible;

use embedded_graphics_core::draw_target::DrawTarget;
use embedded_graphics_core::geometry::{OriginDimensions, Point as EgPoint, Size as EgSize};
use embedded_graphics_core::pixelcolor::{Gray4, GrayColor};
use embedded_graphics_core::primitives::Rectangle;
use embedded_graphics_core::Pixel;

use crate::geometry::Rect;
use crate::pixel::Level;

use super::packed::PackedSurface;

impl<B> PackedSurface<B>
where
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    fn stored_level(&self, color: Gray4) -> Level {
        self.format()
            .polarity
            .from_brightness(Level::from_low_nibble(color.luma()))
    }
}

impl<B> OriginDimensions for PackedSurface<B>
where
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    fn size(&self) -> EgSize {
        EgSize::new(self.width(), self.height())
    }
}

impl<B> DrawTarget for PackedSurface<B>
where
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    type Color = Gray4;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(EgPoint { x, y }, color) in pixels {
            let level = self.stored_level(color);
            // Off-surface points are dropped
            let _ = self.set(x, y, level);
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let rect = Rect::new(
            area.top_left.x,
            area.top_left.y,
            area.size.width,
            area.size.height,
        );
        let level = self.stored_level(color);
        self.fill_rect(rect, level);
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        let level = self.stored_level(color);
        self.fill(level);
        Ok(())
    }
}
