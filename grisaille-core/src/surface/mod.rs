//! Packed framebuffer surface
//!
//! - [`PackedSurface`] owns (or borrows) the two-pixels-per-byte storage
//! - [`PixelTarget`] is the per-pixel capability compositing and glyph
//!   stamping are written against
//! - [`RegionView`] is the byte-range handed to the panel driver
//!
//! With the `embedded-graphics` feature, `PackedSurface` is also a
//! `DrawTarget<Color = Gray4>`.

#[cfg(feature = "embedded-graphics")]
mod graphics;
mod packed;
mod region;
mod target;

pub use packed::{buffer_len, PackedSurface};
pub use region::{RegionRows, RegionView};
pub use target::PixelTarget;
