//! Packed 4-bit grayscale framebuffer for e-paper panels
//!
//! This crate contains everything that touches the in-memory display
//! surface and nothing that touches hardware:
//!
//! - Pixel levels and the nibble/polarity conventions of the panel
//! - Rectangle geometry and region clipping
//! - The packed two-pixels-per-byte surface
//! - Borrowed pixel sources (packed images, byte-per-pixel glyphs)
//! - Compositing primitives (lines, blits, area clears)
//! - Panel configuration types
//!
//! # Byte layout
//!
//! ```text
//!  byte n of a row:  ┌────────┬────────┐
//!                    │ hi 4b  │ lo 4b  │
//!                    └────────┴────────┘
//!  EvenLow  (default):  x=2n+1   x=2n
//!  EvenHigh:            x=2n     x=2n+1
//! ```
//!
//! Each row occupies `ceil(width / 2)` bytes; the physical driver decodes
//! the buffer directly, so the layout above is part of the public contract.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

#[cfg(feature = "alloc")]
extern crate alloc;

#[macro_use]
mod fmt;

pub mod compositor;
pub mod config;
pub mod error;
pub mod geometry;
pub mod pixel;
pub mod source;
pub mod surface;

pub use compositor::Compositor;
pub use config::{GlyphSet, PanelConfig, PanelVariant};
pub use error::SurfaceError;
pub use geometry::{clip, BlitWindow, Point, Rect, RegionClipper, Size};
pub use pixel::{Level, NibbleOrder, PixelFormat, Polarity};
pub use source::{PixelSource, SourceFormat};
pub use surface::{PackedSurface, PixelTarget, RegionView};
