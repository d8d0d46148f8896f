//! Surface geometry
//!
//! Rectangles may start at negative coordinates and extend past the
//! surface; clipping reduces them to the addressable part.

pub mod clip;
pub mod rect;

pub use clip::{clip, BlitWindow, RegionClipper};
pub use rect::{Point, Rect, Size};
