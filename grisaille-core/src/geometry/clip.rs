//! Region clipping
//!
//! Reduces requested rectangles to the addressable part of a surface. An
//! empty result means "nothing to do" and is never an error.

use super::rect::{Point, Rect, Size};

/// Intersection of `requested` with `bounds`
///
/// Returns `None` when the rectangles don't overlap or either is degenerate.
#[inline]
pub fn clip(requested: Rect, bounds: Rect) -> Option<Rect> {
    requested.intersect(&bounds)
}

/// Destination and source coordinates for a clipped blit
///
/// Only [`RegionClipper::clip_blit`] builds one. `dest` lies inside the
/// clipper bounds; (`src_x`, `src_y`) is where the copy starts inside the
/// source so both sides advance in lock-step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BlitWindow {
    dest: Rect,
    src_x: u32,
    src_y: u32,
    source: Size,
}

impl BlitWindow {
    /// Clipped destination rectangle
    pub const fn dest(&self) -> Rect {
        self.dest
    }

    /// First source column to copy
    pub const fn src_x(&self) -> u32 {
        self.src_x
    }

    /// First source row to copy
    pub const fn src_y(&self) -> u32 {
        self.src_y
    }

    /// Size of the source the window was clipped for
    pub const fn source_size(&self) -> Size {
        self.source
    }

    /// Whether the window can be copied from a `source`-sized image into
    /// a target covering `bounds`
    pub fn fits(&self, source: Size, bounds: Rect) -> bool {
        let src_right = self.src_x as u64 + self.dest.width as u64;
        let src_bottom = self.src_y as u64 + self.dest.height as u64;
        source == self.source
            && src_right <= source.width as u64
            && src_bottom <= source.height as u64
            && clip(self.dest, bounds) == Some(self.dest)
    }
}

/// Clipper bound to one surface rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RegionClipper {
    bounds: Rect,
}

impl RegionClipper {
    /// Create a clipper for the given surface bounds
    pub const fn new(bounds: Rect) -> Self {
        Self { bounds }
    }

    /// Surface bounds this clipper clips against
    pub const fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Clip a rectangle to the surface
    pub fn clip(&self, requested: Rect) -> Option<Rect> {
        clip(requested, self.bounds)
    }

    /// Clip a single-row span starting at (x, y)
    pub fn clip_row(&self, x: i32, y: i32, length: u32) -> Option<Rect> {
        self.clip(Rect::new(x, y, length, 1))
    }

    /// Clip a single-column span starting at (x, y)
    pub fn clip_column(&self, x: i32, y: i32, length: u32) -> Option<Rect> {
        self.clip(Rect::new(x, y, 1, length))
    }

    /// Clip a blit of a `source`-sized image placed at `origin`
    ///
    /// If the destination loses `d` columns (rows) on the left (top), the
    /// source offset skips the same `d` columns (rows).
    pub fn clip_blit(&self, origin: Point, source: Size) -> Option<BlitWindow> {
        let dest = clip(Rect::at(origin, source), self.bounds)?;

        // The clipped corner never lies before the origin
        let src_x = (dest.x as i64 - origin.x as i64) as u32;
        let src_y = (dest.y as i64 - origin.y as i64) as u32;

        Some(BlitWindow {
            dest,
            src_x,
            src_y,
            source,
        })
    }
}
