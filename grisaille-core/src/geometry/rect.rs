//! Points, sizes and rectangles

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A position on (or off) the surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// Create a point
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Offset by (dx, dy), saturating at the `i32` range
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }
}

/// Width and height in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    /// Create a size
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// True if either dimension is zero
    pub const fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// An axis-aligned rectangle
///
/// `x`/`y` is the top-left corner. Right and bottom edges are exclusive and
/// computed in `i64` so that no origin/size combination overflows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    /// Create a rectangle
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle anchored at the origin
    pub const fn from_size(size: Size) -> Self {
        Self::new(0, 0, size.width, size.height)
    }

    /// Rectangle at `origin` with `size`
    pub const fn at(origin: Point, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    /// Top-left corner
    pub const fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Width and height
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Exclusive right edge
    pub const fn right(&self) -> i64 {
        self.x as i64 + self.width as i64
    }

    /// Exclusive bottom edge
    pub const fn bottom(&self) -> i64 {
        self.y as i64 + self.height as i64
    }

    /// True if the rectangle covers no pixels
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Number of pixels covered
    pub const fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// True if (x, y) lies inside
    pub fn contains(&self, x: i32, y: i32) -> bool {
        let (x, y) = (x as i64, y as i64);
        x >= self.x as i64 && x < self.right() && y >= self.y as i64 && y < self.bottom()
    }

    /// Overlapping part of two rectangles, `None` if they don't overlap
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        if self.is_empty() || other.is_empty() {
            return None;
        }

        let left = self.x.max(other.x);
        let top = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if right <= left as i64 || bottom <= top as i64 {
            return None;
        }

        // Both spans are bounded by the smaller input dimension
        Some(Rect::new(
            left,
            top,
            (right - left as i64) as u32,
            (bottom - top as i64) as u32,
        ))
    }

    /// Smallest rectangle covering both; empty inputs are ignored
    pub fn union(&self, other: &Rect) -> Rect {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }

        let left = self.x.min(other.x);
        let top = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());

        Rect::new(
            left,
            top,
            span_to_u32(right - left as i64),
            span_to_u32(bottom - top as i64),
        )
    }

    /// Widen to whole packed bytes: even left edge, even right edge
    ///
    /// Empty rectangles are returned unchanged.
    pub fn byte_aligned(&self) -> Rect {
        if self.is_empty() {
            return *self;
        }
        let left = self.x & !1;
        let right = (self.right() + 1) & !1;
        Rect::new(left, self.y, span_to_u32(right - left as i64), self.height)
    }
}

fn span_to_u32(span: i64) -> u32 {
    u32::try_from(span).unwrap_or(u32::MAX)
}
