//! Byte ranges handed to the panel driver
//!
//! The driver decodes packed bytes directly, so a view always starts on a
//! byte boundary of its backing buffer: the first nibble of every row (in
//! the view's nibble order) is column `area.x`.

use core::iter::FusedIterator;

use crate::geometry::Rect;
use crate::pixel::PixelFormat;

/// A rectangle of packed pixel rows, borrowed from a surface or image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionView<'a> {
    area: Rect,
    data: &'a [u8],
    stride: usize,
    first_byte: usize,
    row_bytes: usize,
    format: PixelFormat,
}

impl<'a> RegionView<'a> {
    pub(crate) const fn new(
        area: Rect,
        data: &'a [u8],
        stride: usize,
        first_byte: usize,
        row_bytes: usize,
        format: PixelFormat,
    ) -> Self {
        Self {
            area,
            data,
            stride,
            first_byte,
            row_bytes,
            format,
        }
    }

    /// Panel rectangle covered by the rows
    pub const fn area(&self) -> Rect {
        self.area
    }

    /// Bytes in each row
    pub const fn row_bytes(&self) -> usize {
        self.row_bytes
    }

    /// Packing convention of the bytes
    pub const fn format(&self) -> PixelFormat {
        self.format
    }

    /// Total payload bytes
    pub const fn len(&self) -> usize {
        self.row_bytes * self.area.height as usize
    }

    /// True if the view carries no bytes
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate rows top to bottom
    pub fn rows(&self) -> RegionRows<'a> {
        RegionRows {
            data: self.data,
            stride: self.stride,
            next: self.first_byte,
            row_bytes: self.row_bytes,
            remaining: self.area.height as usize,
        }
    }
}

/// Iterator over the rows of a [`RegionView`]
#[derive(Debug, Clone)]
pub struct RegionRows<'a> {
    data: &'a [u8],
    stride: usize,
    next: usize,
    row_bytes: usize,
    remaining: usize,
}

impl<'a> Iterator for RegionRows<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let row = self.data.get(self.next..self.next + self.row_bytes)?;
        self.remaining -= 1;
        self.next += self.stride;
        Some(row)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for RegionRows<'_> {}

impl FusedIterator for RegionRows<'_> {}
