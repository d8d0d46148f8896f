//! Surface errors
//!
//! Empty clip results are not errors: they come back as `None` and callers
//! treat them as a no-op.

use core::fmt;

/// Errors raised by the packed surface and pixel sources
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SurfaceError {
    /// Coordinate outside the surface (unclipped direct access)
    OutOfBounds {
        /// Requested column
        x: i32,
        /// Requested row
        y: i32,
    },
    /// Buffer length disagrees with the declared geometry and format
    InvalidBuffer {
        /// Bytes the geometry requires
        expected: usize,
        /// Bytes actually supplied
        actual: usize,
    },
    /// Grayscale level above 15
    InvalidLevel(u8),
    /// Zero width or height
    InvalidDimensions,
    /// Backing storage could not be allocated
    AllocationFailed,
}

impl fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SurfaceError::OutOfBounds { x, y } => write!(f, "pixel ({x}, {y}) out of bounds"),
            SurfaceError::InvalidBuffer { expected, actual } => {
                write!(f, "buffer holds {actual} bytes, expected {expected}")
            }
            SurfaceError::InvalidLevel(v) => write!(f, "level {v} exceeds 15"),
            SurfaceError::InvalidDimensions => f.write_str("surface dimensions must be non-zero"),
            SurfaceError::AllocationFailed => f.write_str("framebuffer allocation failed"),
        }
    }
}
