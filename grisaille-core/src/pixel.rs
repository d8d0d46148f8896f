//! Grayscale levels and packing conventions
//!
//! The panel stores 16 gray levels per pixel, two pixels per byte. Which
//! nibble carries the even column and whether level 0 is black or white are
//! properties of the target hardware, so both are configuration values
//! rather than constants.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::SurfaceError;

/// A 4-bit grayscale level (0..=15)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u8", into = "u8"))]
pub struct Level(u8);

impl Level {
    /// Lowest stored value
    pub const MIN: Level = Level(0);
    /// Highest stored value
    pub const MAX: Level = Level(15);

    /// Create a level, returning `None` above 15
    pub const fn new(value: u8) -> Option<Self> {
        if value <= 15 {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Create a level from the low nibble of `value`
    pub const fn from_low_nibble(value: u8) -> Self {
        Self(value & 0x0F)
    }

    /// Raw value
    pub const fn value(self) -> u8 {
        self.0
    }

    /// The level packed into both nibbles of a byte
    pub const fn packed_pair(self) -> u8 {
        (self.0 << 4) | self.0
    }

    /// Mirror the level (0 <-> 15)
    pub const fn inverted(self) -> Self {
        Self(15 - self.0)
    }
}

impl TryFrom<u8> for Level {
    type Error = SurfaceError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Level::new(value).ok_or(SurfaceError::InvalidLevel(value))
    }
}

impl From<Level> for u8 {
    fn from(level: Level) -> Self {
        level.0
    }
}

/// Which half of a byte holds the even column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum NibbleOrder {
    /// Even x in bits 0..4, odd x in bits 4..8 (ESP32 parallel EPD layout)
    #[default]
    EvenLow,
    /// Even x in bits 4..8, odd x in bits 0..4
    EvenHigh,
}

impl NibbleOrder {
    /// Bit shift of column `x` within its byte
    #[inline]
    pub const fn shift(self, x: u32) -> u32 {
        let odd = x & 1 == 1;
        match (self, odd) {
            (NibbleOrder::EvenLow, false) | (NibbleOrder::EvenHigh, true) => 0,
            (NibbleOrder::EvenLow, true) | (NibbleOrder::EvenHigh, false) => 4,
        }
    }

    /// Extract the level of column `x` from its byte
    #[inline]
    pub const fn read(self, byte: u8, x: u32) -> Level {
        Level::from_low_nibble(byte >> self.shift(x))
    }

    /// Replace the nibble of column `x`, leaving the neighbour intact
    #[inline]
    pub const fn write(self, byte: u8, x: u32, level: Level) -> u8 {
        let shift = self.shift(x);
        (byte & !(0x0F << shift)) | (level.value() << shift)
    }
}

/// Mapping between stored levels and perceived brightness
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Polarity {
    /// 0 = black, 15 = white
    #[default]
    ZeroIsDark,
    /// 0 = white, 15 = black
    ZeroIsLight,
}

impl Polarity {
    /// Level rendered as black
    pub const fn darkest(self) -> Level {
        match self {
            Polarity::ZeroIsDark => Level::MIN,
            Polarity::ZeroIsLight => Level::MAX,
        }
    }

    /// Level rendered as white (the blank-panel level)
    pub const fn lightest(self) -> Level {
        self.darkest().inverted()
    }

    /// Convert a brightness (0 = black .. 15 = white) into a stored level
    pub const fn from_brightness(self, brightness: Level) -> Level {
        match self {
            Polarity::ZeroIsDark => brightness,
            Polarity::ZeroIsLight => brightness.inverted(),
        }
    }
}

/// Packing convention of a surface or packed image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PixelFormat {
    /// Nibble order within each byte
    pub order: NibbleOrder,
    /// Level polarity
    pub polarity: Polarity,
}

impl PixelFormat {
    /// Create a pixel format
    pub const fn new(order: NibbleOrder, polarity: Polarity) -> Self {
        Self { order, polarity }
    }
}
