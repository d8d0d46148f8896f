//! Panel configuration types

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::SurfaceError;
use crate::geometry::Rect;
use crate::pixel::PixelFormat;
use crate::surface::buffer_len;

/// Supported e-paper panels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PanelVariant {
    /// 9.7" ED097OC4, 1200x825
    #[default]
    Ed097oc4,
    /// 6" ED060SC4, 800x600
    Ed060sc4,
}

impl PanelVariant {
    /// Native resolution (width, height)
    pub const fn resolution(self) -> (u32, u32) {
        match self {
            PanelVariant::Ed097oc4 => (1200, 825),
            PanelVariant::Ed060sc4 => (800, 600),
        }
    }

    /// Glyph set sized for this panel
    pub const fn glyph_set(self) -> GlyphSet {
        match self {
            PanelVariant::Ed097oc4 => GlyphSet::FiraSans,
            PanelVariant::Ed060sc4 => GlyphSet::FiraSans12pt,
        }
    }

    /// Short name for logs
    pub const fn name(self) -> &'static str {
        match self {
            PanelVariant::Ed097oc4 => "ED097OC4",
            PanelVariant::Ed060sc4 => "ED060SC4",
        }
    }
}

/// Font family/size selected for a panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum GlyphSet {
    /// Fira Sans at the large-panel size
    #[default]
    FiraSans,
    /// Fira Sans 12 pt, for the 6" panel
    FiraSans12pt,
}

/// Runtime panel configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PanelConfig {
    /// Panel model
    pub variant: PanelVariant,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Glyph set used for text on this panel
    pub glyph_set: GlyphSet,
    /// Nibble order and polarity the panel driver expects
    pub format: PixelFormat,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self::for_variant(PanelVariant::default())
    }
}

impl PanelConfig {
    /// Configuration for a known panel with default pixel format
    pub const fn for_variant(variant: PanelVariant) -> Self {
        let (width, height) = variant.resolution();
        Self {
            variant,
            width,
            height,
            glyph_set: variant.glyph_set(),
            format: PixelFormat::new(
                crate::pixel::NibbleOrder::EvenLow,
                crate::pixel::Polarity::ZeroIsDark,
            ),
        }
    }

    /// Override the pixel format
    pub const fn with_format(mut self, format: PixelFormat) -> Self {
        self.format = format;
        self
    }

    /// Full panel rectangle
    pub const fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }

    /// Framebuffer size in bytes
    pub fn buffer_len(&self) -> Result<usize, SurfaceError> {
        buffer_len(self.width, self.height).ok_or(SurfaceError::InvalidDimensions)
    }
}
