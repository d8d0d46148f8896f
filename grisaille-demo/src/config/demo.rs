//! Demo configuration types

use serde::{Deserialize, Serialize};

use grisaille_core::{NibbleOrder, PanelConfig, PanelVariant, PixelFormat, Polarity};

/// Configuration layout version
pub const CONFIG_VERSION: u8 = 1;

/// Pauses between demo steps, in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(default)]
pub struct DelayConfig {
    /// After the initial hardware clear
    pub settle_ms: u32,
    /// After each full or partial draw
    pub hold_ms: u32,
    /// At the end of a pass
    pub cycle_ms: u32,
}

impl Default for DelayConfig {
    fn default() -> Self {
        Self {
            settle_ms: 300,
            hold_ms: 1000,
            cycle_ms: 2000,
        }
    }
}

/// Demo configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(default)]
pub struct DemoConfig {
    /// Layout version, must equal [`CONFIG_VERSION`]
    pub version: u8,
    /// Attached panel
    pub panel: PanelVariant,
    /// Nibble order the panel driver expects
    pub nibble_order: NibbleOrder,
    /// Level meaning of the panel driver
    pub polarity: Polarity,
    /// Step delays
    pub delays: DelayConfig,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            panel: PanelVariant::default(),
            nibble_order: NibbleOrder::default(),
            polarity: Polarity::default(),
            delays: DelayConfig::default(),
        }
    }
}

impl DemoConfig {
    /// Panel configuration with the format overrides applied
    pub fn panel_config(&self) -> PanelConfig {
        PanelConfig::for_variant(self.panel)
            .with_format(PixelFormat::new(self.nibble_order, self.polarity))
    }
}
