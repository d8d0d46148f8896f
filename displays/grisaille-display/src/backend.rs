//! Panel driver trait
//!
//! Defines what the framebuffer needs from an e-paper driver: power
//! sequencing, hardware clears, and pushing packed rows to the panel.

use grisaille_core::{Rect, RegionView, Size};

/// How a region reaches the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RefreshMode {
    /// Whole panel, full waveform
    Full,
    /// Only the given rectangle
    Partial,
}

/// Panel power state as seen by a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PowerState {
    /// Panel supplies off
    Off,
    /// Powered, idle
    On,
    /// Rows are being clocked out
    Transferring,
}

/// E-paper panel driver
///
/// Implementations own power sequencing, waveform timing, bus transfers and
/// temperature compensation. Callers don't use this directly but go
/// through a [`HardwareSession`](crate::HardwareSession), which guarantees
/// the panel is powered for every clear/draw and switched off afterwards.
pub trait RefreshCoordinator {
    /// Driver error type
    type Error;

    /// Panel resolution
    fn dimensions(&self) -> Size;

    /// Switch panel supplies on
    fn power_on(&mut self) -> Result<(), Self::Error>;

    /// Switch panel supplies off
    fn power_off(&mut self) -> Result<(), Self::Error>;

    /// Drive `area` (or the whole panel for `None`) to blank
    fn clear(&mut self, area: Option<Rect>) -> Result<(), Self::Error>;

    /// Push packed rows to the panel
    ///
    /// The first nibble of each row is column `region.area().x`, in the
    /// nibble order given by `region.format()`.
    fn draw(&mut self, region: &RegionView<'_>, mode: RefreshMode) -> Result<(), Self::Error>;
}
