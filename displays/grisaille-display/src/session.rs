//! Hardware session bracket
//!
//! Every panel access happens between a power-on and a power-off. A
//! [`HardwareSession`] powers the panel when it begins and off when it ends
//! (or is dropped), so a sequence of clears and draws can't leave the
//! supplies on by accident.
//!
//! ```text
//!   Off ──begin──► On ──draw──► Transferring ──► On ──end/drop──► Off
//! ```

use grisaille_core::{PackedSurface, PixelSource, Point, Polarity, Rect};

use crate::backend::{PowerState, RefreshCoordinator, RefreshMode};
use crate::damage::DamageTracker;

/// Powered access to a panel driver
pub struct HardwareSession<'a, R>
where
    R: RefreshCoordinator,
{
    coordinator: &'a mut R,
    state: PowerState,
}

impl<'a, R> HardwareSession<'a, R>
where
    R: RefreshCoordinator,
{
    /// Power the panel on and start a session
    pub fn begin(coordinator: &'a mut R) -> Result<Self, R::Error> {
        coordinator.power_on()?;
        debug!("panel session started");
        Ok(Self {
            coordinator,
            state: PowerState::On,
        })
    }

    /// Current power state
    pub fn state(&self) -> PowerState {
        self.state
    }

    /// Blank the whole panel
    pub fn clear_all(&mut self) -> Result<(), R::Error> {
        self.transfer(|c| c.clear(None))
    }

    /// Blank `area` on the panel
    ///
    /// Areas entirely off the panel are skipped.
    pub fn clear_area(&mut self, area: Rect) -> Result<Option<Rect>, R::Error> {
        let panel = Rect::from_size(self.coordinator.dimensions());
        let Some(area) = area.intersect(&panel) else {
            trace!("clear area off panel, skipped");
            return Ok(None);
        };
        self.transfer(|c| c.clear(Some(area)))?;
        Ok(Some(area))
    }

    /// Push the whole surface with a full refresh
    pub fn push_full<B>(&mut self, surface: &PackedSurface<B>) -> Result<(), R::Error>
    where
        B: AsRef<[u8]> + AsMut<[u8]>,
    {
        let view = surface.full();
        self.transfer(|c| c.draw(&view, RefreshMode::Full))
    }

    /// Push one region of the surface with a partial refresh
    ///
    /// Returns the byte-aligned area pushed, or `None` if `area` doesn't
    /// overlap the surface.
    pub fn push_region<B>(
        &mut self,
        surface: &PackedSurface<B>,
        area: Rect,
    ) -> Result<Option<Rect>, R::Error>
    where
        B: AsRef<[u8]> + AsMut<[u8]>,
    {
        let Some(view) = surface.region(area) else {
            return Ok(None);
        };
        self.transfer(|c| c.draw(&view, RefreshMode::Partial))?;
        Ok(Some(view.area()))
    }

    /// Push every damaged region, then reset the tracker
    ///
    /// Returns the number of regions pushed.
    pub fn push_damage<B>(
        &mut self,
        surface: &PackedSurface<B>,
        damage: &mut DamageTracker,
    ) -> Result<usize, R::Error>
    where
        B: AsRef<[u8]> + AsMut<[u8]>,
    {
        let mut pushed = 0;
        for area in damage.take_regions() {
            if self.push_region(surface, area)?.is_some() {
                pushed += 1;
            }
        }
        Ok(pushed)
    }

    /// Push a packed image straight to the panel at `origin`
    ///
    /// The surface is not involved. Byte-per-pixel images can't be decoded
    /// by the panel and are skipped (`Ok(None)`).
    pub fn push_image(
        &mut self,
        image: &PixelSource<'_>,
        origin: Point,
        polarity: Polarity,
    ) -> Result<Option<Rect>, R::Error> {
        let Some(view) = image.region_at(origin, polarity) else {
            warn!("image is not panel-native, skipped");
            return Ok(None);
        };
        self.transfer(|c| c.draw(&view, RefreshMode::Partial))?;
        Ok(Some(view.area()))
    }

    /// Power the panel off and finish the session
    pub fn end(mut self) -> Result<(), R::Error> {
        self.state = PowerState::Off;
        debug!("panel session ended");
        self.coordinator.power_off()
    }

    fn transfer<T>(
        &mut self,
        op: impl FnOnce(&mut R) -> Result<T, R::Error>,
    ) -> Result<T, R::Error> {
        self.state = PowerState::Transferring;
        let result = op(&mut *self.coordinator);
        self.state = PowerState::On;
        result
    }
}

impl<R> Drop for HardwareSession<'_, R>
where
    R: RefreshCoordinator,
{
    fn drop(&mut self) {
        if self.state != PowerState::Off {
            warn!("panel session dropped without end, powering off");
            let _ = self.coordinator.power_off();
        }
    }
}
