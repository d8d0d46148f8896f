//! Damage tracking for partial refresh
//!
//! Collects the rectangles compositing touched since the last push. A few
//! separate regions are kept so distant edits don't force one huge refresh;
//! past that the tracker falls back to a single bounding box.

use heapless::Vec;

use grisaille_core::Rect;

/// Regions kept before collapsing to a bounding box
pub const MAX_DAMAGE_REGIONS: usize = 4;

/// Accumulator of surface regions that need to reach the panel
#[derive(Debug, Clone, Default)]
pub struct DamageTracker {
    regions: Vec<Rect, MAX_DAMAGE_REGIONS>,
}

impl DamageTracker {
    /// Create an empty tracker
    pub const fn new() -> Self {
        Self {
            regions: Vec::new(),
        }
    }

    /// Record a composited region (`None` from a no-op primitive is ignored)
    pub fn mark(&mut self, area: Option<Rect>) {
        let Some(area) = area.filter(|a| !a.is_empty()) else {
            return;
        };

        // Merge into an overlapping region if there is one
        if let Some(existing) = self
            .regions
            .iter_mut()
            .find(|r| r.intersect(&area).is_some())
        {
            *existing = existing.union(&area);
            return;
        }

        if let Err(area) = self.regions.push(area) {
            let merged = self
                .regions
                .iter()
                .fold(area, |acc, r| acc.union(r));
            trace!("damage list full, collapsing to bounding box");
            self.regions.clear();
            // Capacity is non-zero, so a single push always fits
            let _ = self.regions.push(merged);
        }
    }

    /// True if anything was marked since the last take
    pub fn is_dirty(&self) -> bool {
        !self.regions.is_empty()
    }

    /// Tracked regions, in marking order
    pub fn regions(&self) -> &[Rect] {
        &self.regions
    }

    /// Bounding box of all damage
    pub fn bounds(&self) -> Option<Rect> {
        self.regions.iter().copied().reduce(|acc, r| acc.union(&r))
    }

    /// Bounding box of all damage, resetting the tracker
    pub fn take(&mut self) -> Option<Rect> {
        let bounds = self.bounds();
        self.regions.clear();
        bounds
    }

    /// Tracked regions, resetting the tracker
    pub fn take_regions(&mut self) -> Vec<Rect, MAX_DAMAGE_REGIONS> {
        core::mem::take(&mut self.regions)
    }

    /// Forget all damage
    pub fn clear(&mut self) {
        self.regions.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_empty_marks_ignored() {
        let mut damage = DamageTracker::new();
        damage.mark(None);
        damage.mark(Some(Rect::new(3, 3, 0, 4)));
        assert!(!damage.is_dirty());
        assert_eq!(damage.take(), None);
    }

    #[test]
    fn test_overlapping_regions_merge() {
        let mut damage = DamageTracker::new();
        damage.mark(Some(Rect::new(0, 0, 10, 10)));
        damage.mark(Some(Rect::new(5, 5, 10, 10)));
        assert_eq!(damage.regions(), &[Rect::new(0, 0, 15, 15)]);
    }

    #[test]
    fn test_disjoint_regions_kept_apart() {
        let mut damage = DamageTracker::new();
        damage.mark(Some(Rect::new(0, 0, 2, 2)));
        damage.mark(Some(Rect::new(50, 50, 2, 2)));
        assert_eq!(damage.regions().len(), 2);
        assert_eq!(damage.bounds(), Some(Rect::new(0, 0, 52, 52)));
    }

    #[test]
    fn test_overflow_collapses() {
        let mut damage = DamageTracker::new();
        for i in 0..=MAX_DAMAGE_REGIONS as i32 {
            damage.mark(Some(Rect::new(i * 10, 0, 1, 1)));
        }
        assert_eq!(damage.regions().len(), 1);
        assert_eq!(
            damage.regions()[0],
            Rect::new(0, 0, MAX_DAMAGE_REGIONS as u32 * 10 + 1, 1)
        );
    }

    #[test]
    fn test_take_resets() {
        let mut damage = DamageTracker::new();
        damage.mark(Some(Rect::new(1, 1, 1, 1)));
        let regions = damage.take_regions();
        assert_eq!(regions.len(), 1);
        assert!(!damage.is_dirty());
    }

    proptest! {
        #[test]
        fn prop_bounds_cover_every_mark(
            marks in proptest::collection::vec((0i32..200, 0i32..200, 1u32..30, 1u32..30), 1..12)
        ) {
            let mut damage = DamageTracker::new();
            for &(x, y, w, h) in &marks {
                damage.mark(Some(Rect::new(x, y, w, h)));
            }
            let bounds = damage.bounds().unwrap();
            for &(x, y, w, h) in &marks {
                let r = Rect::new(x, y, w, h);
                prop_assert_eq!(r.intersect(&bounds), Some(r));
                // Every mark is also inside one tracked region
                prop_assert!(damage.regions().iter().any(|t| r.intersect(t) == Some(r)));
            }
        }
    }
}
