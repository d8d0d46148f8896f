//! Demo screen layout
//!
//! Positions depend on the panel variant and on the size of the hero image
//! drawn in the top-left corner.

use grisaille_core::{PanelConfig, PanelVariant, Point, Rect, Size};

/// Inset of the border lines from the panel edge
pub const BORDER_INSET: u32 = 20;

/// Top-left corner of the hero image
pub const HERO_ORIGIN: Point = Point::new(25, 25);

/// Baseline of the first text line
pub const TEXT_TOP: i32 = 100;

/// Pen position of the "partial update" line
pub const UPDATE_CURSOR: Point = Point::new(500, 390);

/// Where each demo step draws
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DemoLayout {
    /// Panel area
    pub panel: Rect,
    /// Hero image placement
    pub hero: Rect,
    /// Pen position of the text block
    pub text_cursor: Point,
    /// Pen position of the "partial clear" line
    pub partial_cursor: Point,
    /// Pen position of the "partial update" line
    pub update_cursor: Point,
    /// Area blanked by the partial clear
    pub to_clear: Rect,
    /// Top-left corner of the board image
    pub board_origin: Point,
}

impl DemoLayout {
    /// Compute the layout for `panel` with a hero image of `hero` size
    pub fn new(panel: &PanelConfig, hero: Size) -> Self {
        let hero_w = i32::try_from(hero.width).unwrap_or(i32::MAX);
        let (text_left, partial_y, lower_y) = match panel.variant {
            PanelVariant::Ed060sc4 => (20i32, 450i32, 300i32),
            PanelVariant::Ed097oc4 => (50i32, 600i32, 400i32),
        };

        let clear_left = 50i32.saturating_add(hero_w).saturating_add(20);
        let clear_width = panel.width.saturating_sub(70 + 25).saturating_sub(hero.width);

        Self {
            panel: panel.bounds(),
            hero: Rect::at(HERO_ORIGIN, hero),
            text_cursor: Point::new(text_left.saturating_add(hero_w).saturating_add(20), TEXT_TOP),
            partial_cursor: Point::new(500, partial_y),
            update_cursor: UPDATE_CURSOR,
            to_clear: Rect::new(clear_left, lower_y, clear_width, 400),
            board_origin: Point::new(50i32.saturating_add(hero_w).saturating_add(50), lower_y),
        }
    }

    /// The four border lines as `(x, y, length, horizontal)`
    ///
    /// The vertical lines are one pixel longer so the corners close.
    pub fn border(&self) -> [(i32, i32, u32, bool); 4] {
        let inset = BORDER_INSET as i32;
        let w = self.panel.width;
        let h = self.panel.height;
        let right = i32::try_from(w).unwrap_or(i32::MAX) - inset;
        let bottom = i32::try_from(h).unwrap_or(i32::MAX) - inset;
        let hlen = w.saturating_sub(2 * BORDER_INSET);
        let vlen = h.saturating_sub(2 * BORDER_INSET) + 1;
        [
            (inset, inset, hlen, true),
            (inset, bottom, hlen, true),
            (inset, inset, vlen, false),
            (right, inset, vlen, false),
        ]
    }
}
