//! One pass of the demo
//!
//! ```text
//!  clear panel ─► compose border/hero/text ─► full draw
//!       ─► stamp + partial push ─► partial clear
//!       ─► stamp + partial push, board image ─► pause
//! ```
//!
//! Every panel step runs in its own [`HardwareSession`], so the panel is
//! only powered while it is being driven.

use core::fmt::Write;

use embedded_hal::delay::DelayNs;
use heapless::String;

use grisaille_core::{Compositor, PackedSurface, PixelSource, Size};
use grisaille_display::{DamageTracker, GlyphError, GlyphStamper, HardwareSession, RefreshCoordinator};

use crate::config::DemoConfig;
use crate::layout::DemoLayout;
use crate::text::TextWriter;

/// Lines of the text block next to the hero image
pub const FEATURE_LINES: [&str; 4] = [
    "\u{27b8} 16 color grayscale",
    "\u{27b8} ~630ms for full frame draw \u{1f680}",
    "\u{27b8} Use with 6\" or 9.7\" EPDs",
    "\u{27b8} High-quality font rendering \u{270e}\u{1f64b}",
];

/// Line stamped before the partial clear
pub const PARTIAL_CLEAR_LINE: &str = "\u{27a0} With partial clear...";

/// Line stamped after the partial clear
pub const PARTIAL_UPDATE_LINE: &str = "And partial update!";

const TEXT_CAPACITY: usize = 192;

/// Demo errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DemoError<E> {
    /// Panel driver failed
    Panel(E),
    /// Glyph table is broken
    Glyph(GlyphError),
    /// Surface and panel sizes differ
    SizeMismatch,
    /// Text block doesn't fit its buffer
    TextOverflow,
}

impl<E> From<GlyphError> for DemoError<E> {
    fn from(e: GlyphError) -> Self {
        DemoError::Glyph(e)
    }
}

/// Images the demo draws
#[derive(Debug, Clone, Copy)]
pub struct DemoAssets<'a> {
    /// Composited into the surface, top left
    pub hero: PixelSource<'a>,
    /// Pushed straight to the panel after the partial clear
    pub board: PixelSource<'a>,
}

/// The demo, ready to run against a panel
pub struct DemoSequence<'a, F> {
    config: DemoConfig,
    layout: DemoLayout,
    font: &'a F,
    assets: DemoAssets<'a>,
}

impl<'a, F: GlyphStamper> DemoSequence<'a, F> {
    /// Prepare the demo for the panel described by `config`
    pub fn new(config: DemoConfig, font: &'a F, assets: DemoAssets<'a>) -> Self {
        let layout = DemoLayout::new(&config.panel_config(), assets.hero.size());
        Self {
            config,
            layout,
            font,
            assets,
        }
    }

    /// Screen layout in use
    pub fn layout(&self) -> &DemoLayout {
        &self.layout
    }

    /// Text block drawn next to the hero image
    pub fn feature_text() -> Result<String<TEXT_CAPACITY>, core::fmt::Error> {
        let mut text = String::new();
        for (i, line) in FEATURE_LINES.iter().enumerate() {
            if i > 0 {
                text.push('\n').map_err(|_| core::fmt::Error)?;
            }
            text.write_str(line)?;
        }
        Ok(text)
    }

    /// Run one pass
    ///
    /// `surface` must match the panel size. It is reset to the blank level
    /// first, so every pass composes the same full frame. Repeating the pass
    /// is up to the caller.
    pub fn run_once<R, D, B>(
        &self,
        panel: &mut R,
        delay: &mut D,
        surface: &mut PackedSurface<B>,
    ) -> Result<(), DemoError<R::Error>>
    where
        R: RefreshCoordinator,
        D: DelayNs,
        B: AsRef<[u8]> + AsMut<[u8]>,
    {
        let size = Size::new(surface.width(), surface.height());
        if panel.dimensions() != size || self.layout.panel.size() != size {
            warn!("surface does not match the panel");
            return Err(DemoError::SizeMismatch);
        }
        let delays = self.config.delays;
        let polarity = surface.format().polarity;
        let ink = polarity.darkest();
        surface.fill(polarity.lightest());
        let mut damage = DamageTracker::new();

        info!("demo pass on {}", self.config.panel.name());

        let mut session = HardwareSession::begin(panel).map_err(DemoError::Panel)?;
        session.clear_all().map_err(DemoError::Panel)?;
        session.end().map_err(DemoError::Panel)?;
        delay.delay_ms(delays.settle_ms);

        for (x, y, length, horizontal) in self.layout.border() {
            if horizontal {
                surface.draw_hline(x, y, length, ink);
            } else {
                surface.draw_vline(x, y, length, ink);
            }
        }
        surface.blit(self.layout.hero.origin(), &self.assets.hero);
        let text = Self::feature_text().map_err(|_| DemoError::TextOverflow)?;
        TextWriter::new(self.font, self.layout.text_cursor).write(surface, &text)?;

        let mut session = HardwareSession::begin(panel).map_err(DemoError::Panel)?;
        session.push_full(surface).map_err(DemoError::Panel)?;
        session.end().map_err(DemoError::Panel)?;
        delay.delay_ms(delays.hold_ms);

        damage.mark(
            TextWriter::new(self.font, self.layout.partial_cursor)
                .writeln(surface, PARTIAL_CLEAR_LINE)?,
        );
        let mut session = HardwareSession::begin(panel).map_err(DemoError::Panel)?;
        session
            .push_damage(surface, &mut damage)
            .map_err(DemoError::Panel)?;
        session.end().map_err(DemoError::Panel)?;
        delay.delay_ms(delays.hold_ms);

        let to_clear = self.layout.to_clear;
        let mut session = HardwareSession::begin(panel).map_err(DemoError::Panel)?;
        session.clear_area(to_clear).map_err(DemoError::Panel)?;
        session.end().map_err(DemoError::Panel)?;
        surface.clear_area(to_clear);

        damage.mark(
            TextWriter::new(self.font, self.layout.update_cursor)
                .writeln(surface, PARTIAL_UPDATE_LINE)?,
        );
        let mut session = HardwareSession::begin(panel).map_err(DemoError::Panel)?;
        session
            .push_damage(surface, &mut damage)
            .map_err(DemoError::Panel)?;
        session
            .push_image(
                &self.assets.board,
                self.layout.board_origin,
                polarity,
            )
            .map_err(DemoError::Panel)?;
        session.end().map_err(DemoError::Panel)?;
        delay.delay_ms(delays.cycle_ms);

        debug!("demo pass done");
        Ok(())
    }
}
