//! Configuration types
//!
//! The panel geometry used to be a build-time choice; here it is a runtime
//! value handed to the surface constructor.

pub mod panel;

pub use panel::{GlyphSet, PanelConfig, PanelVariant};
