//! Panel-facing interfaces for the Grisaille framebuffer
//!
//! This crate provides:
//! - `RefreshCoordinator` trait for e-paper panel drivers
//! - `HardwareSession` to bracket panel access with power on/off
//! - `GlyphStamper` trait and a table-driven `BitmapFont`
//! - `DamageTracker` to collect regions for partial refresh
//!
//! # Architecture
//!
//! ```text
//!  caller ──► Compositor ──► PackedSurface
//!    │                            │ RegionView
//!    └──► HardwareSession ◄───────┘
//!              │
//!              ▼
//!      RefreshCoordinator (panel driver)
//! ```
//!
//! Nothing here touches hardware directly. Panel drivers implement
//! `RefreshCoordinator`; font crates implement `GlyphStamper` or supply
//! glyph tables to `BitmapFont`.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

// Logging macros (trace!/debug!/info!/warn!)
#[macro_use]
extern crate grisaille_core;

pub mod backend;
pub mod damage;
pub mod glyph;
pub mod session;

// Re-export key types
pub use backend::{PowerState, RefreshCoordinator, RefreshMode};
pub use damage::{DamageTracker, MAX_DAMAGE_REGIONS};
pub use glyph::{BitmapFont, Glyph, GlyphError, GlyphMetrics, GlyphStamper};
pub use session::HardwareSession;
