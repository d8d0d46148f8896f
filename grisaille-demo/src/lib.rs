//! Grisaille demo sequence
//!
//! Runs the classic e-paper showcase against any panel driver: a hardware
//! clear, a composited full frame (border, hero image, text), then partial
//! updates of stamped text, a partial clear, and an image pushed straight
//! to the panel.
//!
//! The board support crate provides the driver, the delay, the font and
//! the image assets; configuration is loaded from storage via
//! [`config::ConfigLoader`].

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

// Logging macros (trace!/debug!/info!/warn!)
#[macro_use]
extern crate grisaille_core;

pub mod config;
pub mod layout;
pub mod sequence;
pub mod text;

pub use config::{ConfigError, ConfigLoader, ConfigStore, DemoConfig};
pub use layout::DemoLayout;
pub use sequence::{DemoAssets, DemoError, DemoSequence};
pub use text::TextWriter;
