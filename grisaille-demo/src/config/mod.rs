//! Demo configuration
//!
//! Loaded from storage as TOML, with a postcard binary fallback.
//! Anything missing falls back to the defaults below.

pub mod demo;
pub mod loader;
pub mod parse;

pub use demo::{DelayConfig, DemoConfig, CONFIG_VERSION};
pub use loader::{ConfigError, ConfigLoader, ConfigStore, StorageKey, StoreError};
pub use parse::parse_config;
