//! Configuration persistence
//!
//! Loads the demo configuration from a key/value store. TOML is tried
//! first, then the postcard binary form; callers fall back to defaults if
//! neither is present.

use core::str;

use super::demo::{DemoConfig, CONFIG_VERSION};
use super::parse::parse_config;

/// Maximum serialized config size (binary)
const MAX_CONFIG_SIZE: usize = 64;

/// Maximum TOML config size
const MAX_TOML_SIZE: usize = 2048;

/// Stored configuration records
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StorageKey {
    /// TOML text
    DemoConfigToml,
    /// postcard-encoded [`DemoConfig`]
    DemoConfig,
}

/// Storage read errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StoreError {
    /// No record under this key
    NotFound,
    /// Record doesn't fit the read buffer
    TooLarge,
    /// Underlying storage failed
    Io,
}

/// Key/value storage holding configuration records
pub trait ConfigStore {
    /// Read the record under `key` into `buf`, returning its length
    fn read(&mut self, key: StorageKey, buf: &mut [u8]) -> Result<usize, StoreError>;
}

/// Configuration loading errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Storage read failed
    Store(StoreError),
    /// Binary deserialization failed
    Deserialize,
    /// TOML parsing failed
    TomlParse,
    /// Invalid UTF-8 in TOML data
    InvalidUtf8,
    /// Config version mismatch
    VersionMismatch,
}

impl From<StoreError> for ConfigError {
    fn from(e: StoreError) -> Self {
        ConfigError::Store(e)
    }
}

/// Loads [`DemoConfig`] from a [`ConfigStore`]
pub struct ConfigLoader<S> {
    store: S,
}

impl<S: ConfigStore> ConfigLoader<S> {
    /// Create a loader over `store`
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Give the store back
    pub fn into_store(self) -> S {
        self.store
    }

    /// Load configuration
    ///
    /// Tries TOML first, falls back to the binary postcard record.
    pub fn load(&mut self) -> Result<DemoConfig, ConfigError> {
        info!("loading demo configuration");

        match self.load_toml() {
            Ok(config) => {
                info!("loaded configuration from TOML");
                return Ok(config);
            }
            Err(ConfigError::Store(StoreError::NotFound)) => {
                debug!("no TOML config found, trying binary format");
            }
            Err(e) => {
                warn!("failed to load TOML config: {}, trying binary", e);
            }
        }

        self.load_binary()
    }

    /// Load configuration, or the defaults if none is stored or valid
    pub fn load_or_default(&mut self) -> DemoConfig {
        self.load().unwrap_or_else(|e| {
            warn!("using default configuration: {}", e);
            DemoConfig::default()
        })
    }

    fn load_toml(&mut self) -> Result<DemoConfig, ConfigError> {
        let mut buffer = [0u8; MAX_TOML_SIZE];
        let len = self.store.read(StorageKey::DemoConfigToml, &mut buffer)?;
        let data = buffer.get(..len).ok_or(StoreError::TooLarge)?;
        debug!("read {} bytes of TOML", len);

        let text = str::from_utf8(data).map_err(|_| ConfigError::InvalidUtf8)?;
        let config = parse_config(text)?;
        log_config_summary(&config);
        Ok(config)
    }

    fn load_binary(&mut self) -> Result<DemoConfig, ConfigError> {
        let mut buffer = [0u8; MAX_CONFIG_SIZE];
        let len = self.store.read(StorageKey::DemoConfig, &mut buffer)?;
        let data = buffer.get(..len).ok_or(StoreError::TooLarge)?;
        debug!("read {} bytes of binary config", len);

        let config: DemoConfig =
            postcard::from_bytes(data).map_err(|_| ConfigError::Deserialize)?;
        if config.version != CONFIG_VERSION {
            warn!(
                "config version mismatch: found {}, expected {}",
                config.version,
                CONFIG_VERSION
            );
            return Err(ConfigError::VersionMismatch);
        }

        log_config_summary(&config);
        Ok(config)
    }
}

fn log_config_summary(config: &DemoConfig) {
    info!("panel {}", config.panel.name());
    debug!(
        "  delays: settle {} ms, hold {} ms, cycle {} ms",
        config.delays.settle_ms,
        config.delays.hold_ms,
        config.delays.cycle_ms
    );
}
