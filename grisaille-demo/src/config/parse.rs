//! TOML parsing for the demo configuration
//!
//! Example:
//!
//! ```toml
//! panel = "ed060sc4"
//! nibble_order = "even_low"
//! polarity = "zero_is_dark"
//!
//! [delays]
//! hold_ms = 500
//! ```

use super::demo::{DemoConfig, CONFIG_VERSION};
use super::loader::ConfigError;

/// Parse a TOML document into a [`DemoConfig`]
///
/// Missing keys take their defaults; unknown panel or format names are
/// parse errors.
pub fn parse_config(input: &str) -> Result<DemoConfig, ConfigError> {
    let config: DemoConfig = toml::from_str(input).map_err(|_| ConfigError::TomlParse)?;
    if config.version != CONFIG_VERSION {
        warn!(
            "config version mismatch: found {}, expected {}",
            config.version,
            CONFIG_VERSION
        );
        return Err(ConfigError::VersionMismatch);
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use grisaille_core::{NibbleOrder, PanelVariant, Polarity};

    #[test]
    fn test_empty_document_is_default() {
        assert_eq!(parse_config(""), Ok(DemoConfig::default()));
    }

    #[test]
    fn test_shipped_config_is_default() {
        assert_eq!(
            parse_config(include_str!("../../demo.toml")),
            Ok(DemoConfig::default())
        );
    }

    #[test]
    fn test_full_document() {
        let config = parse_config(
            r#"
            # small panel, driver wants the even column high
            panel = "ed060sc4"
            nibble_order = "even_high"
            polarity = "zero_is_light"

            [delays]
            settle_ms = 10
            hold_ms = 20
            cycle_ms = 30
            "#,
        )
        .unwrap();
        assert_eq!(config.panel, PanelVariant::Ed060sc4);
        assert_eq!(config.nibble_order, NibbleOrder::EvenHigh);
        assert_eq!(config.polarity, Polarity::ZeroIsLight);
        assert_eq!(config.delays.settle_ms, 10);
        assert_eq!(config.delays.hold_ms, 20);
        assert_eq!(config.delays.cycle_ms, 30);
    }

    #[test]
    fn test_partial_delays_keep_defaults() {
        let config = parse_config("[delays]\nhold_ms = 5\n").unwrap();
        assert_eq!(config.delays.hold_ms, 5);
        assert_eq!(config.delays.settle_ms, 300);
    }

    #[test]
    fn test_rejects_unknown_panel() {
        assert_eq!(
            parse_config("panel = \"ed133\""),
            Err(ConfigError::TomlParse)
        );
    }

    #[test]
    fn test_rejects_other_version() {
        assert_eq!(
            parse_config("version = 2"),
            Err(ConfigError::VersionMismatch)
        );
    }
}
