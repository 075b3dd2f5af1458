//! Configuration loading
//!
//! The configuration is compiled into the image from `ticker.toml` and
//! checked by `build.rs`; parsing here uses the core no_std parser.

use defmt::*;

use tickertape_core::config::{parse_config, TickerConfig};

/// Embedded configuration (compiled into firmware)
/// Edit ticker.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../ticker.toml");

/// Parse and validate the embedded configuration
///
/// Falls back to the built-in defaults when parsing fails. A configuration
/// that parses but does not validate is still returned; the device then
/// fails to join and ends up showing nearby networks.
pub fn load_config() -> TickerConfig {
    let config = match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => config,
        Err(e) => {
            error!("ticker.toml rejected ({}), using defaults", e);
            TickerConfig::new()
        }
    };

    match config.validate() {
        Ok(()) => info!(
            "Config: ssid={}, {} symbols, fetch every {}ms",
            config.wifi.ssid.as_str(),
            config.feed.symbols.len(),
            config.feed.fetch_interval_ms
        ),
        Err(e) => error!("Configuration incomplete: {}", e),
    }

    config
}
