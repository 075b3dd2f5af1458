//! Simple TOML parser for ticker configuration
//!
//! This is a minimal parser that handles only the subset needed for the
//! ticker configuration. It does NOT support the full TOML spec.
//!
//! Supported features:
//! - Key = value pairs (string, integer, boolean)
//! - [section] headers (`wifi`, `feed`, `scan`, `ui`)
//! - Single-line arrays of strings or integers: symbols = ["SPY", "QQQ"]
//! - Comments (# ...)
//!
//! NOT supported:
//! - Multi-line strings or arrays
//! - Escape sequences inside strings
//! - Inline tables
//! - Dotted keys

use heapless::{String, Vec};

use super::types::{Symbol, TickerConfig, MAX_SCAN_RESULTS, MAX_SYMBOLS, SPEED_STEPS};

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Unknown or malformed section header
    InvalidSection,
    /// Invalid value type
    InvalidValue,
    /// Too many items (exceeded heapless capacity)
    TooManyItems,
    /// String value longer than its field allows
    ValueTooLong,
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Wifi,
    Feed,
    Scan,
    Ui,
}

/// Parse TOML configuration into TickerConfig
///
/// Starts from the defaults, so any key left out keeps its shipped value.
/// A `symbols` array replaces the default list entirely.
pub fn parse_config(input: &str) -> Result<TickerConfig, ParseError> {
    let mut config = TickerConfig::new();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') {
            section = parse_section_header(line)?;
            continue;
        }

        if let Some((key, value)) = parse_key_value(line) {
            apply_value(&mut config, section, key, value)?;
        }
    }

    Ok(config)
}

/// Parse a "[name]" header, trailing comment allowed
fn parse_section_header(line: &str) -> Result<Section, ParseError> {
    let line = strip_comment(line);
    if !line.ends_with(']') {
        return Err(ParseError::InvalidSection);
    }

    match line[1..line.len() - 1].trim() {
        "wifi" => Ok(Section::Wifi),
        "feed" => Ok(Section::Feed),
        "scan" => Ok(Section::Scan),
        "ui" => Ok(Section::Ui),
        _ => Err(ParseError::InvalidSection),
    }
}

/// Remove a trailing comment that is not inside a string
fn strip_comment(value: &str) -> &str {
    let mut in_string = false;
    for (i, c) in value.char_indices() {
        match c {
            '"' => in_string = !in_string,
            '#' if !in_string => return value[..i].trim(),
            _ => {}
        }
    }
    value.trim()
}

/// Parse "key = value" line
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = strip_comment(&line[eq_pos + 1..]);

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

/// Parse a string value (removes quotes)
fn parse_string(value: &str) -> Result<&str, ParseError> {
    if value.starts_with('"') && value.ends_with('"') && value.len() >= 2 {
        Ok(&value[1..value.len() - 1])
    } else {
        // Allow unquoted strings for simple values
        Ok(value)
    }
}

/// Parse a string value into a bounded buffer
fn parse_bounded<const N: usize>(value: &str) -> Result<String<N>, ParseError> {
    let mut out = String::new();
    out.push_str(parse_string(value)?)
        .map_err(|_| ParseError::ValueTooLong)?;
    Ok(out)
}

/// Parse an integer value
fn parse_int<T: core::str::FromStr>(value: &str) -> Result<T, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidValue)
}

/// Parse a boolean value
fn parse_bool(value: &str) -> Result<bool, ParseError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ParseError::InvalidValue),
    }
}

/// Iterate the comma-separated items of a single-line array
fn array_items(value: &str) -> Result<impl Iterator<Item = &str>, ParseError> {
    let value = value.trim();
    if !value.starts_with('[') || !value.ends_with(']') {
        return Err(ParseError::InvalidValue);
    }
    let inner = &value[1..value.len() - 1];

    Ok(inner.split(',').map(str::trim).filter(|item| !item.is_empty()))
}

/// Parse the symbol list, e.g. ["SPY", "QQQ"]
fn parse_symbols(value: &str) -> Result<Vec<Symbol, MAX_SYMBOLS>, ParseError> {
    let mut symbols = Vec::new();
    for item in array_items(value)? {
        let symbol = parse_bounded(item)?;
        if symbol.is_empty() {
            return Err(ParseError::InvalidValue);
        }
        symbols.push(symbol).map_err(|_| ParseError::TooManyItems)?;
    }
    Ok(symbols)
}

/// Parse the speed table; exactly one entry per speed step
fn parse_frame_delays(value: &str) -> Result<[u16; SPEED_STEPS], ParseError> {
    let mut delays = [0u16; SPEED_STEPS];
    let mut count = 0;

    for item in array_items(value)? {
        let slot = delays.get_mut(count).ok_or(ParseError::TooManyItems)?;
        *slot = parse_int(item)?;
        count += 1;
    }

    if count != SPEED_STEPS {
        return Err(ParseError::InvalidValue);
    }
    Ok(delays)
}

/// Apply a parsed value to the config
fn apply_value(
    config: &mut TickerConfig,
    section: Section,
    key: &str,
    value: &str,
) -> Result<(), ParseError> {
    match section {
        Section::Wifi => {
            let wifi = &mut config.wifi;
            match key {
                "ssid" => wifi.ssid = parse_bounded(value)?,
                "passphrase" | "password" => wifi.passphrase = parse_bounded(value)?,
                "connect_timeout_ms" => wifi.connect_timeout_ms = parse_int(value)?,
                "poll_interval_ms" => wifi.poll_interval_ms = parse_int(value)?,
                _ => {} // Ignore unknown keys
            }
        }
        Section::Feed => {
            let feed = &mut config.feed;
            match key {
                "api_token" => feed.api_token = parse_bounded(value)?,
                "symbols" => feed.symbols = parse_symbols(value)?,
                "fetch_interval_ms" => feed.fetch_interval_ms = parse_int(value)?,
                "throttle_ms" => feed.throttle_ms = parse_int(value)?,
                "request_timeout_ms" => feed.request_timeout_ms = parse_int(value)?,
                _ => {}
            }
        }
        Section::Scan => {
            let scan = &mut config.scan;
            match key {
                "rescan_interval_ms" => scan.rescan_interval_ms = parse_int(value)?,
                "per_channel_ms" => scan.per_channel_ms = parse_int(value)?,
                "settle_ms" => scan.settle_ms = parse_int(value)?,
                "max_results" => {
                    let max: u8 = parse_int(value)?;
                    if max as usize > MAX_SCAN_RESULTS {
                        return Err(ParseError::TooManyItems);
                    }
                    scan.max_results = max;
                }
                _ => {}
            }
        }
        Section::Ui => {
            let ui = &mut config.ui;
            match key {
                "frame_delays_ms" => ui.frame_delays_ms = parse_frame_delays(value)?,
                "retrigger_ms" => ui.retrigger_ms = parse_int(value)?,
                "debounce_ms" => ui.debounce_ms = parse_int(value)?,
                "button_active_low" => ui.button_active_low = parse_bool(value)?,
                "fallback_frame_ms" => ui.fallback_frame_ms = parse_int(value)?,
                _ => {}
            }
        }
        Section::Root => {
            // Nothing lives at the top level
        }
    }

    Ok(())
}
