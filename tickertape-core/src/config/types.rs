//! Configuration type definitions

use heapless::{String, Vec};

use crate::traits::network::MAX_SSID_LEN;

/// Maximum WPA passphrase length
pub const MAX_PASSPHRASE_LEN: usize = 64;

/// Maximum API token length
pub const MAX_TOKEN_LEN: usize = 48;

/// Maximum symbols in the ticker
pub const MAX_SYMBOLS: usize = 8;

/// Maximum characters per symbol
pub const MAX_SYMBOL_LEN: usize = 8;

/// Number of marquee speed steps
pub const SPEED_STEPS: usize = 5;

/// Hard cap on retained scan entries
pub const MAX_SCAN_RESULTS: usize = 10;

/// Ticker symbol
pub type Symbol = String<MAX_SYMBOL_LEN>;

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// No network name configured
    EmptySsid,
    /// No API token configured
    EmptyApiToken,
    /// Symbol list is empty
    NoSymbols,
    /// A timing value that must be positive is zero
    ZeroInterval,
    /// Scan result cap outside 1..=10
    InvalidScanLimit,
}

/// Wireless network settings
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WifiConfig {
    /// Network to join
    pub ssid: String<MAX_SSID_LEN>,
    /// WPA passphrase (empty for open networks)
    pub passphrase: String<MAX_PASSPHRASE_LEN>,
    /// Give up on a join after this long (ms)
    pub connect_timeout_ms: u32,
    /// Link status poll interval while joining (ms)
    pub poll_interval_ms: u32,
}

impl Default for WifiConfig {
    fn default() -> Self {
        Self {
            ssid: String::new(),
            passphrase: String::new(),
            connect_timeout_ms: 15_000,
            poll_interval_ms: 300,
        }
    }
}

/// Quote polling settings
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FeedConfig {
    /// Quote API token
    pub api_token: String<MAX_TOKEN_LEN>,
    /// Symbols shown on the marquee, in order
    pub symbols: Vec<Symbol, MAX_SYMBOLS>,
    /// Time between fetch attempts (ms)
    pub fetch_interval_ms: u32,
    /// Pause between per-symbol lookups (ms)
    pub throttle_ms: u32,
    /// Upper bound on one remote lookup, connect included (ms)
    pub request_timeout_ms: u32,
}

impl Default for FeedConfig {
    fn default() -> Self {
        let mut symbols = Vec::new();
        for s in ["QQQ", "SPY", "VIX", "AMZN", "SOFI", "PYPL", "PLTR", "NVDA"] {
            let mut symbol = Symbol::new();
            let _ = symbol.push_str(s);
            let _ = symbols.push(symbol);
        }

        Self {
            api_token: String::new(),
            symbols,
            fetch_interval_ms: 60_000,
            throttle_ms: 150,
            request_timeout_ms: 4_000,
        }
    }
}

/// Fallback scan settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScanConfig {
    /// Time between rescans while in fallback (ms)
    pub rescan_interval_ms: u32,
    /// Dwell time per channel (ms)
    pub per_channel_ms: u16,
    /// Radio settle time after dropping the link (ms)
    pub settle_ms: u32,
    /// Entries kept per scan (at most [`MAX_SCAN_RESULTS`])
    pub max_results: u8,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            rescan_interval_ms: 30_000,
            per_channel_ms: 150,
            settle_ms: 200,
            max_results: MAX_SCAN_RESULTS as u8,
        }
    }
}

/// User interface settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UiConfig {
    /// Tick sleep per speed step (ms), slowest first
    pub frame_delays_ms: [u16; SPEED_STEPS],
    /// Minimum time between accepted button presses (ms)
    pub retrigger_ms: u32,
    /// Gap between the two debounce samples (ms)
    pub debounce_ms: u32,
    /// Button reads low when pressed
    pub button_active_low: bool,
    /// Tick sleep while the network list is shown (ms)
    pub fallback_frame_ms: u32,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            frame_delays_ms: [40, 30, 20, 12, 6],
            retrigger_ms: 250,
            debounce_ms: 5,
            button_active_low: true,
            fallback_frame_ms: 1_000,
        }
    }
}

/// Complete ticker configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickerConfig {
    pub wifi: WifiConfig,
    pub feed: FeedConfig,
    pub scan: ScanConfig,
    pub ui: UiConfig,
}

impl TickerConfig {
    /// Create a configuration with the shipped defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Check that the configuration can drive the device
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.wifi.ssid.is_empty() {
            return Err(ConfigError::EmptySsid);
        }
        if self.feed.api_token.is_empty() {
            return Err(ConfigError::EmptyApiToken);
        }
        if self.feed.symbols.is_empty() {
            return Err(ConfigError::NoSymbols);
        }
        if self.scan.max_results == 0 || self.scan.max_results as usize > MAX_SCAN_RESULTS {
            return Err(ConfigError::InvalidScanLimit);
        }

        let intervals = [
            self.wifi.connect_timeout_ms,
            self.wifi.poll_interval_ms,
            self.feed.fetch_interval_ms,
            self.feed.request_timeout_ms,
            self.scan.rescan_interval_ms,
            self.scan.per_channel_ms as u32,
            self.ui.fallback_frame_ms,
        ];
        if intervals.iter().any(|&ms| ms == 0) || self.ui.frame_delays_ms.contains(&0) {
            return Err(ConfigError::ZeroInterval);
        }

        Ok(())
    }
}
