//! Wireless network interface trait

use core::net::Ipv4Addr;

use heapless::{String, Vec};

/// Maximum SSID length (802.11)
pub const MAX_SSID_LEN: usize = 32;

/// Link status as reported by the radio
///
/// Each status carries a small numeric code that is shown on the status bar
/// when the link is not up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkStatus {
    /// Radio idle, no join in progress
    Idle,
    /// The configured network was not found during the join
    NoMatchingNetwork,
    /// Join in progress (association, authentication or DHCP)
    Connecting,
    /// Associated and holding an address
    Up,
    /// Join failed with a driver specific status
    Failed(u8),
    /// Link dropped after having been up
    Lost,
    /// Explicitly disconnected
    Disconnected,
}

impl LinkStatus {
    /// Numeric diagnostic code
    pub fn code(&self) -> u8 {
        match self {
            LinkStatus::Idle => 0,
            LinkStatus::NoMatchingNetwork => 1,
            LinkStatus::Connecting => 2,
            LinkStatus::Up => 3,
            LinkStatus::Failed(_) => 4,
            LinkStatus::Lost => 5,
            LinkStatus::Disconnected => 6,
        }
    }

    /// Check if the link is usable
    pub fn is_up(&self) -> bool {
        matches!(self, LinkStatus::Up)
    }
}

/// One network seen during a scan
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScanEntry {
    /// Network name (empty for hidden networks)
    pub ssid: String<MAX_SSID_LEN>,
    /// Received signal strength in dBm
    pub rssi_dbm: i16,
}

impl ScanEntry {
    /// Create an entry, truncating the name to the SSID limit
    pub fn new(ssid: &str, rssi_dbm: i16) -> Self {
        let mut name = String::new();
        for ch in ssid.chars() {
            if name.push(ch).is_err() {
                break;
            }
        }
        Self {
            ssid: name,
            rssi_dbm,
        }
    }
}

/// Scan failure reported by the radio
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScanError {
    /// Radio busy or not started
    NotReady,
    /// Driver reported an error
    Driver,
}

/// Wireless network interface
///
/// Abstracts the radio driver and the IP stack on top of it. Only one join
/// is ever in flight; the caller serializes all calls.
pub trait NetworkInterface {
    /// Start joining a network
    ///
    /// May return before the link is up; completion is observed through
    /// [`NetworkInterface::status`].
    async fn begin_join(&mut self, ssid: &str, passphrase: &str);

    /// Current link status (non-blocking)
    fn status(&mut self) -> LinkStatus;

    /// Drop any association or pending join
    async fn disconnect(&mut self);

    /// Passive scan across all channels, hidden networks included
    ///
    /// Fills `out` with the strongest networks found, strongest first, up to
    /// its capacity. Blocks for roughly `per_channel_ms` times the channel
    /// count. Any scan buffers held by the driver are released before return.
    async fn scan<const N: usize>(
        &mut self,
        per_channel_ms: u16,
        out: &mut Vec<ScanEntry, N>,
    ) -> Result<(), ScanError>;

    /// Address assigned to the interface, if any
    fn current_address(&self) -> Option<Ipv4Addr>;
}
