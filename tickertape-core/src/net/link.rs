//! Join and scan sequencing on top of a [`NetworkInterface`]

use core::net::Ipv4Addr;

use embedded_hal_async::delay::DelayNs;
use heapless::{String, Vec};

use crate::config::{ScanConfig, WifiConfig, MAX_PASSPHRASE_LEN, MAX_SCAN_RESULTS};
use crate::state::LinkEvent;
use crate::traits::{Clock, LinkStatus, NetworkInterface, ScanEntry, MAX_SSID_LEN};

use super::scan::ScanResult;

/// Result of a join attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum JoinOutcome {
    /// Link is up
    Joined,
    /// The configured network was not found
    NoMatchingNetwork,
    /// Any other failure, including timeout (final status code attached)
    OtherFailure(u8),
}

impl JoinOutcome {
    fn from_status(status: LinkStatus) -> Self {
        match status {
            LinkStatus::Up => JoinOutcome::Joined,
            LinkStatus::NoMatchingNetwork => JoinOutcome::NoMatchingNetwork,
            other => JoinOutcome::OtherFailure(other.code()),
        }
    }

    /// Connectivity event for this outcome
    pub fn event(self) -> LinkEvent {
        match self {
            JoinOutcome::Joined => LinkEvent::Joined,
            JoinOutcome::NoMatchingNetwork => LinkEvent::NoMatchingNetwork,
            JoinOutcome::OtherFailure(code) => LinkEvent::JoinFailed(code),
        }
    }
}

/// Owner of the network interface
///
/// Joins are never retried here; the caller decides when to try again.
pub struct NetworkLink<N> {
    iface: N,
    ssid: String<MAX_SSID_LEN>,
    passphrase: String<MAX_PASSPHRASE_LEN>,
    poll_interval_ms: u32,
    last_code: u8,
}

impl<N: NetworkInterface> NetworkLink<N> {
    /// Create a link for the configured network
    pub fn new(iface: N, wifi: &WifiConfig) -> Self {
        Self {
            iface,
            ssid: wifi.ssid.clone(),
            passphrase: wifi.passphrase.clone(),
            poll_interval_ms: wifi.poll_interval_ms,
            last_code: LinkStatus::Idle.code(),
        }
    }

    /// Join the configured network
    ///
    /// Polls the link status until it comes up or `timeout_ms` has elapsed.
    /// This is the one deliberately blocking span in the control loop.
    pub async fn connect<C, D>(&mut self, timeout_ms: u32, clock: &C, delay: &mut D) -> JoinOutcome
    where
        C: Clock,
        D: DelayNs,
    {
        info!("wifi: joining {}", self.ssid.as_str());
        self.iface
            .begin_join(self.ssid.as_str(), self.passphrase.as_str())
            .await;

        let started = clock.now_ms();
        let mut status = self.iface.status();
        while !status.is_up() && clock.elapsed_since(started) < timeout_ms as u64 {
            delay.delay_ms(self.poll_interval_ms).await;
            status = self.iface.status();
        }

        self.last_code = status.code();
        let outcome = JoinOutcome::from_status(status);
        match outcome {
            JoinOutcome::Joined => info!("wifi: joined, status {}", self.last_code),
            JoinOutcome::NoMatchingNetwork => {
                warn!("wifi: network not found, status {}", self.last_code)
            }
            JoinOutcome::OtherFailure(code) => warn!("wifi: join failed, status {}", code),
        }
        outcome
    }

    /// Check whether the link is currently up
    pub fn is_up(&mut self) -> bool {
        self.iface.status().is_up()
    }

    /// Scan for nearby networks
    ///
    /// Drops any pending join first and gives the radio time to settle.
    /// A failed scan yields an empty result.
    pub async fn scan<D: DelayNs>(&mut self, config: &ScanConfig, delay: &mut D) -> ScanResult {
        self.iface.disconnect().await;
        delay.delay_ms(config.settle_ms).await;

        let mut found: Vec<ScanEntry, MAX_SCAN_RESULTS> = Vec::new();
        if let Err(e) = self.iface.scan(config.per_channel_ms, &mut found).await {
            warn!("wifi: scan failed: {:?}", e);
            found.clear();
        }

        let result = ScanResult::from_entries(found, config.max_results as usize);
        info!("wifi: scan found {} networks", result.len());
        for (i, entry) in result.entries().iter().enumerate() {
            debug!("{}  {}  RSSI {} dBm", i, entry.ssid.as_str(), entry.rssi_dbm);
        }
        result
    }

    /// Address assigned to the interface, if any
    pub fn current_address(&self) -> Option<Ipv4Addr> {
        self.iface.current_address()
    }

    /// Status code recorded by the last join attempt
    pub fn last_code(&self) -> u8 {
        self.last_code
    }
}
