//! Pico W network interface
//!
//! Adapts the CYW43439 control handle and the embassy-net stack running on
//! top of it to the core `NetworkInterface` trait.

use core::net::Ipv4Addr;

use cyw43::{Control, JoinOptions, ScanOptions, ScanType};
use defmt::*;
use embassy_net::Stack;
use embassy_time::Duration;
use heapless::Vec;

use tickertape_core::traits::{LinkStatus, NetworkInterface, ScanEntry, ScanError};

/// Join status the chip reports when no access point answered
const STATUS_NO_NETWORKS: u32 = 3;

/// CYW43439 radio plus DHCP-configured IPv4 stack
pub struct PicoWifi {
    control: Control<'static>,
    stack: Stack<'static>,
    status: LinkStatus,
    /// Association succeeded; link state now comes from the stack
    joined: bool,
}

impl PicoWifi {
    pub fn new(control: Control<'static>, stack: Stack<'static>) -> Self {
        Self {
            control,
            stack,
            status: LinkStatus::Idle,
            joined: false,
        }
    }
}

impl NetworkInterface for PicoWifi {
    async fn begin_join(&mut self, ssid: &str, passphrase: &str) {
        self.status = LinkStatus::Connecting;

        let options = if passphrase.is_empty() {
            JoinOptions::new_open()
        } else {
            JoinOptions::new(passphrase.as_bytes())
        };

        match self.control.join(ssid, options).await {
            Ok(()) => {
                debug!("Associated with {}, waiting for DHCP", ssid);
                self.joined = true;
            }
            Err(e) if e.status == STATUS_NO_NETWORKS => {
                self.joined = false;
                self.status = LinkStatus::NoMatchingNetwork;
            }
            Err(e) => {
                self.joined = false;
                self.status = LinkStatus::Failed(e.status.min(u8::MAX as u32) as u8);
            }
        }
    }

    fn status(&mut self) -> LinkStatus {
        if !self.joined {
            return self.status;
        }

        self.status = if !self.stack.is_link_up() {
            match self.status {
                LinkStatus::Up | LinkStatus::Lost => LinkStatus::Lost,
                _ => LinkStatus::Connecting,
            }
        } else if self.stack.config_v4().is_some() {
            LinkStatus::Up
        } else {
            LinkStatus::Connecting
        };
        self.status
    }

    async fn disconnect(&mut self) {
        self.control.leave().await;
        self.joined = false;
        self.status = LinkStatus::Disconnected;
    }

    async fn scan<const N: usize>(
        &mut self,
        per_channel_ms: u16,
        out: &mut Vec<ScanEntry, N>,
    ) -> Result<(), ScanError> {
        out.clear();
        if N == 0 {
            return Ok(());
        }

        let mut options = ScanOptions::default();
        options.scan_type = ScanType::Passive;
        options.dwell_time = Some(Duration::from_millis(per_channel_ms as u64));

        let mut scanner = self.control.scan(options).await;
        while let Some(bss) = scanner.next().await {
            let len = (bss.ssid_len as usize).min(bss.ssid.len());
            let ssid = core::str::from_utf8(&bss.ssid[..len]).unwrap_or("");
            let entry = ScanEntry::new(ssid, bss.rssi);

            if out.is_full() {
                // Replace the weakest entry if this one is stronger
                let weakest = out
                    .iter()
                    .enumerate()
                    .min_by_key(|(_, e)| e.rssi_dbm)
                    .map(|(i, e)| (i, e.rssi_dbm));
                if let Some((index, rssi)) = weakest {
                    if entry.rssi_dbm > rssi {
                        out[index] = entry;
                    }
                }
            } else {
                let _ = out.push(entry);
            }
        }
        // Scanner dropped here, which ends the scan on the chip
        drop(scanner);

        out.sort_unstable_by(|a, b| b.rssi_dbm.cmp(&a.rssi_dbm));
        Ok(())
    }

    fn current_address(&self) -> Option<Ipv4Addr> {
        self.stack.config_v4().map(|config| config.address.address())
    }
}
