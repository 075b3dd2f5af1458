//! Scan results

use core::cmp::Reverse;

use heapless::Vec;

use crate::config::MAX_SCAN_RESULTS;
use crate::traits::ScanEntry;

/// Networks seen by the last scan, strongest first
///
/// Never holds more than [`MAX_SCAN_RESULTS`] entries; anything past the cap
/// is dropped when the result is built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScanResult {
    entries: Vec<ScanEntry, MAX_SCAN_RESULTS>,
}

impl ScanResult {
    /// Empty result
    pub const fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Build a result keeping the `limit` strongest entries
    pub fn from_entries<I>(entries: I, limit: usize) -> Self
    where
        I: IntoIterator<Item = ScanEntry>,
    {
        let limit = limit.min(MAX_SCAN_RESULTS);
        let mut kept: Vec<ScanEntry, MAX_SCAN_RESULTS> = Vec::new();

        for entry in entries {
            if kept.len() < limit {
                let _ = kept.push(entry);
                continue;
            }
            // Full: replace the weakest if this one is stronger
            let weakest = kept
                .iter()
                .enumerate()
                .min_by_key(|(_, e)| e.rssi_dbm)
                .map(|(i, e)| (i, e.rssi_dbm));
            if let Some((i, rssi)) = weakest {
                if entry.rssi_dbm > rssi {
                    kept[i] = entry;
                }
            }
        }

        kept.sort_unstable_by_key(|e| Reverse(e.rssi_dbm));
        Self { entries: kept }
    }

    pub fn entries(&self) -> &[ScanEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_keeps_strongest() {
        let entries = [
            ScanEntry::new("weak", -88),
            ScanEntry::new("strong", -35),
            ScanEntry::new("mid", -60),
        ];
        let result = ScanResult::from_entries(entries, 2);

        assert_eq!(result.len(), 2);
        assert_eq!(result.entries()[0].ssid.as_str(), "strong");
        assert_eq!(result.entries()[1].ssid.as_str(), "mid");
    }

    #[test]
    fn test_limit_capped() {
        let entries = (0..20).map(|i| ScanEntry::new("net", -30 - i));
        let result = ScanResult::from_entries(entries, 50);
        assert_eq!(result.len(), MAX_SCAN_RESULTS);
        assert_eq!(result.entries()[9].rssi_dbm, -39);
    }

    proptest! {
        #[test]
        fn prop_never_exceeds_cap(
            rssi in proptest::collection::vec(-100i16..-20, 0..40),
            limit in 0usize..16,
        ) {
            let entries = rssi.iter().map(|&r| ScanEntry::new("x", r));
            let result = ScanResult::from_entries(entries, limit);

            prop_assert!(result.len() <= MAX_SCAN_RESULTS);
            prop_assert!(result.len() <= limit);
            prop_assert_eq!(result.len(), rssi.len().min(limit).min(MAX_SCAN_RESULTS));
            for pair in result.entries().windows(2) {
                prop_assert!(pair[0].rssi_dbm >= pair[1].rssi_dbm);
            }
        }
    }
}
