//! Connectivity state definition
//!
//! Screen selection and quote polling are a function of the current state.

use super::events::LinkEvent;

/// Connectivity states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConnectivityState {
    /// No link; the next tick attempts a reconnect
    #[default]
    Disconnected,
    /// Link up; quotes are polled and the marquee is shown
    Connected,
    /// Configured network not in range; nearby networks are listed
    ScanFallback,
}

impl ConnectivityState {
    /// Check if quotes may be fetched in this state
    pub fn can_fetch(&self) -> bool {
        matches!(self, ConnectivityState::Connected)
    }

    /// Check if the network list replaces the marquee
    pub fn shows_scan_list(&self) -> bool {
        matches!(self, ConnectivityState::ScanFallback)
    }

    /// Process an event and return the next state
    ///
    /// ScanFallback is only left through a successful join; a lost link or a
    /// generic failure never moves the machine out of it.
    pub fn transition(self, event: LinkEvent) -> Self {
        use ConnectivityState::*;
        use LinkEvent::*;

        match (self, event) {
            (_, Joined) => Connected,

            (Disconnected, NoMatchingNetwork) => ScanFallback,
            (Connected, NoMatchingNetwork) => ScanFallback,

            (Disconnected, JoinFailed(_)) => Disconnected,
            (Connected, JoinFailed(_)) => Disconnected,

            (Connected, LinkLost) => Disconnected,

            // Default: stay in current state
            _ => self,
        }
    }
}
