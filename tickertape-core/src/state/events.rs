//! Events that trigger connectivity transitions

use crate::traits::LinkStatus;

/// Events produced by the network link
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkEvent {
    /// Join completed and the link is up
    Joined,
    /// Join failed because the configured network is not in range
    NoMatchingNetwork,
    /// Join failed for any other reason (status code attached)
    JoinFailed(u8),
    /// Link reported down after having been up
    LinkLost,
}

impl LinkEvent {
    /// Check if this event reports a failed join
    pub fn is_failure(&self) -> bool {
        matches!(self, LinkEvent::NoMatchingNetwork | LinkEvent::JoinFailed(_))
    }

    /// Map the final status of a join attempt to an event
    pub fn from_join_status(status: LinkStatus) -> Self {
        match status {
            LinkStatus::Up => LinkEvent::Joined,
            LinkStatus::NoMatchingNetwork => LinkEvent::NoMatchingNetwork,
            other => LinkEvent::JoinFailed(other.code()),
        }
    }
}
