//! Network link management
//!
//! Joins the configured network, reports link health and performs the
//! fallback scan used when the network is out of range.

pub mod link;
pub mod scan;

pub use link::{JoinOutcome, NetworkLink};
pub use scan::ScanResult;
