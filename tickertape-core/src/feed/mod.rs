//! Quote polling
//!
//! Pulls one quote per configured symbol, renders them into the marquee
//! line and tracks whether the exchange is open.

pub mod line;
pub mod poller;

pub use line::{QuoteLine, MAX_LINE_LEN};
pub use poller::QuoteFeed;
