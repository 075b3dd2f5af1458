//! Hardware abstraction traits
//!
//! These traits define the interface between the application logic
//! and hardware-specific implementations (radio, HTTP client, OLED).

pub mod clock;
pub mod network;
pub mod quotes;
pub mod surface;

pub use clock::Clock;
pub use network::{LinkStatus, NetworkInterface, ScanEntry, ScanError, MAX_SSID_LEN};
pub use quotes::{FetchError, MarketStatus, Quote, QuoteSource};
pub use surface::{Ink, Surface, SurfaceError, TextSize};
