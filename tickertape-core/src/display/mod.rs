//! Screen presentation
//!
//! Layout of the 128x64 panel:
//!
//! ```text
//! y=0   IP:192.168.1.42 W/D          status bar (8 px)
//! y=16  SPY 512.10 +0.42%   QQQ ...  marquee (large text)
//! y=34  MARKET CLOSED
//! ```
//!
//! In fallback mode the area below the status bar lists nearby networks
//! instead of the marquee.

pub mod cursor;
pub mod presenter;
pub mod status;

pub use cursor::RenderCursor;
pub use presenter::{signal_bars, DisplayPresenter};
pub use status::{StatusBar, STATUS_LINE_LEN};

/// Status bar height
pub const TOPBAR_H: i32 = 8;

/// Marquee baseline offset below the status bar
pub const SCROLL_DY: i32 = 8;

/// Top of the marquee text
pub const MARQUEE_Y: i32 = TOPBAR_H + SCROLL_DY;

/// Row reserved for the market closed notice
pub const STATUS_Y: i32 = 34;

/// Network list rows shown at most
pub const SCAN_ROWS: usize = 6;

/// Vertical pitch of network list rows
pub const SCAN_ROW_PITCH: i32 = 9;

/// Characters of a network name shown
pub const SCAN_NAME_CHARS: usize = 12;

/// Left edge of the signal indicator
pub const BAR_X: i32 = 70;

/// Horizontal pitch of signal bars
pub const BAR_PITCH: i32 = 6;

/// Side of one signal bar square
pub const BAR_SIZE: u16 = 4;
