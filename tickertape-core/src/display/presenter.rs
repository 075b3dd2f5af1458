//! Screen rendering on a [`Surface`]
//!
//! Every public draw call repaints its region, then presents exactly once.

use crate::net::ScanResult;
use crate::traits::{Ink, Surface, TextSize};

use super::cursor::RenderCursor;
use super::status::StatusBar;
use super::{
    BAR_PITCH, BAR_SIZE, BAR_X, MARQUEE_Y, SCAN_NAME_CHARS, SCAN_ROWS, SCAN_ROW_PITCH, STATUS_Y,
    TOPBAR_H,
};

const MARKET_CLOSED: &str = "MARKET CLOSED";
const SCANNING: &str = "Scanning...";
const NO_NETWORKS: &str = "(no networks found)";
const HIDDEN_NETWORK: &str = "<hidden>";

/// Signal indicator bars (1..=5) for a signal strength
///
/// Linear over -90..-30 dBm, truncating like integer `map`, clamped at both
/// ends.
pub fn signal_bars(rssi_dbm: i16) -> u8 {
    let bars = (rssi_dbm as i32 + 90) * 4 / 60 + 1;
    bars.clamp(1, 5) as u8
}

/// First `max_chars` characters of `text`
fn clip(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

/// Draws the status bar, marquee and network list
pub struct DisplayPresenter<S> {
    surface: S,
}

impl<S: Surface> DisplayPresenter<S> {
    pub fn new(surface: S) -> Self {
        Self { surface }
    }

    /// Surface width in pixels
    pub fn width(&self) -> u16 {
        self.surface.size().0
    }

    async fn present(&mut self) {
        if let Err(e) = self.surface.present().await {
            warn!("display: flush failed: {:?}", e);
        }
    }

    /// Blank everything below the status bar
    fn clear_body(&mut self) {
        let (width, height) = self.surface.size();
        let body = height.saturating_sub(TOPBAR_H as u16);
        self.surface.fill_rect(0, TOPBAR_H, width, body, Ink::Off);
    }

    /// Repaint the top bar
    pub async fn draw_status_bar(&mut self, status: &StatusBar) {
        let width = self.width();
        self.surface
            .fill_rect(0, 0, width, TOPBAR_H as u16, Ink::Off);
        self.surface.set_text_size(TextSize::Small);
        self.surface.draw_text(0, 0, status.render().as_str());
        self.present().await;
    }

    /// Repaint the marquee and advance `cursor`
    ///
    /// The line is drawn twice, one text width apart, so the wrap point is
    /// seamless.
    pub async fn draw_marquee(&mut self, text: &str, cursor: &mut RenderCursor, market_open: bool) {
        let (glyph_w, _) = self.surface.glyph_size(TextSize::Large);
        let text_width = text.chars().count() as i32 * glyph_w as i32;

        self.clear_body();
        self.surface.set_text_size(TextSize::Large);
        self.surface.draw_text(cursor.x(), MARQUEE_Y, text);
        self.surface
            .draw_text(cursor.x() + text_width, MARQUEE_Y, text);

        self.surface.set_text_size(TextSize::Small);
        if !market_open {
            self.surface.draw_text(0, STATUS_Y, MARKET_CLOSED);
        }
        self.present().await;

        cursor.advance(text_width);
    }

    /// Repaint the network list
    pub async fn draw_scan_list(&mut self, results: &ScanResult) {
        self.clear_body();
        self.surface.set_text_size(TextSize::Small);

        if results.is_empty() {
            self.surface.draw_text(0, TOPBAR_H + 10, NO_NETWORKS);
            self.present().await;
            return;
        }

        for (i, entry) in results.entries().iter().take(SCAN_ROWS).enumerate() {
            let y = TOPBAR_H + 2 + i as i32 * SCAN_ROW_PITCH;
            let name = if entry.ssid.is_empty() {
                HIDDEN_NETWORK
            } else {
                entry.ssid.as_str()
            };
            self.surface.draw_text(0, y, clip(name, SCAN_NAME_CHARS));

            for b in 0..signal_bars(entry.rssi_dbm) as i32 {
                self.surface
                    .fill_rect(BAR_X + b * BAR_PITCH, y + 2, BAR_SIZE, BAR_SIZE, Ink::On);
            }
        }
        self.present().await;
    }

    /// Show the scanning notice below the status bar
    pub async fn draw_scanning(&mut self) {
        self.clear_body();
        self.surface.set_text_size(TextSize::Small);
        self.surface.draw_text(0, TOPBAR_H + 2, SCANNING);
        self.present().await;
    }

    /// Blank the whole panel
    pub async fn clear(&mut self) {
        self.surface.clear();
        self.present().await;
    }
}
