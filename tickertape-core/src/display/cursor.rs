//! Marquee scroll position

/// Horizontal offset of the marquee text
///
/// Moves one pixel left per frame and wraps by one text width once a full
/// copy of the text has scrolled off the left edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RenderCursor {
    x: i32,
}

impl RenderCursor {
    /// Cursor just off the right edge of a surface `width` pixels wide
    pub const fn new(width: u16) -> Self {
        Self { x: width as i32 }
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    /// Move back to just off the right edge
    pub fn reset(&mut self, width: u16) {
        self.x = width as i32;
    }

    /// Step one pixel left, wrapping modulo `text_width`
    ///
    /// Empty text does not scroll.
    pub fn advance(&mut self, text_width: i32) {
        if text_width <= 0 {
            return;
        }
        self.x -= 1;
        if self.x <= -text_width {
            self.x += text_width;
        }
    }
}
