//! Drawing surface trait
//!
//! A rectangular monochrome pixel grid with text and filled-rectangle
//! primitives. Drawing only touches an off-screen buffer; nothing becomes
//! visible until [`Surface::present`].

/// Errors that can occur while presenting a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SurfaceError {
    /// Bus transfer to the panel failed
    Communication,
    /// Panel not initialized
    NotInitialized,
}

/// Pixel state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Ink {
    /// Pixel lit
    On,
    /// Pixel dark
    Off,
}

/// Discrete text sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TextSize {
    /// Status and list text
    #[default]
    Small,
    /// Marquee text
    Large,
}

/// Off-screen drawing surface
pub trait Surface {
    /// Pixel dimensions (width, height)
    fn size(&self) -> (u16, u16);

    /// Character cell (width, height) in pixels for a text size
    ///
    /// Text is monospaced, so a string's pixel width is its character count
    /// times the cell width.
    fn glyph_size(&self, size: TextSize) -> (u16, u16);

    /// Select the size used by subsequent [`Surface::draw_text`] calls
    fn set_text_size(&mut self, size: TextSize);

    /// Fill a rectangle; parts outside the surface are clipped
    fn fill_rect(&mut self, x: i32, y: i32, width: u16, height: u16, ink: Ink);

    /// Draw lit text with its top-left corner at (x, y), no wrapping
    fn draw_text(&mut self, x: i32, y: i32, text: &str);

    /// Blank the whole surface
    fn clear(&mut self) {
        let (width, height) = self.size();
        self.fill_rect(0, 0, width, height, Ink::Off);
    }

    /// Push the off-screen buffer to the panel
    async fn present(&mut self) -> Result<(), SurfaceError>;
}
