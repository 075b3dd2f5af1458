//! SSD1306 OLED Display Driver
//!
//! Driver for 128x64 SSD1306-based OLED displays via I2C. Drawing goes to
//! the local frame buffer; `flush` sends it page by page.

use embedded_graphics::mono_font::ascii::{FONT_5X8, FONT_9X15};
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Baseline, Text};
use embedded_hal_async::i2c::I2c;

use tickertape_core::traits::{Ink, Surface, SurfaceError, TextSize};

use crate::frame::{FrameBuffer, HEIGHT, PAGES, WIDTH};

/// SSD1306 I2C address (0x3C, or 0x3D with SA0 high)
pub const DEFAULT_ADDRESS: u8 = 0x3C;

/// SSD1306 commands
mod cmd {
    pub const DISPLAY_OFF: u8 = 0xAE;
    pub const DISPLAY_ON: u8 = 0xAF;
    pub const SET_CONTRAST: u8 = 0x81;
    pub const RESUME_RAM: u8 = 0xA4;
    pub const SET_NORMAL: u8 = 0xA6;
    pub const SET_MEMORY_MODE: u8 = 0x20;
    pub const SET_DISPLAY_OFFSET: u8 = 0xD3;
    pub const SET_COM_PINS: u8 = 0xDA;
    pub const SET_VCOM_DETECT: u8 = 0xDB;
    pub const SET_CLOCK_DIV: u8 = 0xD5;
    pub const SET_PRECHARGE: u8 = 0xD9;
    pub const SET_MUX_RATIO: u8 = 0xA8;
    pub const SET_LOW_COLUMN: u8 = 0x00;
    pub const SET_HIGH_COLUMN: u8 = 0x10;
    pub const SET_PAGE_ADDR: u8 = 0xB0;
    pub const SET_START_LINE: u8 = 0x40;
    pub const SET_SEG_REMAP: u8 = 0xA1;
    pub const SET_COM_SCAN_DEC: u8 = 0xC8;
    pub const SET_CHARGE_PUMP: u8 = 0x8D;
}

/// Control byte prefixes
const CONTROL_COMMAND: u8 = 0x00;
const CONTROL_DATA: u8 = 0x40;

/// Driver errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OledError {
    /// I2C transfer failed
    Communication,
    /// Flush attempted before `init`
    NotInitialized,
}

impl From<OledError> for SurfaceError {
    fn from(e: OledError) -> Self {
        match e {
            OledError::Communication => SurfaceError::Communication,
            OledError::NotInitialized => SurfaceError::NotInitialized,
        }
    }
}

fn font(size: TextSize) -> &'static MonoFont<'static> {
    match size {
        TextSize::Small => &FONT_5X8,
        TextSize::Large => &FONT_9X15,
    }
}

/// SSD1306 OLED driver
pub struct Ssd1306<I2C> {
    i2c: I2C,
    address: u8,
    frame: FrameBuffer,
    text_size: TextSize,
    initialized: bool,
}

impl<I2C: I2c> Ssd1306<I2C> {
    /// Create a new SSD1306 driver
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self {
            i2c,
            address,
            frame: FrameBuffer::new(),
            text_size: TextSize::Small,
            initialized: false,
        }
    }

    /// Initialize the display
    pub async fn init(&mut self) -> Result<(), OledError> {
        let init_cmds: &[u8] = &[
            cmd::DISPLAY_OFF,
            cmd::SET_CLOCK_DIV,
            0x80, // Default clock
            cmd::SET_MUX_RATIO,
            (HEIGHT - 1) as u8,
            cmd::SET_DISPLAY_OFFSET,
            0x00,
            cmd::SET_START_LINE,
            cmd::SET_CHARGE_PUMP,
            0x14, // Enable charge pump
            cmd::SET_MEMORY_MODE,
            0x02,                  // Page addressing
            cmd::SET_SEG_REMAP,    // Flip horizontally
            cmd::SET_COM_SCAN_DEC, // Flip vertically
            cmd::SET_COM_PINS,
            0x12, // Alternative COM config
            cmd::SET_CONTRAST,
            0xCF,
            cmd::SET_PRECHARGE,
            0xF1,
            cmd::SET_VCOM_DETECT,
            0x40,
            cmd::RESUME_RAM,
            cmd::SET_NORMAL,
            cmd::DISPLAY_ON,
        ];

        for &c in init_cmds {
            self.command(c).await?;
        }

        self.initialized = true;
        Ok(())
    }

    /// Send a command to the display
    async fn command(&mut self, cmd: u8) -> Result<(), OledError> {
        self.i2c
            .write(self.address, &[CONTROL_COMMAND, cmd])
            .await
            .map_err(|_| OledError::Communication)
    }

    /// Flush the frame buffer to the display
    pub async fn flush(&mut self) -> Result<(), OledError> {
        if !self.initialized {
            return Err(OledError::NotInitialized);
        }

        for page in 0..PAGES {
            self.command(cmd::SET_PAGE_ADDR | page as u8).await?;
            self.command(cmd::SET_LOW_COLUMN).await?;
            self.command(cmd::SET_HIGH_COLUMN).await?;

            let mut data = [0u8; WIDTH + 1];
            data[0] = CONTROL_DATA;
            data[1..].copy_from_slice(self.frame.page(page));
            self.i2c
                .write(self.address, &data)
                .await
                .map_err(|_| OledError::Communication)?;
        }

        Ok(())
    }

    /// Off-screen buffer
    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }
}

impl<I2C: I2c> Surface for Ssd1306<I2C> {
    fn size(&self) -> (u16, u16) {
        (WIDTH as u16, HEIGHT as u16)
    }

    fn glyph_size(&self, size: TextSize) -> (u16, u16) {
        let font = font(size);
        (
            (font.character_size.width + font.character_spacing) as u16,
            font.character_size.height as u16,
        )
    }

    fn set_text_size(&mut self, size: TextSize) {
        self.text_size = size;
    }

    fn fill_rect(&mut self, x: i32, y: i32, width: u16, height: u16, ink: Ink) {
        let color = match ink {
            Ink::On => BinaryColor::On,
            Ink::Off => BinaryColor::Off,
        };
        let _ = Rectangle::new(Point::new(x, y), Size::new(width as u32, height as u32))
            .into_styled(PrimitiveStyle::with_fill(color))
            .draw(&mut self.frame);
    }

    fn draw_text(&mut self, x: i32, y: i32, text: &str) {
        let style = MonoTextStyle::new(font(self.text_size), BinaryColor::On);
        let _ = Text::with_baseline(text, Point::new(x, y), style, Baseline::Top).draw(&mut self.frame);
    }

    fn clear(&mut self) {
        self.frame.clear();
    }

    async fn present(&mut self) -> Result<(), SurfaceError> {
        self.flush().await.map_err(SurfaceError::from)
    }
}
