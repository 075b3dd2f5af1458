//! OLED display support for Tickertape
//!
//! This crate provides:
//! - `FrameBuffer`, a 128x64 page-organized buffer usable as an
//!   `embedded-graphics` draw target
//! - `Ssd1306`, an async I2C driver that implements the core `Surface` trait
//!   on top of the frame buffer
//!
//! Text is rendered with `embedded-graphics` mono fonts: 5x8 for the status
//! bar and network list, 9x15 for the marquee.

#![cfg_attr(not(test), no_std)]

pub mod frame;
pub mod ssd1306;

pub use frame::{FrameBuffer, HEIGHT, WIDTH};
pub use ssd1306::{OledError, Ssd1306, DEFAULT_ADDRESS};
