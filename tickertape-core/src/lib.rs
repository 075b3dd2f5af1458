//! Board-agnostic core logic for the stock ticker firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Hardware abstraction traits (network interface, quote source, drawing surface, clock)
//! - Connectivity state machine
//! - Network link management and fallback scanning
//! - Quote feed and ticker line formatting
//! - Speed button handling
//! - Screen presentation (status bar, marquee, network list)
//! - The cooperative application scheduler
//! - Configuration types and the TOML subset parser

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]
#![allow(async_fn_in_trait)]

// Must go first so the other modules see its macros
mod fmt;

pub mod app;
pub mod config;
pub mod display;
pub mod feed;
pub mod input;
pub mod net;
pub mod state;
pub mod traits;

#[cfg(test)]
pub(crate) mod testing;
