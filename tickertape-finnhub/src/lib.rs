//! Finnhub quote source
//!
//! Implements the core `QuoteSource` trait against the Finnhub REST API:
//!
//! - `GET /quote?symbol=<sym>&token=<token>` for the current price (`c`) and
//!   change since the previous close in percent (`dp`)
//! - `GET /stock/market/status?exchange=US&token=<token>` for the session
//!
//! Request building and body parsing live in [`api`] and are host-testable;
//! [`client`] does the HTTPS transport over any `embedded-nal-async` stack.

#![cfg_attr(not(test), no_std)]

pub mod api;
pub mod client;

pub use client::{FinnhubSource, RX_BUFFER_SIZE};
