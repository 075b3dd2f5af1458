//! Application scheduler
//!
//! One cooperative control loop owns every piece of mutable state and lends
//! it to the link, feed, input and display services in turn.

pub mod controller;

pub use controller::AppController;

/// Observational status shown on the top bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Diagnostics {
    /// Status code recorded by the last join attempt
    pub last_link_code: u8,
    /// Whether the last quote fetch succeeded
    pub data_ok: bool,
}
