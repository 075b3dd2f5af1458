//! Connectivity state machine
//!
//! Decides which screen is shown and whether quotes may be fetched.
//! The state machine is explicit, finite, and deterministic.

pub mod events;
pub mod machine;

pub use events::LinkEvent;
pub use machine::ConnectivityState;
