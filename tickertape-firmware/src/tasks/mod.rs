//! Embassy background tasks
//!
//! The radio driver and the IP stack each need their own task; the ticker
//! itself runs on the main task.

pub mod net;

pub use net::{cyw43_task, net_task};
