//! Network Module
//!
//! TCP connection to the device, plus a simulated device for testing.
//!
//! ## Architecture
//! - One blocking stream per device, no reconnect
//! - [`Transport`] is the seam the command facade talks through
//! - [`Simulator`] serves one client at a time

mod transport;
mod connection;
mod simulator;

pub use transport::Transport;
pub use connection::Connection;
pub use simulator::{DeviceState, Simulator};
