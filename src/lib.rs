//! # vspark
//!
//! A client for the VoodooSpark binary pin protocol:
//! - Pin name → wire code registry with a PWM/servo capability set
//! - Byte-exact command frames and 4-byte read responses
//! - A blocking TCP connection with read deadlines
//! - A thread-safe command facade, one call per device operation
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Spark                                 │
//! │      set_mode / digital_* / analog_* / always_send / servo   │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │ PinRegistry │          │    Codec    │
//!   │ (name→code) │          │ (profiles)  │
//!   └─────────────┘          └──────┬──────┘
//!                                   │
//!                                   ▼
//!                           ┌─────────────┐
//!                           │ Connection  │
//!                           │    (TCP)    │
//!                           └─────────────┘
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use vspark::{Config, Level, Mode, Spark};
//!
//! let config = Config::builder().device_addr("192.168.1.20:48879").build();
//! let spark = Spark::connect(&config)?;
//!
//! spark.set_mode("D7", Mode::Output)?;
//! spark.digital_write("D7", Level::High)?;
//! let light = spark.analog_read("A0")?;
//! # let _ = light;
//! # Ok::<(), vspark::VsparkError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod pins;
pub mod protocol;
pub mod network;
pub mod spark;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{VsparkError, Result};
pub use config::Config;
pub use pins::{Pin, PinCode, PinRegistry};
pub use protocol::{Level, Mode, ProtocolProfile, SampleKind};
pub use network::{Connection, Transport};
pub use spark::Spark;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of vspark
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
