//! Pins Module
//!
//! Maps human-readable pin names onto the numeric codes used on the wire.
//!
//! ## Code Space
//! ```text
//! D0 D1 D2 D3 D4 D5 D6 D7      A0 A1 A2 A3 A4 A5 A6 A7
//!  0  1  2  3  4  5  6  7      10 11 12 13 14 15 16 17
//! ```
//!
//! Analog codes are the channel index shifted by [`ANALOG_OFFSET`].
//! Only the pins in [`PWM_PINS`] accept PWM and servo output.

mod pin;
mod registry;

pub use pin::{Bank, Pin, PinCode, ANALOG_OFFSET, CHANNELS};
pub use registry::{PinRegistry, PWM_PINS};
