//! Response definitions
//!
//! Represents the reply the device sends for a read request.

use crate::pins::PinCode;

/// Size of every read response frame
pub const RESPONSE_SIZE: usize = 4;

/// Mask for the 7 data bits carried in each value byte
const SEVEN_BITS: u16 = 0x7F;

/// A decoded read response: action, pin, lsb, msb
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadResponse {
    /// Echo of the request opcode
    pub action: u8,

    /// Pin the value was sampled from
    pub pin: PinCode,

    pub lsb: u8,

    pub msb: u8,
}

impl ReadResponse {
    /// Build a response carrying `value`, split into two 7-bit halves
    pub fn new(action: u8, pin: PinCode, value: u16) -> Self {
        Self {
            action,
            pin,
            lsb: (value & SEVEN_BITS) as u8,
            msb: ((value >> 7) & SEVEN_BITS) as u8,
        }
    }

    /// The sampled value, `lsb | msb << 7`
    ///
    /// The firmware packs values as two 7-bit bytes, so the high byte is
    /// shifted by 7, not 8.
    pub fn value(&self) -> u16 {
        u16::from(self.lsb) | (u16::from(self.msb) << 7)
    }

    pub fn to_bytes(&self) -> [u8; RESPONSE_SIZE] {
        [self.action, self.pin.value(), self.lsb, self.msb]
    }
}
