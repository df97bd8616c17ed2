//! Protocol Module
//!
//! Defines the VoodooSpark wire protocol.
//!
//! ### Commands
//! - 0x00: SET_MODE      - pin, mode code
//! - 0x01: DIGITAL_WRITE - pin, level
//! - 0x02: ANALOG_WRITE  - pin, value
//! - 0x03: DIGITAL_READ  - pin
//! - 0x04: ANALOG_READ   - pin
//! - 0x05: ALWAYS_SEND   - pin, kind
//! - 0x41: SERVO_WRITE   - pin, degrees
//!
//! Read requests are answered with a 4-byte frame: action, pin, lsb, msb.
//! Mode codes and the read request length depend on the [`ProtocolProfile`].

mod command;
mod response;
mod profile;
mod codec;

pub use command::{Command, Level, Mode, OpCode, SampleKind};
pub use response::{ReadResponse, RESPONSE_SIZE};
pub use profile::ProtocolProfile;
pub use codec::{
    decode_command, decode_read_response, encode, encode_command, encode_read_response, frame_len,
    read_command, read_response, write_frame, CommandFrame, MAX_FRAME_SIZE,
};
