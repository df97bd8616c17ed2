//! Protocol codec
//!
//! Encoding and decoding functions for the wire protocol.
//!
//! ## Wire Format
//!
//! ### Command Frame
//! ```text
//! ┌──────────┬──────────┬──────────────┐
//! │ Op (1)   │ Pin (1)  │ Payload (0-1)│
//! └──────────┴──────────┴──────────────┘
//! ```
//!
//! ### Read Response Frame
//! ```text
//! ┌──────────┬──────────┬──────────┬──────────┐
//! │Action(1) │ Pin (1)  │ LSB (1)  │ MSB (1)  │
//! └──────────┴──────────┴──────────┴──────────┘
//! ```
//!
//! Value = LSB | (MSB << 7).

use std::fmt;
use std::io::{Read, Write};

use bytes::{BufMut, Bytes, BytesMut};

use crate::error::{Result, VsparkError};
use crate::pins::PinCode;
use super::{Command, Level, OpCode, ProtocolProfile, ReadResponse, SampleKind, RESPONSE_SIZE};

/// Longest command frame: opcode + pin + one payload byte
pub const MAX_FRAME_SIZE: usize = 3;

/// An encoded command, ready to be written to the stream
#[derive(Clone, PartialEq, Eq)]
pub struct CommandFrame(Bytes);

impl CommandFrame {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn opcode(&self) -> Option<OpCode> {
        self.0.first().copied().and_then(OpCode::from_byte)
    }
}

impl AsRef<[u8]> for CommandFrame {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for CommandFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CommandFrame({:02x?})", self.0.as_ref())
    }
}

// =============================================================================
// Command Encoding/Decoding
// =============================================================================

/// Encode a raw frame: opcode + pin code + optional payload byte
pub fn encode(opcode: OpCode, pin: PinCode, payload: Option<u8>) -> CommandFrame {
    let mut buf = BytesMut::with_capacity(MAX_FRAME_SIZE);
    buf.put_u8(opcode as u8);
    buf.put_u8(pin.value());
    if let Some(byte) = payload {
        buf.put_u8(byte);
    }
    CommandFrame(buf.freeze())
}

/// Encode a command using the given profile
///
/// Fails only for set-mode with a mode the profile has no code for.
pub fn encode_command(command: &Command, profile: ProtocolProfile) -> Result<CommandFrame> {
    let payload = match *command {
        Command::SetMode { mode, .. } => Some(profile.require_mode_code(mode)?),
        Command::DigitalWrite { level, .. } => Some(level as u8),
        Command::AnalogWrite { value, .. } => Some(value),
        Command::DigitalRead { .. } | Command::AnalogRead { .. } => profile.read_request_trailer(),
        Command::AlwaysSend { kind, .. } => Some(kind as u8),
        Command::ServoWrite { degrees, .. } => Some(degrees),
    };

    Ok(encode(command.opcode(), command.pin(), payload))
}

/// Length of the frame that starts with `opcode`
pub fn frame_len(opcode: OpCode, profile: ProtocolProfile) -> usize {
    if opcode.is_read() {
        profile.read_request_len()
    } else {
        MAX_FRAME_SIZE
    }
}

/// Decode one complete command frame
pub fn decode_command(bytes: &[u8], profile: ProtocolProfile) -> Result<Command> {
    let op_byte = *bytes
        .first()
        .ok_or_else(|| VsparkError::ProtocolDecode("Empty command frame".to_string()))?;
    let opcode = OpCode::from_byte(op_byte)
        .ok_or_else(|| VsparkError::ProtocolDecode(format!("Unknown opcode: 0x{:02x}", op_byte)))?;

    let expected = frame_len(opcode, profile);
    if bytes.len() != expected {
        return Err(VsparkError::ProtocolDecode(format!(
            "{:?} frame: expected {} bytes, got {}",
            opcode,
            expected,
            bytes.len()
        )));
    }

    let pin = PinCode::new(bytes[1]);
    let payload = bytes.get(2).copied().unwrap_or_default();

    let command = match opcode {
        OpCode::SetMode => {
            let mode = profile.mode_from_code(payload).ok_or_else(|| {
                VsparkError::ProtocolDecode(format!(
                    "Unknown mode code {} for {} profile",
                    payload, profile
                ))
            })?;
            Command::SetMode { pin, mode }
        }
        OpCode::DigitalWrite => Command::DigitalWrite {
            pin,
            level: Level::from_byte(payload),
        },
        OpCode::AnalogWrite => Command::AnalogWrite { pin, value: payload },
        OpCode::DigitalRead => Command::DigitalRead { pin },
        OpCode::AnalogRead => Command::AnalogRead { pin },
        OpCode::AlwaysSend => {
            let kind = SampleKind::from_byte(payload).ok_or_else(|| {
                VsparkError::ProtocolDecode(format!("Unknown always-send kind: {}", payload))
            })?;
            Command::AlwaysSend { pin, kind }
        }
        OpCode::ServoWrite => Command::ServoWrite { pin, degrees: payload },
    };

    Ok(command)
}

// =============================================================================
// Response Encoding/Decoding
// =============================================================================

/// Encode a read response carrying `value`
pub fn encode_read_response(action: u8, pin: PinCode, value: u16) -> [u8; RESPONSE_SIZE] {
    ReadResponse::new(action, pin, value).to_bytes()
}

/// Decode a read response; must be exactly four bytes
pub fn decode_read_response(bytes: &[u8]) -> Result<ReadResponse> {
    match *bytes {
        [action, pin, lsb, msb] => Ok(ReadResponse {
            action,
            pin: PinCode::new(pin),
            lsb,
            msb,
        }),
        _ => Err(VsparkError::ProtocolDecode(format!(
            "Read response: expected {} bytes, got {}",
            RESPONSE_SIZE,
            bytes.len()
        ))),
    }
}

// =============================================================================
// Stream-based I/O helpers
// =============================================================================

/// Read a complete command from a stream
///
/// Blocks until a complete frame is received or an error occurs
pub fn read_command<R: Read>(reader: &mut R, profile: ProtocolProfile) -> Result<Command> {
    let mut frame = [0u8; MAX_FRAME_SIZE];
    reader.read_exact(&mut frame[..1]).map_err(VsparkError::Read)?;

    let opcode = OpCode::from_byte(frame[0])
        .ok_or_else(|| VsparkError::ProtocolDecode(format!("Unknown opcode: 0x{:02x}", frame[0])))?;
    let len = frame_len(opcode, profile);
    reader.read_exact(&mut frame[1..len]).map_err(VsparkError::Read)?;

    decode_command(&frame[..len], profile)
}

/// Write a frame to a stream
pub fn write_frame<W: Write>(writer: &mut W, frame: &[u8]) -> Result<()> {
    writer.write_all(frame).map_err(VsparkError::Write)?;
    writer.flush().map_err(VsparkError::Write)?;
    Ok(())
}

/// Read a complete read response from a stream
pub fn read_response<R: Read>(reader: &mut R) -> Result<ReadResponse> {
    let mut bytes = [0u8; RESPONSE_SIZE];
    reader.read_exact(&mut bytes).map_err(VsparkError::Read)?;
    decode_read_response(&bytes)
}
