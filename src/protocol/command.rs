//! Command definitions
//!
//! Represents operations sent to the device.

use std::fmt;
use std::str::FromStr;

use crate::error::{Result, VsparkError};
use crate::pins::PinCode;

/// Opcodes (first byte of every command frame)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum OpCode {
    SetMode = 0x00,
    DigitalWrite = 0x01,
    AnalogWrite = 0x02,
    DigitalRead = 0x03,
    AnalogRead = 0x04,
    AlwaysSend = 0x05,
    ServoWrite = 0x41,
}

impl OpCode {
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0x00 => Some(OpCode::SetMode),
            0x01 => Some(OpCode::DigitalWrite),
            0x02 => Some(OpCode::AnalogWrite),
            0x03 => Some(OpCode::DigitalRead),
            0x04 => Some(OpCode::AnalogRead),
            0x05 => Some(OpCode::AlwaysSend),
            0x41 => Some(OpCode::ServoWrite),
            _ => None,
        }
    }

    /// Read requests are answered with a 4-byte response frame
    pub fn is_read(self) -> bool {
        matches!(self, OpCode::DigitalRead | OpCode::AnalogRead)
    }
}

/// Pin modes accepted by set-mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Input,
    Output,
    InputPullup,
    InputPulldown,
    Analog,
    Pwm,
    Servo,
}

impl Mode {
    /// PWM and servo modes only exist on the PWM-capable pins
    pub fn requires_pwm(self) -> bool {
        matches!(self, Mode::Pwm | Mode::Servo)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Input => "INPUT",
            Mode::Output => "OUTPUT",
            Mode::InputPullup => "INPUT_PULLUP",
            Mode::InputPulldown => "INPUT_PULLDOWN",
            Mode::Analog => "ANALOG",
            Mode::Pwm => "PWM",
            Mode::Servo => "SERVO",
        }
    }
}

impl FromStr for Mode {
    type Err = VsparkError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().replace('-', "_").as_str() {
            "INPUT" => Ok(Mode::Input),
            "OUTPUT" => Ok(Mode::Output),
            "INPUT_PULLUP" => Ok(Mode::InputPullup),
            "INPUT_PULLDOWN" => Ok(Mode::InputPulldown),
            "ANALOG" => Ok(Mode::Analog),
            "PWM" => Ok(Mode::Pwm),
            "SERVO" => Ok(Mode::Servo),
            _ => Err(VsparkError::Config(format!("Unknown pin mode: {}", s))),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Logic level for digital writes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Level {
    Low = 0,
    High = 1,
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high {
            Level::High
        } else {
            Level::Low
        }
    }
}

impl Level {
    /// Any non-zero byte reads as high
    pub fn from_byte(byte: u8) -> Self {
        Level::from(byte != 0)
    }

    pub fn toggled(self) -> Self {
        match self {
            Level::Low => Level::High,
            Level::High => Level::Low,
        }
    }
}

/// What the device should report continuously for a pin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum SampleKind {
    Digital = 1,
    Analog = 2,
}

impl SampleKind {
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            1 => Some(SampleKind::Digital),
            2 => Some(SampleKind::Analog),
            _ => None,
        }
    }
}

impl FromStr for SampleKind {
    type Err = VsparkError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "DIGITAL" => Ok(SampleKind::Digital),
            "ANALOG" => Ok(SampleKind::Analog),
            _ => Err(VsparkError::Config(format!("Unknown sample kind: {}", s))),
        }
    }
}

/// A single operation addressed to a resolved pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    SetMode { pin: PinCode, mode: Mode },
    DigitalWrite { pin: PinCode, level: Level },
    AnalogWrite { pin: PinCode, value: u8 },
    DigitalRead { pin: PinCode },
    AnalogRead { pin: PinCode },
    AlwaysSend { pin: PinCode, kind: SampleKind },
    ServoWrite { pin: PinCode, degrees: u8 },
}

impl Command {
    pub fn opcode(&self) -> OpCode {
        match self {
            Command::SetMode { .. } => OpCode::SetMode,
            Command::DigitalWrite { .. } => OpCode::DigitalWrite,
            Command::AnalogWrite { .. } => OpCode::AnalogWrite,
            Command::DigitalRead { .. } => OpCode::DigitalRead,
            Command::AnalogRead { .. } => OpCode::AnalogRead,
            Command::AlwaysSend { .. } => OpCode::AlwaysSend,
            Command::ServoWrite { .. } => OpCode::ServoWrite,
        }
    }

    pub fn pin(&self) -> PinCode {
        match *self {
            Command::SetMode { pin, .. }
            | Command::DigitalWrite { pin, .. }
            | Command::AnalogWrite { pin, .. }
            | Command::DigitalRead { pin }
            | Command::AnalogRead { pin }
            | Command::AlwaysSend { pin, .. }
            | Command::ServoWrite { pin, .. } => pin,
        }
    }
}
