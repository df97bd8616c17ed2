//! Protocol profiles
//!
//! Firmware revisions disagree on two details: the set-mode code table and
//! whether read requests carry a trailing byte. A profile pins both down.

use std::fmt;
use std::str::FromStr;

use crate::error::{Result, VsparkError};
use super::Mode;

/// Wire dialect spoken by the device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ProtocolProfile {
    /// Two-byte read requests; INPUT=0 OUTPUT=1 ANALOG=2 PWM=3 SERVO=4
    #[default]
    Standard,

    /// Three-byte read requests ending in `0x01`; PWM shares OUTPUT's code,
    /// INPUT_PULLUP=2 INPUT_PULLDOWN=3 SERVO=4, no ANALOG mode
    Legacy,
}

/// Trailing byte early firmware needed on read requests
const LEGACY_READ_TRAILER: u8 = 0x01;

impl ProtocolProfile {
    /// Wire code for `mode`, or `None` when this profile has no such mode
    pub fn mode_code(self, mode: Mode) -> Option<u8> {
        match (self, mode) {
            (_, Mode::Input) => Some(0),
            (_, Mode::Output) => Some(1),
            (_, Mode::Servo) => Some(4),

            (ProtocolProfile::Standard, Mode::Analog) => Some(2),
            (ProtocolProfile::Standard, Mode::Pwm) => Some(3),
            (ProtocolProfile::Standard, Mode::InputPullup | Mode::InputPulldown) => None,

            (ProtocolProfile::Legacy, Mode::Pwm) => Some(1),
            (ProtocolProfile::Legacy, Mode::InputPullup) => Some(2),
            (ProtocolProfile::Legacy, Mode::InputPulldown) => Some(3),
            (ProtocolProfile::Legacy, Mode::Analog) => None,
        }
    }

    /// Same as [`mode_code`](Self::mode_code), as an error
    pub fn require_mode_code(self, mode: Mode) -> Result<u8> {
        self.mode_code(mode).ok_or_else(|| VsparkError::UnsupportedMode {
            mode: mode.to_string(),
            profile: self.to_string(),
        })
    }

    /// Mode for a wire code. Legacy code 1 decodes as OUTPUT.
    pub fn mode_from_code(self, code: u8) -> Option<Mode> {
        match (self, code) {
            (_, 0) => Some(Mode::Input),
            (_, 1) => Some(Mode::Output),
            (_, 4) => Some(Mode::Servo),
            (ProtocolProfile::Standard, 2) => Some(Mode::Analog),
            (ProtocolProfile::Standard, 3) => Some(Mode::Pwm),
            (ProtocolProfile::Legacy, 2) => Some(Mode::InputPullup),
            (ProtocolProfile::Legacy, 3) => Some(Mode::InputPulldown),
            _ => None,
        }
    }

    /// Extra byte appended to read requests, if any
    pub fn read_request_trailer(self) -> Option<u8> {
        match self {
            ProtocolProfile::Standard => None,
            ProtocolProfile::Legacy => Some(LEGACY_READ_TRAILER),
        }
    }

    /// Total length of a read request frame
    pub fn read_request_len(self) -> usize {
        2 + self.read_request_trailer().map_or(0, |_| 1)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ProtocolProfile::Standard => "standard",
            ProtocolProfile::Legacy => "legacy",
        }
    }
}

impl FromStr for ProtocolProfile {
    type Err = VsparkError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(ProtocolProfile::Standard),
            "legacy" => Ok(ProtocolProfile::Legacy),
            other => Err(VsparkError::Config(format!(
                "Unknown protocol profile: {} (expected standard or legacy)",
                other
            ))),
        }
    }
}

impl fmt::Display for ProtocolProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
