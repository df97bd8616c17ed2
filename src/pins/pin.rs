//! Pin names and wire codes

use std::fmt;
use std::str::FromStr;

use crate::error::{Result, VsparkError};

/// Number of channels in each bank (D0..D7, A0..A7)
pub const CHANNELS: u8 = 8;

/// Shift separating analog codes from digital ones
pub const ANALOG_OFFSET: u8 = 10;

/// Pin namespace, selected by the name prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Bank {
    /// `D` pins
    Digital,
    /// `A` pins
    Analog,
}

impl Bank {
    fn prefix(self) -> char {
        match self {
            Bank::Digital => 'D',
            Bank::Analog => 'A',
        }
    }
}

/// A parsed pin name such as `D3` or `A5`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pin {
    bank: Bank,
    index: u8,
}

impl Pin {
    /// Build a pin from its bank and channel index (0..8)
    pub fn new(bank: Bank, index: u8) -> Result<Self> {
        if index >= CHANNELS {
            return Err(VsparkError::UnknownPin(format!("{}{}", bank.prefix(), index)));
        }
        Ok(Self { bank, index })
    }

    pub fn digital(index: u8) -> Result<Self> {
        Self::new(Bank::Digital, index)
    }

    pub fn analog(index: u8) -> Result<Self> {
        Self::new(Bank::Analog, index)
    }

    pub fn bank(&self) -> Bank {
        self.bank
    }

    pub fn index(&self) -> u8 {
        self.index
    }

    pub fn is_analog(&self) -> bool {
        self.bank == Bank::Analog
    }

    /// All sixteen pins, digital bank first
    pub fn all() -> impl Iterator<Item = Pin> {
        [Bank::Digital, Bank::Analog]
            .into_iter()
            .flat_map(|bank| (0..CHANNELS).map(move |index| Pin { bank, index }))
    }
}

impl FromStr for Pin {
    type Err = VsparkError;

    fn from_str(s: &str) -> Result<Self> {
        let unknown = || VsparkError::UnknownPin(s.to_string());

        let mut chars = s.trim().chars();
        let bank = match chars.next().map(|c| c.to_ascii_uppercase()) {
            Some('D') => Bank::Digital,
            Some('A') => Bank::Analog,
            _ => return Err(unknown()),
        };
        let index = match (chars.next(), chars.next()) {
            (Some(digit), None) => digit.to_digit(10).ok_or_else(unknown)? as u8,
            _ => return Err(unknown()),
        };

        Self::new(bank, index).map_err(|_| unknown())
    }
}

impl fmt::Display for Pin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.bank.prefix(), self.index)
    }
}

/// Numeric pin identifier used on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PinCode(u8);

impl PinCode {
    pub const fn new(code: u8) -> Self {
        Self(code)
    }

    pub const fn value(self) -> u8 {
        self.0
    }

    /// Whether this code already lives in the analog range
    pub const fn is_analog(self) -> bool {
        self.0 >= ANALOG_OFFSET
    }

    /// Shift into the analog range. Codes already there are returned as-is.
    pub const fn with_analog_offset(self) -> Self {
        if self.is_analog() {
            self
        } else {
            Self(self.0 + ANALOG_OFFSET)
        }
    }
}

impl From<PinCode> for u8 {
    fn from(code: PinCode) -> u8 {
        code.0
    }
}

impl fmt::Display for PinCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
