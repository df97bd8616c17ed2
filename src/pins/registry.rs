//! Pin registry
//!
//! Owns the name → code table and the PWM-capable pin set.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::{Result, VsparkError};
use super::{Pin, PinCode};

/// Pins that accept PWM (analog write) and servo output
///
/// Membership is tested on the parsed [`Pin`], so name lookups fold the bank
/// prefix the same way [`PinRegistry::resolve`] does: `"a0"` matches `"A0"`.
pub const PWM_PINS: [&str; 8] = ["A0", "A1", "A4", "A5", "A6", "A7", "D0", "D1"];

/// Name → wire code table for one device
///
/// Built once and handed to [`crate::Spark`]. The only mutation,
/// [`PinRegistry::apply_analog_offset`], is idempotent; the facade calls it
/// when an analog pin's mode is set.
#[derive(Debug, Clone)]
pub struct PinRegistry {
    codes: BTreeMap<Pin, PinCode>,
    pwm_capable: BTreeSet<Pin>,
}

impl Default for PinRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl PinRegistry {
    /// Registry with analog pins already shifted into 10..17
    pub fn new() -> Self {
        let mut registry = Self::without_analog_offset();
        for (pin, code) in registry.codes.iter_mut() {
            if pin.is_analog() {
                *code = code.with_analog_offset();
            }
        }
        registry
    }

    /// Registry where A0..A7 share codes 0..7 with D0..D7
    ///
    /// Analog pins stay in the digital code space until
    /// [`apply_analog_offset`](Self::apply_analog_offset) is called for them.
    pub fn without_analog_offset() -> Self {
        let codes = Pin::all().map(|pin| (pin, PinCode::new(pin.index()))).collect();
        let pwm_capable = PWM_PINS
            .iter()
            .filter_map(|name| name.parse::<Pin>().ok())
            .collect();

        Self { codes, pwm_capable }
    }

    /// Look up the wire code for a pin name
    pub fn resolve(&self, name: &str) -> Result<PinCode> {
        let pin: Pin = name.parse()?;
        self.code_of(pin)
    }

    /// Look up the wire code for a parsed pin
    pub fn code_of(&self, pin: Pin) -> Result<PinCode> {
        self.codes
            .get(&pin)
            .copied()
            .ok_or_else(|| VsparkError::UnknownPin(pin.to_string()))
    }

    /// Move an analog pin into the analog code range
    ///
    /// The first call adds the offset; later calls leave the code untouched
    /// and return it unchanged. Digital pins are rejected.
    pub fn apply_analog_offset(&mut self, name: &str) -> Result<PinCode> {
        let pin: Pin = name.parse()?;
        if !pin.is_analog() {
            return Err(VsparkError::unavailable("Analog offset", pin.to_string()));
        }

        let code = self
            .codes
            .get_mut(&pin)
            .ok_or_else(|| VsparkError::UnknownPin(pin.to_string()))?;
        *code = code.with_analog_offset();
        Ok(*code)
    }

    /// Whether PWM and servo output are available on `name`
    ///
    /// Exact membership of the parsed pin in [`PWM_PINS`]; the prefix is
    /// case-insensitive, as in [`resolve`](Self::resolve). Unknown names are
    /// simply not available.
    pub fn is_available_for_pwm(&self, name: &str) -> bool {
        name.parse::<Pin>()
            .map(|pin| self.pwm_capable.contains(&pin))
            .unwrap_or(false)
    }

    /// Iterate over every pin and its current code
    pub fn iter(&self) -> impl Iterator<Item = (Pin, PinCode)> + '_ {
        self.codes.iter().map(|(pin, code)| (*pin, *code))
    }
}
