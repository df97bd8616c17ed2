//! Spark Module
//!
//! The command facade: one call per device operation.
//!
//! ## Responsibilities
//! - Resolve pin names through the [`PinRegistry`]
//! - Reject PWM/servo operations on pins that lack them, before any write
//! - Encode with the configured [`ProtocolProfile`]
//! - Serialize access to the transport so a read request and its response
//!   are never interleaved with another caller's traffic
//! - Refuse further traffic once the stream may hold a stale response

use parking_lot::Mutex;

use crate::config::Config;
use crate::error::{Result, VsparkError};
use crate::network::{Connection, Transport};
use crate::pins::{Pin, PinCode, PinRegistry};
use crate::protocol::{
    decode_read_response, encode_command, Command, Level, Mode, ProtocolProfile, SampleKind,
    RESPONSE_SIZE,
};

/// State guarded by the facade's lock
struct Link<T> {
    transport: T,

    registry: PinRegistry,

    /// Set after a failure that may leave unread bytes in the stream
    desynced: bool,
}

impl<T: Transport> Link<T> {
    fn ensure_in_sync(&self) -> Result<()> {
        if self.desynced {
            return Err(VsparkError::Desynced);
        }
        Ok(())
    }

    /// Run an I/O step, marking the link desynced if it fails
    fn guard<R>(&mut self, step: impl FnOnce(&mut T) -> Result<R>) -> Result<R> {
        let result = step(&mut self.transport);
        if let Err(ref e) = result {
            tracing::warn!("Connection out of sync after: {}", e);
            self.desynced = true;
        }
        result
    }
}

/// Handle to one device
///
/// ## Concurrency Model
///
/// The protocol has no request identifiers, so responses are matched to
/// requests purely by order. Every operation holds the lock for its whole
/// write (and read), which makes `Spark` safe to share behind an `Arc`.
///
/// After a timeout, an I/O error or a response that does not echo its
/// request, every later call fails with [`VsparkError::Desynced`]. Drop the
/// `Spark` and connect again.
pub struct Spark<T: Transport = Connection> {
    link: Mutex<Link<T>>,
    profile: ProtocolProfile,
}

impl Spark<Connection> {
    /// Dial the device named in `config`
    pub fn connect(config: &Config) -> Result<Self> {
        let connection = Connection::connect(&config.device_addr, config)?;
        Ok(Self::new(connection, config.profile))
    }
}

impl<T: Transport> Spark<T> {
    /// Wrap a transport, using the default pin registry
    pub fn new(transport: T, profile: ProtocolProfile) -> Self {
        Self::with_registry(transport, PinRegistry::new(), profile)
    }

    /// Wrap a transport with a custom registry
    ///
    /// With [`PinRegistry::without_analog_offset`], an analog pin moves to
    /// its analog code the first time [`set_mode`](Self::set_mode) is called
    /// for it.
    pub fn with_registry(transport: T, registry: PinRegistry, profile: ProtocolProfile) -> Self {
        Self {
            link: Mutex::new(Link {
                transport,
                registry,
                desynced: false,
            }),
            profile,
        }
    }

    pub fn profile(&self) -> ProtocolProfile {
        self.profile
    }

    /// Snapshot of the current pin table
    pub fn registry(&self) -> PinRegistry {
        self.link.lock().registry.clone()
    }

    /// Whether an earlier failure has put the stream out of sync
    pub fn is_desynced(&self) -> bool {
        self.link.lock().desynced
    }

    /// Give the transport back
    pub fn into_transport(self) -> T {
        self.link.into_inner().transport
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Set the mode of a pin
    ///
    /// PWM and SERVO are only accepted on PWM-capable pins.
    pub fn set_mode(&self, pin: &str, mode: Mode) -> Result<()> {
        let mut link = self.link.lock();
        let parsed: Pin = pin.parse()?;
        if mode.requires_pwm() {
            require_pwm(&link.registry, mode.as_str(), pin)?;
        }
        link.ensure_in_sync()?;

        let code = if parsed.is_analog() {
            link.registry.apply_analog_offset(pin)?
        } else {
            link.registry.code_of(parsed)?
        };
        self.send(&mut link, Command::SetMode { pin: code, mode })
    }

    pub fn digital_write(&self, pin: &str, level: Level) -> Result<()> {
        let mut link = self.link.lock();
        let code = link.registry.resolve(pin)?;
        self.send(&mut link, Command::DigitalWrite { pin: code, level })
    }

    /// PWM write; only on PWM-capable pins
    pub fn analog_write(&self, pin: &str, value: u8) -> Result<()> {
        let mut link = self.link.lock();
        let code = resolve_pwm(&link.registry, "PWM", pin)?;
        self.send(&mut link, Command::AnalogWrite { pin: code, value })
    }

    pub fn digital_read(&self, pin: &str) -> Result<u16> {
        let mut link = self.link.lock();
        let code = link.registry.resolve(pin)?;
        self.request(&mut link, Command::DigitalRead { pin: code })
    }

    pub fn analog_read(&self, pin: &str) -> Result<u16> {
        let mut link = self.link.lock();
        let code = link.registry.resolve(pin)?;
        self.request(&mut link, Command::AnalogRead { pin: code })
    }

    /// Ask the device to keep reporting `pin` without being polled
    pub fn always_send(&self, pin: &str, kind: SampleKind) -> Result<()> {
        let mut link = self.link.lock();
        let code = link.registry.resolve(pin)?;
        self.send(&mut link, Command::AlwaysSend { pin: code, kind })
    }

    /// Servo write; only on PWM-capable pins
    pub fn servo_write(&self, pin: &str, degrees: u8) -> Result<()> {
        let mut link = self.link.lock();
        let code = resolve_pwm(&link.registry, "ServoWrite", pin)?;
        self.send(&mut link, Command::ServoWrite { pin: code, degrees })
    }

    // =========================================================================
    // Internal Helpers
    // =========================================================================

    /// Encode and write a command that has no response
    fn send(&self, link: &mut Link<T>, command: Command) -> Result<()> {
        let frame = encode_command(&command, self.profile)?;
        link.ensure_in_sync()?;
        tracing::debug!("Sending {:?}", command);
        link.guard(|transport| transport.write(frame.as_bytes()))
    }

    /// Write a read request and wait for its response
    fn request(&self, link: &mut Link<T>, command: Command) -> Result<u16> {
        let frame = encode_command(&command, self.profile)?;
        link.ensure_in_sync()?;
        tracing::debug!("Requesting {:?}", command);

        link.guard(|transport| {
            transport.write(frame.as_bytes())?;
            let bytes = transport.read_exactly(RESPONSE_SIZE)?;
            let response = decode_read_response(&bytes)?;

            let expected = command.opcode();
            if response.action != expected as u8 || response.pin != command.pin() {
                return Err(VsparkError::ProtocolDecode(format!(
                    "Response {:?} does not match request {:?} on pin {}",
                    response,
                    expected,
                    command.pin()
                )));
            }

            Ok(response.value())
        })
    }
}

/// Resolve a pin that must support PWM/servo output
fn resolve_pwm(registry: &PinRegistry, operation: &str, pin: &str) -> Result<PinCode> {
    let code = registry.resolve(pin)?;
    require_pwm(registry, operation, pin)?;
    Ok(code)
}

fn require_pwm(registry: &PinRegistry, operation: &str, pin: &str) -> Result<()> {
    if registry.is_available_for_pwm(pin) {
        return Ok(());
    }
    tracing::warn!("{} is not available on {}", operation, pin);
    Err(VsparkError::unavailable(operation, pin))
}
