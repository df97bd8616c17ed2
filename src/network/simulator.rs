//! Device Simulator
//!
//! A TCP stand-in for a VoodooSpark device: decodes command frames, keeps
//! per-pin state and answers read requests.

use std::collections::HashMap;
use std::io::{BufReader, BufWriter, ErrorKind};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::{Result, VsparkError};
use crate::pins::PinCode;
use crate::protocol::{
    read_command, write_frame, Command, Mode, ProtocolProfile, ReadResponse, SampleKind,
};

/// Pin state observed by the simulator
#[derive(Debug, Default)]
pub struct DeviceState {
    modes: HashMap<PinCode, Mode>,
    values: HashMap<PinCode, u16>,
    always_send: HashMap<PinCode, SampleKind>,
    commands: Vec<Command>,
}

impl DeviceState {
    /// Every command received, in order
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn mode_of(&self, pin: PinCode) -> Option<Mode> {
        self.modes.get(&pin).copied()
    }

    /// Last value written to the pin (or preset), 0 if never set
    pub fn value_of(&self, pin: PinCode) -> u16 {
        self.values.get(&pin).copied().unwrap_or(0)
    }

    pub fn always_send_of(&self, pin: PinCode) -> Option<SampleKind> {
        self.always_send.get(&pin).copied()
    }

    /// Preset the value a read of `pin` will return
    pub fn set_value(&mut self, pin: PinCode, value: u16) {
        self.values.insert(pin, value);
    }

    /// Apply a command, returning the response for reads
    fn apply(&mut self, command: Command) -> Option<ReadResponse> {
        self.commands.push(command);

        match command {
            Command::SetMode { pin, mode } => {
                self.modes.insert(pin, mode);
                None
            }
            Command::DigitalWrite { pin, level } => {
                self.values.insert(pin, level as u16);
                None
            }
            Command::AnalogWrite { pin, value } | Command::ServoWrite { pin, degrees: value } => {
                self.values.insert(pin, u16::from(value));
                None
            }
            Command::AlwaysSend { pin, kind } => {
                self.always_send.insert(pin, kind);
                None
            }
            Command::DigitalRead { pin } | Command::AnalogRead { pin } => {
                Some(ReadResponse::new(command.opcode() as u8, pin, self.value_of(pin)))
            }
        }
    }
}

/// Simulated device listening on a TCP port
pub struct Simulator {
    listener: TcpListener,
    profile: ProtocolProfile,
    state: Arc<Mutex<DeviceState>>,
}

impl Simulator {
    /// Bind to `addr` (use port 0 for an ephemeral port)
    pub fn bind(addr: &str, profile: ProtocolProfile) -> Result<Self> {
        let listener = TcpListener::bind(addr).map_err(|e| VsparkError::Connection {
            addr: addr.to_string(),
            source: e,
        })?;

        Ok(Self {
            listener,
            profile,
            state: Arc::new(Mutex::new(DeviceState::default())),
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        self.listener.local_addr().map_err(|e| VsparkError::Connection {
            addr: "listener".to_string(),
            source: e,
        })
    }

    /// Shared handle to the simulated pin state
    pub fn state(&self) -> Arc<Mutex<DeviceState>> {
        Arc::clone(&self.state)
    }

    /// Accept one client and serve it until it disconnects
    pub fn serve_one(&self) -> Result<()> {
        let stream = self.accept()?;
        self.handle(stream)
    }

    /// Serve clients one after another
    ///
    /// Client errors are logged and the next client is accepted; a failing
    /// `accept` ends the loop with its error.
    pub fn run(&self) -> Result<()> {
        loop {
            let stream = self.accept()?;
            if let Err(e) = self.handle(stream) {
                tracing::warn!("Simulator client error: {}", e);
            }
        }
    }

    fn accept(&self) -> Result<TcpStream> {
        let (stream, peer) = self.listener.accept().map_err(|e| VsparkError::Connection {
            addr: "listener".to_string(),
            source: e,
        })?;
        tracing::info!("Simulator accepted client {}", peer);
        Ok(stream)
    }

    fn handle(&self, stream: TcpStream) -> Result<()> {
        let read_stream = stream.try_clone().map_err(VsparkError::Read)?;
        let mut reader = BufReader::new(read_stream);
        let mut writer = BufWriter::new(stream);

        loop {
            let command = match read_command(&mut reader, self.profile) {
                Ok(command) => command,
                Err(VsparkError::Read(ref e))
                    if matches!(
                        e.kind(),
                        ErrorKind::UnexpectedEof
                            | ErrorKind::ConnectionReset
                            | ErrorKind::ConnectionAborted
                    ) =>
                {
                    tracing::debug!("Simulator client disconnected");
                    return Ok(());
                }
                Err(e) => {
                    tracing::warn!("Simulator dropping client: {}", e);
                    return Err(e);
                }
            };

            tracing::debug!("Simulator received {:?}", command);

            let response = self.state.lock().apply(command);
            if let Some(response) = response {
                write_frame(&mut writer, &response.to_bytes())?;
            }
        }
    }
}
