//! Configuration for vspark
//!
//! Centralized configuration with sensible defaults.

use std::str::FromStr;
use std::time::Duration;

use crate::error::{Result, VsparkError};
use crate::protocol::ProtocolProfile;

/// Port the VoodooSpark firmware listens on (0xBEEF)
pub const DEFAULT_PORT: u16 = 48879;

/// Environment variable holding a static device address (host:port)
pub const ENV_ADDR: &str = "VSPARK_ADDR";

/// Environment variable selecting the protocol profile
pub const ENV_PROFILE: &str = "VSPARK_PROFILE";

/// Environment variable overriding the read timeout (milliseconds)
pub const ENV_READ_TIMEOUT_MS: &str = "VSPARK_READ_TIMEOUT_MS";

/// Environment variable overriding the write timeout (milliseconds)
pub const ENV_WRITE_TIMEOUT_MS: &str = "VSPARK_WRITE_TIMEOUT_MS";

/// Main configuration for a device connection
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Device Configuration
    // -------------------------------------------------------------------------
    /// Device address (host:port)
    pub device_addr: String,

    /// Wire protocol profile spoken by the device firmware
    pub profile: ProtocolProfile,

    // -------------------------------------------------------------------------
    // Network Configuration
    // -------------------------------------------------------------------------
    /// TCP connect timeout (milliseconds, 0 = OS default)
    pub connect_timeout_ms: u64,

    /// Read timeout (milliseconds, 0 = block forever)
    pub read_timeout_ms: u64,

    /// Write timeout (milliseconds, 0 = block forever)
    pub write_timeout_ms: u64,

    /// Disable Nagle's algorithm; frames are tiny and latency-sensitive
    pub nodelay: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            device_addr: format!("127.0.0.1:{}", DEFAULT_PORT),
            profile: ProtocolProfile::default(),
            connect_timeout_ms: 5000,
            read_timeout_ms: 5000,
            write_timeout_ms: 5000,
            nodelay: true,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Default config overlaid with `VSPARK_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::default().with_env_overrides(|key| std::env::var(key).ok())
    }

    /// Overlay values from a variable lookup (the environment, in practice)
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(addr) = lookup(ENV_ADDR).filter(|a| !a.trim().is_empty()) {
            self.device_addr = addr.trim().to_string();
        }
        if let Some(profile) = lookup(ENV_PROFILE) {
            self.profile = ProtocolProfile::from_str(&profile)?;
        }
        if let Some(ms) = lookup(ENV_READ_TIMEOUT_MS) {
            self.read_timeout_ms = parse_millis(ENV_READ_TIMEOUT_MS, &ms)?;
        }
        if let Some(ms) = lookup(ENV_WRITE_TIMEOUT_MS) {
            self.write_timeout_ms = parse_millis(ENV_WRITE_TIMEOUT_MS, &ms)?;
        }
        Ok(self)
    }

    pub fn connect_timeout(&self) -> Option<Duration> {
        millis(self.connect_timeout_ms)
    }

    pub fn read_timeout(&self) -> Option<Duration> {
        millis(self.read_timeout_ms)
    }

    pub fn write_timeout(&self) -> Option<Duration> {
        millis(self.write_timeout_ms)
    }
}

fn millis(ms: u64) -> Option<Duration> {
    (ms > 0).then(|| Duration::from_millis(ms))
}

fn parse_millis(key: &str, value: &str) -> Result<u64> {
    value.trim().parse().map_err(|_| {
        VsparkError::Config(format!(
            "{} must be a number of milliseconds, got {:?}",
            key, value
        ))
    })
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the device address (host:port)
    pub fn device_addr(mut self, addr: impl Into<String>) -> Self {
        self.config.device_addr = addr.into();
        self
    }

    /// Set the protocol profile
    pub fn profile(mut self, profile: ProtocolProfile) -> Self {
        self.config.profile = profile;
        self
    }

    /// Set the connect timeout (in milliseconds)
    pub fn connect_timeout_ms(mut self, ms: u64) -> Self {
        self.config.connect_timeout_ms = ms;
        self
    }

    /// Set the read timeout (in milliseconds)
    pub fn read_timeout_ms(mut self, ms: u64) -> Self {
        self.config.read_timeout_ms = ms;
        self
    }

    /// Set the write timeout (in milliseconds)
    pub fn write_timeout_ms(mut self, ms: u64) -> Self {
        self.config.write_timeout_ms = ms;
        self
    }

    pub fn nodelay(mut self, nodelay: bool) -> Self {
        self.config.nodelay = nodelay;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
