//! vspark CLI
//!
//! Command-line interface for driving a VoodooSpark device.

use std::process::ExitCode;
use std::thread;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};
use vspark::{Config, Level, Mode, ProtocolProfile, Result, SampleKind, Spark};

/// vspark CLI
#[derive(Parser, Debug)]
#[command(name = "vspark-cli")]
#[command(about = "Control the pins of a VoodooSpark device over TCP")]
#[command(version)]
struct Args {
    /// Device address (host:port); falls back to VSPARK_ADDR
    #[arg(short, long)]
    addr: Option<String>,

    /// Protocol profile (standard or legacy); falls back to VSPARK_PROFILE
    #[arg(short, long)]
    profile: Option<ProtocolProfile>,

    /// Read timeout in milliseconds (0 = wait forever)
    #[arg(long)]
    read_timeout_ms: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Set the mode of a pin
    Mode {
        /// Pin name, e.g. D7 or A0
        pin: String,

        /// INPUT, OUTPUT, INPUT_PULLUP, INPUT_PULLDOWN, ANALOG, PWM or SERVO
        mode: Mode,
    },

    /// Drive a pin high (1) or low (0)
    Write { pin: String, value: u8 },

    /// PWM write (PWM-capable pins only)
    AnalogWrite { pin: String, value: u8 },

    /// Read a digital value
    Read { pin: String },

    /// Read an analog value
    AnalogRead { pin: String },

    /// Ask the device to report a pin continuously
    AlwaysSend {
        pin: String,

        /// DIGITAL or ANALOG
        kind: SampleKind,
    },

    /// Move a servo (PWM-capable pins only)
    Servo { pin: String, degrees: u8 },

    /// Toggle a pin on an interval
    Blink {
        #[arg(default_value = "D7")]
        pin: String,

        /// Milliseconds between toggles
        #[arg(short, long, default_value = "1000")]
        interval_ms: u64,

        /// Number of toggles (runs forever when omitted)
        #[arg(short, long)]
        count: Option<u64>,
    },
}

fn main() -> ExitCode {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,vspark=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<()> {
    let mut config = Config::from_env()?;
    if let Some(addr) = args.addr {
        config.device_addr = addr;
    }
    if let Some(profile) = args.profile {
        config.profile = profile;
    }
    if let Some(ms) = args.read_timeout_ms {
        config.read_timeout_ms = ms;
    }

    tracing::info!(
        "vspark v{} -> {} ({} profile)",
        vspark::VERSION,
        config.device_addr,
        config.profile
    );

    let spark = Spark::connect(&config)?;

    match args.command {
        Commands::Mode { pin, mode } => spark.set_mode(&pin, mode)?,
        Commands::Write { pin, value } => spark.digital_write(&pin, Level::from_byte(value))?,
        Commands::AnalogWrite { pin, value } => spark.analog_write(&pin, value)?,
        Commands::Read { pin } => println!("{}", spark.digital_read(&pin)?),
        Commands::AnalogRead { pin } => println!("{}", spark.analog_read(&pin)?),
        Commands::AlwaysSend { pin, kind } => spark.always_send(&pin, kind)?,
        Commands::Servo { pin, degrees } => spark.servo_write(&pin, degrees)?,
        Commands::Blink { pin, interval_ms, count } => blink(&spark, &pin, interval_ms, count)?,
    }

    Ok(())
}

fn blink(spark: &Spark, pin: &str, interval_ms: u64, count: Option<u64>) -> Result<()> {
    spark.set_mode(pin, Mode::Output)?;

    let interval = Duration::from_millis(interval_ms);
    let mut level = Level::High;
    let mut toggles = 0u64;

    while count.map_or(true, |limit| toggles < limit) {
        spark.digital_write(pin, level)?;
        tracing::debug!("{} -> {:?}", pin, level);
        level = level.toggled();
        toggles += 1;
        thread::sleep(interval);
    }

    Ok(())
}
