//! Command line configuration.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::color::Rgb;
use crate::control::Backoff;
use crate::drip::{DripConfig, DripConfigError};
use crate::renderer::{IdleBehavior, RendererConfig};
use crate::runtime::RuntimeConfig;
use crate::sink::DEFAULT_SPEED_HZ;

/// Drip animation service for addressable LED strips
///
/// Starts a drip on every `TICK` from the control server and reports
/// `DRIP_END` when it reaches the end of the strip.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Drive the LED strip
    Run(RunArgs),
    /// Run the control server that pulses `TICK` and relays messages
    Relay(RelayArgs),
}

/// Pixel sink to render into
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Driver {
    /// WS2812 strip on a spidev node
    Spi,
    /// Truecolor preview in the terminal
    Terminal,
    /// Keep frames in memory only (headless)
    Headless,
}

#[derive(Debug, Args)]
pub struct RunArgs {
    /// Control server URL
    #[arg(short, long, default_value = "ws://localhost:3000")]
    pub url: String,
    /// Number of LEDs on the strip
    #[arg(short = 'n', long, default_value_t = 12)]
    pub leds: usize,
    /// Animation tick period
    #[arg(long, default_value_t = 50, value_name = "MS", value_parser = clap::value_parser!(u64).range(1..))]
    pub tick_ms: u64,
    /// Global brightness (0-255)
    #[arg(short, long, default_value_t = u8::MAX)]
    pub brightness: u8,
    /// Output driver
    #[arg(short, long, value_enum, default_value_t = Driver::Spi)]
    pub driver: Driver,
    /// spidev node of the strip
    #[arg(long, default_value = "/dev/spidev0.0", value_name = "PATH")]
    pub spi_device: PathBuf,
    /// SPI clock
    #[arg(long, default_value_t = DEFAULT_SPEED_HZ, value_name = "HZ")]
    pub spi_speed_hz: u32,
    /// Pixels drawn behind the drop
    #[arg(long, default_value_t = 2)]
    pub trail_length: usize,
    /// Trail brightness before falloff; the first trail pixel is one step dimmer
    #[arg(long, default_value_t = 150)]
    pub trail_brightness: u8,
    /// Brightness lost per trail pixel
    #[arg(long, default_value_t = 30)]
    pub trail_falloff: u8,
    /// Color of the drop
    #[arg(long, default_value = "0,150,255", value_name = "R,G,B", value_parser = parse_rgb)]
    pub drop_color: Rgb,
    /// Base step per tick, in pixels
    #[arg(long, default_value_t = 0.25)]
    pub velocity_base: f32,
    /// Coefficient of the eased part of the step
    #[arg(long, default_value_t = 2.0)]
    pub acceleration: f32,
    /// What the strip shows between drips
    #[arg(long, value_enum, default_value_t = IdleBehavior::Hold)]
    pub idle: IdleBehavior,
    /// First reconnect delay
    #[arg(long, default_value_t = 250, value_name = "MS", value_parser = clap::value_parser!(u64).range(1..))]
    pub backoff_min_ms: u64,
    /// Longest reconnect delay
    #[arg(long, default_value_t = 10_000, value_name = "MS", value_parser = clap::value_parser!(u64).range(1..))]
    pub backoff_max_ms: u64,
}

impl RunArgs {
    pub fn drip_config(&self) -> Result<DripConfig, DripConfigError> {
        Ok(DripConfig::new(self.leds)?
            .with_motion(self.velocity_base, self.acceleration)?
            .with_trail_length(self.trail_length)
            .with_trail_brightness(self.trail_brightness, self.trail_falloff)
            .with_drop_color(self.drop_color))
    }

    pub fn runtime_config(&self) -> Result<RuntimeConfig, DripConfigError> {
        let renderer = RendererConfig {
            drip: self.drip_config()?,
            brightness: self.brightness,
            idle: self.idle,
        };
        Ok(RuntimeConfig {
            url: self.url.clone(),
            renderer,
            tick: embassy_time::Duration::from_millis(self.tick_ms),
            backoff: Backoff::new(
                Duration::from_millis(self.backoff_min_ms),
                Duration::from_millis(self.backoff_max_ms),
            ),
        })
    }
}

fn parse_rgb(value: &str) -> Result<Rgb, String> {
    let channels = value
        .split(',')
        .map(|channel| channel.trim().parse::<u8>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|err| format!("invalid color channel: {err}"))?;
    match channels[..] {
        [r, g, b] => Ok(Rgb { r, g, b }),
        _ => Err(format!("expected R,G,B, got {value:?}")),
    }
}

#[derive(Debug, Args)]
pub struct RelayArgs {
    /// Address to listen on
    #[arg(short, long, default_value = "0.0.0.0:3000")]
    pub listen: SocketAddr,
    /// `TICK` pulse period
    #[arg(long, default_value_t = 1000, value_name = "MS", value_parser = clap::value_parser!(u64).range(1..))]
    pub pulse_ms: u64,
}

impl RelayArgs {
    pub fn pulse(&self) -> Duration {
        Duration::from_millis(self.pulse_ms)
    }
}
