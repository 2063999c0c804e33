//! LCD2USB Control Tool
//!
//! CLI for adjusting contrast and brightness of a display attached through
//! an LCD2USB adapter, and for reading back adapter state.

mod config;

use anyhow::{Context, Result};
use clap::Parser;
use lcd2usb_hw::{FadeDirection, Lcd2Usb, SetRegister, StdDelay, Transport, UsbTransport};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::Config;

#[derive(Parser)]
#[command(name = "lcdcontrol")]
#[command(about = "Program to control a display connected via LCD2USB")]
#[command(version)]
struct Cli {
    /// Produce verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Set static contrast
    #[arg(short, long, value_name = "VALUE")]
    contrast: Option<u8>,

    /// Set static brightness
    #[arg(short, long, value_name = "VALUE")]
    brightness: Option<u8>,

    /// Fade in brightness, pausing TIME milliseconds per step
    #[arg(short = 'u', long, value_name = "TIME")]
    fade_in: Option<u32>,

    /// Fade out brightness, pausing TIME milliseconds per step
    #[arg(short = 'd', long, value_name = "TIME")]
    fade_out: Option<u32>,

    /// Clear the display
    #[arg(long)]
    clear: bool,

    /// Return the cursor home
    #[arg(long)]
    home: bool,

    /// Write text to the first controller
    #[arg(long, value_name = "STRING")]
    text: Option<String>,

    /// Number of echo rounds (0 skips the echo test)
    #[arg(long, value_name = "N")]
    echo_rounds: Option<u32>,

    /// Seed for the echo test values
    #[arg(long, value_name = "N")]
    seed: Option<u64>,

    /// USB transfer timeout in milliseconds
    #[arg(long, value_name = "MS")]
    timeout: Option<u64>,

    /// Configuration file (TOML)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut config = match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => Config::default(),
    };
    if let Some(ms) = cli.timeout {
        config.usb.timeout_ms = ms;
    }
    if let Some(rounds) = cli.echo_rounds {
        config.echo.rounds = rounds;
        config.echo.enabled = rounds > 0;
    }
    if cli.seed.is_some() {
        config.echo.seed = cli.seed;
    }

    let transport =
        UsbTransport::open(config.usb.timeout()).context("Could not find LCD2USB device")?;
    info!("Using transfer timeout of {:?}", transport.timeout());

    let mut lcd = Lcd2Usb::new(transport);

    if config.echo.enabled {
        run_echo_test(&mut lcd, &config, cli.verbose);
    }
    show_adapter_state(&mut lcd, cli.verbose);
    apply_settings(&mut lcd, &cli);

    Ok(())
}

/// Prints a failed request the way every step reports it, then moves on.
fn report<T>(result: lcd2usb_hw::Result<T>) -> Option<T> {
    result.map_err(|e| eprintln!("{}", e)).ok()
}

fn run_echo_test<T: Transport>(lcd: &mut Lcd2Usb<T>, config: &Config, verbose: bool) {
    let mut rng = match config.echo.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    if let Some(echo) = report(lcd.echo_test(config.echo.rounds, &mut rng)) {
        if !echo.is_clean() {
            eprintln!(
                "ERROR: {} out of {} echo transfers failed!",
                echo.failures,
                echo.rounds()
            );
        } else if verbose {
            println!("Echo test successful!");
        }
    }
}

fn show_adapter_state<T: Transport>(lcd: &mut Lcd2Usb<T>, verbose: bool) {
    if let Some(version) = report(lcd.firmware_version()) {
        if verbose {
            println!("Firmware version {}", version);
        }
    }

    if let Some(controllers) = report(lcd.controllers()) {
        if controllers.is_empty() {
            if verbose {
                eprintln!("No controllers installed!");
            }
        } else if verbose {
            println!("Installed controllers: {}", controllers);
        }
    }

    if let Some(keys) = report(lcd.keys()) {
        if verbose {
            println!("Keys: {}", keys);
        }
    }
}

fn apply_settings<T: Transport>(lcd: &mut Lcd2Usb<T>, cli: &Cli) {
    let mut delay = StdDelay;

    if let Some(contrast) = cli.contrast {
        report(lcd.set_register(SetRegister::Contrast, contrast));
    }
    if let Some(ms) = cli.fade_out {
        report(lcd.fade(FadeDirection::Out, ms, &mut delay));
    }
    if let Some(ms) = cli.fade_in {
        report(lcd.fade(FadeDirection::In, ms, &mut delay));
    }
    if let Some(brightness) = cli.brightness {
        report(lcd.set_register(SetRegister::Brightness, brightness));
    }

    if cli.clear {
        report(lcd.clear());
    }
    if cli.home {
        report(lcd.home());
    }
    if let Some(text) = &cli.text {
        report(lcd.write_text(text));
    }
    report(lcd.flush());
}
