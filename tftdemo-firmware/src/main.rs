//! TFT Demo - display library exercise firmware
//!
//! Main firmware binary for RP2040 boards with an ILI9341 panel and an
//! XPT2046 touch controller. All demo logic lives in tftdemo-core; this
//! binary wires the board's buses and pins into it and runs the demo in a
//! single task.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::peripherals::{SPI0, SPI1};
use embassy_rp::spi::{self, Blocking, Spi};
use embassy_time::{Delay, Instant, Timer};
use embedded_hal_bus::spi::ExclusiveDevice;
use rand_core::SeedableRng;
use rand_xoshiro::Xoshiro128PlusPlus;
use {defmt_rtt as _, panic_probe as _};

use tftdemo_core::config::{parse_config, DemoConfig};
use tftdemo_core::Demo;
use tftdemo_display::EgCanvas;
use tftdemo_drivers::panel::Ili9341;
use tftdemo_drivers::touch::{TouchCalibration, Xpt2046};

use crate::clock::{EmbassyMonotonic, UptimeWallClock};

mod clock;

/// Embedded configuration (compiled into firmware)
/// Edit demo.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../demo.toml");

/// Panel write clock
const PANEL_SPI_HZ: u32 = 40_000_000;

/// XPT2046 tops out at 2.5 MHz
const TOUCH_SPI_HZ: u32 = 2_000_000;

type PanelBus = ExclusiveDevice<Spi<'static, SPI0, Blocking>, Output<'static>, Delay>;
type Panel = Ili9341<PanelBus, Output<'static>>;
type TouchBus = ExclusiveDevice<Spi<'static, SPI1, Blocking>, Output<'static>, Delay>;
type Touch = Xpt2046<TouchBus, Input<'static>>;
type BoardDemo =
    Demo<EgCanvas<Panel>, Touch, UptimeWallClock, EmbassyMonotonic, Delay, Xoshiro128PlusPlus>;

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("TFT demo starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = load_config();

    // Display on SPI0: SCK=GPIO18, MOSI=GPIO19, MISO=GPIO16
    // CS=GPIO17, DC=GPIO20, RST=GPIO21, backlight=GPIO22
    let mut panel_spi_config = spi::Config::default();
    panel_spi_config.frequency = PANEL_SPI_HZ;
    let panel_spi = Spi::new_blocking(p.SPI0, p.PIN_18, p.PIN_19, p.PIN_16, panel_spi_config);
    let panel_cs = Output::new(p.PIN_17, Level::High);
    // CS is a plain GPIO, setting it cannot fail
    let panel_bus = ExclusiveDevice::new(panel_spi, panel_cs, Delay).unwrap();
    let dc = Output::new(p.PIN_20, Level::Low);
    let mut reset = Output::new(p.PIN_21, Level::High);
    let _backlight = Output::new(p.PIN_22, Level::High);

    reset.set_low();
    Timer::after_millis(10).await;
    reset.set_high();
    Timer::after_millis(120).await;

    let mut panel = Ili9341::new(panel_bus, dc);
    match panel.init(&mut Delay) {
        Ok(()) => info!("ILI9341 initialized"),
        Err(e) => error!("ILI9341 init failed: {}", Debug2Format(&e)),
    }

    // Touch on SPI1: SCK=GPIO10, MOSI=GPIO11, MISO=GPIO12, CS=GPIO13, PENIRQ=GPIO14
    let mut touch_spi_config = spi::Config::default();
    touch_spi_config.frequency = TOUCH_SPI_HZ;
    let touch_spi = Spi::new_blocking(p.SPI1, p.PIN_10, p.PIN_11, p.PIN_12, touch_spi_config);
    let touch_cs = Output::new(p.PIN_13, Level::High);
    let touch_bus = ExclusiveDevice::new(touch_spi, touch_cs, Delay).unwrap();
    let calibration = TouchCalibration {
        width: config.display.width,
        height: config.display.height,
        ..TouchCalibration::default()
    };
    let touch = Xpt2046::new(touch_bus, Input::new(p.PIN_14, Pull::Up), calibration);
    if !config.display.touch {
        info!("Touch disabled in demo.toml");
    }

    // Same sequence every boot unless the seed changes; mix in uptime so
    // a reset mid-demo does not replay it exactly.
    let rng = Xoshiro128PlusPlus::seed_from_u64(config.random.seed ^ Instant::now().as_ticks());

    let demo: BoardDemo = Demo::new(
        config,
        EgCanvas::new(panel),
        touch,
        UptimeWallClock::new(config.clock.start),
        EmbassyMonotonic,
        Delay,
        rng,
    );

    spawner.spawn(demo_task(demo)).unwrap();
    info!("Demo task spawned");

    // Keeps the backlight pin owned; all work happens in the demo task
    loop {
        Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}

/// Runs the intro screen, then demo passes forever
#[embassy_executor::task]
async fn demo_task(mut demo: BoardDemo) {
    info!("Demo task started");
    demo.run_forever().await
}

/// Parse the embedded demo.toml
///
/// build.rs validates the file, so a rejection here means the two parsers
/// disagree; run with defaults rather than not at all.
fn load_config() -> DemoConfig {
    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!(
                "Configuration loaded: {}x{}, {}-bit, touch={}",
                config.display.width,
                config.display.height,
                config.display.color_depth.bits(),
                config.display.touch
            );
            config
        }
        Err(e) => {
            warn!("demo.toml rejected ({}), using defaults", e);
            DemoConfig::default()
        }
    }
}
