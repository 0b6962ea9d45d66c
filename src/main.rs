#![no_std]
#![no_main]

mod leds;

use cassette_reset::config::I2C_FREQ_HZ;
use cassette_reset::{run_cycle, BusConfig, Cassette, Eeprom, StatusEvent, StatusSink};
use defmt::*;
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::i2c::{self, I2c};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::Delay;
use panic_probe as _;

use crate::leds::StatusLeds;

// =============================================================================
// Shared state between the refill loop and the LED task
// =============================================================================

/// Latest cycle status, consumed by the LED task.
static STATUS: Signal<CriticalSectionRawMutex, StatusEvent> = Signal::new();

/// Raised by the LED task once a pattern has finished playing.
static RENDER_DONE: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// Forwards status events to the LED task.
struct LedSink;

impl StatusSink for LedSink {
    fn emit(&mut self, event: StatusEvent) {
        STATUS.signal(event);
    }
}

// =============================================================================
// Entry point
// =============================================================================

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_rp::init(Default::default());

    info!("Cassette reset starting up");

    // ---- Cassette EEPROM on I2C0 (GP4 = SDA, GP5 = SCL) ----
    let mut i2c_config = i2c::Config::default();
    i2c_config.frequency = I2C_FREQ_HZ;
    let i2c = I2c::new_blocking(p.I2C0, p.PIN_5, p.PIN_4, i2c_config);

    let bus_config = BusConfig::default();
    info!(
        "EEPROM at 0x{:02x}, read timeout {} ms",
        bus_config.device_address(),
        bus_config.read_timeout_ms
    );
    let mut cassette = Cassette::new(Eeprom::new(i2c, Delay, bus_config));

    // ---- LEDs ----
    let led_ok = Output::new(p.PIN_25, Level::Low);
    let led_fault = Output::new(p.PIN_15, Level::Low);
    spawner.must_spawn(status_led_task(StatusLeds::new(led_ok, led_fault)));

    // ---- Refill loop ----
    let mut sink = LedSink;
    loop {
        let outcome = run_cycle(&mut cassette, &mut sink);
        debug!("cycle finished: {}", outcome);

        // Next cycle starts once the operator has seen this one's result.
        RENDER_DONE.wait().await;
    }
}

// =============================================================================
// LED task: renders each status event as a blink pattern
// =============================================================================

#[embassy_executor::task]
async fn status_led_task(mut leds: StatusLeds<'static>) {
    leds.all_off();
    loop {
        let event = STATUS.wait().await;
        leds.render(event.pattern()).await;
        RENDER_DONE.signal(());
    }
}
