//! Cassette counter refill.
//!
//! Reads the identifier and usage counter out of a cassette's I2C EEPROM and
//! writes the counter back to its factory-full value when it has run down.
//! The library is `no_std` and generic over `embedded-hal` 1.0 [`I2c`] and
//! [`DelayNs`], so the same code drives the RP2040 firmware and the
//! simulated EEPROM in the tests.
//!
//! [`I2c`]: embedded_hal::i2c::I2c
//! [`DelayNs`]: embedded_hal::delay::DelayNs
#![cfg_attr(not(test), no_std)]

// Must come first so the logging macros are visible to the other modules.
mod fmt;

pub mod cassette;
pub mod config;
pub mod counter;
pub mod eeprom;
pub mod refill;
pub mod status;

pub use cassette::{Cassette, Category};
pub use config::BusConfig;
pub use eeprom::{BusError, Eeprom};
pub use fmt::HexBytes;
pub use refill::{run_cycle, Outcome};
pub use status::{BlinkPattern, Frame, StatusEvent, StatusSink};
