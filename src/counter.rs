//! Remaining-uses counter: XOR-encoded single byte.
use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

use crate::cassette::Cassette;
use crate::config;
use crate::eeprom::BusError;

pub use crate::config::READ_ERROR_SENTINEL;

/// Stored byte to number of remaining uses.
#[inline]
pub const fn decode(encoded: u8) -> u8 {
    encoded ^ config::COUNTER_XOR_MASK
}

/// Number of remaining uses to stored byte.
#[inline]
pub const fn encode(uses: u8) -> u8 {
    uses ^ config::COUNTER_XOR_MASK
}

/// A refill is due when fewer uses remain than a full cassette holds.
pub fn needs_refill(current: u8, max: u8) -> bool {
    decode(current) < decode(max)
}

impl<I2C: I2c, D: DelayNs> Cassette<I2C, D> {
    /// Encoded counter, or [`READ_ERROR_SENTINEL`] if the bus read failed.
    pub fn read_remaining_uses(&mut self) -> u8 {
        match self.eeprom.read_byte(config::COUNTER_OFFSET) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("counter read failed: {:?}", e);
                READ_ERROR_SENTINEL
            }
        }
    }

    /// Store `encoded` and wait for the EEPROM to finish its write cycle.
    pub fn write_remaining_uses(&mut self, encoded: u8) -> Result<(), BusError> {
        self.eeprom.write_byte(config::COUNTER_OFFSET, encoded)?;
        if !self.eeprom.await_write_ready(config::COUNTER_OFFSET) {
            return Err(BusError::WriteNotAcknowledged);
        }
        Ok(())
    }
}
