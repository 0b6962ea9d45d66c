/// Byte-level access to the cassette EEPROM over I2C, plus write-completion
/// polling.
use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::{Error as _, ErrorKind, I2c};

use crate::config::{self, BusConfig};

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusError {
    /// The address or data phase failed at the protocol level.
    #[error("bus transmission failed: {0:?}")]
    Transmission(ErrorKind),
    /// Read data never became available within the configured wait.
    #[error("timed out waiting for read data")]
    Timeout,
    /// The EEPROM never acknowledged after a write.
    #[error("write not acknowledged")]
    WriteNotAcknowledged,
    /// Block read larger than a single transfer.
    #[error("transfer of {len} bytes exceeds the bus limit")]
    TransferTooLong { len: usize },
}

pub struct Eeprom<I2C, D> {
    i2c: I2C,
    delay: D,
    config: BusConfig,
}

impl<I2C: I2c, D: DelayNs> Eeprom<I2C, D> {
    pub fn new(i2c: I2C, delay: D, config: BusConfig) -> Self {
        Self { i2c, delay, config }
    }

    pub fn config(&self) -> &BusConfig {
        &self.config
    }

    /// Hand back the bus and delay.
    pub fn release(self) -> (I2C, D) {
        (self.i2c, self.delay)
    }

    // =========================================================================
    // Transactions
    // =========================================================================

    pub fn read_byte(&mut self, offset: u8) -> Result<u8, BusError> {
        let mut buf = [0u8; 1];
        self.read_block(offset, &mut buf)?;
        Ok(buf[0])
    }

    /// Fill `buf` from `offset`. Either the whole buffer is read or an error
    /// is returned; partial data never escapes.
    pub fn read_block(&mut self, offset: u8, buf: &mut [u8]) -> Result<(), BusError> {
        if buf.len() > config::MAX_TRANSFER_SIZE {
            return Err(BusError::TransferTooLong { len: buf.len() });
        }
        if buf.is_empty() {
            return Ok(());
        }

        self.select(offset)?;
        self.fetch(buf)
    }

    /// Offset and value go out in one transaction. Callers must still wait
    /// for the internal write cycle with [`Self::await_write_ready`].
    pub fn write_byte(&mut self, offset: u8, value: u8) -> Result<(), BusError> {
        let addr = self.config.device_address();
        self.i2c
            .write(addr, &[offset, value])
            .map_err(|e| BusError::Transmission(e.kind()))?;
        trace!("EEPROM write 0x{:02x} <- 0x{:02x}", offset, value);
        Ok(())
    }

    // =========================================================================
    // Write-completion polling
    // =========================================================================

    /// Probe the EEPROM until it acknowledges its address again, meaning the
    /// internal write cycle has finished. Gives up after the configured
    /// number of attempts.
    pub fn await_write_ready(&mut self, offset: u8) -> bool {
        let addr = self.config.device_address();
        for attempt in 0..self.config.write_poll_attempts {
            if self.i2c.write(addr, &[offset]).is_ok() {
                debug!("EEPROM ready after {} probe(s)", attempt + 1);
                return true;
            }
            self.delay.delay_us(self.config.write_poll_interval_us);
        }

        warn!(
            "EEPROM did not acknowledge after {} probes",
            self.config.write_poll_attempts
        );
        false
    }

    // =========================================================================
    // Internals
    // =========================================================================

    /// Address phase: point the EEPROM at `offset`. Not retried.
    fn select(&mut self, offset: u8) -> Result<(), BusError> {
        let addr = self.config.device_address();
        self.i2c.write(addr, &[offset]).map_err(|e| {
            let kind = e.kind();
            warn!("EEPROM select 0x{:02x} failed: {:?}", offset, kind);
            BusError::Transmission(kind)
        })
    }

    /// Data phase: request `buf.len()` bytes, waiting while the device is not
    /// yet ready to hand them over.
    fn fetch(&mut self, buf: &mut [u8]) -> Result<(), BusError> {
        let addr = self.config.device_address();
        let step_ms = self.config.read_poll_interval_ms.max(1);
        let mut waited_ms = 0u32;

        loop {
            match self.i2c.read(addr, buf) {
                Ok(()) => return Ok(()),
                Err(e) => match e.kind() {
                    ErrorKind::NoAcknowledge(_) => {
                        if waited_ms >= self.config.read_timeout_ms {
                            warn!("EEPROM read of {} bytes timed out", buf.len());
                            return Err(BusError::Timeout);
                        }
                        self.delay.delay_ms(step_ms);
                        waited_ms = waited_ms.saturating_add(step_ms);
                    }
                    kind => {
                        warn!("EEPROM read failed: {:?}", kind);
                        return Err(BusError::Transmission(kind));
                    }
                },
            }
        }
    }
}
