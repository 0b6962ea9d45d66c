//! Simulated cassette EEPROM, fake clock and recording status sink shared by
//! the integration tests.

#![allow(dead_code)]

use cassette_reset::config;
use cassette_reset::{BusConfig, Cassette, Eeprom, StatusEvent, StatusSink};
use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::{ErrorKind, ErrorType, I2c, NoAcknowledgeSource, Operation};

/// Never becomes ready / never finishes a write cycle.
pub const FOREVER: u32 = u32::MAX;

/// 256-byte 24C02-style EEPROM with an internal address pointer.
pub struct SimEeprom {
    pub address: u8,
    pub memory: [u8; 256],
    pointer: u8,
    /// When false, every transaction NACKs its address byte.
    pub present: bool,
    /// Read attempts NACKed before data is handed over.
    pub read_not_ready: u32,
    /// Reads with the pointer here fail with a bus error.
    pub fail_reads_at: Option<u8>,
    /// Data writes fail with a bus error.
    pub fail_writes: bool,
    /// Address probes NACKed after each data write.
    pub write_cycle_probes: u32,
    busy: u32,
    /// Every (offset, value) stored by a data write.
    pub data_writes: Vec<(u8, u8)>,
    /// Offset-only writes (selects and readiness probes), failed ones included.
    pub selects: usize,
    /// Read attempts, failed ones included.
    pub reads: usize,
    /// Every operation seen on the bus.
    pub ops: usize,
}

impl SimEeprom {
    pub fn new() -> Self {
        Self {
            address: config::EEPROM_ADDRESS_BASE,
            memory: [0xFF; 256],
            pointer: 0,
            present: true,
            read_not_ready: 0,
            fail_reads_at: None,
            fail_writes: false,
            write_cycle_probes: 0,
            busy: 0,
            data_writes: Vec::new(),
            selects: 0,
            reads: 0,
            ops: 0,
        }
    }

    /// EEPROM programmed with an identifier and an encoded counter.
    pub fn with_cassette(id: &[u8; config::CATEGORY_LEN], counter: u8) -> Self {
        let mut sim = Self::new();
        sim.load(config::CATEGORY_OFFSET, id);
        sim.memory[config::COUNTER_OFFSET as usize] = counter;
        sim
    }

    pub fn load(&mut self, offset: u8, bytes: &[u8]) {
        let start = offset as usize;
        self.memory[start..start + bytes.len()].copy_from_slice(bytes);
    }

    pub fn counter(&self) -> u8 {
        self.memory[config::COUNTER_OFFSET as usize]
    }

    fn write(&mut self, bytes: &[u8]) -> Result<(), ErrorKind> {
        if bytes.len() == 1 {
            self.selects += 1;
        }
        if self.busy > 0 {
            if self.busy != FOREVER {
                self.busy -= 1;
            }
            return Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address));
        }
        let Some((&offset, data)) = bytes.split_first() else {
            return Ok(());
        };
        self.pointer = offset;
        if data.is_empty() {
            return Ok(());
        }
        if self.fail_writes {
            return Err(ErrorKind::Bus);
        }
        for &value in data {
            self.memory[self.pointer as usize] = value;
            self.data_writes.push((self.pointer, value));
            self.pointer = self.pointer.wrapping_add(1);
        }
        self.busy = self.write_cycle_probes;
        Ok(())
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<(), ErrorKind> {
        self.reads += 1;
        if self.fail_reads_at == Some(self.pointer) {
            return Err(ErrorKind::Bus);
        }
        if self.read_not_ready > 0 {
            if self.read_not_ready != FOREVER {
                self.read_not_ready -= 1;
            }
            return Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address));
        }
        for b in buf.iter_mut() {
            *b = self.memory[self.pointer as usize];
            self.pointer = self.pointer.wrapping_add(1);
        }
        Ok(())
    }
}

impl ErrorType for SimEeprom {
    type Error = ErrorKind;
}

impl I2c for SimEeprom {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        for op in operations {
            self.ops += 1;
            if !self.present || address != self.address {
                if let Operation::Write(bytes) = op {
                    if bytes.len() == 1 {
                        self.selects += 1;
                    }
                }
                return Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address));
            }
            match op {
                Operation::Write(bytes) => self.write(*bytes)?,
                Operation::Read(buf) => self.read(&mut buf[..])?,
            }
        }
        Ok(())
    }
}

/// Delay that only accounts for time.
#[derive(Default)]
pub struct FakeDelay {
    pub elapsed_ns: u64,
}

impl FakeDelay {
    pub fn elapsed_us(&self) -> u64 {
        self.elapsed_ns / 1_000
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ns / 1_000_000
    }
}

impl DelayNs for FakeDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.elapsed_ns += u64::from(ns);
    }

    fn delay_us(&mut self, us: u32) {
        self.elapsed_ns += u64::from(us) * 1_000;
    }

    fn delay_ms(&mut self, ms: u32) {
        self.elapsed_ns += u64::from(ms) * 1_000_000;
    }
}

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<StatusEvent>,
}

impl StatusSink for RecordingSink {
    fn emit(&mut self, event: StatusEvent) {
        self.events.push(event);
    }
}

pub fn eeprom(sim: SimEeprom) -> Eeprom<SimEeprom, FakeDelay> {
    Eeprom::new(sim, FakeDelay::default(), BusConfig::default())
}

pub fn cassette(sim: SimEeprom) -> Cassette<SimEeprom, FakeDelay> {
    Cassette::new(eeprom(sim))
}

/// Tear a cassette back down into its simulated parts.
pub fn release(cassette: Cassette<SimEeprom, FakeDelay>) -> (SimEeprom, FakeDelay) {
    cassette.into_inner().release()
}
