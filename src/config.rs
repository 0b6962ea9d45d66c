// Hardware, memory-layout and timing constants.

// =============================================================================
// Bus addressing
// =============================================================================

/// Fixed high nibble of the 24Cxx-style EEPROM address (0b1010_xxx).
pub const EEPROM_ADDRESS_BASE: u8 = 0x50;

/// Mask for the 3-bit device-select field (A2..A0 strap pins).
pub const DEVICE_SELECT_MASK: u8 = 0x07;

/// Device-select strap value used on the reference board.
pub const DEFAULT_DEVICE_SELECT: u8 = 0;

/// Largest block a single read transaction may request.
pub const MAX_TRANSFER_SIZE: usize = 32;

/// Bus clock for the cassette EEPROM (standard mode).
pub const I2C_FREQ_HZ: u32 = 100_000;

// =============================================================================
// Cassette memory layout
// =============================================================================

/// Offset of the 9-byte ASCII identifier.
pub const CATEGORY_OFFSET: u8 = 0x90;

/// Length of the identifier block.
pub const CATEGORY_LEN: usize = 9;

/// Offset of the encoded remaining-uses counter.
pub const COUNTER_OFFSET: u8 = 0xA1;

// =============================================================================
// Identifiers and counter encoding
// =============================================================================

pub const POP_IDENTIFIER: &[u8; CATEGORY_LEN] = b"Classique";
pub const ROCK_IDENTIFIER: &[u8; CATEGORY_LEN] = b"Entretien";

/// The counter is stored XOR'd with this mask.
pub const COUNTER_XOR_MASK: u8 = 0x50;

/// Encoded "full" counter for a Pop cassette (30 uses).
pub const POP_FULL_COUNTER: u8 = 0x4E;

/// Encoded "full" counter for a Rock cassette (1 use).
pub const ROCK_FULL_COUNTER: u8 = 0x51;

/// Value returned by counter reads that failed on the bus.
/// A cassette that genuinely stores 0xFF reads the same.
pub const READ_ERROR_SENTINEL: u8 = 0xFF;

// =============================================================================
// Bus timing
// =============================================================================

/// Upper bound on waiting for read data to become available.
pub const READ_TIMEOUT_MS: u32 = 100;

/// Wait between read-availability polls.
pub const READ_POLL_INTERVAL_MS: u32 = 1;

/// Probes sent after a write before giving up on the EEPROM (~30 ms total).
pub const WRITE_POLL_ATTEMPTS: u32 = 100;

/// Wait between write-completion probes.
pub const WRITE_POLL_INTERVAL_US: u32 = 300;

// =============================================================================
// Status LED patterns
// =============================================================================

/// NoCassette: time each LED stays lit while alternating.
pub const NO_CASSETTE_PHASE_MS: u32 = 500;
pub const NO_CASSETTE_DURATION_MS: u32 = 1_000;

/// Success: OK LED steady.
pub const SUCCESS_DURATION_MS: u32 = 10_000;

/// Failure: fault LED toggle interval.
pub const FAILURE_PHASE_MS: u32 = 100;
pub const FAILURE_DURATION_MS: u32 = 5_000;

// =============================================================================
// Runtime bus configuration
// =============================================================================

/// Tunable bus parameters. `Default` matches the reference board and a
/// typical 24C02 datasheet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BusConfig {
    /// A2..A0 strap value; only the low three bits are used.
    pub device_select: u8,
    pub read_timeout_ms: u32,
    pub read_poll_interval_ms: u32,
    pub write_poll_attempts: u32,
    pub write_poll_interval_us: u32,
}

impl BusConfig {
    /// 7-bit bus address of the EEPROM selected by `device_select`.
    pub const fn device_address(&self) -> u8 {
        EEPROM_ADDRESS_BASE | (self.device_select & DEVICE_SELECT_MASK)
    }
}

impl Default for BusConfig {
    fn default() -> Self {
        Self {
            device_select: DEFAULT_DEVICE_SELECT,
            read_timeout_ms: READ_TIMEOUT_MS,
            read_poll_interval_ms: READ_POLL_INTERVAL_MS,
            write_poll_attempts: WRITE_POLL_ATTEMPTS,
            write_poll_interval_us: WRITE_POLL_INTERVAL_US,
        }
    }
}
