//! Cassette identification.
use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

use crate::config;
use crate::eeprom::Eeprom;
use crate::fmt::HexBytes;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Category {
    /// The identifier could not be read at all.
    Undefined,
    /// Read fine, but matched no known identifier.
    Unknown,
    /// `"Classique"`
    Pop,
    /// `"Entretien"`
    Rock,
}

impl Category {
    /// Exact, length-bounded match against the known identifiers.
    pub fn classify(id: &[u8; config::CATEGORY_LEN]) -> Self {
        if id == config::POP_IDENTIFIER {
            Category::Pop
        } else if id == config::ROCK_IDENTIFIER {
            Category::Rock
        } else {
            Category::Unknown
        }
    }

    /// Encoded counter value of a freshly manufactured cassette.
    pub fn full_counter(self) -> Option<u8> {
        match self {
            Category::Pop => Some(config::POP_FULL_COUNTER),
            Category::Rock => Some(config::ROCK_FULL_COUNTER),
            Category::Undefined | Category::Unknown => None,
        }
    }
}

/// The cassette's EEPROM, seen through its fixed memory layout.
pub struct Cassette<I2C, D> {
    pub(crate) eeprom: Eeprom<I2C, D>,
}

impl<I2C: I2c, D: DelayNs> Cassette<I2C, D> {
    pub fn new(eeprom: Eeprom<I2C, D>) -> Self {
        Self { eeprom }
    }

    pub fn into_inner(self) -> Eeprom<I2C, D> {
        self.eeprom
    }

    /// Read the identifier block and classify it.
    pub fn identify(&mut self) -> Category {
        let mut id = [0u8; config::CATEGORY_LEN];
        if let Err(e) = self.eeprom.read_block(config::CATEGORY_OFFSET, &mut id) {
            warn!("cannot read cassette identifier: {:?}", e);
            return Category::Undefined;
        }

        let category = Category::classify(&id);
        match category {
            Category::Unknown => info!("unrecognised cassette, raw id {:?}", HexBytes(&id)),
            _ => info!("cassette category: {:?}", category),
        }
        category
    }
}
