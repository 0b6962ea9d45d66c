//! Per-cycle refill decision.
//!
//! One call to [`run_cycle`] identifies the cassette, reads its counter and
//! writes the category's full value back when fewer uses remain. Nothing is
//! carried between calls: the same EEPROM contents always give the same
//! outcome.
use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

use crate::cassette::{Cassette, Category};
use crate::counter::{self, READ_ERROR_SENTINEL};
use crate::status::{StatusEvent, StatusSink};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Outcome {
    /// Identifier unreadable; most likely no cassette is inserted.
    CannotRead,
    UnknownCassette,
    /// Counter read failed, or the cassette stores the sentinel value.
    ReadFailed,
    ResetPerformed,
    NothingToDo,
    ResetFailed,
}

impl Outcome {
    pub fn status(self) -> StatusEvent {
        match self {
            Outcome::CannotRead => StatusEvent::NoCassette,
            Outcome::ResetPerformed | Outcome::NothingToDo => StatusEvent::Success,
            Outcome::UnknownCassette | Outcome::ReadFailed | Outcome::ResetFailed => {
                StatusEvent::Failure
            }
        }
    }

    pub fn is_success(self) -> bool {
        self.status() == StatusEvent::Success
    }
}

/// Run one identify-then-decide cycle and emit its status event.
pub fn run_cycle<I2C, D, S>(cassette: &mut Cassette<I2C, D>, sink: &mut S) -> Outcome
where
    I2C: I2c,
    D: DelayNs,
    S: StatusSink + ?Sized,
{
    let outcome = decide(cassette);
    match outcome {
        Outcome::CannotRead => warn!("cannot read cassette"),
        Outcome::ReadFailed | Outcome::ResetFailed => error!("counter reset failed ({:?})", outcome),
        _ => info!("cycle outcome: {:?}", outcome),
    }
    sink.emit(outcome.status());
    outcome
}

fn decide<I2C: I2c, D: DelayNs>(cassette: &mut Cassette<I2C, D>) -> Outcome {
    let category = cassette.identify();
    let max = match category.full_counter() {
        Some(max) => max,
        None if category == Category::Undefined => return Outcome::CannotRead,
        None => return Outcome::UnknownCassette,
    };

    let current = cassette.read_remaining_uses();
    if current == READ_ERROR_SENTINEL {
        return Outcome::ReadFailed;
    }

    info!(
        "remaining uses: {} of {}",
        counter::decode(current),
        counter::decode(max)
    );

    if !counter::needs_refill(current, max) {
        return Outcome::NothingToDo;
    }

    match cassette.write_remaining_uses(max) {
        Ok(()) => Outcome::ResetPerformed,
        Err(e) => {
            warn!("counter write failed: {:?}", e);
            Outcome::ResetFailed
        }
    }
}
