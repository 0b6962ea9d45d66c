/// Status events emitted once per cycle, and the LED patterns that render them.
///
/// The core only emits a [`StatusEvent`]; turning it into light is up to
/// whoever implements [`StatusSink`]. [`BlinkPattern::frames`] gives renderers
/// a timing-free description to play back.
use crate::config;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StatusEvent {
    NoCassette,
    Success,
    Failure,
}

impl StatusEvent {
    pub fn pattern(self) -> BlinkPattern {
        match self {
            StatusEvent::NoCassette => BlinkPattern::Alternate {
                phase_ms: config::NO_CASSETTE_PHASE_MS,
                duration_ms: config::NO_CASSETTE_DURATION_MS,
            },
            StatusEvent::Success => BlinkPattern::Steady {
                duration_ms: config::SUCCESS_DURATION_MS,
            },
            StatusEvent::Failure => BlinkPattern::Blink {
                phase_ms: config::FAILURE_PHASE_MS,
                duration_ms: config::FAILURE_DURATION_MS,
            },
        }
    }
}

/// Receiver of per-cycle status events.
pub trait StatusSink {
    fn emit(&mut self, event: StatusEvent);
}

impl<S: StatusSink + ?Sized> StatusSink for &mut S {
    fn emit(&mut self, event: StatusEvent) {
        (**self).emit(event)
    }
}

// =============================================================================
// Patterns
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BlinkPattern {
    /// OK and fault LEDs swap every `phase_ms`, OK first.
    Alternate { phase_ms: u32, duration_ms: u32 },
    /// OK LED held on.
    Steady { duration_ms: u32 },
    /// Fault LED toggles every `phase_ms`, OK LED off.
    Blink { phase_ms: u32, duration_ms: u32 },
}

/// One LED state to hold for `hold_ms`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Frame {
    pub ok: bool,
    pub fault: bool,
    pub hold_ms: u32,
}

impl BlinkPattern {
    pub fn duration_ms(self) -> u32 {
        match self {
            BlinkPattern::Alternate { duration_ms, .. }
            | BlinkPattern::Steady { duration_ms }
            | BlinkPattern::Blink { duration_ms, .. } => duration_ms,
        }
    }

    fn phase_ms(self) -> u32 {
        match self {
            BlinkPattern::Alternate { phase_ms, .. } | BlinkPattern::Blink { phase_ms, .. } => {
                phase_ms
            }
            BlinkPattern::Steady { duration_ms } => duration_ms,
        }
    }

    pub fn frames(self) -> Frames {
        Frames {
            pattern: self,
            elapsed_ms: 0,
            index: 0,
        }
    }
}

pub struct Frames {
    pattern: BlinkPattern,
    elapsed_ms: u32,
    index: u32,
}

impl Iterator for Frames {
    type Item = Frame;

    fn next(&mut self) -> Option<Frame> {
        let duration = self.pattern.duration_ms();
        let phase = self.pattern.phase_ms();
        if phase == 0 || self.elapsed_ms >= duration {
            return None;
        }

        let lit = self.index % 2 == 0;
        let (ok, fault) = match self.pattern {
            BlinkPattern::Alternate { .. } => (lit, !lit),
            BlinkPattern::Steady { .. } => (true, false),
            BlinkPattern::Blink { .. } => (false, lit),
        };
        let hold_ms = phase.min(duration - self.elapsed_ms);

        self.elapsed_ms += hold_ms;
        self.index += 1;
        Some(Frame { ok, fault, hold_ms })
    }
}
