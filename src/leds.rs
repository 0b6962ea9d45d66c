/// Status LEDs: OK (green) and fault (red), driven from blink patterns.
use cassette_reset::status::{BlinkPattern, Frame};
use embassy_rp::gpio::Output;
use embassy_time::Timer;

pub struct StatusLeds<'d> {
    ok: Output<'d>,
    fault: Output<'d>,
}

impl<'d> StatusLeds<'d> {
    pub fn new(ok: Output<'d>, fault: Output<'d>) -> Self {
        Self { ok, fault }
    }

    /// Play a pattern to completion, then leave both LEDs off.
    pub async fn render(&mut self, pattern: BlinkPattern) {
        for frame in pattern.frames() {
            self.show(frame);
            Timer::after_millis(u64::from(frame.hold_ms)).await;
        }
        self.all_off();
    }

    fn show(&mut self, frame: Frame) {
        if frame.ok {
            self.ok.set_high();
        } else {
            self.ok.set_low();
        }
        if frame.fault {
            self.fault.set_high();
        } else {
            self.fault.set_low();
        }
    }

    pub fn all_off(&mut self) {
        self.ok.set_low();
        self.fault.set_low();
    }
}
