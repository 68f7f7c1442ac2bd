//! Debounced push button.
//!
//! The PIM715 buttons are active-low with the internal pull-up enabled.

use embassy_rp::gpio::{Input, Pin, Pull};
use embassy_rp::Peri;
use embassy_time::{Duration, Instant};

/// Debounce duration in milliseconds.
pub const DEBOUNCE_MS: u64 = 50;

/// A button input with time-based edge detection.
pub struct Button<'d> {
    input: Input<'d>,
    was_pressed: bool,
    last_change: Option<Instant>,
}

impl<'d> Button<'d> {
    pub fn new(pin: Peri<'d, impl Pin>) -> Self {
        Self {
            input: Input::new(pin, Pull::Up),
            was_pressed: false,
            last_change: None,
        }
    }

    /// Returns true once per press, on the falling edge.
    pub fn just_pressed(&mut self) -> bool {
        let is_low = self.input.is_low();
        if is_low == self.was_pressed {
            return false;
        }
        if let Some(last) = self.last_change
            && last.elapsed() < Duration::from_millis(DEBOUNCE_MS)
        {
            return false;
        }

        self.was_pressed = is_low;
        self.last_change = Some(Instant::now());
        is_low
    }
}
