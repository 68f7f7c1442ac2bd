//! Audible alarm tones.

/// A buzzer tone request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Tone {
    /// Frequency in hertz.
    pub freq_hz: u32,
    /// How long the tone plays.
    pub duration_ms: u32,
}

impl Tone {
    pub const fn new(
        freq_hz: u32,
        duration_ms: u32,
    ) -> Self {
        Self { freq_hz, duration_ms }
    }
}

/// Something that can play a [`Tone`] without blocking the caller.
///
/// Requests made while a tone is still playing may be coalesced.
pub trait Buzzer {
    fn play(
        &mut self,
        tone: Tone,
    );
}
