//! Piezo buzzer on a PWM pin.
//!
//! The polling loop requests tones through [`SignalBuzzer`]; [`buzzer_task`]
//! plays them. Requests made while a tone is playing collapse into the
//! latest one.

use embassy_rp::clocks::clk_sys_freq;
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::Timer;
use trackside_common::alarm::{Buzzer, Tone};

/// PWM clock divider. Keeps `top` inside `u16` down to about 40 Hz.
const PWM_DIVIDER: u8 = 64;

static TONES: Signal<CriticalSectionRawMutex, Tone> = Signal::new();

/// [`Buzzer`] that hands tones to [`buzzer_task`].
pub struct SignalBuzzer;

impl Buzzer for SignalBuzzer {
    fn play(
        &mut self,
        tone: Tone,
    ) {
        TONES.signal(tone);
    }
}

/// Square-wave config for `freq_hz` at 50% duty, or silence for 0 Hz.
fn tone_config(freq_hz: u32) -> PwmConfig {
    let mut config = PwmConfig::default();
    config.divider = PWM_DIVIDER.into();
    if freq_hz == 0 {
        config.enable = false;
        return config;
    }
    let top = (clk_sys_freq() / u32::from(PWM_DIVIDER) / freq_hz).clamp(2, u32::from(u16::MAX));
    config.top = top as u16;
    config.compare_a = (top / 2) as u16;
    config
}

#[embassy_executor::task]
pub async fn buzzer_task(mut pwm: Pwm<'static>) {
    defmt::info!("Buzzer task started");
    pwm.set_config(&tone_config(0));

    loop {
        let tone = TONES.wait().await;
        pwm.set_config(&tone_config(tone.freq_hz));
        Timer::after_millis(u64::from(tone.duration_ms)).await;
        pwm.set_config(&tone_config(0));
    }
}
