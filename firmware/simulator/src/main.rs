//! Trackside Dashboard Simulator for Windows/Desktop.
//!
//! Runs the dashboard on `embedded-graphics-simulator` with a background
//! thread playing the radio.
//!
//! # Keys
//!
//! - **Y**: Cycle through pages
//! - **F1-F6**: Inject `StuckDetector1-6`
//! - **F7-F12**: Inject `Driving1-6`

#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_sign_loss)]

mod air;
mod log;
mod timing;

use std::thread;
use std::time::{Duration, Instant};

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::sdl2::Keycode;
use embedded_graphics_simulator::{OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window};
use trackside_common::alarm::{Buzzer, Tone};
use trackside_common::colors::BLACK;
use trackside_common::config::telemetry::BOOT_TONE;
use trackside_common::config::{SCREEN_HEIGHT, SCREEN_WIDTH, SELECTED_ENTITY};
use trackside_common::liveness::Change;
use trackside_common::log::LogLevel;
use trackside_common::message::{EventKind, StatusEvent};
use trackside_common::radio::MacAddress;
use trackside_common::render::RenderState;
use trackside_common::widgets::{Frame, draw_frame};
use trackside_common::{Dashboard, Inbox, Page, TickReport};

use crate::log::{LOG_RING, log};
use crate::timing::{FRAME_TIME, now_ms};

static INBOX: Inbox = Inbox::new(SELECTED_ENTITY);

/// Address reported for keyboard-injected payloads.
const KEYBOARD_MAC: MacAddress = [0x02, 0x00, 0x00, 0x00, 0x00, 0x01];

/// Prints tones, at most once a second while the same alarm repeats.
struct ConsoleBuzzer {
    last: Option<(Tone, Instant)>,
}

impl Buzzer for ConsoleBuzzer {
    fn play(
        &mut self,
        tone: Tone,
    ) {
        let repeat = self
            .last
            .is_some_and(|(last, at)| last == tone && at.elapsed() < Duration::from_secs(1));
        if !repeat {
            println!("[buzzer] {} Hz for {} ms", tone.freq_hz, tone.duration_ms);
            self.last = Some((tone, Instant::now()));
        }
    }
}

fn main() {
    let mut display: SimulatorDisplay<Rgb565> = SimulatorDisplay::new(Size::new(SCREEN_WIDTH, SCREEN_HEIGHT));
    let output_settings = OutputSettingsBuilder::new().scale(2).build();
    let mut window = Window::new("Trackside Dashboard Sim", &output_settings);

    display.clear(BLACK).ok();
    window.update(&display);

    log(LogLevel::Info, "Simulator started");
    air::spawn(&INBOX);
    log(LogLevel::Info, "Radio ready");

    let mut buzzer = ConsoleBuzzer { last: None };
    buzzer.play(BOOT_TONE);

    let mut page = Page::default();
    let mut dashboard = Dashboard::new();
    let mut render_state = RenderState::new();

    loop {
        let frame_start = Instant::now();

        for ev in window.events() {
            match ev {
                SimulatorEvent::Quit => return,
                SimulatorEvent::KeyDown { keycode, repeat, .. } => {
                    if repeat {
                        continue;
                    }
                    if keycode == Keycode::Y {
                        page = page.toggle();
                    } else if let Some(event) = injected_event(keycode) {
                        air::deliver(&INBOX, KEYBOARD_MAC, event.keyword().as_bytes());
                    }
                }
                _ => {}
            }
        }

        let now = now_ms();
        if let Some(report) = dashboard.poll(&INBOX, now) {
            log_changes(&report);
            if let Some(tone) = report.tone {
                buzzer.play(tone);
            }

            let logs = LOG_RING.lock().ok();
            let frame = Frame {
                page,
                now_ms: now,
                dashboard: &dashboard,
                report: &report,
                logs: logs.as_deref(),
            };
            draw_frame(&mut display, &mut render_state, &frame);
        }

        window.update(&display);

        if let Some(rest) = FRAME_TIME.checked_sub(frame_start.elapsed()) {
            thread::sleep(rest);
        }
    }
}

/// Keyword event bound to a function key.
fn injected_event(keycode: Keycode) -> Option<StatusEvent> {
    const STUCK_KEYS: [Keycode; 6] = [Keycode::F1, Keycode::F2, Keycode::F3, Keycode::F4, Keycode::F5, Keycode::F6];
    const DRIVING_KEYS: [Keycode; 6] = [Keycode::F7, Keycode::F8, Keycode::F9, Keycode::F10, Keycode::F11, Keycode::F12];

    let position = |keys: &[Keycode]| keys.iter().position(|&k| k == keycode).map(|i| i as u8 + 1);
    position(&STUCK_KEYS)
        .map(|id| StatusEvent::new(id, EventKind::Stuck))
        .or_else(|| position(&DRIVING_KEYS).map(|id| StatusEvent::new(id, EventKind::Driving)))
}

fn log_changes(report: &TickReport) {
    if report.events_dropped > 0 {
        log(LogLevel::Warn, &format!("Dropped {} queued events", report.events_dropped));
    }
    for &(id, change) in &report.changes {
        match change {
            Change::EnteredPending => log(LogLevel::Info, &format!("Vehicle {id} stopped, probably charging")),
            Change::BecameStuck => log(LogLevel::Warn, &format!("Vehicle {id} is stuck")),
            Change::Recovered => log(LogLevel::Info, &format!("Vehicle {id} driving")),
        }
    }
}
