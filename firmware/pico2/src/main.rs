//! Trackside Dashboard Firmware for Raspberry Pi Pico 2 (RP2350)
//!
//! Shows fleet liveness and live telemetry of the selected vehicle on the
//! Pimoroni PIM715 Display Pack 2.8".
//!
//! # Architecture
//!
//! - Radio RX task: reads bridge lines from UART0, decodes them into the
//!   shared [`Inbox`] and rebroadcasts relay keywords.
//! - Radio TX task: writes queued broadcasts back to the bridge.
//! - Buzzer task: plays alarm tones on a PWM pin.
//! - Main task: polls the inbox every 100 ms, advances the dashboard and
//!   redraws what changed.
//!
//! # Button Controls
//!
//! - **Y**: Cycle through pages (Fleet → Telemetry → Logs → Fleet)

#![no_std]
#![no_main]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

mod button;
mod buzzer;
mod display;
mod log_buffer;
mod radio;

use cortex_m::peripheral::SCB;
use defmt::info;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::peripherals::UART0;
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use embassy_rp::spi::Spi;
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use embassy_time::{Duration, Instant, Timer, with_timeout};
use static_cell::StaticCell;
use trackside_common::alarm::Buzzer;
use trackside_common::config::SELECTED_ENTITY;
use trackside_common::config::telemetry::{BOOT_TONE, RADIO_READY_TIMEOUT_MS, RESTART_DELAY_MS};
use trackside_common::liveness::Change;
use trackside_common::render::RenderState;
use trackside_common::widgets::{Frame, draw_frame};
use trackside_common::{Dashboard, Inbox, Page, TickReport};
use {defmt_rtt as _, panic_probe as _};

use crate::button::Button;
use crate::buzzer::{SignalBuzzer, buzzer_task};
use crate::display::{Panel, spi_config};
use crate::log_buffer::LOG_RING;
use crate::radio::{RADIO_READY, radio_rx_task, radio_tx_task};

/// Mailbox between the radio RX task and the main loop.
static INBOX: Inbox = Inbox::new(SELECTED_ENTITY);

static UART_TX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static UART_RX_BUF: StaticCell<[u8; 512]> = StaticCell::new();

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

// Program metadata for `picotool info`
#[unsafe(link_section = ".bi_entries")]
#[used]
pub static PICOTOOL_ENTRIES: [embassy_rp::binary_info::EntryAddr; 4] = [
    embassy_rp::binary_info::rp_program_name!(c"trackside-dashboard"),
    embassy_rp::binary_info::rp_program_description!(c"Trackside fleet status dashboard on PIM715 Display"),
    embassy_rp::binary_info::rp_cargo_version!(),
    embassy_rp::binary_info::rp_program_build_attribute!(),
];

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Trackside dashboard starting...");

    let p = embassy_rp::init(Default::default());

    // RGB LED is active-low, keep it off
    let _led_r = Output::new(p.PIN_26, Level::High);
    let _led_g = Output::new(p.PIN_27, Level::High);
    let _led_b = Output::new(p.PIN_28, Level::High);

    // PIM715 pinout: CS=17, DC=16, CLK=18, MOSI=19, Backlight=20
    let cs = Output::new(p.PIN_17, Level::High);
    let dc = Output::new(p.PIN_16, Level::Low);
    let backlight = Output::new(p.PIN_20, Level::Low);
    let spi = Spi::new_blocking_txonly(p.SPI0, p.PIN_18, p.PIN_19, spi_config());
    let mut panel = Panel::init(spi, cs, dc, backlight);
    log_info!("Display initialized");

    // Radio bridge on UART0 (TX=0, RX=1), 115200 baud
    let tx_buf = UART_TX_BUF.init([0u8; 256]);
    let rx_buf = UART_RX_BUF.init([0u8; 512]);
    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, UartConfig::default());
    let (tx, rx) = uart.into_buffered(Irqs, tx_buf, rx_buf).split();
    spawner.spawn(radio_rx_task(rx, &INBOX)).unwrap();
    spawner.spawn(radio_tx_task(tx)).unwrap();

    let pwm = Pwm::new_output_a(p.PWM_SLICE1, p.PIN_2, PwmConfig::default());
    spawner.spawn(buzzer_task(pwm)).unwrap();

    if with_timeout(Duration::from_millis(RADIO_READY_TIMEOUT_MS), RADIO_READY.wait())
        .await
        .is_err()
    {
        log_error!("Radio init failed, restarting");
        panel.set_backlight(false);
        Timer::after_millis(RESTART_DELAY_MS).await;
        SCB::sys_reset();
    }
    log_info!("Radio bridge ready");

    let mut buzzer = SignalBuzzer;
    buzzer.play(BOOT_TONE);

    // PIM715: Y=15
    let mut page_button = Button::new(p.PIN_15);

    let mut page = Page::Fleet;
    let mut dashboard = Dashboard::new();
    let mut render_state = RenderState::new();

    log_info!("Watching vehicle {}", SELECTED_ENTITY);

    loop {
        if page_button.just_pressed() {
            page = page.toggle();
            info!("Page: {}", page.title());
        }

        let now_ms = Instant::now().as_millis();
        if let Some(report) = dashboard.poll(&INBOX, now_ms) {
            log_changes(&report);
            if let Some(tone) = report.tone {
                buzzer.play(tone);
            }

            let logs = LOG_RING.try_lock().ok();
            let frame = Frame {
                page,
                now_ms,
                dashboard: &dashboard,
                report: &report,
                logs: logs.as_deref(),
            };
            draw_frame(&mut panel.display, &mut render_state, &frame);
        }

        Timer::after_millis(10).await;
    }
}

fn log_changes(report: &TickReport) {
    if report.events_dropped > 0 {
        log_warn!("Dropped {} queued events", report.events_dropped);
    }
    for &(id, change) in &report.changes {
        match change {
            Change::EnteredPending => log_info!("Vehicle {} stopped, probably charging", id),
            Change::BecameStuck => log_warn!("Vehicle {} is stuck", id),
            Change::Recovered => log_info!("Vehicle {} driving", id),
        }
    }
}
