//! Simulated radio traffic.
//!
//! A background thread stands in for the radio callback: it builds payloads
//! the way the vehicles would send them and hands them to the shared inbox
//! at its own pace, independent of the window loop.

use std::f32::consts::TAU;
use std::thread;
use std::time::Duration;

use trackside_common::inbox::{Inbox, Receipt};
use trackside_common::log::LogLevel;
use trackside_common::radio::{MacAddress, Radio, RadioError, format_mac, relay};

use crate::log::log;
use crate::timing::now_ms;

/// One simulated radio slot.
const SLOT: Duration = Duration::from_millis(250);

/// Sender address used for every simulated vehicle; the last byte is the id.
const FLEET_MAC: MacAddress = [0xA4, 0xCF, 0x12, 0x3B, 0x00, 0x00];

/// Vehicles that report `DrivingN` on their own. Vehicle 6 stays silent.
const CHATTY: [u8; 4] = [1, 3, 4, 5];

/// Prints broadcasts instead of sending them.
pub struct ConsoleRadio;

impl Radio for ConsoleRadio {
    fn broadcast(
        &mut self,
        payload: &[u8],
    ) -> Result<(), RadioError> {
        println!("[radio] broadcast {}", String::from_utf8_lossy(payload));
        Ok(())
    }
}

/// Deliver one payload the way the radio callback would.
pub fn deliver(
    inbox: &Inbox,
    sender: MacAddress,
    payload: &[u8],
) {
    match inbox.receive(payload, now_ms()) {
        Receipt::Event(event) if event.should_relay() => {
            if let Err(err) = relay(&mut ConsoleRadio, event) {
                log(LogLevel::Warn, &format!("Relay of {} failed: {err:?}", event.keyword()));
            }
        }
        Receipt::Rejected(err) => {
            let text = format!("Drop {} from {}: {err:?}", payload.len(), format_mac(&sender));
            log(LogLevel::Debug, &text);
        }
        _ => {}
    }
}

/// Start the traffic thread.
pub fn spawn(inbox: &'static Inbox) {
    thread::spawn(move || {
        let mut slot = 0u32;
        loop {
            for payload in traffic(slot) {
                let mut sender = FLEET_MAC;
                sender[5] = payload.bytes().find(|b| b.is_ascii_digit()).map_or(0, |b| b - b'0');
                deliver(inbox, sender, payload.as_bytes());
            }
            slot = slot.wrapping_add(1);
            thread::sleep(SLOT);
        }
    });
}

/// Payloads sent during `slot`.
fn traffic(slot: u32) -> Vec<String> {
    let mut out = Vec::new();
    let t = slot as f32 * SLOT.as_secs_f32();

    // Selected vehicle: one telemetry line per second, a lap every 40 s
    if slot % 4 == 0 {
        let lap = u8::from(slot % 160 == 0 && slot > 0);
        out.push(telemetry_line(2, t, lap));
    }
    // Another vehicle's telemetry is filtered out by the inbox
    if slot % 12 == 6 {
        out.push(telemetry_line(3, t, 0));
    }
    // Every vehicle in CHATTY reports motion on its own schedule
    for (i, &id) in CHATTY.iter().enumerate() {
        let period = 40 + 48 * i as u32;
        if slot % period == 0 {
            out.push(format!("Driving{id}"));
        }
    }
    // Vehicle 2 stops for a while every five minutes
    match slot % 1200 {
        0 => out.push("Driving2".to_string()),
        400 | 404 => out.push("StuckDetector2".to_string()),
        _ => {}
    }
    // Noise from an unrelated transmitter
    if slot % 28 == 27 {
        out.push("hello".to_string());
    }
    out
}

fn telemetry_line(
    entity: u8,
    t: f32,
    lap: u8,
) -> String {
    let battery = wave(t, 11.8, 12.9, 0.01);
    let charge_v = wave(t, 13.0, 14.2, 0.02);
    let charge_i = wave(t, 0.0, 2.5, 0.05);
    let radius = wave(t, 120.0, 480.0, 0.1) as i32;
    let pid = wave(t, -40.0, 40.0, 0.3) as i32;
    format!("-{entity} 1 {battery:.2} {charge_v:.2} {charge_i:.2} 0 3 25 {radius} 5.02 {pid} {lap}")
}

fn wave(
    t: f32,
    min: f32,
    max: f32,
    freq: f32,
) -> f32 {
    let normalized = (t * freq * TAU).sin().mul_add(0.5, 0.5);
    min + normalized * (max - min)
}

#[cfg(test)]
mod tests {
    use trackside_common::message::{Message, Status, decode};

    use super::*;

    #[test]
    fn test_telemetry_line_decodes() {
        let line = telemetry_line(2, 12.5, 1);
        match decode(line.as_bytes()) {
            Ok(Message::Telemetry(record)) => {
                assert_eq!(record.entity, 2);
                assert_eq!(record.status, Status::Driving);
                assert!(record.lap);
                assert!(record.battery_voltage.as_f32() > 11.0);
            }
            other => panic!("unexpected decode: {other:?}"),
        }
    }

    #[test]
    fn test_first_slot_carries_selected_telemetry() {
        let payloads = traffic(0);
        assert!(payloads.iter().any(|p| p.starts_with("-2 ")));
        assert!(payloads.iter().any(|p| p == "Driving2"));
    }
}
