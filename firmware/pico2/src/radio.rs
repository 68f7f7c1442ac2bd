//! UART link to the ESP-NOW radio bridge.
//!
//! The bridge is a small coprocessor that owns the radio. It prints `READY`
//! once its radio is up, then one line per received frame:
//! `<12 hex digit sender address> <payload>\n`. Lines written back to it
//! are broadcast to every peer.

use embassy_rp::uart::{BufferedUartRx, BufferedUartTx};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;
use embassy_time::Instant;
use embedded_io_async::{Read, Write};
use heapless::Vec;
use trackside_common::bridge::{LineAssembler, READY_LINE, parse_line};
use trackside_common::config::MAX_PAYLOAD_LEN;
use trackside_common::inbox::{Inbox, Receipt};
use trackside_common::radio::{Radio, RadioError, format_mac, relay};

use crate::{log_debug, log_warn};

/// Outbound frames waiting for the UART.
const OUTBOX_DEPTH: usize = 4;

pub type Outbound = Vec<u8, MAX_PAYLOAD_LEN>;

/// Frames to broadcast, drained by [`radio_tx_task`].
pub static OUTBOX: Channel<CriticalSectionRawMutex, Outbound, OUTBOX_DEPTH> = Channel::new();

/// Raised when the bridge reports its radio is up.
pub static RADIO_READY: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// [`Radio`] that queues frames for [`radio_tx_task`].
pub struct ChannelRadio;

impl Radio for ChannelRadio {
    fn broadcast(
        &mut self,
        payload: &[u8],
    ) -> Result<(), RadioError> {
        let frame = Outbound::from_slice(payload).map_err(|_| RadioError::PayloadTooLong)?;
        OUTBOX.try_send(frame).map_err(|_| RadioError::Busy)
    }
}

/// Read bridge lines and hand every payload to the inbox.
#[embassy_executor::task]
pub async fn radio_rx_task(
    mut rx: BufferedUartRx,
    inbox: &'static Inbox,
) {
    defmt::info!("Radio RX task started");

    let mut assembler = LineAssembler::new();
    let mut radio = ChannelRadio;
    let mut buf = [0u8; 64];

    loop {
        let n = match rx.read(&mut buf).await {
            Ok(n) => n,
            Err(e) => {
                defmt::warn!("Bridge UART read error: {:?}", e);
                continue;
            }
        };

        for &byte in &buf[..n] {
            let Some(line) = assembler.feed(byte) else {
                continue;
            };
            if line.as_slice() == READY_LINE {
                RADIO_READY.signal(());
                continue;
            }
            let Some((mac, payload)) = parse_line(&line) else {
                log_debug!("Malformed bridge line ({} bytes)", line.len());
                continue;
            };

            match inbox.receive(payload, Instant::now().as_millis()) {
                Receipt::Event(event) if event.should_relay() => {
                    if let Err(err) = relay(&mut radio, event) {
                        log_warn!("Relay of {} failed: {:?}", event.keyword(), err);
                    }
                }
                Receipt::Rejected(err) => {
                    let sender = format_mac(&mac);
                    log_debug!("Drop {} from {}: {:?}", payload.len(), sender.as_str(), err);
                }
                _ => {}
            }
        }
    }
}

/// Write queued frames to the bridge, one line each.
#[embassy_executor::task]
pub async fn radio_tx_task(mut tx: BufferedUartTx) {
    defmt::info!("Radio TX task started");

    loop {
        let frame = OUTBOX.receive().await;
        let result = match tx.write_all(&frame).await {
            Ok(()) => tx.write_all(b"\n").await,
            Err(e) => Err(e),
        };
        if let Err(e) = result {
            log_warn!("Broadcast failed: {:?}", e);
        }
    }
}
