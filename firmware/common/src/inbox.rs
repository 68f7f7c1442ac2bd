//! Receive path: decode, filter and hand off.
//!
//! [`Inbox::receive`] is the only thing the radio context calls. It never
//! blocks and never touches polling-loop state.

use crate::config::EVENT_QUEUE_DEPTH;
use crate::handoff::Handoff;
use crate::message::{DecodeError, Message, StatusEvent, TelemetryRecord, decode};

/// Outcome of one received payload, for logging and relaying.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Receipt {
    /// Keyword event queued for the polling loop.
    Event(StatusEvent),
    /// Telemetry from the selected vehicle stored.
    Telemetry { entity: u8 },
    /// Valid telemetry from a vehicle that is not selected.
    Filtered { entity: u8 },
    /// Payload could not be decoded.
    Rejected(DecodeError),
}

/// Shared mailbox between the radio context and the polling loop.
pub struct Inbox {
    selected: u8,
    telemetry: Handoff<TelemetryRecord, 1>,
    events: Handoff<StatusEvent, EVENT_QUEUE_DEPTH>,
}

impl Inbox {
    /// Create an inbox that accepts structured telemetry from `selected` only.
    pub const fn new(selected: u8) -> Self {
        Self {
            selected,
            telemetry: Handoff::new(),
            events: Handoff::new(),
        }
    }

    /// Decode `payload` and publish it if it passes the filter.
    pub fn receive(
        &self,
        payload: &[u8],
        now_ms: u64,
    ) -> Receipt {
        match decode(payload) {
            Ok(Message::Event(event)) => {
                self.events.publish(event, now_ms);
                Receipt::Event(event)
            }
            Ok(Message::Telemetry(record)) if record.entity == self.selected => {
                let entity = record.entity;
                self.telemetry.publish(record, now_ms);
                Receipt::Telemetry { entity }
            }
            Ok(Message::Telemetry(record)) => Receipt::Filtered { entity: record.entity },
            Err(err) => Receipt::Rejected(err),
        }
    }

    /// Latest unconsumed telemetry record.
    pub fn take_telemetry(&self) -> Option<TelemetryRecord> {
        self.telemetry.consume()
    }

    /// Oldest unconsumed keyword event.
    pub fn take_event(&self) -> Option<StatusEvent> {
        self.events.consume()
    }

    /// When telemetry from the selected vehicle was last accepted.
    pub fn last_telemetry_ms(&self) -> Option<u64> {
        self.telemetry.last_received_ms()
    }

    /// When any keyword event was last accepted.
    pub fn last_event_ms(&self) -> Option<u64> {
        self.events.last_received_ms()
    }

    /// Events dropped because the loop fell behind.
    pub fn dropped_events(&self) -> u32 {
        self.events.overwritten()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::{EventKind, Status};

    const SAMPLE: &[u8] = b"-2 1 11.8 13.0 2.5 1 00 25 3.1 5.0 1500 1";

    #[test]
    fn test_selected_telemetry_is_published() {
        let inbox = Inbox::new(2);
        assert_eq!(inbox.receive(SAMPLE, 1_000), Receipt::Telemetry { entity: 2 });
        assert_eq!(inbox.last_telemetry_ms(), Some(1_000));

        let Ok(Message::Telemetry(expected)) = decode(SAMPLE) else {
            panic!("sample must decode as telemetry");
        };
        let record = inbox.take_telemetry().unwrap();
        assert_eq!(record, expected);
        assert_eq!(record.status, Status::Driving);
        assert!(inbox.take_telemetry().is_none());
    }

    #[test]
    fn test_other_entity_is_filtered_without_touching_timestamp() {
        let inbox = Inbox::new(3);
        assert_eq!(inbox.receive(SAMPLE, 1_000), Receipt::Filtered { entity: 2 });
        assert!(inbox.take_telemetry().is_none());
        assert_eq!(inbox.last_telemetry_ms(), None);
    }

    #[test]
    fn test_events_queue_in_order() {
        let inbox = Inbox::new(2);
        inbox.receive(b"StuckDetector1", 10);
        inbox.receive(b"Driving1", 20);
        assert_eq!(inbox.take_event(), Some(StatusEvent::new(1, EventKind::Stuck)));
        assert_eq!(inbox.take_event(), Some(StatusEvent::new(1, EventKind::Driving)));
        assert_eq!(inbox.take_event(), None);
        assert_eq!(inbox.last_event_ms(), Some(20));
    }

    #[test]
    fn test_rejected_payload_changes_nothing() {
        let inbox = Inbox::new(2);
        assert_eq!(inbox.receive(b"hello", 10), Receipt::Rejected(DecodeError::MissingPrefix));
        assert_eq!(inbox.take_event(), None);
        assert_eq!(inbox.last_event_ms(), None);
        assert_eq!(inbox.last_telemetry_ms(), None);
    }

    #[test]
    fn test_event_overflow_counts_drops() {
        let inbox = Inbox::new(2);
        for i in 0..EVENT_QUEUE_DEPTH + 2 {
            inbox.receive(b"Driving4", i as u64);
        }
        assert_eq!(inbox.dropped_events(), 2);
    }
}
