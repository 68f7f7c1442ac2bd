//! The polling-loop update.
//!
//! Everything the loop owns lives in [`Dashboard`]. Each accepted poll drains
//! the [`Inbox`], advances liveness and lap tracking, and returns a
//! [`TickReport`] describing what changed so the caller can log, beep and
//! redraw without inspecting the state itself.

use heapless::Vec;

use crate::alarm::Tone;
use crate::config::{ENTITY_COUNT, EVENT_QUEUE_DEPTH, POLL_INTERVAL_MS};
use crate::inbox::Inbox;
use crate::liveness::{Change, Fleet};
use crate::message::{Status, StatusEvent};
use crate::telemetry::TelemetryState;
use crate::thresholds::LINK_STALE_MS;

// =============================================================================
// Poll Gate
// =============================================================================

/// Runs the loop body at most once per interval.
pub struct PollGate {
    interval_ms: u64,
    last_ms: u64,
}

impl PollGate {
    pub const fn new(interval_ms: u64) -> Self {
        Self { interval_ms, last_ms: 0 }
    }

    /// True if at least one interval has passed since the last accepted call.
    pub fn ready(
        &mut self,
        now_ms: u64,
    ) -> bool {
        if now_ms.saturating_sub(self.last_ms) >= self.interval_ms {
            self.last_ms = now_ms;
            true
        } else {
            false
        }
    }
}

// =============================================================================
// Tick Report
// =============================================================================

/// What one poll changed.
#[derive(Clone, Debug, Default)]
pub struct TickReport {
    /// Liveness changes caused by events or the grace timer, with vehicle id.
    pub changes: Vec<(u8, Change), { EVENT_QUEUE_DEPTH + ENTITY_COUNT }>,
    /// Status of a telemetry record consumed this tick.
    pub telemetry: Option<Status>,
    /// A graph series gained a sample.
    pub graph_sampled: bool,
    /// Alarm tone to play this tick.
    pub tone: Option<Tone>,
    /// Time since telemetry was last accepted (since boot if never).
    pub link_age_ms: u64,
    /// Keyword events the inbox dropped unconsumed since the previous tick.
    pub events_dropped: u32,
}

impl TickReport {
    /// True while the selected vehicle has been silent for too long.
    pub const fn link_stale(&self) -> bool {
        self.link_age_ms > LINK_STALE_MS
    }
}

// =============================================================================
// Dashboard
// =============================================================================

/// State owned by the polling loop.
pub struct Dashboard {
    gate: PollGate,
    fleet: Fleet,
    telemetry: TelemetryState,
    /// Inbox drop counter as of the last update.
    dropped_seen: u32,
}

impl Dashboard {
    pub const fn new() -> Self {
        Self {
            gate: PollGate::new(POLL_INTERVAL_MS),
            fleet: Fleet::new(),
            telemetry: TelemetryState::new(),
            dropped_seen: 0,
        }
    }

    pub const fn fleet(&self) -> &Fleet {
        &self.fleet
    }

    pub const fn telemetry(&self) -> &TelemetryState {
        &self.telemetry
    }

    /// Run [`update`](Self::update) if the poll interval has elapsed.
    pub fn poll(
        &mut self,
        inbox: &Inbox,
        now_ms: u64,
    ) -> Option<TickReport> {
        self.gate.ready(now_ms).then(|| self.update(inbox, now_ms))
    }

    /// One loop body: consume pending input and advance every state machine.
    pub fn update(
        &mut self,
        inbox: &Inbox,
        now_ms: u64,
    ) -> TickReport {
        let mut report = TickReport::default();

        let dropped = inbox.dropped_events();
        report.events_dropped = dropped.wrapping_sub(self.dropped_seen);
        self.dropped_seen = dropped;

        while let Some(event) = inbox.take_event() {
            self.apply_event(event, now_ms, &mut report);
        }

        if let Some(record) = inbox.take_telemetry() {
            report.telemetry = Some(record.status);
            report.graph_sampled |= self.telemetry.ingest(record, now_ms);
        }
        report.graph_sampled |= self.telemetry.tick(now_ms);

        let fleet = self.fleet.tick(now_ms);
        for (index, _) in fleet.confirmed.iter().enumerate().filter(|(_, c)| **c) {
            report.changes.push((index as u8 + 1, Change::BecameStuck)).ok();
        }
        report.tone = fleet.tone;

        report.link_age_ms = now_ms.saturating_sub(inbox.last_telemetry_ms().unwrap_or(0));
        report
    }

    fn apply_event(
        &mut self,
        event: StatusEvent,
        now_ms: u64,
        report: &mut TickReport,
    ) {
        if let Some(change) = self.fleet.apply(event, now_ms) {
            report.changes.push((event.entity, change)).ok();
        }
    }
}

impl Default for Dashboard {
    fn default() -> Self { Self::new() }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::telemetry::{DEBOUNCED_STUCK_TONE, STUCK_TONE};
    use crate::config::{DEBOUNCED_ENTITY, SELECTED_ENTITY};
    use crate::liveness::Liveness;

    #[test]
    fn test_poll_gate() {
        let mut gate = PollGate::new(100);
        assert!(!gate.ready(99));
        assert!(gate.ready(100));
        assert!(!gate.ready(150));
        assert!(gate.ready(200));
        assert!(gate.ready(450));
    }

    #[test]
    fn test_poll_respects_interval() {
        let inbox = Inbox::new(SELECTED_ENTITY);
        let mut dashboard = Dashboard::new();
        assert!(dashboard.poll(&inbox, 50).is_none());
        assert!(dashboard.poll(&inbox, 100).is_some());
        assert!(dashboard.poll(&inbox, 150).is_none());
    }

    #[test]
    fn test_events_drive_liveness_and_tones() {
        let inbox = Inbox::new(SELECTED_ENTITY);
        let mut dashboard = Dashboard::new();

        inbox.receive(b"StuckDetector3", 1_000);
        let report = dashboard.update(&inbox, 1_000);
        assert_eq!(report.changes.as_slice(), &[(3, Change::BecameStuck)]);
        assert_eq!(report.tone, Some(STUCK_TONE));

        inbox.receive(b"Driving3", 2_000);
        let report = dashboard.update(&inbox, 2_000);
        assert_eq!(report.changes.as_slice(), &[(3, Change::Recovered)]);
        assert_eq!(report.tone, None);
        assert_eq!(dashboard.fleet().get(3).unwrap().delay_secs(92_000), 90);
    }

    #[test]
    fn test_debounced_entity_confirms_after_grace() {
        let inbox = Inbox::new(SELECTED_ENTITY);
        let mut dashboard = Dashboard::new();

        inbox.receive(b"StuckDetector2", 0);
        let report = dashboard.update(&inbox, 0);
        assert_eq!(report.changes.as_slice(), &[(DEBOUNCED_ENTITY, Change::EnteredPending)]);

        let report = dashboard.update(&inbox, 39_999);
        assert_eq!(report.tone, None);
        assert!(matches!(
            dashboard.fleet().get(DEBOUNCED_ENTITY).unwrap().state(),
            Liveness::Pending { .. }
        ));

        let report = dashboard.update(&inbox, 40_001);
        assert_eq!(report.changes.as_slice(), &[(DEBOUNCED_ENTITY, Change::BecameStuck)]);
        assert_eq!(report.tone, Some(DEBOUNCED_STUCK_TONE));
    }

    #[test]
    fn test_telemetry_is_consumed_once() {
        let inbox = Inbox::new(SELECTED_ENTITY);
        let mut dashboard = Dashboard::new();

        inbox.receive(b"-2 1 11.8 13.0 2.5 1 00 25 3.1 5.0 1500 1", 5_000);
        let report = dashboard.update(&inbox, 5_050);
        assert_eq!(report.telemetry, Some(Status::Driving));
        assert!(report.graph_sampled);
        assert_eq!(report.link_age_ms, 50);
        assert_eq!(dashboard.telemetry().laps_last_hour(), 1);

        let report = dashboard.update(&inbox, 5_150);
        assert_eq!(report.telemetry, None);
        assert_eq!(report.link_age_ms, 150);
    }

    #[test]
    fn test_dropped_events_reported_once() {
        let inbox = Inbox::new(SELECTED_ENTITY);
        let mut dashboard = Dashboard::new();
        for i in 0..EVENT_QUEUE_DEPTH + 3 {
            inbox.receive(b"StuckDetector5", i as u64);
        }

        let report = dashboard.update(&inbox, 100);
        assert_eq!(report.events_dropped, 3);
        assert_eq!(report.changes.as_slice(), &[(5, Change::BecameStuck)]);

        assert_eq!(dashboard.update(&inbox, 200).events_dropped, 0);
    }

    #[test]
    fn test_link_goes_stale_after_twenty_seconds() {
        let inbox = Inbox::new(SELECTED_ENTITY);
        let mut dashboard = Dashboard::new();
        inbox.receive(b"-2 1 11.8 13.0 2.5 1 00 25 3.1 5.0 1500", 1_000);
        assert!(!dashboard.update(&inbox, 21_000).link_stale());
        assert!(dashboard.update(&inbox, 21_001).link_stale());
    }
}
