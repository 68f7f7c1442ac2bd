//! Per-vehicle liveness tracking.
//!
//! Each vehicle is `Driving` until a stuck keyword arrives, and only a
//! driving keyword clears it again. The vehicle on the DIY charger
//! ([`DEBOUNCED_ENTITY`]) routinely reports stuck while it is simply parked
//! on the charger, so its stuck report first enters `Pending` and only
//! becomes an alarm once it has stayed that way for longer than
//! [`DEBOUNCE_GRACE_MS`].

use crate::alarm::Tone;
use crate::config::telemetry::{DEBOUNCED_STUCK_TONE, STUCK_TONE};
use crate::config::{DEBOUNCED_ENTITY, ENTITY_COUNT};
use crate::message::{EventKind, StatusEvent};
use crate::thresholds::DEBOUNCE_GRACE_MS;

/// Liveness of one vehicle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Liveness {
    Driving,
    /// Reported stuck, still inside the grace period (debounced vehicle only).
    Pending { since_ms: u64 },
    Stuck,
}

/// A state change worth logging.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Change {
    /// Debounced vehicle reported stuck, probably just charging.
    EnteredPending,
    /// Vehicle is now in alarm.
    BecameStuck,
    /// A driving report cleared a stuck or pending state.
    Recovered,
}

/// Liveness state for one vehicle.
#[derive(Clone, Copy, Debug)]
pub struct EntityLiveness {
    debounced: bool,
    state: Liveness,
    last_motion_ms: u64,
}

impl EntityLiveness {
    pub const fn new(debounced: bool) -> Self {
        Self {
            debounced,
            state: Liveness::Driving,
            last_motion_ms: 0,
        }
    }

    pub const fn state(&self) -> Liveness {
        self.state
    }

    pub const fn is_debounced(&self) -> bool {
        self.debounced
    }

    /// Raw stuck flag: set by a stuck report, cleared only by a driving report.
    pub const fn is_stuck_reported(&self) -> bool {
        !matches!(self.state, Liveness::Driving)
    }

    /// True once the stuck report is confirmed.
    pub const fn in_alarm(&self) -> bool {
        matches!(self.state, Liveness::Stuck)
    }

    pub const fn last_motion_ms(&self) -> u64 {
        self.last_motion_ms
    }

    /// Whole seconds since the last driving report (or boot).
    pub const fn delay_secs(
        &self,
        now_ms: u64,
    ) -> u32 {
        let secs = now_ms.saturating_sub(self.last_motion_ms) / 1000;
        if secs > u32::MAX as u64 { u32::MAX } else { secs as u32 }
    }

    /// Apply a keyword event received at `now_ms`.
    pub fn apply(
        &mut self,
        kind: EventKind,
        now_ms: u64,
    ) -> Option<Change> {
        match (kind, self.state) {
            (EventKind::Driving, previous) => {
                self.state = Liveness::Driving;
                self.last_motion_ms = now_ms;
                (previous != Liveness::Driving).then_some(Change::Recovered)
            }
            (EventKind::Stuck, Liveness::Driving) if self.debounced => {
                self.state = Liveness::Pending { since_ms: now_ms };
                Some(Change::EnteredPending)
            }
            (EventKind::Stuck, Liveness::Driving) => {
                self.state = Liveness::Stuck;
                Some(Change::BecameStuck)
            }
            // Repeated stuck reports keep the original pending timestamp.
            (EventKind::Stuck, Liveness::Pending { .. } | Liveness::Stuck) => None,
        }
    }

    /// Re-evaluate time-based transitions.
    pub fn tick(
        &mut self,
        now_ms: u64,
    ) -> Option<Change> {
        match self.state {
            Liveness::Pending { since_ms } if now_ms.saturating_sub(since_ms) > DEBOUNCE_GRACE_MS => {
                self.state = Liveness::Stuck;
                Some(Change::BecameStuck)
            }
            _ => None,
        }
    }
}

/// Result of one fleet tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FleetTick {
    /// Vehicles confirmed stuck during this tick.
    pub confirmed: [bool; ENTITY_COUNT],
    /// Alarm tone to play this tick.
    pub tone: Option<Tone>,
}

/// Liveness for every vehicle on the board.
pub struct Fleet {
    entities: [EntityLiveness; ENTITY_COUNT],
}

impl Fleet {
    pub const fn new() -> Self {
        let mut entities = [EntityLiveness::new(false); ENTITY_COUNT];
        entities[DEBOUNCED_ENTITY as usize - 1] = EntityLiveness::new(true);
        Self { entities }
    }

    /// Liveness for vehicle `entity` (1-based).
    pub fn get(
        &self,
        entity: u8,
    ) -> Option<&EntityLiveness> {
        self.entities.get(usize::from(entity).checked_sub(1)?)
    }

    /// `(id, liveness)` for every vehicle.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &EntityLiveness)> {
        self.entities.iter().enumerate().map(|(i, e)| (i as u8 + 1, e))
    }

    pub fn apply(
        &mut self,
        event: StatusEvent,
        now_ms: u64,
    ) -> Option<Change> {
        let index = usize::from(event.entity).checked_sub(1)?;
        self.entities.get_mut(index)?.apply(event.kind, now_ms)
    }

    /// Advance every vehicle and pick the alarm tone for this tick.
    pub fn tick(
        &mut self,
        now_ms: u64,
    ) -> FleetTick {
        let mut result = FleetTick::default();
        for (i, entity) in self.entities.iter_mut().enumerate() {
            if entity.tick(now_ms) == Some(Change::BecameStuck) {
                result.confirmed[i] = true;
            }
        }

        let plain_alarm = self.entities.iter().any(|e| !e.debounced && e.in_alarm());
        let debounced_alarm = self.entities.iter().any(|e| e.debounced && e.in_alarm());
        // The debounced tone is started last, so it is the one that sounds.
        result.tone = if debounced_alarm {
            Some(DEBOUNCED_STUCK_TONE)
        } else if plain_alarm {
            Some(STUCK_TONE)
        } else {
            None
        };
        result
    }
}

impl Default for Fleet {
    fn default() -> Self { Self::new() }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_entity_follows_latest_event() {
        let mut entity = EntityLiveness::new(false);
        assert_eq!(entity.apply(EventKind::Stuck, 1_000), Some(Change::BecameStuck));
        assert!(entity.in_alarm());
        assert_eq!(entity.apply(EventKind::Stuck, 2_000), None);
        assert_eq!(entity.apply(EventKind::Driving, 3_000), Some(Change::Recovered));
        assert!(!entity.in_alarm());
        assert_eq!(entity.last_motion_ms(), 3_000);
        assert_eq!(entity.apply(EventKind::Driving, 4_000), None);
    }

    #[test]
    fn test_debounce_grace_boundary() {
        let mut entity = EntityLiveness::new(true);
        assert_eq!(entity.apply(EventKind::Stuck, 10_000), Some(Change::EnteredPending));

        assert_eq!(entity.tick(10_000 + 39_999), None);
        assert!(!entity.in_alarm());
        assert!(entity.is_stuck_reported());

        assert_eq!(entity.tick(10_000 + 40_000), None);
        assert!(!entity.in_alarm());

        assert_eq!(entity.tick(10_000 + 40_001), Some(Change::BecameStuck));
        assert!(entity.in_alarm());
    }

    #[test]
    fn test_driving_inside_grace_never_alarms() {
        let mut entity = EntityLiveness::new(true);
        entity.apply(EventKind::Stuck, 0);
        entity.tick(20_000);
        assert_eq!(entity.apply(EventKind::Driving, 30_000), Some(Change::Recovered));
        assert_eq!(entity.tick(100_000), None);
        assert_eq!(entity.state(), Liveness::Driving);
    }

    #[test]
    fn test_repeated_stuck_keeps_pending_timestamp() {
        let mut entity = EntityLiveness::new(true);
        entity.apply(EventKind::Stuck, 0);
        entity.apply(EventKind::Stuck, 30_000);
        assert_eq!(entity.state(), Liveness::Pending { since_ms: 0 });
        assert_eq!(entity.tick(40_001), Some(Change::BecameStuck));
    }

    #[test]
    fn test_driving_rearms_pending() {
        let mut entity = EntityLiveness::new(true);
        entity.apply(EventKind::Stuck, 0);
        entity.tick(50_000);
        assert!(entity.in_alarm());
        entity.apply(EventKind::Driving, 60_000);
        assert_eq!(entity.apply(EventKind::Stuck, 70_000), Some(Change::EnteredPending));
        assert!(!entity.in_alarm());
    }

    #[test]
    fn test_delay_secs_counts_from_last_motion() {
        let mut entity = EntityLiveness::new(false);
        assert_eq!(entity.delay_secs(500_999), 500);
        entity.apply(EventKind::Driving, 400_000);
        assert_eq!(entity.delay_secs(490_000), 90);
        // Stuck reports do not reset the delay.
        entity.apply(EventKind::Stuck, 450_000);
        assert_eq!(entity.delay_secs(490_000), 90);
    }

    #[test]
    fn test_fleet_ignores_out_of_range_ids() {
        let mut fleet = Fleet::new();
        assert_eq!(fleet.apply(StatusEvent::new(0, EventKind::Stuck), 0), None);
        assert_eq!(fleet.apply(StatusEvent::new(7, EventKind::Stuck), 0), None);
        assert!(fleet.get(7).is_none());
        assert!(fleet.get(DEBOUNCED_ENTITY).unwrap().is_debounced());
    }

    #[test]
    fn test_fleet_tones() {
        let mut fleet = Fleet::new();
        assert_eq!(fleet.tick(0).tone, None);

        fleet.apply(StatusEvent::new(3, EventKind::Stuck), 0);
        assert_eq!(fleet.tick(100).tone, Some(STUCK_TONE));

        fleet.apply(StatusEvent::new(DEBOUNCED_ENTITY, EventKind::Stuck), 100);
        let tick = fleet.tick(200);
        assert_eq!(tick.tone, Some(STUCK_TONE));
        assert!(!tick.confirmed.iter().any(|&c| c));

        let tick = fleet.tick(40_101);
        assert_eq!(tick.tone, Some(DEBOUNCED_STUCK_TONE));
        assert!(tick.confirmed[usize::from(DEBOUNCED_ENTITY) - 1]);

        // Confirmation is reported once.
        assert!(!fleet.tick(40_201).confirmed.iter().any(|&c| c));
    }
}
