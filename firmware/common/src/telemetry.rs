//! Selected-vehicle telemetry: latest record and its graphed series.

use crate::colors::{PINK, YELLOW};
use crate::config::telemetry::{
    BATTERY_CAPACITY, BATTERY_SAMPLE_INTERVAL_MS, BATTERY_WINDOW_MS, RADIUS_CAPACITY, RADIUS_SAMPLE_INTERVAL_MS,
    RADIUS_WINDOW_MS,
};
use crate::message::TelemetryRecord;
use crate::series::{SeriesSpec, SeriesView, WindowedSeries};
use crate::transitions::TransitionTracker;

pub const BATTERY_SPEC: SeriesSpec = SeriesSpec {
    label: "VBAT",
    window_ms: BATTERY_WINDOW_MS,
    sample_interval_ms: BATTERY_SAMPLE_INTERVAL_MS,
    color: YELLOW,
};

pub const RADIUS_SPEC: SeriesSpec = SeriesSpec {
    label: "RADIUS",
    window_ms: RADIUS_WINDOW_MS,
    sample_interval_ms: RADIUS_SAMPLE_INTERVAL_MS,
    color: PINK,
};

/// Number of graphed series.
pub const SERIES_COUNT: usize = 3;

/// Telemetry state owned by the polling loop.
pub struct TelemetryState {
    latest: Option<TelemetryRecord>,
    battery: WindowedSeries<f32, BATTERY_CAPACITY>,
    radius: WindowedSeries<f32, RADIUS_CAPACITY>,
    laps: TransitionTracker,
    laps_last_hour: u16,
}

impl TelemetryState {
    pub const fn new() -> Self {
        Self {
            latest: None,
            battery: WindowedSeries::new(BATTERY_SPEC),
            radius: WindowedSeries::new(RADIUS_SPEC),
            laps: TransitionTracker::new(),
            laps_last_hour: 0,
        }
    }

    /// Store a freshly consumed record. Returns `true` if a graph sample was added.
    pub fn ingest(
        &mut self,
        record: TelemetryRecord,
        now_ms: u64,
    ) -> bool {
        let mut sampled = self.battery.append(now_ms, record.battery_voltage.as_f32());
        sampled |= self.radius.append(now_ms, record.radius.as_f32());
        if record.lap {
            self.laps.record_lap(now_ms);
        }
        self.latest = Some(record);
        sampled
    }

    /// Refresh the lap count. Returns `true` if the trend was sampled.
    pub fn tick(
        &mut self,
        now_ms: u64,
    ) -> bool {
        let (count, sampled) = self.laps.tick(now_ms);
        self.laps_last_hour = count;
        sampled
    }

    pub const fn latest(&self) -> Option<&TelemetryRecord> {
        self.latest.as_ref()
    }

    pub const fn laps_last_hour(&self) -> u16 {
        self.laps_last_hour
    }

    /// Every graphed series, in legend order.
    pub fn series(&self) -> [&dyn SeriesView; SERIES_COUNT] {
        [&self.battery, &self.radius, self.laps.trend()]
    }
}

impl Default for TelemetryState {
    fn default() -> Self { Self::new() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::{Message, decode};

    fn record(payload: &str) -> TelemetryRecord {
        match decode(payload.as_bytes()) {
            Ok(Message::Telemetry(record)) => record,
            other => panic!("expected telemetry, got {other:?}"),
        }
    }

    #[test]
    fn test_ingest_samples_each_series_at_its_own_rate() {
        let mut state = TelemetryState::new();
        assert!(state.ingest(record("-2 1 11.8 13.0 2.5 1 00 25 3.1 5.0 1500"), 0));
        // Radius is due after 2 s, battery only after 5 s.
        assert!(state.ingest(record("-2 1 11.9 13.0 2.5 1 00 25 3.3 5.0 1500"), 2_000));
        assert!(!state.ingest(record("-2 1 12.0 13.0 2.5 1 00 25 3.4 5.0 1500"), 3_000));

        let [battery, radius, _] = state.series();
        assert_eq!(battery.len(), 1);
        assert_eq!(radius.len(), 2);
        assert!((state.latest().unwrap().battery_voltage.as_f32() - 12.0).abs() < 1e-6);
    }

    #[test]
    fn test_lap_flag_feeds_hour_count() {
        let mut state = TelemetryState::new();
        state.ingest(record("-2 1 11.8 13.0 2.5 1 00 25 3.1 5.0 1500 1"), 1_000);
        state.ingest(record("-2 1 11.8 13.0 2.5 1 00 25 3.1 5.0 1500 0"), 2_000);
        state.ingest(record("-2 1 11.8 13.0 2.5 1 00 25 3.1 5.0 1500 1"), 3_000);
        state.tick(3_000);
        assert_eq!(state.laps_last_hour(), 2);
    }

    #[test]
    fn test_garbled_battery_sample_keeps_trace_scale() {
        let mut state = TelemetryState::new();
        for (i, battery) in ["11.0", "12.0", "1e39", "12.5", "11.5"].iter().enumerate() {
            let payload = format!("-2 1 {battery} 13.0 2.5 1 00 25 3.1 5.0 1500");
            state.ingest(record(&payload), i as u64 * BATTERY_SAMPLE_INTERVAL_MS);
        }

        let [battery, _, _] = state.series();
        assert_eq!(battery.len(), 5);
        assert_eq!(battery.value_range(), Some((0.0, 12.5)));
        assert!(state.latest().unwrap().battery_voltage.as_f32().is_finite());
    }

    #[test]
    fn test_series_colors_are_distinct() {
        let state = TelemetryState::new();
        let [a, b, c] = state.series();
        assert_ne!(a.spec().color, b.spec().color);
        assert_ne!(b.spec().color, c.spec().color);
        assert_ne!(a.spec().color, c.spec().color);
    }
}
