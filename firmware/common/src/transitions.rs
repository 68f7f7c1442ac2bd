//! Lap counting over a trailing hour.
//!
//! [`TransitionLog`] keeps the raw lap timestamps. [`TransitionTracker`]
//! samples the trailing-hour count into a long-window trend series every
//! [`LAP_TREND_SAMPLE_INTERVAL_MS`].

use heapless::Deque;

use crate::colors::CYAN;
use crate::config::telemetry::{
    LAP_LOG_CAPACITY, LAP_TREND_CAPACITY, LAP_TREND_SAMPLE_INTERVAL_MS, LAP_TREND_WINDOW_MS,
};
use crate::series::{SeriesSpec, WindowedSeries};
use crate::thresholds::LAP_COUNT_WINDOW_MS;

/// Bounded log of event timestamps in ascending order.
pub struct TransitionLog<const N: usize> {
    events: Deque<u64, N>,
}

impl<const N: usize> TransitionLog<N> {
    pub const fn new() -> Self {
        Self { events: Deque::new() }
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Record an event at `timestamp_ms`, dropping the oldest if full.
    ///
    /// A timestamp earlier than the newest entry is stored as the newest
    /// entry's time so the log stays sorted.
    pub fn record_event(
        &mut self,
        timestamp_ms: u64,
    ) {
        let timestamp_ms = self.events.back().map_or(timestamp_ms, |&last| timestamp_ms.max(last));
        if self.events.is_full() {
            self.events.pop_front();
        }
        self.events.push_back(timestamp_ms).ok();
    }

    /// Drop events older than one hour before `now_ms` and count the rest.
    pub fn count_within_last_hour(
        &mut self,
        now_ms: u64,
    ) -> usize {
        let cutoff = now_ms.saturating_sub(LAP_COUNT_WINDOW_MS);
        while self.events.front().is_some_and(|&ts| ts < cutoff) {
            self.events.pop_front();
        }
        self.events.len()
    }
}

impl<const N: usize> Default for TransitionLog<N> {
    fn default() -> Self { Self::new() }
}

/// Legend entry and sampling of the laps-per-hour trend.
pub const LAP_TREND_SPEC: SeriesSpec = SeriesSpec {
    label: "LAPS/H",
    window_ms: LAP_TREND_WINDOW_MS,
    sample_interval_ms: LAP_TREND_SAMPLE_INTERVAL_MS,
    color: CYAN,
};

/// Lap log plus its periodically sampled trend.
pub struct TransitionTracker {
    log: TransitionLog<LAP_LOG_CAPACITY>,
    trend: WindowedSeries<u16, LAP_TREND_CAPACITY>,
}

impl TransitionTracker {
    pub const fn new() -> Self {
        Self {
            log: TransitionLog::new(),
            trend: WindowedSeries::new(LAP_TREND_SPEC),
        }
    }

    pub fn record_lap(
        &mut self,
        timestamp_ms: u64,
    ) {
        self.log.record_event(timestamp_ms);
    }

    /// Current trailing-hour count, sampled into the trend when due.
    ///
    /// Returns the count and whether a trend sample was stored.
    pub fn tick(
        &mut self,
        now_ms: u64,
    ) -> (u16, bool) {
        let count = self.log.count_within_last_hour(now_ms).min(usize::from(u16::MAX)) as u16;
        let sampled = self.trend.append(now_ms, count);
        (count, sampled)
    }

    pub const fn trend(&self) -> &WindowedSeries<u16, LAP_TREND_CAPACITY> {
        &self.trend
    }
}

impl Default for TransitionTracker {
    fn default() -> Self { Self::new() }
}

// =============================================================================
// Unit Tests
// =============================================================================
