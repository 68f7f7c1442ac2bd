//! Fixed-capacity sliding-window series.
//!
//! [`SeriesBuffer`] is a ring buffer of timestamped samples: head index plus
//! count, oldest first, evicting the oldest sample when full. No samples are
//! moved on eviction.
//!
//! [`WindowedSeries`] adds the per-series sample interval, so a source that
//! reports every second can still feed a trace sampled every five seconds.

use embedded_graphics::pixelcolor::Rgb565;

// =============================================================================
// Sample Values
// =============================================================================

/// A value that can be stored in a series and plotted.
pub trait SampleValue: Copy {
    const ZERO: Self;

    fn to_f32(self) -> f32;
}

impl SampleValue for f32 {
    const ZERO: Self = 0.0;

    fn to_f32(self) -> f32 {
        self
    }
}

impl SampleValue for u16 {
    const ZERO: Self = 0;

    fn to_f32(self) -> f32 {
        f32::from(self)
    }
}

impl SampleValue for u32 {
    const ZERO: Self = 0;

    fn to_f32(self) -> f32 {
        self as f32
    }
}

impl SampleValue for i32 {
    const ZERO: Self = 0;

    fn to_f32(self) -> f32 {
        self as f32
    }
}

/// One timestamped sample.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Sample<T> {
    pub timestamp_ms: u64,
    pub value: T,
}

impl<T> Sample<T> {
    pub const fn new(
        timestamp_ms: u64,
        value: T,
    ) -> Self {
        Self { timestamp_ms, value }
    }

    /// Age at `now_ms`. Samples stamped in the future have age zero.
    pub const fn age_ms(
        &self,
        now_ms: u64,
    ) -> u64 {
        now_ms.saturating_sub(self.timestamp_ms)
    }
}

// =============================================================================
// Series Buffer
// =============================================================================

/// Ring buffer of samples, oldest first.
pub struct SeriesBuffer<T, const N: usize> {
    samples: [Sample<T>; N],
    /// Index of the oldest sample.
    head: usize,
    len: usize,
}

impl<T: SampleValue, const N: usize> SeriesBuffer<T, N> {
    pub const fn new() -> Self {
        const { assert!(N > 0, "series needs at least one slot") };
        Self {
            samples: [Sample::new(0, T::ZERO); N],
            head: 0,
            len: 0,
        }
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    pub const fn len(&self) -> usize {
        self.len
    }

    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub const fn is_full(&self) -> bool {
        self.len == N
    }

    /// Append a sample, evicting the oldest one first if full.
    pub fn push(
        &mut self,
        sample: Sample<T>,
    ) {
        if self.is_full() {
            self.samples[self.head] = sample;
            self.head = (self.head + 1) % N;
        } else {
            self.samples[(self.head + self.len) % N] = sample;
            self.len += 1;
        }
    }

    /// Sample `index` positions after the oldest.
    pub fn get(
        &self,
        index: usize,
    ) -> Option<&Sample<T>> {
        (index < self.len).then(|| &self.samples[(self.head + index) % N])
    }

    pub fn latest(&self) -> Option<&Sample<T>> {
        self.len.checked_sub(1).and_then(|last| self.get(last))
    }

    /// Samples oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Sample<T>> + '_ {
        (0..self.len).map(move |i| &self.samples[(self.head + i) % N])
    }

    /// Samples no older than `window_ms` at `now_ms`.
    pub fn within_window(
        &self,
        now_ms: u64,
        window_ms: u64,
    ) -> impl Iterator<Item = &Sample<T>> + '_ {
        self.iter().filter(move |s| s.age_ms(now_ms) <= window_ms)
    }

    /// Smallest and largest value in the buffer.
    pub fn value_range(&self) -> Option<(f32, f32)> {
        self.iter().map(|s| s.value.to_f32()).fold(None, |range, v| match range {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
    }

    pub fn clear(&mut self) {
        self.head = 0;
        self.len = 0;
    }
}

impl<T: SampleValue, const N: usize> Default for SeriesBuffer<T, N> {
    fn default() -> Self { Self::new() }
}

// =============================================================================
// Windowed Series
// =============================================================================

/// Static description of a plotted series.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SeriesSpec {
    /// Legend label.
    pub label: &'static str,
    /// Time span shown across the plot width.
    pub window_ms: u64,
    /// Minimum time between two stored samples.
    pub sample_interval_ms: u64,
    pub color: Rgb565,
}

/// A rate-limited series buffer with its plot description.
pub struct WindowedSeries<T, const N: usize> {
    spec: SeriesSpec,
    buffer: SeriesBuffer<T, N>,
    last_append_ms: Option<u64>,
}

impl<T: SampleValue, const N: usize> WindowedSeries<T, N> {
    pub const fn new(spec: SeriesSpec) -> Self {
        Self {
            spec,
            buffer: SeriesBuffer::new(),
            last_append_ms: None,
        }
    }

    pub const fn spec(&self) -> &SeriesSpec {
        &self.spec
    }

    pub const fn buffer(&self) -> &SeriesBuffer<T, N> {
        &self.buffer
    }

    /// Whether a sample offered at `now_ms` would be stored.
    pub fn is_due(
        &self,
        now_ms: u64,
    ) -> bool {
        self.last_append_ms
            .is_none_or(|last| now_ms.saturating_sub(last) >= self.spec.sample_interval_ms)
    }

    /// Store `value` if the sample interval has elapsed. Returns `true` if stored.
    pub fn append(
        &mut self,
        now_ms: u64,
        value: T,
    ) -> bool {
        if !self.is_due(now_ms) {
            return false;
        }
        self.buffer.push(Sample::new(now_ms, value));
        self.last_append_ms = Some(now_ms);
        true
    }
}

/// Type-erased read access for the graph renderer.
pub trait SeriesView {
    fn spec(&self) -> &SeriesSpec;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `(timestamp_ms, value)` of the sample `index` positions after the oldest.
    fn point(
        &self,
        index: usize,
    ) -> Option<(u64, f32)>;

    fn value_range(&self) -> Option<(f32, f32)>;
}

impl<T: SampleValue, const N: usize> SeriesView for WindowedSeries<T, N> {
    fn spec(&self) -> &SeriesSpec {
        &self.spec
    }

    fn len(&self) -> usize {
        self.buffer.len()
    }

    fn point(
        &self,
        index: usize,
    ) -> Option<(u64, f32)> {
        self.buffer.get(index).map(|s| (s.timestamp_ms, s.value.to_f32()))
    }

    fn value_range(&self) -> Option<(f32, f32)> {
        self.buffer.value_range()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use std::vec::Vec;

    use super::*;
    use crate::colors::YELLOW;

    const SPEC: SeriesSpec = SeriesSpec {
        label: "test",
        window_ms: 10_000,
        sample_interval_ms: 1_000,
        color: YELLOW,
    };

    fn contents<T: SampleValue, const N: usize>(buffer: &SeriesBuffer<T, N>) -> Vec<(u64, T)> {
        buffer.iter().map(|s| (s.timestamp_ms, s.value)).collect()
    }

    #[test]
    fn test_capacity_four_keeps_last_four() {
        let mut buffer: SeriesBuffer<u32, 4> = SeriesBuffer::new();
        for i in 1..=5u32 {
            buffer.push(Sample::new(u64::from(i), i * 10));
        }
        assert_eq!(contents(&buffer), vec![(2, 20), (3, 30), (4, 40), (5, 50)]);
        assert_eq!(buffer.len(), 4);
        assert!(buffer.is_full());
    }

    #[test]
    fn test_overflow_keeps_most_recent_in_order() {
        let mut buffer: SeriesBuffer<u32, 7> = SeriesBuffer::new();
        for count in 0..40u32 {
            buffer.push(Sample::new(u64::from(count), count));
            let expected: Vec<(u64, u32)> = (count.saturating_sub(6)..=count).map(|v| (u64::from(v), v)).collect();
            assert_eq!(contents(&buffer), expected);
        }
    }

    #[test]
    fn test_get_and_latest() {
        let mut buffer: SeriesBuffer<f32, 3> = SeriesBuffer::new();
        assert!(buffer.latest().is_none());
        for i in 0..5 {
            buffer.push(Sample::new(i, i as f32));
        }
        assert_eq!(buffer.get(0).unwrap().timestamp_ms, 2);
        assert_eq!(buffer.latest().unwrap().timestamp_ms, 4);
        assert!(buffer.get(3).is_none());
    }

    #[test]
    fn test_within_window() {
        let mut buffer: SeriesBuffer<u16, 8> = SeriesBuffer::new();
        for t in [1_000, 5_000, 9_000] {
            buffer.push(Sample::new(t, 1));
        }
        let stamps: Vec<u64> = buffer.within_window(10_000, 5_000).map(|s| s.timestamp_ms).collect();
        assert_eq!(stamps, vec![5_000, 9_000]);
    }

    #[test]
    fn test_value_range() {
        let mut buffer: SeriesBuffer<i32, 4> = SeriesBuffer::new();
        assert_eq!(buffer.value_range(), None);
        for (t, v) in [(0, 3), (1, -2), (2, 7)] {
            buffer.push(Sample::new(t, v));
        }
        assert_eq!(buffer.value_range(), Some((-2.0, 7.0)));
        buffer.clear();
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_append_honours_sample_interval() {
        let mut series: WindowedSeries<f32, 16> = WindowedSeries::new(SPEC);
        assert!(series.append(0, 1.0));
        assert!(!series.append(500, 2.0));
        assert!(!series.append(999, 3.0));
        assert!(series.append(1_000, 4.0));
        assert_eq!(series.len(), 2);
        assert_eq!(series.point(1), Some((1_000, 4.0)));
    }

    #[test]
    fn test_rate_limit_is_independent_of_eviction() {
        let mut series: WindowedSeries<u32, 2> = WindowedSeries::new(SPEC);
        for t in (0..10_000).step_by(250) {
            series.append(t, t as u32);
        }
        assert_eq!(series.len(), 2);
        assert_eq!(series.point(0), Some((8_000, 8_000.0)));
        assert_eq!(series.point(1), Some((9_000, 9_000.0)));
    }
}
