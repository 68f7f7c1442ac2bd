//! Time-windowed line graph.
//!
//! Several unrelated series share one plot rectangle. Each trace is scaled to
//! its own value range, so the plot shows shape and trend rather than a
//! common axis. The horizontal axis is "time before now": the right edge is
//! `now`, the left edge is `now - window` of that series.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle, Rectangle};

use crate::colors::BLACK;
use crate::series::SeriesView;
use crate::thresholds::{GRAPH_MIN_PADDING, GRAPH_PADDING_FRACTION};

/// Vertical range of one trace for one redraw.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ValueRange {
    pub min: f32,
    pub max: f32,
}

impl ValueRange {
    /// Range covering `lo..=hi` plus padding on both sides.
    ///
    /// Padding is a fraction of the span, but never below the floor, so a
    /// flat trace still has a non-zero range.
    pub fn padded(
        lo: f32,
        hi: f32,
    ) -> Self {
        let pad = ((hi - lo) * GRAPH_PADDING_FRACTION).max(GRAPH_MIN_PADDING);
        Self {
            min: lo - pad,
            max: hi + pad,
        }
    }

    /// Position of `value` in the range, `0.0` at min and `1.0` at max.
    pub fn normalize(
        &self,
        value: f32,
    ) -> f32 {
        ((value - self.min) / (self.max - self.min)).clamp(0.0, 1.0)
    }
}

/// Maps `(timestamp, value)` pairs of one series into a plot rectangle.
#[derive(Clone, Copy, Debug)]
pub struct Projection {
    area: Rectangle,
    now_ms: u64,
    window_ms: u64,
    range: ValueRange,
}

impl Projection {
    pub const fn new(
        area: Rectangle,
        now_ms: u64,
        window_ms: u64,
        range: ValueRange,
    ) -> Self {
        Self {
            area,
            now_ms,
            window_ms,
            range,
        }
    }

    /// Screen point for a sample, or `None` if it is older than the window.
    pub fn project(
        &self,
        timestamp_ms: u64,
        value: f32,
    ) -> Option<Point> {
        let age = self.now_ms.saturating_sub(timestamp_ms);
        if self.window_ms == 0 || age > self.window_ms || self.area.size.width == 0 || self.area.size.height == 0 {
            return None;
        }
        let w = self.area.size.width as i32;
        let h = self.area.size.height as i32;

        let x_frac = (self.window_ms - age) as f32 / self.window_ms as f32;
        let y_frac = 1.0 - self.range.normalize(value);

        let x = self.area.top_left.x + micromath::F32(x_frac * (w - 1) as f32).round().0 as i32;
        let y = self.area.top_left.y + micromath::F32(y_frac * (h - 1) as f32).round().0 as i32;

        let right = self.area.top_left.x + w - 1;
        let bottom = self.area.top_left.y + h - 1;
        Some(Point::new(
            x.clamp(self.area.top_left.x, right),
            y.clamp(self.area.top_left.y, bottom),
        ))
    }
}

/// Draw one series into `area`. Returns the number of segments drawn.
///
/// Segments with an endpoint outside the window are skipped, so a series with
/// fewer than two in-window points draws nothing.
pub fn draw_series<D>(
    display: &mut D,
    area: Rectangle,
    now_ms: u64,
    series: &dyn SeriesView,
) -> usize
where
    D: DrawTarget<Color = Rgb565>,
{
    let Some((lo, hi)) = series.value_range() else {
        return 0;
    };
    let spec = series.spec();
    let projection = Projection::new(area, now_ms, spec.window_ms, ValueRange::padded(lo, hi));
    let style = PrimitiveStyle::with_stroke(spec.color, 1);

    let mut segments = 0;
    let mut previous: Option<Point> = None;
    for index in 0..series.len() {
        let current = series
            .point(index)
            .and_then(|(timestamp_ms, value)| projection.project(timestamp_ms, value));
        if let (Some(start), Some(end)) = (previous, current) {
            Line::new(start, end).into_styled(style).draw(display).ok();
            segments += 1;
        }
        previous = current;
    }
    segments
}

/// Clear the plot rectangle and draw every series over it.
pub fn draw_overlay<D>(
    display: &mut D,
    area: Rectangle,
    now_ms: u64,
    series: &[&dyn SeriesView],
) where
    D: DrawTarget<Color = Rgb565>,
{
    area.into_styled(PrimitiveStyle::with_fill(BLACK)).draw(display).ok();
    for trace in series {
        draw_series(display, area, now_ms, *trace);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
