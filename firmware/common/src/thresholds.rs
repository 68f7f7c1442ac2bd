//! Centralized threshold configuration.
//!
//! These values are calibrated for one physical track setup. Change them only
//! after confirming with whoever maintains that setup.
//!
//! Each threshold group carries `const` assertions that fail the build if the
//! ordering is broken.

// =============================================================================
// Delay Color Bands (seconds since last motion)
// =============================================================================

/// Below this delay the value is drawn in the nominal color (GREEN).
pub const DELAY_NOMINAL_MAX_SECS: u32 = 120;

/// Above this delay (8 minutes) the value is drawn in the warning color (RED).
pub const DELAY_WARNING_SECS: u32 = 480;

const _: () = assert!(DELAY_NOMINAL_MAX_SECS < DELAY_WARNING_SECS);

// =============================================================================
// Delay Units
// =============================================================================

/// Above this delay the value is shown in whole hours.
pub const DELAY_HOURS_SECS: u32 = 3_600;

/// Above this delay the value is shown in whole days.
pub const DELAY_DAYS_SECS: u32 = 86_400;

const _: () = assert!(DELAY_WARNING_SECS < DELAY_HOURS_SECS);
const _: () = assert!(DELAY_HOURS_SECS < DELAY_DAYS_SECS);

// =============================================================================
// Debounced Entity
// =============================================================================

/// Grace period before a stuck report from the DIY charger vehicle is
/// treated as real. The charger pauses motion while charging, which the
/// detector reports as stuck.
pub const DEBOUNCE_GRACE_MS: u64 = 40_000;

// =============================================================================
// Link Staleness
// =============================================================================

/// Telemetry older than this draws the red border around the telemetry page.
pub const LINK_STALE_MS: u64 = 20_000;

// =============================================================================
// Graph Scaling
// =============================================================================

/// Fraction of the data range added above and below each trace.
pub const GRAPH_PADDING_FRACTION: f32 = 0.1;

/// Smallest padding, so a flat trace still gets a non-zero range.
pub const GRAPH_MIN_PADDING: f32 = 0.1;

/// Trailing window of the lap counter.
pub const LAP_COUNT_WINDOW_MS: u64 = 3_600_000;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
#[allow(clippy::assertions_on_constants)]
mod tests {
    use super::*;

    #[test]
    fn test_delay_band_ordering() {
        assert!(DELAY_NOMINAL_MAX_SECS < DELAY_WARNING_SECS);
        assert!(DELAY_HOURS_SECS < DELAY_DAYS_SECS);
    }

    #[test]
    fn test_calibrated_values_unchanged() {
        assert_eq!(DEBOUNCE_GRACE_MS, 40_000);
        assert_eq!(DELAY_WARNING_SECS, 480);
        assert_eq!(DELAY_NOMINAL_MAX_SECS, 120);
        assert_eq!(LINK_STALE_MS, 20_000);
    }

    #[test]
    fn test_graph_padding_positive() {
        assert!(GRAPH_PADDING_FRACTION > 0.0);
        assert!(GRAPH_MIN_PADDING > 0.0);
    }
}
