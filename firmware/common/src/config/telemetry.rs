//! Entity selection, timing and buffer sizing.
//!
//! All timestamps in the crate are milliseconds since boot (`u64`).

use crate::alarm::Tone;

// =============================================================================
// Entities
// =============================================================================

/// Number of tracked vehicles on the fleet board (ids `1..=ENTITY_COUNT`).
pub const ENTITY_COUNT: usize = 6;

/// Vehicle whose structured telemetry is accepted and graphed.
pub const SELECTED_ENTITY: u8 = 2;

/// Vehicle on the DIY charger whose stuck reports need a grace period.
pub const DEBOUNCED_ENTITY: u8 = 2;

/// Vehicles whose stuck keyword is relayed back out to every peer.
pub const RELAY_STUCK_ENTITIES: &[u8] = &[1];

const _: () = assert!(SELECTED_ENTITY >= 1 && SELECTED_ENTITY as usize <= ENTITY_COUNT);
const _: () = assert!(DEBOUNCED_ENTITY >= 1 && DEBOUNCED_ENTITY as usize <= ENTITY_COUNT);

// =============================================================================
// Receive Path
// =============================================================================

/// Largest payload the radio delivers (ESP-NOW frame limit).
pub const MAX_PAYLOAD_LEN: usize = 250;

/// Keyword events buffered between polls. A full queue drops the oldest event.
pub const EVENT_QUEUE_DEPTH: usize = 8;

// =============================================================================
// Polling Loop
// =============================================================================

/// Minimum time between two runs of the polling loop body.
pub const POLL_INTERVAL_MS: u64 = 100;

/// Minimum time between two graph redraws when no new sample arrived.
pub const GRAPH_REFRESH_MS: u64 = 5_000;

// =============================================================================
// Series Sizing
// =============================================================================

/// Battery voltage trace: one point per 5 s over the last 10 minutes.
pub const BATTERY_WINDOW_MS: u64 = 10 * 60 * 1000;
pub const BATTERY_SAMPLE_INTERVAL_MS: u64 = 5_000;
pub const BATTERY_CAPACITY: usize = 120;

/// Radius trace: one point per 2 s over the last 4 minutes.
pub const RADIUS_WINDOW_MS: u64 = 4 * 60 * 1000;
pub const RADIUS_SAMPLE_INTERVAL_MS: u64 = 2_000;
pub const RADIUS_CAPACITY: usize = 120;

/// Laps-per-hour trend: one point per 30 minutes over the last 24 hours.
pub const LAP_TREND_WINDOW_MS: u64 = 24 * 60 * 60 * 1000;
pub const LAP_TREND_SAMPLE_INTERVAL_MS: u64 = 30 * 60 * 1000;
pub const LAP_TREND_CAPACITY: usize = 48;

/// Raw lap timestamps kept for the trailing-hour count.
pub const LAP_LOG_CAPACITY: usize = 64;

// Each buffer must hold a full window at its sample rate.
const _: () = assert!(BATTERY_WINDOW_MS / BATTERY_SAMPLE_INTERVAL_MS <= BATTERY_CAPACITY as u64);
const _: () = assert!(RADIUS_WINDOW_MS / RADIUS_SAMPLE_INTERVAL_MS <= RADIUS_CAPACITY as u64);
const _: () = assert!(LAP_TREND_WINDOW_MS / LAP_TREND_SAMPLE_INTERVAL_MS <= LAP_TREND_CAPACITY as u64);

// =============================================================================
// Radio Bridge
// =============================================================================

/// How long the firmware waits for the radio bridge to report ready.
pub const RADIO_READY_TIMEOUT_MS: u64 = 3_000;

/// Delay between a fatal radio init failure and the device restart.
pub const RESTART_DELAY_MS: u64 = 1_000;

// =============================================================================
// Alarm Tones
// =============================================================================

/// Played once after a successful boot.
pub const BOOT_TONE: Tone = Tone::new(400, 1_000);

/// Played every tick while any plain vehicle is stuck.
pub const STUCK_TONE: Tone = Tone::new(200, 50);

/// Played every tick while the debounced vehicle is confirmed stuck.
pub const DEBOUNCED_STUCK_TONE: Tone = Tone::new(300, 50);
