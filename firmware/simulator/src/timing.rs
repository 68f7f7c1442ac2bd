//! Simulator clock and pacing.
//!
//! The dashboard works in milliseconds since boot. On the desktop "boot" is
//! the first call to [`now_ms`].

use std::sync::OnceLock;
use std::time::{Duration, Instant};

/// Main loop pacing, matching the firmware's idle wait.
pub const FRAME_TIME: Duration = Duration::from_millis(10);

static BOOT: OnceLock<Instant> = OnceLock::new();

/// Milliseconds since the simulator started.
pub fn now_ms() -> u64 {
    BOOT.get_or_init(Instant::now).elapsed().as_millis() as u64
}
