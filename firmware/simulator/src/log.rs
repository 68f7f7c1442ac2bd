//! Log sink shared by the window loop and the simulated radio thread.

use std::sync::Mutex;

use trackside_common::log::{LogLevel, LogRing};

use crate::timing::now_ms;

pub static LOG_RING: Mutex<LogRing> = Mutex::new(LogRing::new());

/// Print `message` and mirror it into [`LOG_RING`].
///
/// Never waits: if the window loop is drawing from the ring the message only
/// reaches stdout.
pub fn log(
    level: LogLevel,
    message: &str,
) {
    let now = now_ms();
    println!("[{:>7}.{:03}] {} {message}", now / 1000, now % 1000, level.prefix());
    if let Ok(mut ring) = LOG_RING.try_lock() {
        ring.log(level, message, now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_does_not_wait_for_held_ring() {
        let ring = LOG_RING.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        let revision = ring.revision();
        log(LogLevel::Info, "while the window loop draws");
        assert_eq!(ring.revision(), revision);
    }
}
