//! On-device log ring shown on the Logs page.
//!
//! Every `log_*!` macro formats its message once into a bounded string,
//! pushes it into [`LOG_RING`] and forwards the same arguments to `defmt`.
//!
//! # Usage
//!
//! ```ignore
//! log_info!("Radio bridge ready");
//! log_warn!("Relay of {} failed: {:?}", keyword, err);
//! ```

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::mutex::Mutex;
use embassy_time::Instant;
use trackside_common::log::{LogLevel, LogRing};

pub use trackside_common::log::LOG_MSG_LEN;

/// Global log ring protected by a mutex.
pub static LOG_RING: Mutex<CriticalSectionRawMutex, LogRing> = Mutex::new(LogRing::new());

/// Push a message into the global ring.
///
/// Non-blocking: if the ring is locked by the renderer the message only
/// reaches the probe log.
pub fn push_log(
    level: LogLevel,
    message: &str,
) {
    if let Ok(mut ring) = LOG_RING.try_lock() {
        ring.log(level, message, Instant::now().as_millis());
    }
}

#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {{
        use core::fmt::Write;
        let mut buf: heapless::String<{ $crate::log_buffer::LOG_MSG_LEN }> = heapless::String::new();
        let _ = write!(buf, $($arg)*);
        $crate::log_buffer::push_log(trackside_common::log::LogLevel::Debug, buf.as_str());
        defmt::debug!($($arg)*);
    }};
}

#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {{
        use core::fmt::Write;
        let mut buf: heapless::String<{ $crate::log_buffer::LOG_MSG_LEN }> = heapless::String::new();
        let _ = write!(buf, $($arg)*);
        $crate::log_buffer::push_log(trackside_common::log::LogLevel::Info, buf.as_str());
        defmt::info!($($arg)*);
    }};
}

#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {{
        use core::fmt::Write;
        let mut buf: heapless::String<{ $crate::log_buffer::LOG_MSG_LEN }> = heapless::String::new();
        let _ = write!(buf, $($arg)*);
        $crate::log_buffer::push_log(trackside_common::log::LogLevel::Warn, buf.as_str());
        defmt::warn!($($arg)*);
    }};
}

#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {{
        use core::fmt::Write;
        let mut buf: heapless::String<{ $crate::log_buffer::LOG_MSG_LEN }> = heapless::String::new();
        let _ = write!(buf, $($arg)*);
        $crate::log_buffer::push_log(trackside_common::log::LogLevel::Error, buf.as_str());
        defmt::error!($($arg)*);
    }};
}
