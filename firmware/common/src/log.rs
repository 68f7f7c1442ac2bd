//! Ring of recent log entries for the Logs page.
//!
//! The firmware and the simulator each own one [`LogRing`] and mirror their
//! log output into it. Each push bumps a revision counter so the Logs page
//! only redraws when something new arrived.

use embedded_graphics::pixelcolor::Rgb565;
use heapless::String;

use crate::colors::{GRAY, GREEN, RED, YELLOW};

/// Entries kept.
pub const LOG_ENTRIES: usize = 16;

/// Characters kept per message.
pub const LOG_MSG_LEN: usize = 38;

/// Log severity level.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub const fn color(self) -> Rgb565 {
        match self {
            Self::Debug => GRAY,
            Self::Info => GREEN,
            Self::Warn => YELLOW,
            Self::Error => RED,
        }
    }

    /// Single-character prefix shown before the message.
    pub const fn prefix(self) -> char {
        match self {
            Self::Debug => 'D',
            Self::Info => 'I',
            Self::Warn => 'W',
            Self::Error => 'E',
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct LogEntry {
    pub level: LogLevel,
    /// Message, truncated on a character boundary.
    pub message: String<LOG_MSG_LEN>,
    /// Milliseconds since boot.
    pub timestamp_ms: u64,
}

impl LogEntry {
    pub fn new(
        level: LogLevel,
        message: &str,
        timestamp_ms: u64,
    ) -> Self {
        let mut text = String::new();
        for c in message.chars() {
            if text.push(c).is_err() {
                break;
            }
        }
        Self {
            level,
            message: text,
            timestamp_ms,
        }
    }
}

/// Fixed-size ring of log entries, oldest dropped first.
pub struct LogRing {
    entries: [LogEntry; LOG_ENTRIES],
    /// Next write position.
    head: usize,
    count: usize,
    revision: u32,
}

impl LogRing {
    pub const fn new() -> Self {
        Self {
            entries: [const {
                LogEntry {
                    level: LogLevel::Info,
                    message: String::new(),
                    timestamp_ms: 0,
                }
            }; LOG_ENTRIES],
            head: 0,
            count: 0,
            revision: 0,
        }
    }

    pub fn push(
        &mut self,
        entry: LogEntry,
    ) {
        self.entries[self.head] = entry;
        self.head = (self.head + 1) % LOG_ENTRIES;
        if self.count < LOG_ENTRIES {
            self.count += 1;
        }
        self.revision = self.revision.wrapping_add(1);
    }

    pub fn log(
        &mut self,
        level: LogLevel,
        message: &str,
        timestamp_ms: u64,
    ) {
        self.push(LogEntry::new(level, message, timestamp_ms));
    }

    #[inline]
    pub const fn len(&self) -> usize { self.count }

    #[inline]
    pub const fn is_empty(&self) -> bool { self.count == 0 }

    /// Changes on every push.
    #[inline]
    pub const fn revision(&self) -> u32 { self.revision }

    /// Entries from oldest to newest.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &LogEntry> + '_ {
        let start = (self.head + LOG_ENTRIES - self.count) % LOG_ENTRIES;
        (0..self.count).map(move |i| &self.entries[(start + i) % LOG_ENTRIES])
    }
}

impl Default for LogRing {
    fn default() -> Self { Self::new() }
}

// =============================================================================
// Unit Tests
// =============================================================================
