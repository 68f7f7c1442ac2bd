//! Logs page for on-device log viewing.
//!
//! Displays the newest log entries with color-coded levels and timestamps.
//!
//! # Layout
//!
//! ```text
//! LOGS                              (header)
//! [I] 12345 Radio bridge ready      (entries)
//! [W] 12350 Relay failed: Busy
//! [E] 12355 Vehicle 3 stuck
//! ...
//! Press Y for next page             (footer)
//! ```

use core::fmt::Write;

use embedded_graphics::{
    mono_font::MonoTextStyle,
    pixelcolor::Rgb565,
    prelude::*,
    primitives::{PrimitiveStyle, Rectangle},
    text::Text,
};
use heapless::String;

use crate::{
    colors::{BLACK, GREEN, WHITE},
    config::{HEADER_HEIGHT, SCREEN_HEIGHT, SCREEN_WIDTH},
    log::{LogEntry, LogRing},
    styles::{LABEL_FONT, LABEL_STYLE_WHITE},
};

const BODY_AREA: Rectangle = Rectangle::new(
    Point::new(0, HEADER_HEIGHT as i32),
    Size::new(SCREEN_WIDTH, SCREEN_HEIGHT - HEADER_HEIGHT),
);

const FIRST_LINE_Y: i32 = HEADER_HEIGHT as i32 + 14;

const LINE_HEIGHT: i32 = 13;

const FOOTER_Y: i32 = SCREEN_HEIGHT as i32 - 6;

/// Entry lines that fit between the header and the footer.
pub const VISIBLE_LINES: usize = ((FOOTER_Y - 14 - FIRST_LINE_Y) / LINE_HEIGHT + 1) as usize;

/// Clear the page body and draw the newest entries.
pub fn draw_logs_page<D>(
    display: &mut D,
    logs: &LogRing,
) where
    D: DrawTarget<Color = Rgb565>,
{
    BODY_AREA.into_styled(PrimitiveStyle::with_fill(BLACK)).draw(display).ok();

    if logs.is_empty() {
        Text::new("No log entries", Point::new(4, 120), LABEL_STYLE_WHITE)
            .draw(display)
            .ok();
    }

    let skip = logs.len().saturating_sub(VISIBLE_LINES);
    let mut y = FIRST_LINE_Y;
    for entry in logs.iter().skip(skip) {
        draw_log_entry(display, entry, y);
        y += LINE_HEIGHT;
    }

    let footer_style = MonoTextStyle::new(LABEL_FONT, GREEN);
    Text::new("Press Y for next page", Point::new(4, FOOTER_Y), footer_style)
        .draw(display)
        .ok();
}

/// Draw a single log entry.
fn draw_log_entry<D>(
    display: &mut D,
    entry: &LogEntry,
    y: i32,
) where
    D: DrawTarget<Color = Rgb565>,
{
    let level_style = MonoTextStyle::new(LABEL_FONT, entry.level.color());
    let msg_style = MonoTextStyle::new(LABEL_FONT, WHITE);

    // [L] TTTTT: level prefix in color, timestamp mod 100000 for 5 digits
    let mut prefix: String<16> = String::new();
    let _ = write!(prefix, "[{}] {:05}", entry.level.prefix(), entry.timestamp_ms % 100_000);
    Text::new(&prefix, Point::new(4, y), level_style).draw(display).ok();

    // Prefix is 11 chars at 6px, plus spacing
    Text::new(entry.message.as_str(), Point::new(84, y), msg_style)
        .draw(display)
        .ok();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::{RED, YELLOW};
    use crate::log::{LOG_ENTRIES, LogLevel};
    use crate::test_support::Recorder;

    #[test]
    fn test_visible_lines_fit() {
        assert!(VISIBLE_LINES >= 10);
        assert!(FIRST_LINE_Y + (VISIBLE_LINES as i32 - 1) * LINE_HEIGHT < FOOTER_Y - 10);
    }

    #[test]
    fn test_full_ring_stays_on_screen() {
        let mut ring = LogRing::new();
        for i in 0..LOG_ENTRIES as u64 {
            let level = if i % 2 == 0 { LogLevel::Warn } else { LogLevel::Error };
            ring.log(level, "Relay failed: Busy 0123456789abcdef", i * 1_000);
        }
        let mut display = Recorder::default();
        draw_logs_page(&mut display, &ring);
        assert!(display.all_inside(&BODY_AREA));
        assert!(display.colored(YELLOW).count() > 0);
        assert!(display.colored(RED).count() > 0);
    }
}
