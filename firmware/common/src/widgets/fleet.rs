//! Fleet board: time since last motion for every vehicle.
//!
//! ```text
//! +------------------+------------------+
//! | 1: 12            | 2: 3 Hrs         |
//! +------------------+------------------+
//! | 3: 540           | 4: 2 Days        |
//! +------------------+------------------+
//! | 5: 7             | 6: 95            |
//! +------------------+------------------+
//! ```
//!
//! Labels turn red while the vehicle is in alarm. Only the value region of a
//! cell is cleared when its text changes.

use core::fmt::Write;

use embedded_graphics::{
    mono_font::MonoTextStyle,
    pixelcolor::Rgb565,
    prelude::*,
    primitives::{Line, PrimitiveStyle, Rectangle},
    text::{Baseline, Text},
};
use heapless::String;

use crate::{
    colors::{BLACK, GRAY, RED, WHITE},
    config::layout::{FLEET_LABEL_INSET, FLEET_TEXT_INSET, FLEET_VALUE_INSET},
    config::{FLEET_COL_WIDTH, FLEET_COLS, FLEET_ROW_HEIGHT, FLEET_ROWS, HEADER_HEIGHT, SCREEN_HEIGHT, SCREEN_WIDTH},
    delay::{DelayBand, DelayText},
    styles::FLEET_FONT,
};

const DIVIDER_STYLE: PrimitiveStyle<Rgb565> = PrimitiveStyle::with_stroke(GRAY, 1);

const CLEAR_STYLE: PrimitiveStyle<Rgb565> = PrimitiveStyle::with_fill(BLACK);

/// Top-left corner of the cell for vehicle index `index` (0-based).
pub const fn cell_origin(index: usize) -> Point {
    let col = index as u32 % FLEET_COLS;
    let row = index as u32 / FLEET_COLS;
    Point::new(
        (col * FLEET_COL_WIDTH) as i32,
        (HEADER_HEIGHT + row * FLEET_ROW_HEIGHT) as i32,
    )
}

/// Region cleared before a delay value is redrawn.
pub const fn value_area(index: usize) -> Rectangle {
    let origin = cell_origin(index);
    Rectangle::new(
        Point::new(
            origin.x + FLEET_VALUE_INSET as i32,
            origin.y + FLEET_TEXT_INSET as i32,
        ),
        Size::new(FLEET_COL_WIDTH - FLEET_VALUE_INSET - 1, FLEET_ROW_HEIGHT - 10),
    )
}

/// Grid lines between the cells.
pub fn draw_dividers<D>(display: &mut D)
where
    D: DrawTarget<Color = Rgb565>,
{
    for col in 1..FLEET_COLS {
        let x = (col * FLEET_COL_WIDTH) as i32;
        Line::new(Point::new(x, HEADER_HEIGHT as i32), Point::new(x, (SCREEN_HEIGHT - 1) as i32))
            .into_styled(DIVIDER_STYLE)
            .draw(display)
            .ok();
    }
    for row in 1..FLEET_ROWS {
        let y = (HEADER_HEIGHT + row * FLEET_ROW_HEIGHT) as i32;
        Line::new(Point::new(0, y), Point::new((SCREEN_WIDTH - 1) as i32, y))
            .into_styled(DIVIDER_STYLE)
            .draw(display)
            .ok();
    }
}

/// Draw the `N:` label, red while the vehicle is in alarm.
pub fn draw_label<D>(
    display: &mut D,
    index: usize,
    alarm: bool,
) where
    D: DrawTarget<Color = Rgb565>,
{
    let origin = cell_origin(index);
    let mut label: String<4> = String::new();
    let _ = write!(label, "{}:", index + 1);

    let style = MonoTextStyle::new(FLEET_FONT, if alarm { RED } else { WHITE });
    let position = origin + Point::new(FLEET_LABEL_INSET as i32, FLEET_TEXT_INSET as i32);
    Text::with_baseline(&label, position, style, Baseline::Top)
        .draw(display)
        .ok();
}

/// Clear the value region and draw the delay text in its band color.
pub fn draw_delay<D>(
    display: &mut D,
    index: usize,
    text: &DelayText,
    band: DelayBand,
) where
    D: DrawTarget<Color = Rgb565>,
{
    let area = value_area(index);
    area.into_styled(CLEAR_STYLE).draw(display).ok();

    let style = MonoTextStyle::new(FLEET_FONT, band.color());
    Text::with_baseline(text, area.top_left, style, Baseline::Top)
        .draw(display)
        .ok();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::GREEN;
    use crate::config::ENTITY_COUNT;
    use crate::delay::format_delay;
    use crate::test_support::Recorder;

    #[test]
    fn test_cell_origins() {
        assert_eq!(cell_origin(0), Point::new(0, 26));
        assert_eq!(cell_origin(1), Point::new(160, 26));
        assert_eq!(cell_origin(2), Point::new(0, 26 + 71));
        assert_eq!(cell_origin(5), Point::new(160, 26 + 2 * 71));
    }

    #[test]
    fn test_value_areas_do_not_overlap() {
        for a in 0..ENTITY_COUNT {
            for b in (a + 1)..ENTITY_COUNT {
                let overlap = value_area(a).intersection(&value_area(b));
                assert!(overlap.size.width == 0 || overlap.size.height == 0);
            }
        }
    }

    #[test]
    fn test_delay_draw_stays_in_value_area() {
        let mut display = Recorder::default();
        draw_delay(&mut display, 3, &format_delay(90), DelayBand::Nominal);
        assert!(display.all_inside(&value_area(3)));
        assert!(display.colored(GREEN).count() > 0);
    }

    #[test]
    fn test_alarm_label_is_red() {
        let mut display = Recorder::default();
        draw_label(&mut display, 0, true);
        assert!(display.colored(RED).count() > 0);
        assert_eq!(display.colored(WHITE).count(), 0);
    }
}
