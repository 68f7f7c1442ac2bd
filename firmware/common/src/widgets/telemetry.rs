//! Telemetry page: text panel, overlaid graph and stale-link border.
//!
//! # Layout
//!
//! ```text
//! DRIVING                    LAPS/H 3
//! BAT 11.8V          CHG 13.0V  2.5A
//! 5V 5.0V   25C               PID 1500
//! RX 2s                       RAD 3.1
//! +----------------------------------+
//! |  overlaid traces (own scaling)   |
//! +----------------------------------+
//! VBAT   RADIUS   LAPS/H
//! ```

use core::fmt::Write;

use embedded_graphics::{
    mono_font::MonoTextStyle,
    pixelcolor::Rgb565,
    prelude::*,
    primitives::{PrimitiveStyle, PrimitiveStyleBuilder, StrokeAlignment},
    text::{Baseline, Text, TextStyleBuilder},
};
use heapless::String;

use crate::{
    colors::{BLACK, GRAY, GREEN, ORANGE, RED},
    config::{LEGEND_Y, LINK_BORDER_AREA, LINK_BORDER_WIDTH, PANEL_AREA, PLOT_AREA},
    graph::draw_overlay,
    message::{Status, TelemetryRecord},
    styles::{LABEL_FONT, PANEL_FONT, PANEL_STYLE_WHITE},
    telemetry::TelemetryState,
    thresholds::LINK_STALE_MS,
};

const CLEAR_STYLE: PrimitiveStyle<Rgb565> = PrimitiveStyle::with_fill(BLACK);

const ROW_HEIGHT: i32 = 21;

const LEGEND_SPACING: i32 = 70;

const fn panel_left(row: i32) -> Point {
    Point::new(PANEL_AREA.top_left.x + 4, PANEL_AREA.top_left.y + 2 + row * ROW_HEIGHT)
}

const fn panel_right(row: i32) -> Point {
    Point::new(
        PANEL_AREA.top_left.x + PANEL_AREA.size.width as i32 - 4,
        PANEL_AREA.top_left.y + 2 + row * ROW_HEIGHT,
    )
}

pub const fn status_color(status: Status) -> Rgb565 {
    match status {
        Status::Driving => GREEN,
        Status::Charging => ORANGE,
        Status::Stuck => RED,
        Status::Unknown(_) => GRAY,
    }
}

fn draw_left<D>(
    display: &mut D,
    text: &str,
    row: i32,
    style: MonoTextStyle<'_, Rgb565>,
) where
    D: DrawTarget<Color = Rgb565>,
{
    Text::with_baseline(text, panel_left(row), style, Baseline::Top)
        .draw(display)
        .ok();
}

fn draw_right<D>(
    display: &mut D,
    text: &str,
    row: i32,
    style: MonoTextStyle<'_, Rgb565>,
) where
    D: DrawTarget<Color = Rgb565>,
{
    let text_style = TextStyleBuilder::new()
        .alignment(embedded_graphics::text::Alignment::Right)
        .baseline(Baseline::Top)
        .build();
    Text::with_text_style(text, panel_right(row), style, text_style)
        .draw(display)
        .ok();
}

/// Clear and redraw the text panel.
pub fn draw_panel<D>(
    display: &mut D,
    telemetry: &TelemetryState,
    link_age_ms: u64,
) where
    D: DrawTarget<Color = Rgb565>,
{
    PANEL_AREA.into_styled(CLEAR_STYLE).draw(display).ok();

    let mut line: String<24> = String::new();
    let _ = write!(line, "LAPS/H {}", telemetry.laps_last_hour());
    draw_right(display, &line, 0, PANEL_STYLE_WHITE);

    line.clear();
    let _ = write!(line, "RX {}s", link_age_ms / 1000);
    let age_color = if link_age_ms > LINK_STALE_MS { RED } else { GRAY };
    draw_left(display, &line, 3, MonoTextStyle::new(PANEL_FONT, age_color));

    match telemetry.latest() {
        Some(record) => draw_record(display, record),
        None => draw_left(display, "NO DATA", 0, MonoTextStyle::new(PANEL_FONT, GRAY)),
    }
}

fn draw_record<D>(
    display: &mut D,
    record: &TelemetryRecord,
) where
    D: DrawTarget<Color = Rgb565>,
{
    let status_style = MonoTextStyle::new(PANEL_FONT, status_color(record.status));
    draw_left(display, record.status.label(), 0, status_style);

    let mut line: String<24> = String::new();
    let _ = write!(line, "BAT {:.1}V", record.battery_voltage.as_f32());
    draw_left(display, &line, 1, PANEL_STYLE_WHITE);

    line.clear();
    let _ = write!(
        line,
        "CHG {:.1}V {:.1}A",
        record.charge_voltage.as_f32(),
        record.charge_current.as_f32()
    );
    draw_right(display, &line, 1, PANEL_STYLE_WHITE);

    line.clear();
    let _ = write!(line, "5V {:.1}V {}C", record.rail_5v.as_f32(), record.temperature.as_i32());
    draw_left(display, &line, 2, PANEL_STYLE_WHITE);

    line.clear();
    let _ = write!(line, "PID {}", record.pid_output.as_i32());
    draw_right(display, &line, 2, PANEL_STYLE_WHITE);

    line.clear();
    let _ = write!(line, "RAD {:.1}", record.radius.as_f32());
    draw_right(display, &line, 3, PANEL_STYLE_WHITE);
}

/// Draw the border below the header: red while stale, black otherwise.
pub fn draw_link_border<D>(
    display: &mut D,
    stale: bool,
) where
    D: DrawTarget<Color = Rgb565>,
{
    let style = PrimitiveStyleBuilder::new()
        .stroke_color(if stale { RED } else { BLACK })
        .stroke_width(LINK_BORDER_WIDTH)
        .stroke_alignment(StrokeAlignment::Inside)
        .build();
    LINK_BORDER_AREA.into_styled(style).draw(display).ok();
}

/// Series labels under the plot, each in its trace color.
pub fn draw_legend<D>(
    display: &mut D,
    telemetry: &TelemetryState,
) where
    D: DrawTarget<Color = Rgb565>,
{
    let mut x = PLOT_AREA.top_left.x;
    for series in telemetry.series() {
        let spec = series.spec();
        let style = MonoTextStyle::new(LABEL_FONT, spec.color);
        Text::with_baseline(spec.label, Point::new(x, LEGEND_Y), style, Baseline::Top)
            .draw(display)
            .ok();
        x += LEGEND_SPACING;
    }
}

/// Clear the plot and draw every series.
pub fn draw_graph<D>(
    display: &mut D,
    telemetry: &TelemetryState,
    now_ms: u64,
) where
    D: DrawTarget<Color = Rgb565>,
{
    draw_overlay(display, PLOT_AREA, now_ms, &telemetry.series());
}

#[cfg(test)]
mod tests {
    use embedded_graphics::primitives::Rectangle;

    use super::*;
    use crate::colors::{CYAN, PINK, WHITE, YELLOW};
    use crate::message::{Message, decode};
    use crate::test_support::Recorder;

    fn state_with_record() -> TelemetryState {
        let mut state = TelemetryState::new();
        let Ok(Message::Telemetry(record)) = decode(b"-2 2 11.8 13.0 2.5 1 00 25 3.1 5.0 1500 1") else {
            panic!("sample should decode");
        };
        state.ingest(record, 0);
        state.tick(0);
        state
    }

    #[test]
    fn test_panel_stays_in_panel_area() {
        let mut display = Recorder::default();
        draw_panel(&mut display, &state_with_record(), 2_000);
        assert!(display.all_inside(&PANEL_AREA));
        assert!(display.colored(ORANGE).count() > 0);
        assert!(display.colored(WHITE).count() > 0);
    }

    #[test]
    fn test_panel_without_data() {
        let mut display = Recorder::default();
        draw_panel(&mut display, &TelemetryState::new(), 30_000);
        assert!(display.all_inside(&PANEL_AREA));
        // Silent link shows the age in red.
        assert!(display.colored(RED).count() > 0);
    }

    #[test]
    fn test_border_does_not_touch_plot_or_panel() {
        let mut display = Recorder::default();
        draw_link_border(&mut display, true);
        assert!(display.colored(RED).count() > 0);
        assert!(!display.touched(&PLOT_AREA));
        assert!(!display.touched(&PANEL_AREA));
    }

    #[test]
    fn test_legend_uses_series_colors() {
        let mut display = Recorder::default();
        draw_legend(&mut display, &TelemetryState::new());
        for color in [YELLOW, PINK, CYAN] {
            assert!(display.colored(color).count() > 0);
        }
        let legend = Rectangle::new(Point::new(0, LEGEND_Y), Size::new(320, 10));
        assert!(display.all_inside(&legend));
    }

    #[test]
    fn test_graph_clears_plot_only() {
        let mut display = Recorder::default();
        draw_graph(&mut display, &state_with_record(), 1_000);
        assert!(display.all_inside(&PLOT_AREA));
    }
}
