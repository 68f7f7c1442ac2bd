//! Widget components and the per-tick frame renderer.
//!
//! All widgets are generic over `DrawTarget<Color = Rgb565>`, so the same code
//! drives the ST7789 panel and the desktop simulator.

mod fleet;
mod header;
mod logs;
mod telemetry;

use embedded_graphics::{pixelcolor::Rgb565, prelude::*};

pub use fleet::{cell_origin, draw_delay, draw_dividers, draw_label, value_area};
pub use header::draw_header;
pub use logs::{VISIBLE_LINES, draw_logs_page};
pub use telemetry::{draw_graph, draw_legend, draw_link_border, draw_panel, status_color};

use crate::{
    colors::BLACK,
    dashboard::{Dashboard, TickReport},
    delay::{DelayBand, format_delay},
    log::LogRing,
    pages::Page,
    render::RenderState,
};

/// Everything one frame draws from.
pub struct Frame<'a> {
    pub page: Page,
    pub now_ms: u64,
    pub dashboard: &'a Dashboard,
    pub report: &'a TickReport,
    /// `None` if the log ring is busy; the Logs page then keeps its last frame.
    pub logs: Option<&'a LogRing>,
}

/// Draw one frame, touching only the regions that changed.
pub fn draw_frame<D>(
    display: &mut D,
    state: &mut RenderState,
    frame: &Frame<'_>,
) where
    D: DrawTarget<Color = Rgb565>,
{
    if state.switch_page(frame.page) {
        display.clear(BLACK).ok();
    }
    if state.need_static() {
        draw_header(display, frame.page);
    }

    match frame.page {
        Page::Fleet => draw_fleet_page(display, state, frame),
        Page::Telemetry => draw_telemetry_page(display, state, frame),
        Page::Logs => {
            if let Some(logs) = frame.logs.filter(|logs| state.check_logs_dirty(logs.revision())) {
                draw_logs_page(display, logs);
            }
        }
    }

    state.end_frame();
}

fn draw_fleet_page<D>(
    display: &mut D,
    state: &mut RenderState,
    frame: &Frame<'_>,
) where
    D: DrawTarget<Color = Rgb565>,
{
    if state.need_static() {
        draw_dividers(display);
    }
    for (id, entity) in frame.dashboard.fleet().iter() {
        let index = usize::from(id - 1);
        let alarm = entity.in_alarm();
        if state.check_label_dirty(index, alarm) {
            draw_label(display, index, alarm);
        }

        let secs = entity.delay_secs(frame.now_ms);
        let text = format_delay(secs);
        let band = DelayBand::for_secs(secs);
        if state.check_delay_dirty(index, &text, band) {
            draw_delay(display, index, &text, band);
        }
    }
}

fn draw_telemetry_page<D>(
    display: &mut D,
    state: &mut RenderState,
    frame: &Frame<'_>,
) where
    D: DrawTarget<Color = Rgb565>,
{
    let telemetry = frame.dashboard.telemetry();
    let report = frame.report;

    if state.need_static() {
        draw_legend(display, telemetry);
    }
    if state.check_border_dirty(report.link_stale()) {
        draw_link_border(display, report.link_stale());
    }
    if state.check_panel_dirty(report.telemetry.is_some(), report.link_age_ms / 1000) {
        draw_panel(display, telemetry, report.link_age_ms);
    }
    if state.check_graph_due(frame.now_ms, report.graph_sampled) {
        draw_graph(display, telemetry, frame.now_ms);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
