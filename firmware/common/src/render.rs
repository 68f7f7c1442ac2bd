//! Render state tracking for partial display updates.
//!
//! The panel is slow to fill, so nothing is redrawn unless it changed:
//!
//! | Element | Redrawn when |
//! |---------|--------------|
//! | Header, fleet labels, legend | After a clear, or a label's alarm state flips |
//! | Fleet delay values | The displayed text or its color band changes |
//! | Telemetry panel | A record was consumed or the link age (whole seconds) changed |
//! | Link border | Staleness flips |
//! | Graph | A series gained a sample, or every `GRAPH_REFRESH_MS` |
//! | Logs | The log ring revision changed |
//!
//! Every cache is reset when the page changes, so the first frame on a page
//! draws everything.

use crate::config::ENTITY_COUNT;
use crate::config::telemetry::GRAPH_REFRESH_MS;
use crate::delay::{DelayBand, DelayText};
use crate::pages::Page;

#[derive(Clone, Debug, PartialEq)]
struct DelayCell {
    text: DelayText,
    band: DelayBand,
}

/// Tracks what is on screen.
pub struct RenderState {
    page: Page,
    /// Whether this is the first frame (need full redraw).
    first_frame: bool,
    /// Screen was cleared this frame; static parts must be redrawn.
    display_cleared: bool,
    delays: [Option<DelayCell>; ENTITY_COUNT],
    label_alarms: [Option<bool>; ENTITY_COUNT],
    border_stale: Option<bool>,
    link_age_secs: Option<u64>,
    last_graph_ms: Option<u64>,
    log_revision: Option<u32>,
}

impl RenderState {
    pub const fn new() -> Self {
        Self {
            page: Page::Fleet,
            first_frame: true,
            display_cleared: false,
            delays: [const { None }; ENTITY_COUNT],
            label_alarms: [None; ENTITY_COUNT],
            border_stale: None,
            link_age_secs: None,
            last_graph_ms: None,
            log_revision: None,
        }
    }

    pub const fn page(&self) -> Page {
        self.page
    }

    /// Switch to `page`. Returns `true` if the screen must be cleared.
    pub fn switch_page(
        &mut self,
        page: Page,
    ) -> bool {
        if page == self.page && !self.first_frame {
            return false;
        }
        self.page = page;
        self.mark_display_cleared();
        true
    }

    /// Forget everything on screen.
    pub fn mark_display_cleared(&mut self) {
        self.display_cleared = true;
        self.delays = [const { None }; ENTITY_COUNT];
        self.label_alarms = [None; ENTITY_COUNT];
        self.border_stale = None;
        self.link_age_secs = None;
        self.last_graph_ms = None;
        self.log_revision = None;
    }

    /// Static parts (header, legend) need drawing.
    #[inline]
    pub const fn need_static(&self) -> bool { self.first_frame || self.display_cleared }

    pub fn check_label_dirty(
        &mut self,
        index: usize,
        alarm: bool,
    ) -> bool {
        let dirty = self.label_alarms[index] != Some(alarm);
        self.label_alarms[index] = Some(alarm);
        dirty
    }

    pub fn check_delay_dirty(
        &mut self,
        index: usize,
        text: &DelayText,
        band: DelayBand,
    ) -> bool {
        let cell = DelayCell {
            text: text.clone(),
            band,
        };
        if self.delays[index].as_ref() == Some(&cell) {
            return false;
        }
        self.delays[index] = Some(cell);
        true
    }

    pub fn check_border_dirty(
        &mut self,
        stale: bool,
    ) -> bool {
        let dirty = self.border_stale != Some(stale);
        self.border_stale = Some(stale);
        dirty
    }

    pub fn check_panel_dirty(
        &mut self,
        telemetry_updated: bool,
        link_age_secs: u64,
    ) -> bool {
        let dirty = telemetry_updated || self.link_age_secs != Some(link_age_secs);
        self.link_age_secs = Some(link_age_secs);
        dirty
    }

    /// True if the graph should be redrawn at `now_ms`.
    pub fn check_graph_due(
        &mut self,
        now_ms: u64,
        sampled: bool,
    ) -> bool {
        let due = sampled
            || self
                .last_graph_ms
                .is_none_or(|last| now_ms.saturating_sub(last) >= GRAPH_REFRESH_MS);
        if due {
            self.last_graph_ms = Some(now_ms);
        }
        due
    }

    pub fn check_logs_dirty(
        &mut self,
        revision: u32,
    ) -> bool {
        let dirty = self.log_revision != Some(revision);
        self.log_revision = Some(revision);
        dirty
    }

    /// Call at end of frame to reset per-frame state.
    pub fn end_frame(&mut self) {
        self.first_frame = false;
        self.display_cleared = false;
    }
}

impl Default for RenderState {
    fn default() -> Self { Self::new() }
}

// =============================================================================
// Unit Tests
// =============================================================================
