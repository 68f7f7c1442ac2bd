//! Application configuration.
//!
//! - `layout`: Display dimensions and pre-computed layout constants
//! - `telemetry`: Entity selection, timing, buffer sizing and alarm tones
//!
//! Everything here is a compile-time constant; there is no runtime
//! configuration surface.

pub mod layout;
pub mod telemetry;

// Re-export layout constants at config level for convenience
pub use layout::{
    CENTER_X,
    FLEET_COLS,
    FLEET_COL_WIDTH,
    FLEET_ROWS,
    FLEET_ROW_HEIGHT,
    HEADER_HEIGHT,
    LEGEND_Y,
    LINK_BORDER_AREA,
    LINK_BORDER_WIDTH,
    PANEL_AREA,
    PANEL_HEIGHT,
    PLOT_AREA,
    SCREEN_HEIGHT,
    SCREEN_WIDTH,
};
pub use telemetry::{
    DEBOUNCED_ENTITY,
    ENTITY_COUNT,
    EVENT_QUEUE_DEPTH,
    MAX_PAYLOAD_LEN,
    POLL_INTERVAL_MS,
    SELECTED_ENTITY,
};
