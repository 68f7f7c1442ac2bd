//! Display and layout configuration constants.
//!
//! Layout arithmetic is done once at compile time; drawing code only reads
//! these constants.

use embedded_graphics::prelude::{Point, Size};
use embedded_graphics::primitives::Rectangle;

use super::telemetry::ENTITY_COUNT;

// =============================================================================
// Display Configuration
// =============================================================================

/// Display width in pixels (ST7789 on Pimoroni PIM715, landscape).
pub const SCREEN_WIDTH: u32 = 320;

/// Display height in pixels.
pub const SCREEN_HEIGHT: u32 = 240;

/// Header bar height in pixels.
pub const HEADER_HEIGHT: u32 = 26;

/// Screen center X coordinate.
pub const CENTER_X: i32 = (SCREEN_WIDTH / 2) as i32;

// =============================================================================
// Fleet Board (multi-vehicle liveness)
// =============================================================================

/// Columns in the fleet grid.
pub const FLEET_COLS: u32 = 2;

/// Rows in the fleet grid.
pub const FLEET_ROWS: u32 = 3;

/// Width of one fleet cell.
pub const FLEET_COL_WIDTH: u32 = SCREEN_WIDTH / FLEET_COLS;

/// Height of one fleet cell (space below the header split into rows).
pub const FLEET_ROW_HEIGHT: u32 = (SCREEN_HEIGHT - HEADER_HEIGHT) / FLEET_ROWS;

/// Horizontal padding before the "N:" label.
pub const FLEET_LABEL_INSET: u32 = 10;

/// Horizontal offset of the delay value, leaving room for "N:".
pub const FLEET_VALUE_INSET: u32 = 50;

/// Vertical padding above text in a fleet cell.
pub const FLEET_TEXT_INSET: u32 = 8;

const _: () = assert!(FLEET_COLS * FLEET_ROWS >= ENTITY_COUNT as u32);

// =============================================================================
// Telemetry Page
// =============================================================================

/// Height of the text panel below the header.
pub const PANEL_HEIGHT: u32 = 88;

/// Inset of the plot and panel from the screen edge (leaves room for the link border).
pub const PLOT_INSET: u32 = 4;

/// Text panel region, cleared before each panel redraw.
pub const PANEL_AREA: Rectangle = Rectangle::new(
    Point::new(PLOT_INSET as i32, (HEADER_HEIGHT + PLOT_INSET) as i32),
    Size::new(SCREEN_WIDTH - 2 * PLOT_INSET, PANEL_HEIGHT - PLOT_INSET),
);

/// Shared plot rectangle for every telemetry series.
pub const PLOT_AREA: Rectangle = Rectangle::new(
    Point::new(PLOT_INSET as i32, (HEADER_HEIGHT + PANEL_HEIGHT) as i32),
    Size::new(
        SCREEN_WIDTH - 2 * PLOT_INSET,
        SCREEN_HEIGHT - HEADER_HEIGHT - PANEL_HEIGHT - PLOT_INSET - LEGEND_HEIGHT,
    ),
);

/// Height of the legend strip under the plot.
pub const LEGEND_HEIGHT: u32 = 12;

/// Top of the legend strip.
pub const LEGEND_Y: i32 = PLOT_AREA.top_left.y + PLOT_AREA.size.height as i32 + 1;

/// Width of the stale-link border.
pub const LINK_BORDER_WIDTH: u32 = 3;

/// Area framed by the stale-link border (everything below the header).
pub const LINK_BORDER_AREA: Rectangle = Rectangle::new(
    Point::new(0, HEADER_HEIGHT as i32),
    Size::new(SCREEN_WIDTH, SCREEN_HEIGHT - HEADER_HEIGHT),
);

const _: () = assert!(LINK_BORDER_WIDTH < PLOT_INSET);
const _: () = assert!(LEGEND_Y + 10 < (SCREEN_HEIGHT - LINK_BORDER_WIDTH) as i32);
