//! Color constants for the trackside dashboard.
//!
//! Rgb565 is native to the ST7789 panel, so these values go to the display
//! without conversion.

use embedded_graphics::pixelcolor::{Rgb565, RgbColor};

// =============================================================================
// Standard Colors (from RgbColor trait)
// =============================================================================

/// Pure black. Background and the color used for partial clears.
pub const BLACK: Rgb565 = Rgb565::BLACK;

/// Pure white. Neutral delay band and plain text.
pub const WHITE: Rgb565 = Rgb565::WHITE;

/// Pure red. Warning delay band, alarm labels and the stale-link border.
pub const RED: Rgb565 = Rgb565::RED;

/// Pure green. Nominal delay band and the "driving" status word.
pub const GREEN: Rgb565 = Rgb565::GREEN;

/// Pure yellow. Battery voltage trace.
pub const YELLOW: Rgb565 = Rgb565::YELLOW;

/// Cyan. Laps-per-hour trend trace.
pub const CYAN: Rgb565 = Rgb565::CYAN;

/// Magenta. Radius trace.
pub const PINK: Rgb565 = Rgb565::MAGENTA;

// =============================================================================
// Custom Colors
// =============================================================================

/// Orange. "Charging" status word and warning log level.
pub const ORANGE: Rgb565 = Rgb565::new(31, 32, 0);

/// Dark gray for the header bar, plot frame and debug log lines.
pub const GRAY: Rgb565 = Rgb565::new(8, 16, 8);

/// Header bar fill.
pub const DARK_BLUE: Rgb565 = Rgb565::new(0, 8, 12);
