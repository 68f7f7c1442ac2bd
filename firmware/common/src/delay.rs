//! Fleet board delay formatting.

use core::fmt::Write;

use embedded_graphics::pixelcolor::Rgb565;
use heapless::String;

use crate::colors::{GREEN, RED, WHITE};
use crate::thresholds::{DELAY_DAYS_SECS, DELAY_HOURS_SECS, DELAY_NOMINAL_MAX_SECS, DELAY_WARNING_SECS};

/// Colour band for a vehicle's time since last motion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DelayBand {
    /// Moved recently.
    Nominal,
    Normal,
    /// Has not moved for a worrying while.
    Warning,
}

impl DelayBand {
    pub const fn for_secs(secs: u32) -> Self {
        if secs > DELAY_WARNING_SECS {
            Self::Warning
        } else if secs < DELAY_NOMINAL_MAX_SECS {
            Self::Nominal
        } else {
            Self::Normal
        }
    }

    pub const fn color(self) -> Rgb565 {
        match self {
            Self::Nominal => GREEN,
            Self::Normal => WHITE,
            Self::Warning => RED,
        }
    }
}

/// Text shown for a delay: seconds, then whole hours, then whole days.
pub type DelayText = String<12>;

pub fn format_delay(secs: u32) -> DelayText {
    let mut text = DelayText::new();
    if secs > DELAY_DAYS_SECS {
        write!(text, "{} Days", secs / DELAY_DAYS_SECS).ok();
    } else if secs > DELAY_HOURS_SECS {
        write!(text, "{} Hrs", secs / DELAY_HOURS_SECS).ok();
    } else {
        write!(text, "{secs}").ok();
    }
    text
}
