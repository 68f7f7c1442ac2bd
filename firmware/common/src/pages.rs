//! Page navigation.
//!
//! The page button cycles through the pages. Switching clears the screen once.
//!
//! - [`Page::Fleet`]: Time since last motion for every vehicle
//! - [`Page::Telemetry`]: Selected vehicle text panel and overlaid graph
//! - [`Page::Logs`]: On-device log viewer with color-coded levels

#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Page {
    #[default]
    Fleet,
    Telemetry,
    Logs,
}

impl Page {
    /// Next page (cycles: Fleet → Telemetry → Logs → Fleet).
    #[inline]
    pub const fn toggle(self) -> Self {
        match self {
            Self::Fleet => Self::Telemetry,
            Self::Telemetry => Self::Logs,
            Self::Logs => Self::Fleet,
        }
    }

    /// Header title.
    pub const fn title(self) -> &'static str {
        match self {
            Self::Fleet => "FLEET",
            Self::Telemetry => "TELEMETRY",
            Self::Logs => "LOGS",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_default() {
        assert_eq!(Page::default(), Page::Fleet);
    }

    #[test]
    fn test_page_toggle_cycle() {
        assert_eq!(Page::Fleet.toggle(), Page::Telemetry);
        assert_eq!(Page::Telemetry.toggle(), Page::Logs);
        assert_eq!(Page::Logs.toggle(), Page::Fleet);
    }
}
