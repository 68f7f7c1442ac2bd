//! PIM715 Display Pack 2.8" (ST7789, 320x240 landscape).
//!
//! Pin mapping:
//! - CS: GPIO17
//! - DC: GPIO16
//! - CLK: GPIO18 (SPI0 CLK)
//! - MOSI: GPIO19 (SPI0 TX)
//! - Backlight: GPIO20
//! - Reset: tied to RUN

use display_interface_spi::SPIInterface;
use embassy_rp::gpio::Output;
use embassy_rp::peripherals::SPI0;
use embassy_rp::spi::{Blocking, Config as SpiConfig, Spi};
use embedded_hal_bus::spi::{ExclusiveDevice, NoDelay};
use mipidsi::models::ST7789;
use mipidsi::options::{ColorInversion, Orientation, Rotation};
use mipidsi::{Builder, NoResetPin};

/// SPI clock. The ST7789 is rated to 62.5 MHz.
const SPI_FREQUENCY_HZ: u32 = 40_000_000;

pub type Pim715Display<'d> =
    mipidsi::Display<SPIInterface<ExclusiveDevice<Spi<'d, SPI0, Blocking>, Output<'d>, NoDelay>, Output<'d>>, ST7789, NoResetPin>;

/// The panel together with its backlight pin.
pub struct Panel<'d> {
    pub display: Pim715Display<'d>,
    backlight: Output<'d>,
}

impl<'d> Panel<'d> {
    /// Bring up the controller and switch the backlight on.
    ///
    /// Panics if the controller does not accept its init sequence; there is
    /// nothing useful to do without a screen.
    pub fn init(
        spi: Spi<'d, SPI0, Blocking>,
        cs: Output<'d>,
        dc: Output<'d>,
        backlight: Output<'d>,
    ) -> Self {
        let spi_device = ExclusiveDevice::new_no_delay(spi, cs).unwrap();
        let di = SPIInterface::new(spi_device, dc);

        // Native panel is 240x320 portrait
        let display = Builder::new(ST7789, di)
            .display_size(240, 320)
            .orientation(Orientation::new().rotate(Rotation::Deg90))
            .invert_colors(ColorInversion::Inverted)
            .init(&mut embassy_time::Delay)
            .unwrap();

        let mut panel = Self { display, backlight };
        panel.set_backlight(true);
        panel
    }

    pub fn set_backlight(
        &mut self,
        on: bool,
    ) {
        if on {
            self.backlight.set_high();
        } else {
            self.backlight.set_low();
        }
    }
}

pub fn spi_config() -> SpiConfig {
    let mut config = SpiConfig::default();
    config.frequency = SPI_FREQUENCY_HZ;
    config
}
