//! Shared helpers for drawing tests.

use std::vec::Vec;

use embedded_graphics::Pixel;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use crate::config::{SCREEN_HEIGHT, SCREEN_WIDTH};

/// Draw target that records every pixel, including off-screen ones.
#[derive(Default)]
pub struct Recorder {
    pub pixels: Vec<(Point, Rgb565)>,
}

impl Recorder {
    /// Points drawn in `color`.
    pub fn colored(
        &self,
        color: Rgb565,
    ) -> impl Iterator<Item = Point> + '_ {
        self.pixels.iter().filter(move |(_, c)| *c == color).map(|(p, _)| *p)
    }

    /// True if every recorded pixel lies inside `area`.
    pub fn all_inside(
        &self,
        area: &Rectangle,
    ) -> bool {
        self.pixels.iter().all(|(p, _)| area.contains(*p))
    }

    /// True if any pixel was drawn inside `area`.
    pub fn touched(
        &self,
        area: &Rectangle,
    ) -> bool {
        self.pixels.iter().any(|(p, _)| area.contains(*p))
    }

    pub fn clear_log(&mut self) {
        self.pixels.clear();
    }
}

impl OriginDimensions for Recorder {
    fn size(&self) -> Size {
        Size::new(SCREEN_WIDTH, SCREEN_HEIGHT)
    }
}

impl DrawTarget for Recorder {
    type Color = Rgb565;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(
        &mut self,
        pixels: I,
    ) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        self.pixels.extend(pixels.into_iter().map(|Pixel(p, c)| (p, c)));
        Ok(())
    }
}
