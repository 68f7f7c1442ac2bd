//! Header bar.

use core::fmt::Write;

use embedded_graphics::{
    pixelcolor::Rgb565,
    prelude::*,
    primitives::{PrimitiveStyle, Rectangle},
    text::Text,
};
use heapless::String;

use crate::{
    colors::DARK_BLUE,
    config::{CENTER_X, HEADER_HEIGHT, SCREEN_WIDTH, SELECTED_ENTITY},
    pages::Page,
    styles::{CENTERED, LABEL_STYLE_WHITE, LEFT_ALIGNED, RIGHT_ALIGNED, TITLE_STYLE_WHITE},
};

const HEADER_RECT: Rectangle = Rectangle::new(Point::new(0, 0), Size::new(SCREEN_WIDTH, HEADER_HEIGHT));

const HEADER_TITLE_POS: Point = Point::new(CENTER_X, 19);

const HEADER_LEFT_POS: Point = Point::new(5, 17);

const HEADER_RIGHT_POS: Point = Point::new((SCREEN_WIDTH - 5) as i32, 17);

const HEADER_FILL_STYLE: PrimitiveStyle<Rgb565> = PrimitiveStyle::with_fill(DARK_BLUE);

/// Draw the header bar with the page title.
///
/// The telemetry page also names the selected vehicle on the left.
pub fn draw_header<D>(
    display: &mut D,
    page: Page,
) where
    D: DrawTarget<Color = Rgb565>,
{
    HEADER_RECT.into_styled(HEADER_FILL_STYLE).draw(display).ok();

    Text::with_text_style(page.title(), HEADER_TITLE_POS, TITLE_STYLE_WHITE, CENTERED)
        .draw(display)
        .ok();

    if page == Page::Telemetry {
        let mut vehicle: String<8> = String::new();
        let _ = write!(vehicle, "#{SELECTED_ENTITY}");
        Text::with_text_style(&vehicle, HEADER_LEFT_POS, LABEL_STYLE_WHITE, LEFT_ALIGNED)
            .draw(display)
            .ok();
    }

    let mut index: String<8> = String::new();
    let _ = write!(index, "{}/3", page_number(page));
    Text::with_text_style(&index, HEADER_RIGHT_POS, LABEL_STYLE_WHITE, RIGHT_ALIGNED)
        .draw(display)
        .ok();
}

const fn page_number(page: Page) -> u8 {
    match page {
        Page::Fleet => 1,
        Page::Telemetry => 2,
        Page::Logs => 3,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::WHITE;
    use crate::test_support::Recorder;

    #[test]
    fn test_header_stays_in_bar() {
        for page in [Page::Fleet, Page::Telemetry, Page::Logs] {
            let mut display = Recorder::default();
            draw_header(&mut display, page);
            assert!(display.all_inside(&HEADER_RECT));
            assert!(display.colored(WHITE).count() > 0);
        }
    }
}
