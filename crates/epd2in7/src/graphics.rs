//! Graphics support via embedded-graphics
//!
//! [`Frame`] implements [`DrawTarget`] so pages can be drawn with the
//! embedded-graphics ecosystem and then handed to the driver.
//!
//! `BinaryColor::On` is ink (black), `BinaryColor::Off` is paper (white).
//!
//! ## Example
//!
//! ```rust,ignore
//! use embedded_graphics::{
//!     mono_font::{ascii::FONT_6X10, MonoTextStyle},
//!     pixelcolor::BinaryColor,
//!     prelude::*,
//!     text::Text,
//! };
//! use epd2in7::{Frame, HEIGHT, WIDTH};
//!
//! let mut frame = Frame::new(WIDTH, HEIGHT);
//! Text::new("Partial refresh", Point::new(0, 12),
//!     MonoTextStyle::new(&FONT_6X10, BinaryColor::On))
//!     .draw(&mut frame)?;
//!
//! epd.smart_update(&frame, &mut delay)?;
//! ```

use core::convert::Infallible;
use embedded_graphics_core::{
    draw_target::DrawTarget,
    geometry::{OriginDimensions, Point, Size},
    pixelcolor::BinaryColor,
    prelude::Pixel,
};

use crate::image::{Frame, PixelSource};

impl DrawTarget for Frame {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(Point { x, y }, color) in pixels {
            if x >= 0 && y >= 0 {
                self.set_pixel(x as u32, y as u32, color == BinaryColor::Off);
            }
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.fill(color == BinaryColor::Off);
        Ok(())
    }
}

impl OriginDimensions for Frame {
    fn size(&self) -> Size {
        Size::new(self.width(), self.height())
    }
}
