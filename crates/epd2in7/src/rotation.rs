//! Coordinate rotation utilities

use crate::image::PixelSource;

/// Landscape view of a pixel source
///
/// Turns the source 90 degrees counter-clockwise so a `W x H` landscape image
/// reads as an `H x W` portrait image in the panel's native orientation.
pub struct Rotated<P> {
    inner: P,
}

impl<P: PixelSource> Rotated<P> {
    /// Wrap a landscape source
    pub fn new(inner: P) -> Self {
        Self { inner }
    }

    /// Unwrap the source
    pub fn into_inner(self) -> P {
        self.inner
    }
}

impl<P: PixelSource> PixelSource for Rotated<P> {
    fn width(&self) -> u32 {
        self.inner.height()
    }

    fn height(&self) -> u32 {
        self.inner.width()
    }

    fn is_white(&self, x: u32, y: u32) -> bool {
        self.inner.is_white(self.inner.width() - 1 - y, x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::Frame;

    #[test]
    fn swaps_dimensions() {
        let landscape = Frame::new(264, 176);
        let view = Rotated::new(&landscape);
        assert_eq!((view.width(), view.height()), (176, 264));
    }

    #[test]
    fn top_right_becomes_top_left() {
        // 4x2 landscape, mark the top-right pixel black
        let mut landscape = Frame::new(4, 2);
        landscape.set_pixel(3, 0, false);

        let portrait = Frame::from_source(&Rotated::new(&landscape));
        assert_eq!((portrait.width(), portrait.height()), (2, 4));
        assert!(!portrait.is_white(0, 0));
        let black = (0..4)
            .flat_map(|y| (0..2).map(move |x| (x, y)))
            .filter(|&(x, y)| !portrait.is_white(x, y))
            .count();
        assert_eq!(black, 1);
    }

    #[test]
    fn bottom_left_becomes_bottom_right() {
        let mut landscape = Frame::new(4, 2);
        landscape.set_pixel(0, 1, false);

        let portrait = Frame::from_source(&Rotated::new(&landscape));
        assert!(!portrait.is_white(1, 3));
    }
}
