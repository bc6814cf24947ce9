//! Monochrome pixel sources and owned frame snapshots

use alloc::vec;
use alloc::vec::Vec;

use crate::framebuffer;

/// Read-only rectangular 1-bit image
///
/// Anything the driver can display implements this: a [`Frame`], a
/// [`Rotated`](crate::rotation::Rotated) view, or your own image type.
pub trait PixelSource {
    /// Width in pixels
    fn width(&self) -> u32;

    /// Height in pixels
    fn height(&self) -> u32;

    /// `true` if the pixel at (x, y) is non-zero (white)
    ///
    /// Callers only ask for coordinates inside `width() x height()`.
    fn is_white(&self, x: u32, y: u32) -> bool;
}

impl<T: PixelSource + ?Sized> PixelSource for &T {
    fn width(&self) -> u32 {
        (**self).width()
    }

    fn height(&self) -> u32 {
        (**self).height()
    }

    fn is_white(&self, x: u32, y: u32) -> bool {
        (**self).is_white(x, y)
    }
}

/// Owned 1-bit image
///
/// Pixels are stored in the panel's frame buffer layout: row-major,
/// MSB-first, 1 = white. Snapshotting a [`PixelSource`] into a `Frame` is a
/// deep copy; later changes to the source do not affect it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Frame {
    /// Create an all-white frame
    pub fn new(width: u32, height: u32) -> Self {
        let mut frame = Self {
            width,
            height,
            data: vec![0x00; framebuffer::buffer_len(width, height)],
        };
        frame.fill(true);
        frame
    }

    /// Deep copy of any pixel source
    pub fn from_source<P: PixelSource + ?Sized>(source: &P) -> Self {
        let (width, height) = (source.width(), source.height());
        Self {
            width,
            height,
            data: framebuffer::encode(source, height, width),
        }
    }

    /// Wrap an already packed buffer
    ///
    /// Returns `None` if `data` is not exactly `ceil(width * height / 8)` bytes.
    pub fn from_packed(width: u32, height: u32, data: Vec<u8>) -> Option<Self> {
        (data.len() == framebuffer::buffer_len(width, height)).then_some(Self {
            width,
            height,
            data,
        })
    }

    /// Packed frame buffer bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Set every pixel to white (`true`) or black (`false`)
    pub fn fill(&mut self, white: bool) {
        if white {
            self.data.fill(0xFF);
            let tail = self.pixel_count() % 8;
            if tail != 0 {
                // Keep padding bits clear so equal images compare equal
                if let Some(last) = self.data.last_mut() {
                    *last = 0xFF << (8 - tail);
                }
            }
        } else {
            self.data.fill(0x00);
        }
    }

    /// Set one pixel. Out-of-bounds coordinates are ignored.
    pub fn set_pixel(&mut self, x: u32, y: u32, white: bool) {
        if x >= self.width || y >= self.height {
            return;
        }
        let (index, mask) = self.locate(x, y);
        if white {
            self.data[index] |= mask;
        } else {
            self.data[index] &= !mask;
        }
    }

    /// Number of pixels
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    fn locate(&self, x: u32, y: u32) -> (usize, u8) {
        let pixel = x as usize + y as usize * self.width as usize;
        (pixel / 8, 0x80 >> (pixel % 8))
    }
}

impl PixelSource for Frame {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn is_white(&self, x: u32, y: u32) -> bool {
        let (index, mask) = self.locate(x, y);
        self.data[index] & mask != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_frame_is_white() {
        let frame = Frame::new(10, 3);
        assert_eq!(frame.as_bytes().len(), 4);
        assert!((0..3).all(|y| (0..10).all(|x| frame.is_white(x, y))));
        // 30 pixels: last byte carries 6 pixels, padding stays clear
        assert_eq!(frame.as_bytes()[3], 0xFC);
    }

    #[test]
    fn new_frame_equals_snapshot_of_itself() {
        let frame = Frame::new(10, 3);
        assert_eq!(Frame::from_source(&frame), frame);
    }

    #[test]
    fn set_pixel_packs_msb_first() {
        let mut frame = Frame::new(16, 1);
        frame.set_pixel(0, 0, false);
        frame.set_pixel(9, 0, false);
        assert_eq!(frame.as_bytes(), &[0x7F, 0xBF]);
        assert!(!frame.is_white(9, 0));
        assert!(frame.is_white(8, 0));
    }

    #[test]
    fn set_pixel_out_of_bounds_is_ignored() {
        let mut frame = Frame::new(8, 2);
        frame.set_pixel(8, 0, false);
        frame.set_pixel(0, 2, false);
        assert_eq!(frame, Frame::new(8, 2));
    }

    #[test]
    fn snapshot_is_independent_of_source() {
        let mut source = Frame::new(8, 8);
        let snapshot = Frame::from_source(&source);
        source.set_pixel(3, 3, false);
        assert!(snapshot.is_white(3, 3));
        assert_ne!(snapshot, source);
    }

    #[test]
    fn from_packed_checks_length() {
        assert!(Frame::from_packed(8, 2, vec![0xFF, 0x00]).is_some());
        assert!(Frame::from_packed(8, 2, vec![0xFF]).is_none());
    }
}
