//! Frame diff helpers for partial updates.
//!
//! Pure logic (no hardware) so it can be unit-tested without a panel.

use crate::error::DimensionMismatch;
use crate::framebuffer::{check_dimensions, round_down_to_multiple_of_8, round_up_to_multiple_of_8};
use crate::image::{Frame, PixelSource};

/// Smallest rectangle enclosing every changed pixel.
///
/// `right` and `bottom` are exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

/// Area handed to a partial refresh, in panel pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    /// X coordinate (multiple of 8 once aligned)
    pub x: u32,
    /// Y coordinate
    pub y: u32,
    /// Height
    pub h: u32,
    /// Width (multiple of 8 once aligned)
    pub w: u32,
}

impl Region {
    /// Create a new region
    #[allow(clippy::many_single_char_names)]
    pub fn new(x: u32, y: u32, h: u32, w: u32) -> Self {
        Self { x, y, h, w }
    }

    /// Widen horizontally to byte boundaries: x rounds down, w rounds up.
    ///
    /// Rounding w (not x + w) matches the controller's addressing and can add
    /// up to 7 pixels on each side.
    pub fn aligned(self) -> Self {
        Self {
            x: round_down_to_multiple_of_8(self.x),
            w: round_up_to_multiple_of_8(self.w),
            ..self
        }
    }

    /// Refresh area covering `bbox`, clamped to a `width x height` panel.
    pub fn covering(bbox: BoundingBox, width: u32, height: u32) -> Self {
        let x = round_down_to_multiple_of_8(bbox.left);
        let w = round_up_to_multiple_of_8(bbox.right - x).min(width);
        let y = bbox.top;
        let h = (bbox.bottom - y).min(height);
        Self { x, y, h, w }
    }

    /// The 8-byte dimension header the partial refresh commands take.
    pub fn header(&self) -> [u8; 8] {
        [
            (self.x >> 8) as u8,
            (self.x & 0xF8) as u8,
            (self.y >> 8) as u8,
            (self.y & 0xFF) as u8,
            (self.w >> 8) as u8,
            (self.w & 0xF8) as u8,
            (self.h >> 8) as u8,
            (self.h & 0xFF) as u8,
        ]
    }
}

/// Compute the bounding box of all pixels that differ.
/// Returns `Ok(None)` if the frames are identical.
///
/// # Errors
///
/// [`DimensionMismatch`] if `current` is not the size of `last`.
pub fn bounding_box(
    last: &Frame,
    current: &Frame,
) -> Result<Option<BoundingBox>, DimensionMismatch> {
    check_dimensions(current, last.width(), last.height())?;

    let width = current.width() as usize;
    let pixels = current.pixel_count();

    let mut min_x = usize::MAX;
    let mut max_x = 0usize;
    let mut min_y = usize::MAX;
    let mut max_y = 0usize;
    let mut changed = false;

    for (i, (&new_b, &old_b)) in current.as_bytes().iter().zip(last.as_bytes()).enumerate() {
        let delta = new_b ^ old_b;
        if delta == 0 {
            continue;
        }
        for bit in 0..8 {
            if delta & (0x80 >> bit) == 0 {
                continue;
            }
            let pixel = i * 8 + bit;
            if pixel >= pixels {
                break;
            }
            changed = true;
            let (x, y) = (pixel % width, pixel / width);
            min_x = min_x.min(x);
            max_x = max_x.max(x);
            min_y = min_y.min(y);
            max_y = max_y.max(y);
        }
    }

    Ok(changed.then(|| BoundingBox {
        left: min_x as u32,
        top: min_y as u32,
        right: max_x as u32 + 1,
        bottom: max_y as u32 + 1,
    }))
}

/// `true` if every pixel of `frame` inside `bbox` is white.
pub fn is_all_white(frame: &Frame, bbox: BoundingBox) -> bool {
    (bbox.top..bbox.bottom).all(|y| (bbox.left..bbox.right).all(|x| frame.is_white(x, y)))
}
