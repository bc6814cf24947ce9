//! Frame buffer encoding
//!
//! The controller takes one bit per pixel, row-major, most significant bit
//! first. A set bit is white.

use alloc::vec;
use alloc::vec::Vec;

use crate::error::DimensionMismatch;
use crate::image::PixelSource;

/// Round down to a multiple of 8
pub fn round_down_to_multiple_of_8(value: u32) -> u32 {
    value & !7
}

/// Round up to a multiple of 8
///
/// Values above the largest multiple of 8 saturate to it.
pub fn round_up_to_multiple_of_8(value: u32) -> u32 {
    value
        .checked_next_multiple_of(8)
        .unwrap_or(round_down_to_multiple_of_8(u32::MAX))
}

/// Bytes needed to hold `width * height` pixels
pub fn buffer_len(width: u32, height: u32) -> usize {
    (width as usize * height as usize).div_ceil(8)
}

/// Encode the top-left `width x height` pixels of `source`
pub fn encode<P: PixelSource + ?Sized>(source: &P, height: u32, width: u32) -> Vec<u8> {
    encode_region(source, 0, 0, height, width)
}

/// Encode a `w x h` region of `source` starting at (x, y)
///
/// The region is not checked against the source. Pixels past its edges
/// encode as black.
pub fn encode_region<P: PixelSource + ?Sized>(
    source: &P,
    x: u32,
    y: u32,
    h: u32,
    w: u32,
) -> Vec<u8> {
    let mut buffer = vec![0x00; buffer_len(w, h)];
    let (src_w, src_h) = (source.width(), source.height());

    for row in 0..h {
        let sy = y + row;
        if sy >= src_h {
            break;
        }
        for col in 0..w {
            let sx = x + col;
            if sx >= src_w {
                break;
            }
            if source.is_white(sx, sy) {
                let pixel = col as usize + row as usize * w as usize;
                buffer[pixel / 8] |= 0x80 >> (pixel % 8);
            }
        }
    }

    buffer
}

/// Encode a source that must be exactly `width x height`
///
/// # Errors
///
/// Returns [`DimensionMismatch`] if the source has any other size.
pub fn encode_exact<P: PixelSource + ?Sized>(
    source: &P,
    width: u32,
    height: u32,
) -> Result<Vec<u8>, DimensionMismatch> {
    check_dimensions(source, width, height)?;
    Ok(encode(source, height, width))
}

/// Check that `source` is exactly `width x height`
pub fn check_dimensions<P: PixelSource + ?Sized>(
    source: &P,
    width: u32,
    height: u32,
) -> Result<(), DimensionMismatch> {
    if source.width() != width || source.height() != height {
        return Err(DimensionMismatch {
            expected_width: width,
            expected_height: height,
            width: source.width(),
            height: source.height(),
        });
    }
    Ok(())
}
